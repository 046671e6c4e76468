use crate::signal_message::SignalMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedSignal {
    Message(SignalMessage),
    Closed,
}
