use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JOIN_KEY: &str = "join";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalMessage(Map<String, Value>);

impl SignalMessage {
    pub fn join_announcement() -> Self {
        let mut fields = Map::new();
        fields.insert(JOIN_KEY.to_string(), Value::Bool(true));

        Self(fields)
    }

    pub fn is_join_announcement(&self) -> bool {
        self.0.len() == 1 && self.0.get(JOIN_KEY) == Some(&Value::Bool(true))
    }

    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_text(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}
