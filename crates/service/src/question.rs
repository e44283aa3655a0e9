use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One quiz item. Stored and returned verbatim; never inspected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question(pub Value);

impl Question {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Question {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

/// Result of a successful replace-all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SaveConfirmation {
    pub count: usize,
}

/// Name of a JSON value's kind, for diagnostics.
pub fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
