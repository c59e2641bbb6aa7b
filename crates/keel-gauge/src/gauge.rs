use serde::{Deserialize, Serialize};

/// A named scalar value. The last write wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    pub name: String,
    pub value: i64,
}

impl Gauge {
    /// A gauge reading zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
        }
    }

    /// Copy of this gauge reading `value`.
    pub fn with_value(&self, value: i64) -> Self {
        Self {
            name: self.name.clone(),
            value,
        }
    }
}
