use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{GaugeError, Result};
use crate::traits::GaugeService;

/// A message carrying a JSON payload and string headers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub payload: Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Message {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: payload.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Feeds numeric message payloads into one named gauge.
///
/// The gauge is created when the handler is built, so it exists (reading
/// zero) even before the first message arrives.
pub struct GaugeHandler {
    service: Arc<dyn GaugeService>,
    name: String,
}

impl GaugeHandler {
    /// Bind a handler to the gauge called `name`, creating it if needed.
    pub fn new(service: Arc<dyn GaugeService>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GaugeError::NullArgument("Gauge Name"));
        }
        service.get_or_create(&name)?;
        Ok(Self { service, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert the message payload and store it as the gauge value.
    ///
    /// An absent message is ignored.
    pub fn process(&self, message: Option<&Message>) -> Result<()> {
        let Some(message) = message else {
            debug!(gauge = %self.name, "no message; skipping");
            return Ok(());
        };
        let value = convert_to_long(&message.payload)?;
        self.service.set_value(&self.name, value)?;
        debug!(gauge = %self.name, value, "gauge updated");
        Ok(())
    }
}

impl std::fmt::Debug for GaugeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeHandler")
            .field("name", &self.name)
            .finish()
    }
}

/// Interpret a payload as an `i64`.
///
/// Every JSON number is accepted: integers pass through, floats truncate
/// toward zero, and numbers outside the `i64` range (unsigned or floating)
/// clamp to `i64::MIN` / `i64::MAX`. Strings must be base-10 integers with an
/// optional sign that fit in an `i64`. Everything else fails with
/// [`GaugeError::Conversion`] naming the payload type.
pub fn convert_to_long(payload: &Value) -> Result<i64> {
    match payload {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.is_u64() {
                Ok(i64::MAX)
            } else {
                // `as` saturates at the i64 bounds.
                n.as_f64()
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| conversion("number", format!("{n} is not representable")))
            }
        }
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| conversion("string", format!("{s:?}: {e}"))),
        other => Err(conversion(type_name(other), "unsupported payload type".into())),
    }
}

fn conversion(type_name: &'static str, reason: String) -> GaugeError {
    GaugeError::Conversion { type_name, reason }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
