//! The [`GaugeService`] trait defining the named-value store a handler
//! writes to.

use crate::error::Result;
use crate::gauge::Gauge;

/// Storage backend for named gauges.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait GaugeService: Send + Sync {
    /// Return the gauge called `name`, creating a zero-valued one on first
    /// use. Calling it again never resets the value.
    fn get_or_create(&self, name: &str) -> Result<Gauge>;

    /// Set the value of the gauge called `name`, creating it if needed.
    fn set_value(&self, name: &str, value: i64) -> Result<()>;

    /// Read a gauge without creating it.
    fn find(&self, name: &str) -> Result<Option<Gauge>>;
}
