//! Named scalar gauges fed from message payloads.
//!
//! A [`GaugeHandler`] is bound to one gauge name. Each message it processes
//! is converted to an `i64` and written to a [`GaugeService`] as the gauge's
//! new value. Payloads must be JSON numbers or base-10 integer strings;
//! anything else is rejected with a conversion error naming the payload type.
//!
//! # Modules
//!
//! - [`error`] — Error types for gauge operations
//! - [`gauge`] — The [`Gauge`] value type
//! - [`traits`] — The [`GaugeService`] trait
//! - [`memory`] — [`InMemoryGaugeService`], backed by a keel-store repository
//! - [`handler`] — [`GaugeHandler`], [`Message`] and [`convert_to_long`]

pub mod error;
pub mod gauge;
pub mod handler;
pub mod memory;
pub mod traits;

pub use error::{GaugeError, Result};
pub use gauge::Gauge;
pub use handler::{convert_to_long, GaugeHandler, Message};
pub use memory::InMemoryGaugeService;
pub use traits::GaugeService;
