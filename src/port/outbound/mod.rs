//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the relational
//! store and the time source.

pub mod clock;
pub mod store;
