//! Domain events module.
//!
//! Provides the goal status events and the sink trait services emit them
//! through after a successful write.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
