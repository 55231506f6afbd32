//! Domain events runtime bridge for the web server.
//!
//! Receives goal status events via DomainEventSink and hands them to a
//! background worker that turns each one into a stored notification and a
//! push attempt. The write that produced an event never waits on this.

mod queue_worker;
mod sink;

pub use sink::NotificationEventSink;
