//! Push-based observable streams.
//!
//! A small single-threaded stream primitive: cold [`Observable`]s,
//! multicast [`Subject`]s, synchronous delivery to all current
//! subscribers, terminal completion and error signals, and RAII
//! [`Subscription`] guards as the sole cancellation primitive.
//!
//! "Concurrency" here means interleaved event delivery on one thread:
//! no operation blocks, and waiting is represented by not yet having
//! received an event.

// Modules
pub mod behavior_subject;
mod combine;
pub mod next_value;
pub mod observable;
pub mod observer;
mod share;
pub mod subject;
pub mod subscriber;

// Exports
pub use self::{
	behavior_subject::BehaviorSubject,
	next_value::{NextValue, NextValueError},
	observable::Observable,
	observer::{FnObserver, Observer},
	subject::Subject,
	subscriber::{Subscriber, Subscription},
};
