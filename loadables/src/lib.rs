//! Loadable values over push-based streams.
//!
//! Models a value that starts out unavailable and transitions to
//! available, and possibly back, as an asynchronous producer updates
//! it. Consumers read through derived views of one shared state
//! stream, so attaching any number of them never re-runs the producer.

// Modules
pub mod combine;
pub mod create;
pub mod loadable;
pub mod loadable_observable;
pub mod loadable_subject;
pub mod ops;

// Exports
pub use self::{
	combine::ld_combine_latest,
	create::{of_loaded, of_loaded_observable},
	loadable::{are_loaded, IntoLoaded, Loadable},
	loadable_observable::{ExpectLoadedError, LoadableObservable, ShareMode},
	loadable_subject::LoadableSubject,
	ops::{ld_filter, ld_map},
};
