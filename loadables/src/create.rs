//! Creation helpers
//!
//! Simple ways to create already-loaded wrappers, mostly for unit
//! tests and fixed data.

// Imports
use {
	crate::{Loadable, LoadableObservable, ShareMode},
	loadables_stream::Observable,
};

/// Wraps a plain value stream as a loadable wrapper where every value
/// arrives already loaded
pub fn of_loaded_observable<T, E>(source: &Observable<T, E>) -> LoadableObservable<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	LoadableObservable::new(source.map(Loadable::Loaded), ShareMode::RefCounted)
}

/// Creates a wrapper emitting each of `values` as loaded, then
/// completing
pub fn of_loaded<T, E, I>(values: I) -> LoadableObservable<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
	I: IntoIterator<Item = T> + Clone + 'static,
{
	of_loaded_observable(&Observable::from_iter(values))
}
