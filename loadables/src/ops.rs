//! Element-wise state-stream operators
//!
//! Thin stateless glue for [`LoadableObservable::pipe`]: loading states
//! pass through untouched, loaded payloads are individually mapped or
//! filtered.

// Imports
use {crate::Loadable, loadables_stream::Observable};

/// Maps the payload of each loaded state through `project`.
///
/// Loading states pass through unchanged.
pub fn ld_map<T, U, E, F>(project: F) -> impl FnOnce(Observable<Loadable<T>, E>) -> Observable<Loadable<U>, E>
where
	T: 'static,
	U: 'static,
	E: 'static,
	F: Fn(T) -> U + 'static,
{
	move |source| source.map(move |state| state.map(&project))
}

/// Keeps only the loaded states whose payload satisfies `predicate`.
///
/// Loading states pass through unchanged.
pub fn ld_filter<T, E, F>(predicate: F) -> impl FnOnce(Observable<Loadable<T>, E>) -> Observable<Loadable<T>, E>
where
	T: 'static,
	E: 'static,
	F: Fn(&T) -> bool + 'static,
{
	move |source| {
		source.filter(move |state| match state {
			Loadable::Loading => true,
			Loadable::Loaded(value) => predicate(value),
		})
	}
}
