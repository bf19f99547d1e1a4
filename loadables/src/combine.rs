//! Combinators
//!
//! N-ary "all loaded" gates: a combined wrapper that is loaded exactly
//! while every input is loaded.

// Imports
use {
	crate::{Loadable, LoadableObservable, ShareMode},
	loadables_stream::Observable,
};

/// Combines loadable wrappers into one wrapper over all their payloads,
/// in input order.
///
/// The combination joins the full state streams of every input: on
/// every state transition of any single input, all latest states are
/// re-evaluated, emitting `Loaded` with all payloads when every input
/// is currently loaded and `Loading` otherwise. The gate is
/// level-sensitive: an input flipping back to loading immediately
/// re-emits `Loading`, without waiting for any other input's next tick.
///
/// The result is a ref-count shared wrapper, so its subscriptions
/// against the inputs live exactly as long as it has consumers.
///
/// With no inputs the result is vacuously loaded: it emits an empty
/// `Loaded(vec![])` once, then completes.
pub fn ld_combine_latest<T, E>(sources: &[LoadableObservable<T, E>]) -> LoadableObservable<Vec<T>, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	if sources.is_empty() {
		let source = Observable::from_iter([Loadable::Loaded(Vec::new())]);
		return LoadableObservable::new(source, ShareMode::RefCounted);
	}

	let fulls = sources.iter().map(|source| source.full().clone()).collect::<Vec<_>>();
	let combined =
		Observable::combine_latest(&fulls).map(|states| states.into_iter().collect::<Loadable<Vec<T>>>());

	LoadableObservable::new(combined, ShareMode::RefCounted)
}

impl<T, E> LoadableObservable<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Combines this wrapper with another into a pair wrapper, loaded
	/// only while both are loaded.
	///
	/// The heterogeneous counterpart of [`ld_combine_latest`]; chain it
	/// for wider tuples.
	pub fn combine_with<U>(&self, other: &LoadableObservable<U, E>) -> LoadableObservable<(T, U), E>
	where
		U: Clone + 'static,
	{
		let combined = self.full().combine_latest_with(other.full(), Loadable::zip);
		LoadableObservable::new(combined, ShareMode::RefCounted)
	}
}
