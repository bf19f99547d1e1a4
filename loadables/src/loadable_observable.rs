//! Loadable observable
//!
//! The multicast wrapper: one underlying state stream, four derived
//! views, a single shared upstream connection.
//!
//! A `LoadableObservable` is intended for code that consumes the
//! loadable value. It is usually not constructed directly but obtained
//! from a [`LoadableSubject`](crate::LoadableSubject) owned by whatever
//! service manages the value.

// Imports
use {
	crate::Loadable,
	loadables_stream::{NextValue, Observable},
};

/// How a source state stream is shared between the wrapper's consumers.
///
/// Choosing correctly is the caller's contract: the wrapper behaves
/// deterministically per the chosen mode and does not detect misuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareMode {
	/// The source is already safe to share (e.g. backed by a persistent
	/// state holder) and is used directly as the subscription point.
	///
	/// Declaring a cold source as multicast makes every consumer
	/// independently re-trigger the source's side effects, and the
	/// derived views fall out of sync with each other. This is allowed
	/// to happen, not suppressed.
	Multicast,

	/// A ref-counted share layer is inserted: the first consumer
	/// creates the single upstream connection, the last detach tears it
	/// down, and a later re-attach connects fresh.
	RefCounted,

	/// A share layer that connects on the first consumer and never
	/// disconnects. Wrapping an unbounded source keeps the connection
	/// open indefinitely; accepted, not diagnosed.
	Eager,
}

/// Error of the strict first-value view.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpectLoadedError<E> {
	/// The state observed at attachment was still loading.
	///
	/// Callers that would rather wait for the value should use the
	/// lenient [`LoadableObservable::first_data`] instead.
	#[error("loadable was not loaded at subscribe time")]
	NotLoaded,

	/// The state stream itself errored
	#[error("loadable state stream errored")]
	Upstream(E),
}

/// The state over time of a loadable value, with its derived views.
///
/// All consumers of the same wrapper observe the same sequence of state
/// transitions: the wrapper shares one upstream connection per its
/// [`ShareMode`], and each derived view additionally shares its own
/// subscription to that point, so N consumers of one view cost a single
/// upstream attachment.
pub struct LoadableObservable<T, E> {
	/// Full state stream; the subscription point every view derives from
	full: Observable<Loadable<T>, E>,

	/// Availability view
	loaded: Observable<bool, E>,

	/// Values view
	data: Observable<T, E>,

	/// One-shot first value
	first_data: Observable<T, E>,

	/// One-shot strict first value
	first_data_expect_loaded: Observable<T, ExpectLoadedError<E>>,
}

impl<T, E> LoadableObservable<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Creates a wrapper over `source`, shared per `mode`.
	///
	/// The derived views are computed here, once, from the shared
	/// subscription point, never per consumer.
	pub fn new(source: Observable<Loadable<T>, E>, mode: ShareMode) -> Self {
		let full = match mode {
			ShareMode::Multicast => source,
			ShareMode::RefCounted => source.share(),
			ShareMode::Eager => source.share_eager(),
		};

		let loaded = full.map(|state: Loadable<T>| state.is_loaded()).share();
		let data = full.filter_map(Loadable::loaded).share();
		let first_data = data.first();
		let first_data_expect_loaded = full
			.map_err(ExpectLoadedError::Upstream)
			.first()
			.try_map(|state| match state {
				Loadable::Loading => Err(ExpectLoadedError::NotLoaded),
				Loadable::Loaded(value) => Ok(value),
			});

		Self {
			full,
			loaded,
			data,
			first_data,
			first_data_expect_loaded,
		}
	}

	/// The underlying state stream.
	///
	/// For most scenarios one of the derived views is the better fit.
	#[must_use]
	pub const fn full(&self) -> &Observable<Loadable<T>, E> {
		&self.full
	}

	/// Stream of changes to the loading state: one boolean per upstream
	/// state transition, `true` iff that state is loaded
	#[must_use]
	pub const fn loaded(&self) -> &Observable<bool, E> {
		&self.loaded
	}

	/// Stream of the loaded values: loading states are suppressed, each
	/// loaded state delivers its payload
	#[must_use]
	pub const fn data(&self) -> &Observable<T, E> {
		&self.data
	}

	/// One-shot stream of the next loaded value from the attachment
	/// point forward: delivers it, then completes.
	///
	/// Values that passed before attachment are not replayed. If the
	/// state stream terminates first, the one-shot terminates without
	/// ever delivering a value.
	#[must_use]
	pub const fn first_data(&self) -> &Observable<T, E> {
		&self.first_data
	}

	/// Strict one-shot: inspects only the first state observed after
	/// attachment. If it is loaded, delivers the payload and completes;
	/// if it is still loading, errors immediately with
	/// [`ExpectLoadedError::NotLoaded`] instead of waiting.
	#[must_use]
	pub const fn first_data_expect_loaded(&self) -> &Observable<T, ExpectLoadedError<E>> {
		&self.first_data_expect_loaded
	}

	/// [`first_data`](Self::first_data) as a future
	#[must_use]
	pub fn first_data_future(&self) -> NextValue<T, E> {
		self.first_data.next_value()
	}

	/// [`first_data_expect_loaded`](Self::first_data_expect_loaded) as
	/// a future
	#[must_use]
	pub fn first_data_expect_loaded_future(&self) -> NextValue<T, ExpectLoadedError<E>> {
		self.first_data_expect_loaded.next_value()
	}

	/// Applies a state-stream operator, rewrapping the result.
	///
	/// The result is derived from this wrapper's shared subscription
	/// point, so it is already multicast.
	pub fn pipe<U, Op>(&self, op: Op) -> LoadableObservable<U, E>
	where
		U: Clone + 'static,
		Op: FnOnce(Observable<Loadable<T>, E>) -> Observable<Loadable<U>, E>,
	{
		LoadableObservable::new(op(self.full.clone()), ShareMode::Multicast)
	}
}

impl<T, E> Clone for LoadableObservable<T, E> {
	fn clone(&self) -> Self {
		Self {
			full: self.full.clone(),
			loaded: self.loaded.clone(),
			data: self.data.clone(),
			first_data: self.first_data.clone(),
			first_data_expect_loaded: self.first_data_expect_loaded.clone(),
		}
	}
}
