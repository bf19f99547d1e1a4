//! Loadable subject
//!
//! The mutable producer side of a loadable value: the owning service
//! pushes new states in, consumers read through the derived views.
//!
//! The subject owns a [`LoadableObservable`] over its own state holder
//! and exposes that wrapper's whole read surface via [`Deref`], so a
//! service can hand the subject out as a plain wrapper while keeping
//! the mutation entry points to itself.

// Imports
use {
	crate::{Loadable, LoadableObservable, ShareMode},
	core::{cell::RefCell, fmt, ops::Deref},
	loadables_stream::{BehaviorSubject, Observable, Subscription},
};

/// The mutable state of a loadable value.
///
/// Holds the current state, starting at `Loading` unless constructed
/// with an initial value. Steady-state transitions may go back and
/// forth between loading and loaded; a terminal [`fail`](Self::fail) or
/// [`complete`](Self::complete) ends the sequence for all current and
/// future consumers, after which further transitions are discarded.
pub struct LoadableSubject<T, E> {
	/// State holder consumer subscriptions attach to
	subject: BehaviorSubject<Loadable<T>, E>,

	/// Read surface over the state holder
	observable: LoadableObservable<T, E>,

	/// Pending load, cancelled when replaced
	load: RefCell<Option<Subscription>>,
}

impl<T, E> LoadableSubject<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Creates a subject that starts loading
	#[must_use]
	pub fn new() -> Self {
		Self::from_state(Loadable::Loading)
	}

	/// Creates a subject that starts loaded with `value`
	#[must_use]
	pub fn with_value(value: T) -> Self {
		Self::from_state(Loadable::Loaded(value))
	}

	/// Creates a subject with `state` as its initial state
	fn from_state(state: Loadable<T>) -> Self {
		let subject = BehaviorSubject::new(state);

		// The behavior subject is a persistent state holder, so its
		// stream is already safe to share directly
		let observable = LoadableObservable::new(subject.observable(), ShareMode::Multicast);

		Self {
			subject,
			observable,
			load: RefCell::new(None),
		}
	}

	/// Indicates to consumers that the value is loading, discarding any
	/// previous payload
	pub fn set_loading(&self) {
		self.subject.next(Loadable::Loading);
	}

	/// Indicates to consumers that the value is now `value`
	pub fn set_loaded(&self, value: T) {
		self.subject.next(Loadable::Loaded(value));
	}

	/// Terminally fails: all current and future consumers receive the
	/// error, and no further states are deliverable
	pub fn fail(&self, err: E) {
		self.subject.error(err);
	}

	/// Terminally completes: all current and future consumers receive
	/// the completion signal, and no further states are deliverable
	pub fn complete(&self) {
		self.subject.complete();
	}

	/// Marks this subject loading, then loads it from the first value
	/// of `source`.
	///
	/// On that value the subject becomes loaded and detaches from the
	/// source, ignoring anything it might emit afterwards; a source
	/// error fails the subject instead. Starting a new load cancels a
	/// still-pending one.
	pub fn load_from(&self, source: &Observable<T, E>) {
		self.set_loading();

		let subscription = source.first().subscribe_with(
			{
				let subject = self.subject.clone();
				move |value| subject.next(Loadable::Loaded(value))
			},
			{
				let subject = self.subject.clone();
				move |err| subject.error(err)
			},
			|| (),
		);

		// Cancel the superseded load outside the borrow, as its
		// teardown may cascade arbitrarily
		let previous = self.load.borrow_mut().replace(subscription);
		drop(previous);
	}

	/// Returns the read surface of this subject.
	///
	/// Cloning the returned wrapper is how a service typically exposes
	/// the value without exposing the mutation entry points.
	#[must_use]
	pub const fn as_observable(&self) -> &LoadableObservable<T, E> {
		&self.observable
	}
}

impl<T, E> Default for LoadableSubject<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> Deref for LoadableSubject<T, E> {
	type Target = LoadableObservable<T, E>;

	fn deref(&self) -> &Self::Target {
		&self.observable
	}
}

impl<T, E> fmt::Debug for LoadableSubject<T, E>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadableSubject")
			.field("subject", &self.subject)
			.finish_non_exhaustive()
	}
}
