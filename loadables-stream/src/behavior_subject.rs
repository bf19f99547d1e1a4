//! Behavior subjects
//!
//! A [`Subject`] holding a current value, replayed to each new
//! subscriber at attach time.

// Imports
use {
	crate::{FnObserver, Observable, Subject, Subscriber},
	core::{
		cell::{Cell, RefCell},
		fmt,
	},
	std::rc::Rc,
};

/// A multicast stream with a current value.
///
/// New subscribers immediately receive the current value, then every
/// subsequent one. This is the natural backing for a persistent state
/// holder: whatever the state was when a consumer attaches, the
/// consumer sees it.
pub struct BehaviorSubject<T, E> {
	/// Fan-out hub
	subject: Subject<T, E>,

	/// Current value, updated on every push
	current: Rc<RefCell<T>>,

	/// Pushed values not yet broadcast by the hub.
	///
	/// Non-zero only while a push sits queued behind a running
	/// broadcast; attach-time replay is suppressed then, as the queued
	/// broadcast itself reaches the new subscriber.
	pending: Rc<Cell<usize>>,
}

impl<T, E> BehaviorSubject<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Creates a behavior subject with `initial` as its current value
	#[must_use]
	pub fn new(initial: T) -> Self {
		let subject = Subject::new();
		let pending = Rc::new(Cell::new(0_usize));

		// Watcher counting down each broadcast value. Attached before
		// any consumer, so it observes each delivery first; released
		// by the subject on termination.
		let (watcher, guard) = Subscriber::new(FnObserver::new(
			{
				let pending = Rc::clone(&pending);
				move |_value: T| pending.set(pending.get() - 1)
			},
			|_err: E| (),
			|| (),
		));
		subject.attach(watcher);
		guard.detach();

		Self {
			subject,
			current: Rc::new(RefCell::new(initial)),
			pending,
		}
	}

	/// Returns the current value
	#[must_use]
	pub fn get(&self) -> T {
		self.current.borrow().clone()
	}

	/// Returns if this subject has terminated
	#[must_use]
	pub fn is_terminated(&self) -> bool {
		self.subject.is_terminated()
	}

	/// Sets the current value and delivers it to all current
	/// subscribers.
	///
	/// Discarded if this subject already terminated.
	pub fn next(&self, value: T) {
		if self.subject.is_terminated() {
			return;
		}

		*self.current.borrow_mut() = value.clone();
		self.pending.set(self.pending.get() + 1);
		self.subject.next(value);
	}

	/// Terminally errors, see [`Subject::error`]
	pub fn error(&self, err: E) {
		self.subject.error(err);
	}

	/// Terminally completes, see [`Subject::complete`]
	pub fn complete(&self) {
		self.subject.complete();
	}

	/// Returns the consumer side of this subject.
	///
	/// Inherently multicast, like [`Subject::observable`], except each
	/// subscription starts with the current value. After termination,
	/// subscriptions receive only the terminal signal.
	#[must_use]
	pub fn observable(&self) -> Observable<T, E> {
		let subject = self.clone();
		Observable::new(move |subscriber| {
			if subject.subject.is_terminated() {
				subject.subject.attach(subscriber);
				return;
			}

			// The current value is still queued behind a running
			// broadcast and will reach this subscriber on its own;
			// replaying it here too would deliver it twice
			if subject.pending.get() > 0 {
				subject.subject.attach(subscriber);
				return;
			}

			// Register first so no transition between the replay and
			// the subscription is missed
			let current = subject.current.borrow().clone();
			subject.subject.attach(subscriber.clone());
			subscriber.next(current);
		})
	}
}

impl<T, E> Clone for BehaviorSubject<T, E> {
	fn clone(&self) -> Self {
		Self {
			subject: self.subject.clone(),
			current: Rc::clone(&self.current),
			pending: Rc::clone(&self.pending),
		}
	}
}

impl<T, E> fmt::Debug for BehaviorSubject<T, E>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BehaviorSubject")
			.field("current", &*self.current.borrow())
			.field("subject", &self.subject)
			.finish()
	}
}
