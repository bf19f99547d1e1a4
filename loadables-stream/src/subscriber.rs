//! Subscribers
//!
//! The producer-side handle of a single attachment, plus the
//! consumer-side guard that detaches it.

// Imports
use {
	crate::Observer,
	core::{
		cell::{Cell, RefCell},
		fmt, mem,
	},
	std::{collections::VecDeque, rc::Rc},
};

/// A single event on a stream
pub(crate) enum Event<T, E> {
	/// Next value
	Next(T),

	/// Terminal error
	Error(E),

	/// Terminal completion
	Complete,
}

/// Subscriber inner
struct Inner<T, E> {
	/// Observer, dropped once closed
	observer: RefCell<Option<Box<dyn Observer<T, E>>>>,

	/// Events pushed while a delivery was already running
	queue: RefCell<VecDeque<Event<T, E>>>,

	/// Upstream attachments released when this subscriber closes
	teardowns: RefCell<Vec<Subscription>>,

	/// Whether this subscriber still accepts events
	closed: Cell<bool>,

	/// Whether a delivery loop is currently running
	delivering: Cell<bool>,
}

impl<T, E> Inner<T, E> {
	/// Releases the observer and all upstream attachments.
	///
	/// Must not be called while a delivery loop is running.
	fn finalize(&self) {
		drop(self.observer.borrow_mut().take());
		self.queue.borrow_mut().clear();

		// Dropping the teardowns may cascade into upstream
		// unsubscriptions, so release the borrow first
		let teardowns = mem::take(&mut *self.teardowns.borrow_mut());
		drop(teardowns);
	}
}

/// Producer-side handle to a single attached observer.
///
/// Producers push events through this handle. Once a terminal event is
/// delivered, or the matching [`Subscription`] is dropped, the handle
/// closes: the observer and all registered teardowns are released and
/// every further event is discarded.
///
/// Events pushed re-entrantly, from within a delivery callback, are
/// queued and delivered in push order once the current callback returns.
pub struct Subscriber<T, E> {
	/// Inner
	inner: Rc<Inner<T, E>>,
}

impl<T, E> Subscriber<T, E> {
	/// Creates a subscriber delivering to `observer`, along with the
	/// guard that detaches it
	pub(crate) fn new<O>(observer: O) -> (Self, Subscription)
	where
		O: Observer<T, E> + 'static,
		T: 'static,
		E: 'static,
	{
		let inner = Rc::new(Inner {
			observer:   RefCell::new(Some(Box::new(observer) as Box<dyn Observer<T, E>>)),
			queue:      RefCell::new(VecDeque::new()),
			teardowns:  RefCell::new(Vec::new()),
			closed:     Cell::new(false),
			delivering: Cell::new(false),
		});

		let guard = Subscription::from_fn({
			let inner = Rc::clone(&inner);
			move || {
				if inner.closed.replace(true) {
					return;
				}

				// If mid-delivery, the delivery loop finalizes once
				// the current callback returns
				if !inner.delivering.get() {
					inner.finalize();
				}
			}
		});

		(Self { inner }, guard)
	}

	/// Returns if this subscriber no longer accepts events
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.inner.closed.get()
	}

	/// Delivers the next value
	pub fn next(&self, value: T) {
		self.push(Event::Next(value));
	}

	/// Delivers a terminal error
	pub fn error(&self, err: E) {
		self.push(Event::Error(err));
	}

	/// Delivers the terminal completion signal
	pub fn complete(&self) {
		self.push(Event::Complete);
	}

	/// Registers an upstream attachment to release when this
	/// subscriber closes.
	///
	/// If the subscriber is already closed, `subscription` is
	/// released immediately.
	pub fn add_teardown(&self, subscription: Subscription) {
		if self.inner.closed.get() {
			drop(subscription);
			return;
		}

		self.inner.teardowns.borrow_mut().push(subscription);
	}

	/// Pushes an event, then runs the delivery loop unless one is
	/// already running further up the call stack
	fn push(&self, event: Event<T, E>) {
		let inner = &*self.inner;
		if inner.closed.get() {
			return;
		}

		inner.queue.borrow_mut().push_back(event);
		if inner.delivering.get() {
			return;
		}

		inner.delivering.set(true);
		loop {
			let event = inner.queue.borrow_mut().pop_front();
			let Some(event) = event else { break };
			if inner.closed.get() {
				break;
			}

			match event {
				Event::Next(value) => {
					let mut slot = inner.observer.borrow_mut();
					if let Some(observer) = slot.as_mut() {
						// The callback may push re-entrantly, which only
						// touches the queue, or unsubscribe, which only
						// sets `closed`.
						observer.next(value);
					}
				},
				Event::Error(err) => {
					inner.closed.set(true);
					let observer = inner.observer.borrow_mut().take();
					if let Some(mut observer) = observer {
						observer.error(err);
					}
				},
				Event::Complete => {
					inner.closed.set(true);
					let observer = inner.observer.borrow_mut().take();
					if let Some(mut observer) = observer {
						observer.complete();
					}
				},
			}
		}
		inner.delivering.set(false);

		if inner.closed.get() {
			inner.finalize();
		}
	}
}

impl<T, E> Clone for Subscriber<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T, E> fmt::Debug for Subscriber<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscriber")
			.field("closed", &self.inner.closed.get())
			.finish_non_exhaustive()
	}
}

/// Consumer-side guard of a single attachment.
///
/// Dropping it detaches: the matching subscriber closes and never
/// delivers another event. Detachment is the sole cancellation
/// primitive; there is no separate close or dispose call.
pub struct Subscription {
	/// Ran on drop, unless detached
	teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Creates a subscription running `f` when dropped
	pub(crate) fn from_fn<F>(f: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			teardown: Some(Box::new(f)),
		}
	}

	/// Detaches immediately.
	///
	/// Equivalent to dropping, but reads better at call sites.
	pub fn unsubscribe(self) {
		drop(self);
	}

	/// Disarms this guard, leaving the attachment alive for as long as
	/// the producer keeps it
	pub fn detach(mut self) {
		self.teardown = None;
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(teardown) = self.teardown.take() {
			teardown();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("armed", &self.teardown.is_some())
			.finish()
	}
}
