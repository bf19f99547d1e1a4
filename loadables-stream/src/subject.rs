//! Subjects
//!
//! A multicast hub: one producer side, any number of attached
//! consumers, synchronous fan-out in attachment order.

// Imports
use {
	crate::{subscriber::Event, Observable, Subscriber},
	core::{
		cell::{Cell, RefCell},
		fmt, mem,
	},
	std::{collections::VecDeque, rc::Rc},
};

/// Terminal state of a subject
#[derive(Clone)]
enum Terminal<E> {
	/// Completed
	Completed,

	/// Errored
	Errored(E),
}

/// Subject inner
struct Inner<T, E> {
	/// Attached subscribers; closed ones are pruned lazily
	subscribers: RefCell<Vec<Subscriber<T, E>>>,

	/// Terminal state, replayed to late attachments
	terminal: RefCell<Option<Terminal<E>>>,

	/// Events pushed while an emission was already running
	queue: RefCell<VecDeque<Event<T, E>>>,

	/// Whether an emission loop is currently running
	emitting: Cell<bool>,
}

/// A multicast stream.
///
/// Values pushed into the subject are delivered synchronously to every
/// subscriber attached at that point, in attachment order. A terminal
/// signal latches: later attachments receive it immediately, and all
/// further pushes are discarded.
pub struct Subject<T, E> {
	/// Inner
	inner: Rc<Inner<T, E>>,
}

impl<T, E> Subject<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Creates a new subject
	#[must_use]
	pub fn new() -> Self {
		let inner = Inner {
			subscribers: RefCell::new(Vec::new()),
			terminal:    RefCell::new(None),
			queue:       RefCell::new(VecDeque::new()),
			emitting:    Cell::new(false),
		};
		Self { inner: Rc::new(inner) }
	}

	/// Returns if this subject has terminated
	#[must_use]
	pub fn is_terminated(&self) -> bool {
		self.inner.terminal.borrow().is_some()
	}

	/// Delivers `value` to all current subscribers
	pub fn next(&self, value: T) {
		self.push(Event::Next(value));
	}

	/// Terminally errors: all current and future subscribers receive
	/// the error, and no further values are deliverable
	pub fn error(&self, err: E) {
		self.push(Event::Error(err));
	}

	/// Terminally completes: all current and future subscribers receive
	/// the completion signal, and no further values are deliverable
	pub fn complete(&self) {
		self.push(Event::Complete);
	}

	/// Returns the consumer side of this subject.
	///
	/// The subject is inherently multicast: every subscription of the
	/// returned observable attaches to this same hub.
	#[must_use]
	pub fn observable(&self) -> Observable<T, E> {
		let subject = self.clone();
		Observable::new(move |subscriber| subject.attach(subscriber))
	}

	/// Attaches a subscriber, replaying the terminal state if this
	/// subject already terminated
	pub(crate) fn attach(&self, subscriber: Subscriber<T, E>) {
		// Deliver outside the borrow, as the observer may call back
		// into this subject
		let terminal = self.inner.terminal.borrow().clone();
		match terminal {
			Some(Terminal::Completed) => subscriber.complete(),
			Some(Terminal::Errored(err)) => subscriber.error(err),
			None => self.inner.subscribers.borrow_mut().push(subscriber),
		}
	}

	/// Prunes detached subscribers, then snapshots the rest.
	///
	/// Emission iterates the snapshot so observers may attach, detach
	/// and push re-entrantly without holding a borrow.
	fn snapshot(&self) -> Vec<Subscriber<T, E>> {
		let mut subscribers = self.inner.subscribers.borrow_mut();
		subscribers.retain(|subscriber| !subscriber.is_closed());
		subscribers.clone()
	}

	/// Pushes an event, then runs the emission loop unless one is
	/// already running further up the call stack.
	///
	/// Queueing re-entrant pushes keeps the delivery order identical
	/// for every subscriber.
	fn push(&self, event: Event<T, E>) {
		let inner = &*self.inner;
		if inner.terminal.borrow().is_some() {
			return;
		}

		inner.queue.borrow_mut().push_back(event);
		if inner.emitting.get() {
			return;
		}

		inner.emitting.set(true);
		loop {
			let event = inner.queue.borrow_mut().pop_front();
			let Some(event) = event else { break };

			match event {
				Event::Next(value) => {
					for subscriber in &self.snapshot() {
						subscriber.next(value.clone());
					}
				},
				Event::Error(err) => {
					*inner.terminal.borrow_mut() = Some(Terminal::Errored(err.clone()));
					let subscribers = mem::take(&mut *inner.subscribers.borrow_mut());
					for subscriber in &subscribers {
						subscriber.error(err.clone());
					}
					inner.queue.borrow_mut().clear();
				},
				Event::Complete => {
					*inner.terminal.borrow_mut() = Some(Terminal::Completed);
					let subscribers = mem::take(&mut *inner.subscribers.borrow_mut());
					for subscriber in &subscribers {
						subscriber.complete();
					}
					inner.queue.borrow_mut().clear();
				},
			}
		}
		inner.emitting.set(false);
	}
}

impl<T, E> Default for Subject<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> Clone for Subject<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T, E> fmt::Debug for Subject<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subject")
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.field("terminated", &self.inner.terminal.borrow().is_some())
			.finish()
	}
}
