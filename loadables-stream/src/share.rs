//! Share layers
//!
//! Multicast sharing over a cold source: one upstream connection is
//! funnelled to all current consumers through an internal [`Subject`].
//!
//! [`Observable::share`] is the ref-counted layer: it connects when the
//! consumer count goes 0→1, tears the connection down at 1→0 and builds
//! a fresh connection on a later re-attach. [`Observable::share_eager`]
//! connects once and never disconnects, so an unbounded source keeps
//! its connection open indefinitely.

// Imports
use {
	crate::{Observable, Subject, Subscriber, Subscription},
	core::cell::RefCell,
	std::rc::Rc,
};

/// Ref-counted share state
struct ShareState<T, E> {
	/// Connection generation, bumped whenever the current connection
	/// is discarded.
	///
	/// Guards teardowns of a previous generation from tearing down a
	/// fresh connection.
	generation: u64,

	/// Fan-out hub of the current generation
	subject: Option<Subject<T, E>>,

	/// Upstream connection of the current generation
	connection: Option<Subscription>,

	/// Latest value of the current generation, when replaying
	latest: Option<T>,

	/// Live consumers of the current generation
	count: usize,
}

impl<T, E> ShareState<T, E> {
	/// Discards the current generation.
	///
	/// Returns the upstream connection for the caller to drop outside
	/// the state borrow, as its teardown may cascade arbitrarily.
	fn reset(&mut self) -> Option<Subscription> {
		self.generation += 1;
		self.subject = None;
		self.latest = None;
		self.count = 0;
		self.connection.take()
	}
}

impl<T, E> Observable<T, E>
where
	T: Clone + 'static,
	E: Clone + 'static,
{
	/// Ref-counted restart-capable share.
	///
	/// The first consumer creates the single upstream connection, later
	/// consumers join it, and the last detach tears it down. A consumer
	/// attaching after a full teardown gets a fresh connection whose
	/// emissions are independent of the previous connection's history.
	///
	/// An upstream terminal also discards the connection, so consumers
	/// attaching afterwards re-run the source instead of replaying the
	/// old terminal.
	#[must_use]
	pub fn share(&self) -> Self {
		self.share_inner(false)
	}

	/// Like [`share`](Self::share), except each consumer joining an
	/// existing connection first receives the connection's latest
	/// value, if any was emitted
	#[must_use]
	pub fn share_replay_latest(&self) -> Self {
		self.share_inner(true)
	}

	fn share_inner(&self, replay: bool) -> Self {
		let source = self.clone();
		let state = Rc::new(RefCell::new(ShareState {
			generation: 0,
			subject:    None,
			connection: None,
			latest:     None,
			count:      0,
		}));

		Self::new(move |subscriber: Subscriber<T, E>| {
			let (subject, generation, connect) = {
				let mut state = state.borrow_mut();
				let connect = state.subject.is_none();
				let subject = match &state.subject {
					Some(subject) => subject.clone(),
					None => {
						let subject = Subject::new();
						state.generation += 1;
						state.subject = Some(subject.clone());
						tracing::debug!(generation = state.generation, "share: connecting upstream");
						subject
					},
				};
				state.count += 1;
				(subject, state.generation, connect)
			};

			// Register the consumer and its refcount teardown before
			// connecting, so a synchronously-terminating source still
			// observes the right count
			let latest = replay.then(|| state.borrow().latest.clone()).flatten();
			subject.attach(subscriber.clone());
			if let Some(latest) = latest {
				subscriber.next(latest);
			}
			subscriber.add_teardown(Subscription::from_fn({
				let state = Rc::clone(&state);
				move || {
					let connection = {
						let mut state = state.borrow_mut();
						if state.generation != generation {
							return;
						}
						state.count -= 1;
						match state.count {
							0 => {
								tracing::debug!(generation, "share: last consumer detached, tearing down");
								state.reset()
							},
							_ => None,
						}
					};
					drop(connection);
				}
			}));

			if connect {
				let connection = source.subscribe_with(
					{
						let subject = subject.clone();
						let state = Rc::clone(&state);
						move |value| {
							{
								let mut state = state.borrow_mut();
								if state.generation == generation {
									state.latest = Some(value.clone());
								}
							}
							subject.next(value);
						}
					},
					{
						let subject = subject.clone();
						let state = Rc::clone(&state);
						move |err| {
							let connection = {
								let mut state = state.borrow_mut();
								(state.generation == generation).then(|| state.reset()).flatten()
							};
							drop(connection);
							subject.error(err);
						}
					},
					{
						let subject = subject.clone();
						let state = Rc::clone(&state);
						move || {
							let connection = {
								let mut state = state.borrow_mut();
								(state.generation == generation).then(|| state.reset()).flatten()
							};
							drop(connection);
							subject.complete();
						}
					},
				);

				let mut state = state.borrow_mut();
				if state.generation == generation && state.subject.is_some() {
					state.connection = Some(connection);
				} else {
					// The source terminated synchronously during
					// subscription; the connection is already dead
					drop(state);
					drop(connection);
				}
			}
		})
	}

	/// Connect-once share.
	///
	/// The first consumer creates the single upstream connection, which
	/// is then held until the source terminates, regardless of how many
	/// consumers remain. Wrapping an unbounded source keeps that
	/// connection open indefinitely; this is the caller's choice, not
	/// diagnosed beyond a debug log.
	#[must_use]
	pub fn share_eager(&self) -> Self {
		let source = self.clone();
		let state: Rc<RefCell<Option<(Subject<T, E>, Option<Subscription>)>>> = Rc::new(RefCell::new(None));

		Self::new(move |subscriber| {
			let (subject, connect) = {
				let mut state = state.borrow_mut();
				match &*state {
					Some((subject, _)) => (subject.clone(), false),
					None => {
						let subject = Subject::new();
						*state = Some((subject.clone(), None));
						tracing::debug!("share_eager: connecting upstream, held until the source terminates");
						(subject, true)
					},
				}
			};

			subject.attach(subscriber);

			if connect {
				let connection = source.subscribe_with(
					{
						let subject = subject.clone();
						move |value| subject.next(value)
					},
					{
						let subject = subject.clone();
						move |err| subject.error(err)
					},
					{
						let subject = subject.clone();
						move || subject.complete()
					},
				);

				if let Some((_, slot)) = &mut *state.borrow_mut() {
					*slot = Some(connection);
				}
			}
		})
	}
}
