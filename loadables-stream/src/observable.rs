//! Observables
//!
//! A cold, lazily-producing stream: the producer runs once per
//! subscription, so sharing a producer between consumers requires an
//! explicit share layer (see [`Observable::share`]).

// Imports
use {
	crate::{FnObserver, Observer, Subscriber, Subscription},
	std::rc::Rc,
};

/// A cold push-based stream of `T` values, terminated by at most one
/// completion or `E` error.
#[derive(derive_more::Debug)]
pub struct Observable<T, E> {
	/// Ran for each new subscription
	#[debug(skip)]
	on_subscribe: Rc<dyn Fn(Subscriber<T, E>)>,
}

impl<T, E> Observable<T, E>
where
	T: 'static,
	E: 'static,
{
	/// Creates an observable from its producer.
	///
	/// `on_subscribe` runs once per subscription, receiving the
	/// producer-side handle of the new attachment. Upstream
	/// subscriptions the producer creates should be registered via
	/// [`Subscriber::add_teardown`] so they are released when the
	/// consumer detaches.
	pub fn new<F>(on_subscribe: F) -> Self
	where
		F: Fn(Subscriber<T, E>) + 'static,
	{
		Self {
			on_subscribe: Rc::new(on_subscribe),
		}
	}

	/// Creates an observable emitting each value of `values`, then
	/// completing.
	///
	/// The iterable is re-run per subscription.
	pub fn from_iter<I>(values: I) -> Self
	where
		I: IntoIterator<Item = T> + Clone + 'static,
	{
		Self::new(move |subscriber| {
			for value in values.clone() {
				if subscriber.is_closed() {
					return;
				}
				subscriber.next(value);
			}
			subscriber.complete();
		})
	}

	/// Creates an observable that completes without emitting
	pub fn empty() -> Self {
		Self::new(|subscriber| subscriber.complete())
	}

	/// Creates an observable that never emits nor terminates
	pub fn never() -> Self {
		Self::new(|_subscriber| ())
	}

	/// Creates an observable that errors immediately
	pub fn throw(err: E) -> Self
	where
		E: Clone,
	{
		Self::new(move |subscriber| subscriber.error(err.clone()))
	}

	/// Attaches `observer`, returning the guard that detaches it
	pub fn subscribe<O>(&self, observer: O) -> Subscription
	where
		O: Observer<T, E> + 'static,
	{
		let (subscriber, guard) = Subscriber::new(observer);
		(self.on_subscribe)(subscriber);
		guard
	}

	/// Attaches an observer built from the three callbacks
	pub fn subscribe_with<N, Er, C>(&self, next: N, error: Er, complete: C) -> Subscription
	where
		N: FnMut(T) + 'static,
		Er: FnMut(E) + 'static,
		C: FnMut() + 'static,
	{
		self.subscribe(FnObserver::new(next, error, complete))
	}

	/// Attaches a values-only observer.
	///
	/// An upstream error arriving here has no handler and is logged,
	/// then dropped.
	pub fn subscribe_next<N>(&self, next: N) -> Subscription
	where
		N: FnMut(T) + 'static,
	{
		self.subscribe_with(
			next,
			|_err| tracing::warn!("observable errored without an error handler attached"),
			|| (),
		)
	}

	/// Subscribes `down` to this observable, delivering each value
	/// through `next` and forwarding terminals unchanged.
	///
	/// The upstream teardown is registered on `down` before the
	/// producer runs, so a synchronous producer observes its subscriber
	/// close the moment `down` closes mid-production.
	pub(crate) fn forward_into<U, N>(&self, down: Subscriber<U, E>, mut next: N)
	where
		U: 'static,
		N: FnMut(&Subscriber<U, E>, T) + 'static,
	{
		let (upstream, guard) = Subscriber::new(FnObserver::new(
			{
				let down = down.clone();
				move |value| next(&down, value)
			},
			{
				let down = down.clone();
				move |err| down.error(err)
			},
			{
				let down = down.clone();
				move || down.complete()
			},
		));
		down.add_teardown(guard);
		(self.on_subscribe)(upstream);
	}

	/// Maps each value through `f`
	pub fn map<U, F>(&self, f: F) -> Observable<U, E>
	where
		U: 'static,
		F: Fn(T) -> U + 'static,
	{
		let source = self.clone();
		let f = Rc::new(f);
		Observable::new(move |down| {
			let f = Rc::clone(&f);
			source.forward_into(down, move |down, value| down.next(f(value)));
		})
	}

	/// Maps the terminal error through `f`
	pub fn map_err<E2, F>(&self, f: F) -> Observable<T, E2>
	where
		E2: 'static,
		F: Fn(E) -> E2 + 'static,
	{
		let source = self.clone();
		let f = Rc::new(f);
		Observable::new(move |down| {
			let (upstream, guard) = Subscriber::new(FnObserver::new(
				{
					let down = down.clone();
					move |value| down.next(value)
				},
				{
					let down = down.clone();
					let f = Rc::clone(&f);
					move |err| down.error(f(err))
				},
				{
					let down = down.clone();
					move || down.complete()
				},
			));
			down.add_teardown(guard);
			(source.on_subscribe)(upstream);
		})
	}

	/// Keeps only the values satisfying `predicate`
	pub fn filter<F>(&self, predicate: F) -> Self
	where
		F: Fn(&T) -> bool + 'static,
	{
		let source = self.clone();
		let predicate = Rc::new(predicate);
		Self::new(move |down| {
			let predicate = Rc::clone(&predicate);
			source.forward_into(down, move |down, value| {
				if predicate(&value) {
					down.next(value);
				}
			});
		})
	}

	/// Filters and maps each value through `f`
	pub fn filter_map<U, F>(&self, f: F) -> Observable<U, E>
	where
		U: 'static,
		F: Fn(T) -> Option<U> + 'static,
	{
		let source = self.clone();
		let f = Rc::new(f);
		Observable::new(move |down| {
			let f = Rc::clone(&f);
			source.forward_into(down, move |down, value| {
				if let Some(value) = f(value) {
					down.next(value);
				}
			});
		})
	}

	/// Maps each value through `f`, turning an `Err` into the stream's
	/// terminal error
	pub fn try_map<U, F>(&self, f: F) -> Observable<U, E>
	where
		U: 'static,
		F: Fn(T) -> Result<U, E> + 'static,
	{
		let source = self.clone();
		let f = Rc::new(f);
		Observable::new(move |down| {
			let f = Rc::clone(&f);
			source.forward_into(down, move |down, value| match f(value) {
				Ok(value) => down.next(value),
				Err(err) => down.error(err),
			});
		})
	}

	/// One-shot over this observable: delivers the first value, then
	/// completes and detaches from upstream.
	///
	/// If the source terminates first, the termination is forwarded
	/// without a value ever being delivered.
	pub fn first(&self) -> Self {
		let source = self.clone();
		Self::new(move |down| {
			source.forward_into(down, |down, value| {
				down.next(value);
				down.complete();
			});
		})
	}
}

impl<T, E> Clone for Observable<T, E> {
	fn clone(&self) -> Self {
		Self {
			on_subscribe: Rc::clone(&self.on_subscribe),
		}
	}
}
