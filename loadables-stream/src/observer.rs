//! Observers
//!
//! The consumer-side callbacks of a single attachment.

/// Receives the events of a stream.
///
/// [`error`](Observer::error) and [`complete`](Observer::complete) are
/// terminal: after either, the observer receives nothing further.
pub trait Observer<T, E> {
	/// Receives the next value
	fn next(&mut self, value: T);

	/// Receives a terminal error
	fn error(&mut self, err: E);

	/// Receives the terminal completion signal
	fn complete(&mut self);
}

/// Observer built from three closures
pub struct FnObserver<N, Er, C> {
	/// Next callback
	next: N,

	/// Error callback
	error: Er,

	/// Complete callback
	complete: C,
}

impl<N, Er, C> FnObserver<N, Er, C> {
	/// Creates an observer from its three callbacks
	pub const fn new(next: N, error: Er, complete: C) -> Self {
		Self { next, error, complete }
	}
}

impl<T, E, N, Er, C> Observer<T, E> for FnObserver<N, Er, C>
where
	N: FnMut(T),
	Er: FnMut(E),
	C: FnMut(),
{
	fn next(&mut self, value: T) {
		(self.next)(value);
	}

	fn error(&mut self, err: E) {
		(self.error)(err);
	}

	fn complete(&mut self) {
		(self.complete)();
	}
}
