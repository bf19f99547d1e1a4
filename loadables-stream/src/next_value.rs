//! One-shot future adapter
//!
//! Bridges a push-based stream into a [`Future`] resolving to the
//! stream's next value, for callers that want to `.await` a value
//! instead of attaching an observer.

// Imports
use {
	crate::{Observable, Observer, Subscription},
	core::{
		fmt,
		future::Future,
		pin::Pin,
		task::{Context, Poll},
	},
	futures::channel::oneshot,
};

/// Error resolving a [`NextValue`]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NextValueError<E> {
	/// The stream completed before delivering a value
	#[error("stream completed before delivering a value")]
	Completed,

	/// The stream errored before delivering a value
	#[error("stream errored before delivering a value")]
	Upstream(E),
}

/// Observer resolving a oneshot sender on the first event
struct FirstObserver<T, E> {
	/// Sender, consumed by the first event
	tx: Option<oneshot::Sender<Result<T, NextValueError<E>>>>,
}

impl<T, E> Observer<T, E> for FirstObserver<T, E> {
	fn next(&mut self, value: T) {
		if let Some(tx) = self.tx.take() {
			let _ = tx.send(Ok(value));
		}
	}

	fn error(&mut self, err: E) {
		if let Some(tx) = self.tx.take() {
			let _ = tx.send(Err(NextValueError::Upstream(err)));
		}
	}

	fn complete(&mut self) {
		if let Some(tx) = self.tx.take() {
			let _ = tx.send(Err(NextValueError::Completed));
		}
	}
}

/// Future for the next value of an observable.
///
/// See [`Observable::next_value`].
pub struct NextValue<T, E> {
	/// Receiver resolved by the attached observer
	rx: oneshot::Receiver<Result<T, NextValueError<E>>>,

	/// Keeps the attachment alive until resolution or drop
	_subscription: Subscription,
}

impl<T, E> Observable<T, E>
where
	T: 'static,
	E: 'static,
{
	/// Returns a future resolving to the next value of this observable.
	///
	/// The attachment is created now, not at first poll, and detaches
	/// from upstream as soon as a value arrives. Dropping the future
	/// detaches without resolving.
	pub fn next_value(&self) -> NextValue<T, E> {
		let (tx, rx) = oneshot::channel();
		let subscription = self.first().subscribe(FirstObserver { tx: Some(tx) });
		NextValue {
			rx,
			_subscription: subscription,
		}
	}
}

impl<T, E> fmt::Debug for NextValue<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NextValue").finish_non_exhaustive()
	}
}

impl<T, E> Future for NextValue<T, E> {
	type Output = Result<T, NextValueError<E>>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.get_mut();
		match Pin::new(&mut this.rx).poll(cx) {
			Poll::Ready(Ok(output)) => Poll::Ready(output),
			// The observer was dropped without resolving, which only
			// happens on detachment
			Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(NextValueError::Completed)),
			Poll::Pending => Poll::Pending,
		}
	}
}
