//! Combine-latest joins
//!
//! Fan-in over several sources: the combined stream re-emits on every
//! tick of any input once every input has emitted at least once.
//!
//! Completion follows the usual join rule: the combination ends when
//! every input has completed, or as soon as any input completes without
//! ever having emitted, since no further combination is possible. Any
//! input error propagates immediately and terminates the combination.

// Imports
use {
	crate::Observable,
	core::cell::{Cell, RefCell},
	std::rc::Rc,
};

impl<T, E> Observable<T, E>
where
	T: Clone + 'static,
	E: 'static,
{
	/// Combines the latest values of all `sources`, in input order.
	///
	/// Each subscription to the result attaches to every input; the
	/// attachments are released together when the consumer detaches or
	/// the combination terminates.
	///
	/// With no inputs the result completes immediately without
	/// emitting.
	pub fn combine_latest(sources: &[Self]) -> Observable<Vec<T>, E> {
		let sources = sources.to_vec();
		Observable::new(move |subscriber| {
			let len = sources.len();
			if len == 0 {
				subscriber.complete();
				return;
			}

			let latest = Rc::new(RefCell::new(vec![None::<T>; len]));
			let remaining = Rc::new(Cell::new(len));
			for (idx, source) in sources.iter().enumerate() {
				let upstream = source.subscribe_with(
					{
						let latest = Rc::clone(&latest);
						let subscriber = subscriber.clone();
						move |value| {
							let combined = {
								let mut latest = latest.borrow_mut();
								latest[idx] = Some(value);
								latest.iter().cloned().collect::<Option<Vec<T>>>()
							};
							if let Some(values) = combined {
								subscriber.next(values);
							}
						}
					},
					{
						let subscriber = subscriber.clone();
						move |err| subscriber.error(err)
					},
					{
						let latest = Rc::clone(&latest);
						let remaining = Rc::clone(&remaining);
						let subscriber = subscriber.clone();
						move || {
							remaining.set(remaining.get() - 1);
							let never_emitted = latest.borrow()[idx].is_none();
							if remaining.get() == 0 || never_emitted {
								subscriber.complete();
							}
						}
					},
				);
				subscriber.add_teardown(upstream);
			}
		})
	}

	/// Combines the latest values of `self` and `other` through
	/// `combine`, re-emitting on every tick of either input once both
	/// have emitted
	pub fn combine_latest_with<U, C, F>(&self, other: &Observable<U, E>, combine: F) -> Observable<C, E>
	where
		U: Clone + 'static,
		C: 'static,
		F: Fn(T, U) -> C + 'static,
	{
		let lhs = self.clone();
		let rhs = other.clone();
		let combine = Rc::new(combine);
		Observable::new(move |subscriber| {
			let latest = Rc::new(RefCell::new((None::<T>, None::<U>)));
			let remaining = Rc::new(Cell::new(2_usize));

			let emit = {
				let latest = Rc::clone(&latest);
				let combine = Rc::clone(&combine);
				let subscriber = subscriber.clone();
				move || {
					let combined = {
						let latest = latest.borrow();
						latest.0.clone().zip(latest.1.clone())
					};
					if let Some((lhs, rhs)) = combined {
						subscriber.next(combine(lhs, rhs));
					}
				}
			};

			let on_complete = |emitted: Rc<dyn Fn() -> bool>| {
				let remaining = Rc::clone(&remaining);
				let subscriber = subscriber.clone();
				move || {
					remaining.set(remaining.get() - 1);
					if remaining.get() == 0 || !emitted() {
						subscriber.complete();
					}
				}
			};

			let upstream = lhs.subscribe_with(
				{
					let latest = Rc::clone(&latest);
					let emit = emit.clone();
					move |value| {
						latest.borrow_mut().0 = Some(value);
						emit();
					}
				},
				{
					let subscriber = subscriber.clone();
					move |err| subscriber.error(err)
				},
				on_complete({
					let latest = Rc::clone(&latest);
					Rc::new(move || latest.borrow().0.is_some())
				}),
			);
			subscriber.add_teardown(upstream);

			let upstream = rhs.subscribe_with(
				{
					let latest = Rc::clone(&latest);
					let emit = emit.clone();
					move |value| {
						latest.borrow_mut().1 = Some(value);
						emit();
					}
				},
				{
					let subscriber = subscriber.clone();
					move |err| subscriber.error(err)
				},
				on_complete({
					let latest = Rc::clone(&latest);
					Rc::new(move || latest.borrow().1.is_some())
				}),
			);
			subscriber.add_teardown(upstream);
		})
	}
}
