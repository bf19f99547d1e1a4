//! Subject tests

// Imports
use {
	core::cell::{Cell, RefCell},
	loadables_stream::{BehaviorSubject, Subject},
	std::rc::Rc,
};

#[test]
fn broadcasts_to_all_subscribers() {
	let subject = Subject::<i32, ()>::new();

	let first = Rc::new(RefCell::new(Vec::new()));
	let second = Rc::new(RefCell::new(Vec::new()));
	let _g1 = subject.observable().subscribe_next({
		let first = Rc::clone(&first);
		move |value| first.borrow_mut().push(value)
	});

	subject.next(1);

	let _g2 = subject.observable().subscribe_next({
		let second = Rc::clone(&second);
		move |value| second.borrow_mut().push(value)
	});

	subject.next(2);

	assert_eq!(*first.borrow(), [1, 2]);
	assert_eq!(*second.borrow(), [2], "A late subscriber should only see later values");
}

#[test]
fn unsubscribed_consumer_stops_receiving() {
	let subject = Subject::<i32, ()>::new();

	let seen = Rc::new(RefCell::new(Vec::new()));
	let guard = subject.observable().subscribe_next({
		let seen = Rc::clone(&seen);
		move |value| seen.borrow_mut().push(value)
	});

	subject.next(1);
	guard.unsubscribe();
	subject.next(2);

	assert_eq!(*seen.borrow(), [1]);
}

#[test]
fn terminal_is_latched() {
	let subject = Subject::<i32, &str>::new();

	let seen = Rc::new(RefCell::new(Vec::new()));
	let errors = Rc::new(RefCell::new(Vec::new()));
	let _guard = subject.observable().subscribe_with(
		{
			let seen = Rc::clone(&seen);
			move |value| seen.borrow_mut().push(value)
		},
		{
			let errors = Rc::clone(&errors);
			move |err| errors.borrow_mut().push(err)
		},
		|| (),
	);

	subject.next(1);
	subject.error("boom");
	subject.next(2);
	subject.complete();

	assert_eq!(*seen.borrow(), [1], "Values after the terminal should be ignored");
	assert_eq!(*errors.borrow(), ["boom"]);
	assert!(subject.is_terminated());

	// A late subscriber observes the terminal immediately
	let late_errors = Rc::new(RefCell::new(Vec::new()));
	let _late = subject.observable().subscribe_with(
		|_value| (),
		{
			let late_errors = Rc::clone(&late_errors);
			move |err| late_errors.borrow_mut().push(err)
		},
		|| (),
	);
	assert_eq!(*late_errors.borrow(), ["boom"]);
}

#[test]
fn reentrant_emission_preserves_per_consumer_order() {
	let subject = Subject::<i32, ()>::new();

	let first = Rc::new(RefCell::new(Vec::new()));
	let second = Rc::new(RefCell::new(Vec::new()));

	// The first consumer re-emits from within its callback
	let _g1 = subject.observable().subscribe_next({
		let subject = subject.clone();
		let first = Rc::clone(&first);
		move |value| {
			first.borrow_mut().push(value);
			if value == 1 {
				subject.next(2);
			}
		}
	});
	let _g2 = subject.observable().subscribe_next({
		let second = Rc::clone(&second);
		move |value| second.borrow_mut().push(value)
	});

	subject.next(1);

	assert_eq!(*first.borrow(), [1, 2]);
	assert_eq!(
		*second.borrow(),
		[1, 2],
		"The re-entrant emission should be queued, not delivered mid-broadcast"
	);
}

#[test]
fn behavior_replays_current_value() {
	let subject = BehaviorSubject::<i32, ()>::new(0);
	assert_eq!(subject.get(), 0);

	let seen = Rc::new(RefCell::new(Vec::new()));
	let _g1 = subject.observable().subscribe_next({
		let seen = Rc::clone(&seen);
		move |value| seen.borrow_mut().push(value)
	});
	assert_eq!(*seen.borrow(), [0], "Attaching should replay the current value");

	subject.next(1);
	assert_eq!(subject.get(), 1);

	let late = Rc::new(RefCell::new(Vec::new()));
	let _g2 = subject.observable().subscribe_next({
		let late = Rc::clone(&late);
		move |value| late.borrow_mut().push(value)
	});
	assert_eq!(*late.borrow(), [1]);

	subject.next(2);
	assert_eq!(*seen.borrow(), [0, 1, 2]);
	assert_eq!(*late.borrow(), [1, 2]);
}

#[test]
fn behavior_attach_behind_a_queued_value_does_not_double_deliver() {
	let subject = BehaviorSubject::<i32, ()>::new(1);

	let late = Rc::new(RefCell::new(Vec::new()));
	let attached = Rc::new(Cell::new(false));

	// The first consumer re-emits, then attaches a second consumer
	// while that value still sits in the queue
	let _guard = subject.observable().subscribe_next({
		let subject = subject.clone();
		let late = Rc::clone(&late);
		let attached = Rc::clone(&attached);
		move |value| {
			if value == 2 && !attached.replace(true) {
				subject.next(3);
				subject
					.observable()
					.subscribe_next({
						let late = Rc::clone(&late);
						move |value| late.borrow_mut().push(value)
					})
					.detach();
			}
		}
	});

	subject.next(2);

	assert_eq!(
		*late.borrow(),
		[3],
		"The queued value should be delivered once, not replayed as well"
	);
}

#[test]
fn behavior_terminal_suppresses_replay() {
	let subject = BehaviorSubject::<i32, ()>::new(5);
	subject.complete();
	assert!(subject.is_terminated());

	// Updates after the terminal are ignored
	subject.next(6);
	assert_eq!(subject.get(), 5);

	let seen = Rc::new(RefCell::new(Vec::new()));
	let completed = Rc::new(Cell::new(false));
	let _guard = subject.observable().subscribe_with(
		{
			let seen = Rc::clone(&seen);
			move |value| seen.borrow_mut().push(value)
		},
		|_err| (),
		{
			let completed = Rc::clone(&completed);
			move || completed.set(true)
		},
	);

	assert!(seen.borrow().is_empty(), "A terminated subject should not replay its value");
	assert!(completed.get());
}
