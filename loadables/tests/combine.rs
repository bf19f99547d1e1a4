//! Combinator tests

// Imports
use {
	core::cell::{Cell, RefCell},
	loadables::{Loadable, LoadableObservable, LoadableSubject, ld_combine_latest},
	std::rc::Rc,
};

/// Subscribes to the full state stream of `combined`, collecting states
fn collect_states<T: Clone + 'static, E: Clone + 'static>(
	combined: &LoadableObservable<T, E>,
) -> (Rc<RefCell<Vec<Loadable<T>>>>, loadables_stream::Subscription) {
	let states = Rc::new(RefCell::new(Vec::new()));
	let guard = combined.full().subscribe_next({
		let states = Rc::clone(&states);
		move |state| states.borrow_mut().push(state)
	});
	(states, guard)
}

#[test]
fn loaded_only_while_every_input_is_loaded() {
	let lhs = LoadableSubject::<i32, &str>::new();
	let rhs = LoadableSubject::<i32, &str>::new();
	let combined = ld_combine_latest(&[lhs.as_observable().clone(), rhs.as_observable().clone()]);
	let (states, _guard) = collect_states(&combined);

	// Both inputs replay their loading state at attachment
	assert_eq!(*states.borrow(), [Loadable::Loading]);

	lhs.set_loaded(1);
	assert_eq!(
		*states.borrow(),
		[Loadable::Loading, Loadable::Loading],
		"One loaded input should not open the gate"
	);

	rhs.set_loaded(10);
	assert_eq!(
		states.borrow().last(),
		Some(&Loadable::Loaded(vec![1, 10])),
		"The gate should open once every input is loaded"
	);

	lhs.set_loading();
	assert_eq!(
		states.borrow().last(),
		Some(&Loadable::Loading),
		"An input flipping back should immediately close the gate"
	);

	lhs.set_loaded(2);
	assert_eq!(states.borrow().last(), Some(&Loadable::Loaded(vec![2, 10])));
}

#[test]
fn input_errors_terminate_the_combination() {
	let lhs = LoadableSubject::<i32, &str>::new();
	let rhs = LoadableSubject::<i32, &str>::new();
	let combined = ld_combine_latest(&[lhs.as_observable().clone(), rhs.as_observable().clone()]);

	let errors = Rc::new(RefCell::new(Vec::new()));
	let _guard = combined.full().subscribe_with(
		|_state| (),
		{
			let errors = Rc::clone(&errors);
			move |err| errors.borrow_mut().push(err)
		},
		|| (),
	);

	rhs.fail("boom");
	assert_eq!(*errors.borrow(), ["boom"]);
}

#[test]
fn no_inputs_are_vacuously_loaded() {
	let combined = ld_combine_latest::<i32, ()>(&[]);

	let (states, _guard) = collect_states(&combined);
	let completed = Rc::new(Cell::new(false));
	let _g2 = combined.full().subscribe_with(|_state| (), |_err| (), {
		let completed = Rc::clone(&completed);
		move || completed.set(true)
	});

	assert_eq!(*states.borrow(), [Loadable::Loaded(Vec::new())]);
	assert!(completed.get());
}

#[test]
fn combined_views_derive_from_the_gate() {
	let lhs = LoadableSubject::<i32, &str>::new();
	let rhs = LoadableSubject::<i32, &str>::new();
	let combined = ld_combine_latest(&[lhs.as_observable().clone(), rhs.as_observable().clone()]);

	let data_seen = Rc::new(RefCell::new(Vec::new()));
	let _guard = combined.data().subscribe_next({
		let data_seen = Rc::clone(&data_seen);
		move |values| data_seen.borrow_mut().push(values)
	});

	lhs.set_loaded(1);
	rhs.set_loaded(2);
	lhs.set_loaded(3);

	assert_eq!(*data_seen.borrow(), [vec![1, 2], vec![3, 2]]);
}

#[test]
fn combine_with_pairs_heterogeneous_wrappers() {
	let number = LoadableSubject::<i32, &str>::new();
	let name = LoadableSubject::<&str, &str>::new();
	let combined = number.as_observable().combine_with(name.as_observable());
	let (states, _guard) = collect_states(&combined);

	assert_eq!(*states.borrow(), [Loadable::Loading]);

	number.set_loaded(1);
	name.set_loaded("one");
	assert_eq!(states.borrow().last(), Some(&Loadable::Loaded((1, "one"))));

	name.set_loading();
	assert_eq!(states.borrow().last(), Some(&Loadable::Loading));
}
