//! Loadable value

// Imports
use core::iter;

/// Loadable value.
///
/// Either not yet available, or available with a payload. The variant
/// is the sole source of truth: "loaded" is a structural tag, so a
/// loaded payload that is itself empty (zero, an empty string, ...) is
/// still loaded, and a loading value can never carry a stale payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loadable<T> {
	/// Not yet available
	Loading,

	/// Available
	Loaded(T),
}

impl<T> Loadable<T> {
	/// Returns if the loadable is loaded
	#[must_use]
	pub const fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded(_))
	}

	/// Returns this loadable's value by reference
	pub const fn as_ref(&self) -> Loadable<&T> {
		match self {
			Self::Loading => Loadable::Loading,
			Self::Loaded(value) => Loadable::Loaded(value),
		}
	}

	/// Maps this loadable's value
	pub fn map<U, F>(self, f: F) -> Loadable<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Self::Loading => Loadable::Loading,
			Self::Loaded(value) => Loadable::Loaded(f(value)),
		}
	}

	/// Zips two loadables.
	///
	/// Loaded only when both are loaded.
	pub fn zip<U>(self, rhs: Loadable<U>) -> Loadable<(T, U)> {
		match (self, rhs) {
			(Self::Loaded(lhs), Loadable::Loaded(rhs)) => Loadable::Loaded((lhs, rhs)),
			_ => Loadable::Loading,
		}
	}

	/// Converts this to an option.
	///
	/// Maps `Loadable::Loaded` to `Some` and `Loadable::Loading` to
	/// `None`.
	pub fn loaded(self) -> Option<T> {
		match self {
			Self::Loading => None,
			Self::Loaded(value) => Some(value),
		}
	}
}

impl<T> Loadable<&T> {
	/// Clones the inner value
	pub fn cloned(self) -> Loadable<T>
	where
		T: Clone,
	{
		self.map(T::clone)
	}
}

impl<T> Default for Loadable<T> {
	fn default() -> Self {
		Self::Loading
	}
}

impl<T> From<T> for Loadable<T> {
	fn from(value: T) -> Self {
		Self::Loaded(value)
	}
}

impl<T> From<Option<T>> for Loadable<T> {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Loading, Self::Loaded)
	}
}

/// Collects an iterator of `Loadable<T>` into a `Loadable<C>`, where
/// `C` is a collection of `T`s.
///
/// Short-circuits to `Loading` if any element is still loading; loaded
/// only when every element is loaded. This is the gate the combinators
/// are built on.
impl<C, T> FromIterator<Loadable<T>> for Loadable<C>
where
	C: Default + Extend<T>,
{
	fn from_iter<I: IntoIterator<Item = Loadable<T>>>(iter: I) -> Self {
		let mut collection = C::default();
		for item in iter {
			match item {
				Loadable::Loading => return Self::Loading,
				Loadable::Loaded(value) => collection.extend(iter::once(value)),
			}
		}

		Self::Loaded(collection)
	}
}

/// Returns if every loadable in `loadables` is loaded.
///
/// Vacuously true when empty.
#[must_use]
pub fn are_loaded<T>(loadables: &[Loadable<T>]) -> bool {
	loadables.iter().all(Loadable::is_loaded)
}

/// Extension trait to create a [`Loadable::Loaded`] from a value.
#[extend::ext(name = IntoLoaded)]
pub impl<T> T {
	/// Converts this value into a loaded [`Loadable`]
	fn into_loaded(self) -> Loadable<T> {
		Loadable::Loaded(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn is_loaded_is_structural() {
		assert!(!Loadable::<u32>::Loading.is_loaded());
		assert!(Loadable::Loaded(0).is_loaded(), "A loaded zero is still loaded");
		assert!(Loadable::Loaded("").is_loaded(), "A loaded empty string is still loaded");
	}

	#[test]
	fn are_loaded_vacuous() {
		assert!(are_loaded::<u32>(&[]), "Empty collections are vacuously loaded");
		assert!(are_loaded(&[Loadable::Loaded(1), Loadable::Loaded(2)]));
		assert!(!are_loaded(&[Loadable::Loaded(1), Loadable::Loading]));
	}

	#[test]
	fn collect_gate() {
		let all_loaded = [Loadable::Loaded(1), Loadable::Loaded(2)];
		assert_eq!(
			all_loaded.into_iter().collect::<Loadable<Vec<_>>>(),
			Loadable::Loaded(vec![1, 2])
		);

		let some_loading = [Loadable::Loaded(1), Loadable::Loading];
		assert_eq!(some_loading.into_iter().collect::<Loadable<Vec<_>>>(), Loadable::Loading);
	}

	#[test]
	fn zip() {
		assert_eq!(1.into_loaded().zip(2.into_loaded()), Loadable::Loaded((1, 2)));
		assert_eq!(1.into_loaded().zip(Loadable::<u32>::Loading), Loadable::Loading);
	}
}
