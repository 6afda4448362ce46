//! Pluggable equality for typed param values.
//!
//! Stores compare values twice per update: the requested values against the current
//! ones (to skip no-op navigations), and each re-decoded value against its default
//! (to drop defaults from the URL). Both comparisons go through an [`Equality`].

use crate::value::{ParamValues, Value};

/// Equality relation over optional param values.
pub trait Equality {
	/// Compares two param values; `None` is the absent value.
	fn is_equal(&self, a: Option<&Value>, b: Option<&Value>) -> bool;

	/// Compares two value sets key by key over the union of their keys.
	fn values_equal(&self, a: &ParamValues, b: &ParamValues) -> bool {
		a.keys()
			.chain(b.keys().filter(|key| !a.contains_key(key)))
			.all(|key| self.is_equal(a.get(key), b.get(key)))
	}
}

/// Structural equality: lists element-wise, JSON deeply, `NaN == NaN`,
/// invalid dates equal to each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepEqual;

impl Equality for DeepEqual {
	fn is_equal(&self, a: Option<&Value>, b: Option<&Value>) -> bool {
		a == b
	}
}

impl<F> Equality for F
where
	F: Fn(Option<&Value>, Option<&Value>) -> bool,
{
	fn is_equal(&self, a: Option<&Value>, b: Option<&Value>) -> bool {
		self(a, b)
	}
}
