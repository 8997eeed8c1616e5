//! Field validation engine.
//!
//! One pure rule per [`FieldKind`], a single dispatch point in
//! [`FieldValidator`], and the [`ValidationOutcome`] contract every rule
//! returns. Rules never fail operationally: a rejected value is reported in
//! the outcome, never raised.

pub mod field;
pub mod rules;
pub mod validator;

pub use field::{FieldKind, UnknownField};
pub use rules::ValidationOutcome;
pub use validator::{BatchOutcome, FieldValidator, ValidatorConfig};
