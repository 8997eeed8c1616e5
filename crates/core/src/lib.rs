//! Domain logic for the Udyam registration service.
//!
//! Everything in this crate is pure: the field validators, the form-level
//! submission rules, and the static location directory perform no I/O and
//! hold no shared mutable state.

pub mod error;
pub mod location;
pub mod pagination;
pub mod submission;
pub mod types;
pub mod validation;
