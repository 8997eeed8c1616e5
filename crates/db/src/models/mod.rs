//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The input DTOs used by the stores for inserts and updates

pub mod submission;
pub mod validation_log;
