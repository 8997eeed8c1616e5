//! Repository layer: one zero-sized struct per table, each taking a pool or
//! transaction explicitly.

pub mod submission_repo;
pub mod validation_log_repo;

pub use submission_repo::SubmissionRepo;
pub use validation_log_repo::ValidationLogRepo;
