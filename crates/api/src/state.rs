use std::sync::Arc;
use std::time::Instant;

use udyam_core::location::LocationDirectory;
use udyam_core::validation::FieldValidator;
use udyam_db::{SubmissionStore, ValidationLogStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Form submission persistence.
    pub submissions: Arc<dyn SubmissionStore>,
    /// Validation audit log.
    pub validation_logs: Arc<dyn ValidationLogStore>,
    pub validator: Arc<FieldValidator>,
    pub locations: Arc<LocationDirectory>,
    pub config: Arc<ServerConfig>,
    /// Process start, for `/health` uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Build state where one backend serves both store traits.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: SubmissionStore + ValidationLogStore + 'static,
    {
        let validator = FieldValidator::new(config.validator_config());
        Self {
            submissions: store.clone(),
            validation_logs: store,
            validator: Arc::new(validator),
            locations: Arc::new(LocationDirectory::default()),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
