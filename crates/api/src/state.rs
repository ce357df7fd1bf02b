use std::sync::Arc;

use dealpulse_integrations::config::ServiceAvailability;
use dealpulse_integrations::IntegrationService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind `Arc` or `Copy`.
#[derive(Clone)]
pub struct AppState {
    /// Record store.
    pub pool: dealpulse_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// CRM, call analytics and model service; `None` unless fully configured.
    pub integrations: Option<Arc<IntegrationService>>,
    /// Which integration credentials were found at startup.
    pub integration_availability: ServiceAvailability,
}
