//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CatalogEndpoint, CatalogService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{HttpTransport, ReqwestTransport};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Category fetching and tree assembly
    pub catalog: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let transport = ReqwestTransport::new(settings.timeout())?;
        Ok(Self::with_deps(settings, Arc::new(transport)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, transport: Arc<dyn HttpTransport>) -> Self {
        let endpoint = CatalogEndpoint::from_settings(&settings);
        let catalog = CatalogService::new(transport, endpoint);

        Self {
            settings: Arc::new(settings),
            catalog,
        }
    }
}
