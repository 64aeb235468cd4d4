use std::sync::Arc;

use crate::metrics::Metrics;
use crate::service::CarsService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn CarsService>,
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Wrap a service with a fresh metrics registry.
    pub fn new<S: CarsService + 'static>(service: S) -> Self {
        Self::with_metrics(Arc::new(service), Arc::new(Metrics::new()))
    }

    pub fn with_metrics(service: Arc<dyn CarsService>, metrics: Arc<Metrics>) -> Self {
        Self { service, metrics }
    }

    pub fn service(&self) -> &dyn CarsService {
        self.service.as_ref()
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}
