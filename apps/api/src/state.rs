use crate::config::Config;
use crate::render::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only fragment store, shared safely across concurrent requests.
    pub templates: TemplateStore,
}
