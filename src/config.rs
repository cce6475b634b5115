//! Session-wide settings handed to [`crate::client::MyBmwClient`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fetch::auth::Authentication;
use crate::models::GpsPosition;

/// Immutable bundle of the settings a client session is built from.
///
/// Built once through the `with_*` methods and then shared read-only by
/// every client created from it.
#[derive(Clone)]
pub struct ClientConfig {
    authentication: Arc<dyn Authentication>,
    log_response_path: Option<PathBuf>,
    observer_position: Option<GpsPosition>,
    use_metric_units: bool,
}

impl ClientConfig {
    /// Metric units, no response logging, no observer position.
    pub fn new(authentication: Arc<dyn Authentication>) -> Self {
        Self {
            authentication,
            log_response_path: None,
            observer_position: None,
            use_metric_units: true,
        }
    }

    /// Enables writing every response body to `path`.
    pub fn with_log_response_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_response_path = Some(path.into());
        self
    }

    pub fn with_observer_position(mut self, position: GpsPosition) -> Self {
        self.observer_position = Some(position);
        self
    }

    pub fn with_metric_units(mut self, use_metric_units: bool) -> Self {
        self.use_metric_units = use_metric_units;
        self
    }

    pub fn authentication(&self) -> &Arc<dyn Authentication> {
        &self.authentication
    }

    pub fn log_response_path(&self) -> Option<&Path> {
        self.log_response_path.as_deref()
    }

    /// Carried for higher-level callers; the client itself never reads it.
    pub fn observer_position(&self) -> Option<GpsPosition> {
        self.observer_position
    }

    pub fn use_metric_units(&self) -> bool {
        self.use_metric_units
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("region", &self.authentication.region())
            .field("log_response_path", &self.log_response_path)
            .field("observer_position", &self.observer_position)
            .field("use_metric_units", &self.use_metric_units)
            .finish()
    }
}
