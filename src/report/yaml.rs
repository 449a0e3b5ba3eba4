use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, info};

/// Renders datasets as YAML for the structured-text view.
///
/// The helper must be loaded once before it produces output. Loading is
/// idempotent and safe to race from several threads; only the first call
/// does the work.
#[derive(Debug, Default)]
pub struct StructuredTextHelper {
    loaded: OnceLock<()>,
}

impl StructuredTextHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the helper. Later calls are no-ops.
    pub fn ensure_loaded(&self) {
        self.loaded.get_or_init(|| {
            info!("Structured-text helper loaded");
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// Dump `value` as YAML. `None` until the helper is loaded or when the
    /// value cannot be represented.
    pub fn dump<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        if !self.is_loaded() {
            return None;
        }
        match serde_yaml::to_string(value) {
            Ok(yaml) => Some(yaml),
            Err(e) => {
                debug!("YAML dump failed: {}", e);
                None
            }
        }
    }
}
