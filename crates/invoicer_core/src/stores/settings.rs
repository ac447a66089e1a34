//! crates/invoicer_core/src/stores/settings.rs
//!
//! Theme/template preference persistence and the onboarding flag. Simple
//! key-value blobs; the onboarding flag is a raw boolean-as-string
//! sentinel rather than JSON, kept for wire-format compatibility.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{TemplateType, ThemeConfig};
use crate::ports::StorageAdapter;
use crate::stores::{keys, load_or_default, persist};

#[derive(Clone)]
pub struct SettingsStore {
    adapter: Arc<dyn StorageAdapter>,
}

impl SettingsStore {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    pub fn theme(&self) -> ThemeConfig {
        load_or_default(&self.adapter, keys::THEME)
    }

    pub fn set_theme(&self, theme: &ThemeConfig) -> bool {
        persist(&self.adapter, keys::THEME, theme)
    }

    /// The template preference is stored as a JSON-quoted string
    /// (e.g. `"classic"`).
    pub fn template(&self) -> TemplateType {
        load_or_default(&self.adapter, keys::TEMPLATE)
    }

    pub fn set_template(&self, template: TemplateType) -> bool {
        persist(&self.adapter, keys::TEMPLATE, &template)
    }

    /// Whether onboarding has been completed. Anything other than the
    /// literal sentinel `"true"` counts as incomplete.
    pub fn onboarding_complete(&self) -> bool {
        if !self.adapter.is_available() {
            return false;
        }
        match self.adapter.read(keys::ONBOARDING) {
            Ok(Some(raw)) => raw == "true",
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to read onboarding flag");
                false
            }
        }
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> bool {
        if !self.adapter.is_available() {
            return false;
        }
        let sentinel = if complete { "true" } else { "false" };
        match self.adapter.write(keys::ONBOARDING, sentinel) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to write onboarding flag");
                false
            }
        }
    }
}
