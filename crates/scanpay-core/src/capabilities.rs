//! Capability registry for optional scan behaviors.
//!
//! Some recognizers only claim a payload when the host has switched the
//! matching feature on. The registry is read-only during a scan; it is
//! built from configuration and handed to the scanner as part of its context.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifies features that can be enabled or disabled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    /// Sign-in to websites by scanning `bitid:` requests
    BitIdLogin,
}

impl FeatureId {
    /// Get a human-readable name for this feature.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BitIdLogin => "BitID Login",
        }
    }

    /// Get a description of what this feature provides.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::BitIdLogin => "Authenticate to websites by signing a scanned BitID challenge",
        }
    }
}

/// Registry tracking which features are currently available.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    /// Set of currently enabled features
    enabled_features: HashSet<FeatureId>,
}

impl CapabilityRegistry {
    /// Create a registry with every optional feature disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a feature is currently available.
    #[must_use]
    pub fn is_feature_available(&self, feature: FeatureId) -> bool {
        self.enabled_features.contains(&feature)
    }

    /// Enable a feature.
    pub fn enable_feature(&mut self, feature: FeatureId) {
        tracing::debug!("Enabling feature: {:?}", feature);
        self.enabled_features.insert(feature);
    }

    /// Disable a feature.
    pub fn disable_feature(&mut self, feature: FeatureId) {
        tracing::debug!("Disabling feature: {:?}", feature);
        self.enabled_features.remove(&feature);
    }

    /// Builder-style variant of [`enable_feature`](Self::enable_feature).
    #[must_use]
    pub fn with_feature(mut self, feature: FeatureId) -> Self {
        self.enable_feature(feature);
        self
    }

    /// Get all currently enabled features.
    #[must_use]
    pub fn enabled_features(&self) -> Vec<FeatureId> {
        self.enabled_features.iter().copied().collect()
    }
}
