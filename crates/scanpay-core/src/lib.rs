//! Scanpay Core - Foundation crate for the Scanpay scan engine.
//!
//! This crate provides shared types, error handling, configuration management,
//! and capability flags that the wallet and scanner crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`AccountId`, `Network`, `MasterSeed`, `BackupTarget`)
//! - [`capabilities`] - Runtime feature flags (`BitID` login)
//! - [`logging`] - Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use scanpay_core::{AppConfig, FeatureId};
//!
//! let config = AppConfig::default();
//! let registry = config.capabilities();
//! if registry.is_feature_available(FeatureId::BitIdLogin) {
//!     println!("BitID login codes will be recognized");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use capabilities::{CapabilityRegistry, FeatureId};
pub use config::{AppConfig, FeatureConfig, NetworkConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{AccountId, BackupState, BackupTarget, MasterSeed, Network};
