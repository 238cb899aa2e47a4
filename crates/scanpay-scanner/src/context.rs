//! Everything a recognizer may consult or act on.

use crate::decode::{Decoders, StandardDecoders};
use crate::subflow::SubflowLauncher;
use scanpay_core::{CapabilityRegistry, Network};
use scanpay_wallet::{KeyCipher, WalletStore};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// System hook that opens links outside the wallet.
pub trait ExternalHandler: Send + Sync {
    /// Whether something on the system can open `url`.
    fn can_open(&self, url: &Url) -> bool;

    /// Hand `url` to that handler.
    fn open(&self, url: &Url);
}

/// Handler for systems without a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalHandler;

impl ExternalHandler for NoExternalHandler {
    fn can_open(&self, _url: &Url) -> bool {
        false
    }

    fn open(&self, _url: &Url) {}
}

/// Collaborators and settings shared by all recognizers of a scan.
#[derive(Clone)]
pub struct ScanContext {
    network: Network,
    capabilities: CapabilityRegistry,
    cipher: KeyCipher,
    wallet: Arc<dyn WalletStore>,
    decoders: Arc<dyn Decoders>,
    subflows: Arc<dyn SubflowLauncher>,
    browser: Arc<dyn ExternalHandler>,
}

impl ScanContext {
    /// Create a context with standard decoders, no optional features and no
    /// browser.
    #[must_use]
    pub fn new(
        network: Network,
        wallet: Arc<dyn WalletStore>,
        cipher: KeyCipher,
        subflows: Arc<dyn SubflowLauncher>,
    ) -> Self {
        Self {
            network,
            capabilities: CapabilityRegistry::new(),
            cipher,
            wallet,
            decoders: Arc::new(StandardDecoders),
            subflows,
            browser: Arc::new(NoExternalHandler),
        }
    }

    /// Replace the enabled optional features.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityRegistry) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replace the decoder set.
    #[must_use]
    pub fn with_decoders(mut self, decoders: Arc<dyn Decoders>) -> Self {
        self.decoders = decoders;
        self
    }

    /// Use `browser` to open website payloads.
    #[must_use]
    pub fn with_browser(mut self, browser: Arc<dyn ExternalHandler>) -> Self {
        self.browser = browser;
        self
    }

    /// Network payloads must belong to.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Enabled optional features.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Cipher sealing the wallet's key material.
    #[must_use]
    pub fn cipher(&self) -> &KeyCipher {
        &self.cipher
    }

    /// Wallet consulted and mutated by recognizers.
    #[must_use]
    pub fn wallet(&self) -> &dyn WalletStore {
        self.wallet.as_ref()
    }

    /// Decoders used for every category.
    #[must_use]
    pub fn decoders(&self) -> &dyn Decoders {
        self.decoders.as_ref()
    }

    /// Launcher for follow-up flows.
    #[must_use]
    pub fn subflows(&self) -> &dyn SubflowLauncher {
        self.subflows.as_ref()
    }

    /// Handler for website payloads.
    #[must_use]
    pub fn browser(&self) -> &dyn ExternalHandler {
        self.browser.as_ref()
    }
}

impl fmt::Debug for ScanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanContext")
            .field("network", &self.network)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
