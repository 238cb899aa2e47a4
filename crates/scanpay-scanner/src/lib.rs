//! Scanpay Scanner - classification and dispatch of scanned payloads.
//!
//! A scan produces a text payload (QR code, clipboard, NFC tag). This crate
//! decides which kind of content it is and performs the action the calling
//! screen asked for, exactly once.
//!
//! # Features
//!
//! - Seven content categories tried in a fixed priority order
//! - Per-category actions selected through [`ScanRequest`] presets
//! - Malformed input reported as values, wallet integrity faults as errors
//! - Follow-up flows (send, sweep, login, share collection) handed to the
//!   host and awaited through [`PendingSubflow`]
//! - Standard decoders for WIF and mini keys, addresses, BIP21 URIs, `BitID`,
//!   hex master seeds and secret shares
//!
//! # Example
//!
//! ```rust,ignore
//! use scanpay_scanner::{Dispatcher, ScanContext, ScanRequest};
//! use std::sync::Arc;
//!
//! let context = ScanContext::new(network, Arc::new(wallet), cipher, Arc::new(launcher))
//!     .with_browser(Arc::new(browser));
//! let dispatcher = Dispatcher::new(context);
//!
//! dispatcher
//!     .resolve(&ScanRequest::generic_scan(), &payload, &mut screen)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod category;
pub mod context;
pub mod decode;
pub mod dispatcher;
pub mod error;
pub mod outcome;
pub mod recognizer;
pub mod request;
pub mod sink;
pub mod subflow;

// Re-export commonly used types
pub use category::Category;
pub use context::{ExternalHandler, NoExternalHandler, ScanContext};
pub use decode::{BitIdRequest, BitcoinUri, Decoders, SecretShare, StandardDecoders};
pub use dispatcher::{dispatch, Dispatcher};
pub use error::{Result, ScanError};
pub use outcome::{ErrorCode, FinalOutcome, Outcome, ScanFailure, ScanValue};
pub use recognizer::{
    AddressAction, BitIdAction, BitcoinUriAction, MasterSeedAction, PrivateKeyAction, Recognizer,
    SecretShareAction, WebsiteAction,
};
pub use request::{ScanPreset, ScanRequest};
pub use sink::{route, ContinuationSink};
pub use subflow::{
    PendingSubflow, SendTarget, SubflowCompleter, SubflowKind, SubflowLauncher, SubflowRequest,
    SubflowResult,
};
