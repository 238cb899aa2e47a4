//! Results of offering a payload to recognizers.

use crate::category::Category;
use crate::decode::{BitcoinUri, SecretShare};
use crate::subflow::PendingSubflow;
use bitcoin::{Address, PrivateKey};
use scanpay_core::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-visible failure reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Payload claimed by a category but not decodable
    UnrecognizedFormat,
    /// No external handler can open the link
    NoBrowser,
    /// Payload carries the share marker but is not a valid share
    InvalidShare,
    /// Scanned seed differs from the wallet's seed
    WrongSeed,
    /// Wallet already has a master seed
    SeedAlreadyConfigured,
    /// Scanned key belongs to no wallet account
    NoSuchRecord,
}

impl ErrorCode {
    /// Key the host's localisation layer resolves into a message.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::UnrecognizedFormat => "unrecognized_format",
            Self::NoBrowser => "error_no_browser",
            Self::InvalidShare => "error_invalid_sss_share",
            Self::WrongSeed => "wrong_seed",
            Self::SeedAlreadyConfigured => "seed_already_configured",
            Self::NoSuchRecord => "verify_backup_no_such_record",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key())
    }
}

/// A claimed payload that could not be acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    /// Why
    pub code: ErrorCode,
    /// Payload echoed for display. Empty when it would reveal secrets.
    pub payload: String,
}

impl ScanFailure {
    /// Failure echoing the scanned payload.
    #[must_use]
    pub fn new(code: ErrorCode, payload: &str) -> Self {
        Self {
            code,
            payload: payload.to_string(),
        }
    }

    /// Failure that must not echo the payload.
    #[must_use]
    pub fn without_payload(code: ErrorCode) -> Self {
        Self {
            code,
            payload: String::new(),
        }
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.payload.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.payload)
        }
    }
}

/// Value handed back to the caller on success.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanValue {
    /// Decoded private key
    PrivateKey(PrivateKey),
    /// Address, also the address part of a URI
    Address(Address),
    /// Whole payment URI
    BitcoinUri(BitcoinUri),
    /// One share of a split secret
    SecretShare(SecretShare),
    /// Account created by a seed import
    Account(AccountId),
}

/// What a single recognizer did with a payload.
#[derive(Debug)]
pub enum Outcome {
    /// Not this category; try the next one.
    NotMatched,
    /// Claimed and done.
    Completed(Option<ScanValue>),
    /// Claimed, but the operation ends with a user-visible error.
    CompletedWithError(ScanFailure),
    /// Claimed; the real result arrives from a sub-flow.
    Suspended(PendingSubflow),
}

impl Outcome {
    pub(crate) fn error(code: ErrorCode, payload: &str) -> Self {
        Self::CompletedWithError(ScanFailure::new(code, payload))
    }

    pub(crate) fn secret_error(code: ErrorCode) -> Self {
        Self::CompletedWithError(ScanFailure::without_payload(code))
    }

    /// Whether the payload was claimed.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        !matches!(self, Self::NotMatched)
    }
}

/// Result of dispatching a payload against a whole scan request.
#[derive(Debug)]
pub enum FinalOutcome {
    /// `category` finished the operation.
    Completed {
        /// Claiming category
        category: Category,
        /// Value for the caller, if the action returns one
        value: Option<ScanValue>,
    },
    /// `category` claimed the payload but could not act on it.
    Failed {
        /// Claiming category
        category: Category,
        /// What to show the user
        failure: ScanFailure,
    },
    /// `category` handed the operation to a sub-flow.
    Suspended {
        /// Claiming category
        category: Category,
        /// Handle the final result arrives on
        subflow: PendingSubflow,
    },
    /// No enabled category claimed the payload.
    Unrecognized,
}

impl FinalOutcome {
    /// Wrap a claiming recognizer's outcome. `NotMatched` has no final form.
    pub(crate) fn claimed(category: Category, outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::NotMatched => None,
            Outcome::Completed(value) => Some(Self::Completed { category, value }),
            Outcome::CompletedWithError(failure) => Some(Self::Failed { category, failure }),
            Outcome::Suspended(subflow) => Some(Self::Suspended { category, subflow }),
        }
    }

    /// Category that claimed the payload.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Completed { category, .. }
            | Self::Failed { category, .. }
            | Self::Suspended { category, .. } => Some(*category),
            Self::Unrecognized => None,
        }
    }
}
