//! Dependent flows a recognizer hands control to.
//!
//! A recognizer that needs further user interaction (confirming a send,
//! signing a login, collecting more shares) asks the host's
//! [`SubflowLauncher`] to start it and returns the [`PendingSubflow`] as a
//! suspended outcome. The host later resolves it through the matching
//! [`SubflowCompleter`].

use crate::decode::{BitIdRequest, BitcoinUri, SecretShare};
use crate::outcome::{ScanFailure, ScanValue};
use bitcoin::Address;
use scanpay_core::AccountId;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Kinds of sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubflowKind {
    /// Prepare and confirm a payment
    Send,
    /// Inspect a temporary account and optionally sweep it
    PrepareSpend,
    /// Sign a `BitID` login challenge
    Authenticate,
    /// Collect shares until the secret can be rebuilt
    CombineShares,
}

/// Who a payment goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTarget {
    /// Plain address, amount chosen in the flow
    Address(Address),
    /// Payment URI with its amount, label and payment request
    Uri(BitcoinUri),
}

/// Parameters of a sub-flow launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubflowRequest {
    /// Pay `target` from the account `from`, or let the flow pick when `None`.
    Send {
        /// Sending account
        from: Option<AccountId>,
        /// Recipient
        target: SendTarget,
    },
    /// Spend from or check the balance of a temporary account.
    PrepareSpend {
        /// Temporary account registered for the flow
        account: AccountId,
    },
    /// Sign a `BitID` challenge.
    Authenticate(BitIdRequest),
    /// Start collecting shares from this first one.
    CombineShares(SecretShare),
}

impl SubflowRequest {
    /// Kind of flow this request starts.
    #[must_use]
    pub fn kind(&self) -> SubflowKind {
        match self {
            Self::Send { .. } => SubflowKind::Send,
            Self::PrepareSpend { .. } => SubflowKind::PrepareSpend,
            Self::Authenticate(_) => SubflowKind::Authenticate,
            Self::CombineShares(_) => SubflowKind::CombineShares,
        }
    }
}

/// How a sub-flow ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubflowResult {
    /// Finished, optionally with a value for the caller
    Completed(Option<ScanValue>),
    /// Ended with a user-visible error
    Failed(ScanFailure),
    /// Abandoned by the user or dropped by the host
    Cancelled,
}

/// Handle to a sub-flow that has not reported back yet.
#[derive(Debug)]
pub struct PendingSubflow {
    kind: SubflowKind,
    receiver: oneshot::Receiver<SubflowResult>,
}

impl PendingSubflow {
    /// Kind of the awaited flow.
    #[must_use]
    pub fn kind(&self) -> SubflowKind {
        self.kind
    }

    /// Wait for the flow to finish.
    ///
    /// A flow whose completer is dropped without reporting counts as
    /// cancelled.
    pub async fn wait(self) -> SubflowResult {
        self.receiver.await.unwrap_or(SubflowResult::Cancelled)
    }

    /// Poll for a result without waiting.
    ///
    /// Returns `None` while the flow is still running.
    pub fn try_result(&mut self) -> Option<SubflowResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(SubflowResult::Cancelled),
        }
    }
}

/// Reporting side of a sub-flow.
#[derive(Debug)]
pub struct SubflowCompleter {
    sender: oneshot::Sender<SubflowResult>,
}

impl SubflowCompleter {
    /// Finish successfully.
    pub fn complete(self, value: Option<ScanValue>) {
        self.finish(SubflowResult::Completed(value));
    }

    /// Finish with a user-visible error.
    pub fn fail(self, failure: ScanFailure) {
        self.finish(SubflowResult::Failed(failure));
    }

    /// The user backed out.
    pub fn cancel(self) {
        self.finish(SubflowResult::Cancelled);
    }

    fn finish(self, result: SubflowResult) {
        // The waiting side may have gone away; nothing left to notify then.
        let _ = self.sender.send(result);
    }
}

/// Create a connected completer and pending handle.
#[must_use]
pub fn channel(kind: SubflowKind) -> (SubflowCompleter, PendingSubflow) {
    let (sender, receiver) = oneshot::channel();
    (SubflowCompleter { sender }, PendingSubflow { kind, receiver })
}

/// Host hook that starts sub-flows.
pub trait SubflowLauncher: Send + Sync {
    /// Start the flow described by `request`.
    fn launch(&self, request: SubflowRequest) -> PendingSubflow;
}
