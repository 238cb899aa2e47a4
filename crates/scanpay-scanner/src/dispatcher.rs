//! Priority-ordered dispatch of a payload across a scan request.

use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::FinalOutcome;
use crate::request::ScanRequest;
use crate::sink::{route, ContinuationSink};
use tracing::{debug, error};

/// Offer `payload` to each enabled category of `request` in priority order.
///
/// The first category that claims the payload decides the result; later
/// categories are never consulted. Disabled categories are skipped.
///
/// # Errors
/// Returns an error when the claiming recognizer hit an integrity fault in
/// the wallet's stored material.
pub fn dispatch(
    request: &ScanRequest,
    payload: &str,
    context: &ScanContext,
) -> Result<FinalOutcome> {
    for category in Category::PRIORITY {
        let Some(recognizer) = request.recognizer(category) else {
            continue;
        };

        let outcome = recognizer.attempt(payload, context).map_err(|e| {
            error!(%category, "Scan aborted: {}", e);
            e
        })?;

        if let Some(claimed) = FinalOutcome::claimed(category, outcome) {
            debug!(%category, "Payload claimed");
            return Ok(claimed);
        }
    }

    debug!(enabled = request.enabled_categories().len(), "Payload not recognized");
    Ok(FinalOutcome::Unrecognized)
}

/// Runs scans against a fixed set of collaborators.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    context: ScanContext,
}

impl Dispatcher {
    /// Create a dispatcher over `context`.
    #[must_use]
    pub fn new(context: ScanContext) -> Self {
        Self { context }
    }

    /// Collaborators used by this dispatcher.
    #[must_use]
    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    /// Classify `payload` and perform the configured action.
    pub fn dispatch(&self, request: &ScanRequest, payload: &str) -> Result<FinalOutcome> {
        dispatch(request, payload, &self.context)
    }

    /// Dispatch `payload` and deliver the final result to `sink`, waiting
    /// for any sub-flow the claiming category started.
    ///
    /// An integrity fault is returned without touching `sink`.
    pub async fn resolve<S>(&self, request: &ScanRequest, payload: &str, sink: &mut S) -> Result<()>
    where
        S: ContinuationSink + ?Sized,
    {
        let outcome = self.dispatch(request, payload)?;
        route(outcome, payload, sink).await;
        Ok(())
    }
}
