//! Delivery of a scan's final result to the screen that started it.

use crate::outcome::{ErrorCode, FinalOutcome, ScanValue};
use crate::subflow::SubflowResult;
use tracing::debug;

/// Receives exactly one terminal result per scan.
pub trait ContinuationSink {
    /// The scan ended successfully.
    fn complete_ok(&mut self, value: Option<ScanValue>);

    /// The scan ended with a user-visible error.
    fn complete_error(&mut self, code: ErrorCode, payload: &str);

    /// The user backed out of a sub-flow.
    fn cancelled(&mut self);
}

/// Deliver `outcome` to `sink`, waiting for a suspended sub-flow first.
///
/// An unrecognized payload is reported as [`ErrorCode::UnrecognizedFormat`]
/// echoing `payload`.
pub async fn route<S>(outcome: FinalOutcome, payload: &str, sink: &mut S)
where
    S: ContinuationSink + ?Sized,
{
    match outcome {
        FinalOutcome::Completed { value, .. } => sink.complete_ok(value),
        FinalOutcome::Failed { failure, .. } => sink.complete_error(failure.code, &failure.payload),
        FinalOutcome::Suspended { category, subflow } => {
            debug!(%category, kind = ?subflow.kind(), "Waiting for sub-flow");
            match subflow.wait().await {
                SubflowResult::Completed(value) => sink.complete_ok(value),
                SubflowResult::Failed(failure) => {
                    sink.complete_error(failure.code, &failure.payload);
                }
                SubflowResult::Cancelled => sink.cancelled(),
            }
        }
        FinalOutcome::Unrecognized => sink.complete_error(ErrorCode::UnrecognizedFormat, payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::outcome::ScanFailure;
    use crate::subflow::{self, SubflowKind};
    use scanpay_core::AccountId;

    #[derive(Debug, Default, PartialEq)]
    enum Delivered {
        #[default]
        Nothing,
        Ok(Option<ScanValue>),
        Error(ErrorCode, String),
        Cancelled,
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: Delivered,
        calls: usize,
    }

    impl ContinuationSink for RecordingSink {
        fn complete_ok(&mut self, value: Option<ScanValue>) {
            self.delivered = Delivered::Ok(value);
            self.calls += 1;
        }

        fn complete_error(&mut self, code: ErrorCode, payload: &str) {
            self.delivered = Delivered::Error(code, payload.to_string());
            self.calls += 1;
        }

        fn cancelled(&mut self) {
            self.delivered = Delivered::Cancelled;
            self.calls += 1;
        }
    }

    #[tokio::test]
    async fn test_route_unrecognized() {
        let mut sink = RecordingSink::default();
        route(FinalOutcome::Unrecognized, "hello", &mut sink).await;

        assert_eq!(
            sink.delivered,
            Delivered::Error(ErrorCode::UnrecognizedFormat, "hello".to_string())
        );
        assert_eq!(sink.calls, 1);
    }

    #[tokio::test]
    async fn test_route_failure_keeps_its_payload() {
        let mut sink = RecordingSink::default();
        let outcome = FinalOutcome::Failed {
            category: Category::MasterSeed,
            failure: ScanFailure::without_payload(ErrorCode::WrongSeed),
        };
        route(outcome, "secret seed text", &mut sink).await;

        assert_eq!(
            sink.delivered,
            Delivered::Error(ErrorCode::WrongSeed, String::new())
        );
    }

    #[tokio::test]
    async fn test_route_suspended_completion() {
        let (completer, pending) = subflow::channel(SubflowKind::Send);
        let account = AccountId::generate();
        let task = tokio::spawn(async move {
            completer.complete(Some(ScanValue::Account(account)));
        });

        let mut sink = RecordingSink::default();
        let outcome = FinalOutcome::Suspended {
            category: Category::Address,
            subflow: pending,
        };
        route(outcome, "payload", &mut sink).await;
        task.await.expect("completer task");

        assert_eq!(
            sink.delivered,
            Delivered::Ok(Some(ScanValue::Account(account)))
        );
        assert_eq!(sink.calls, 1);
    }

    #[tokio::test]
    async fn test_route_suspended_cancellation() {
        let (completer, pending) = subflow::channel(SubflowKind::CombineShares);
        drop(completer);

        let mut sink = RecordingSink::default();
        let outcome = FinalOutcome::Suspended {
            category: Category::SecretShare,
            subflow: pending,
        };
        route(outcome, "payload", &mut sink).await;
        assert_eq!(sink.delivered, Delivered::Cancelled);
    }
}
