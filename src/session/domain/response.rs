//! Remote operation results and the batch-response aggregator.

use super::{AggregationError, PortId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one remote operation against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    success: bool,
    message: String,
}

impl OperationResult {
    /// Creates a result with an explicit success flag.
    #[must_use]
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
        }
    }

    /// Creates a successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Returns whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the descriptive payload.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.success { "SUCCESS" } else { "FAILED" };
        write!(formatter, "[{tag}] {}", self.message)
    }
}

/// Result of one remote call covering several ports.
///
/// The overall flag comes from the server and is authoritative; it is never
/// recomputed from the per-port flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    success: bool,
    results: Vec<OperationResult>,
}

impl BatchResponse {
    /// Creates a batch response.
    #[must_use]
    pub const fn new(success: bool, results: Vec<OperationResult>) -> Self {
        Self { success, results }
    }

    /// Creates a batch whose overall flag is the conjunction of its results.
    #[must_use]
    pub fn from_results(results: Vec<OperationResult>) -> Self {
        let success = results.iter().all(OperationResult::is_success);
        Self::new(success, results)
    }

    /// Returns the overall success flag.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the per-port results in request order.
    #[must_use]
    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    /// Returns the requested ports whose individual result succeeded.
    ///
    /// Results are paired with `targets` positionally; surplus entries on
    /// either side are ignored.
    #[must_use]
    pub fn succeeded_targets(&self, targets: &[PortId]) -> Vec<PortId> {
        targets
            .iter()
            .zip(&self.results)
            .filter(|(_, result)| result.is_success())
            .map(|(port, _)| *port)
            .collect()
    }
}

/// Either shape a remote call can answer with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    /// A single result for a single target.
    Single(OperationResult),
    /// One result per requested target plus an overall flag.
    Batch(BatchResponse),
}

impl From<OperationResult> for RemoteResponse {
    fn from(value: OperationResult) -> Self {
        Self::Single(value)
    }
}

impl From<BatchResponse> for RemoteResponse {
    fn from(value: BatchResponse) -> Self {
        Self::Batch(value)
    }
}

/// Reduces a remote response into a pass/fail verdict and diagnostic text.
///
/// A batch yields its overall flag and the newline-joined per-port results;
/// a single result yields its own flag and its display text.
///
/// # Errors
///
/// Returns [`AggregationError`] when a batch does not carry exactly one
/// result per requested target, or when a single result answers a request
/// for more than one target.
pub fn process_response(
    targets: &[PortId],
    response: &RemoteResponse,
) -> Result<(bool, String), AggregationError> {
    match response {
        RemoteResponse::Batch(batch) => {
            if batch.results().len() != targets.len() {
                return Err(AggregationError::BatchLengthMismatch {
                    expected: targets.len(),
                    actual: batch.results().len(),
                });
            }
            Ok((batch.is_success(), join_batch_response(batch.results())))
        }
        RemoteResponse::Single(result) => {
            if targets.len() > 1 {
                return Err(AggregationError::SingleResultForBatch {
                    targets: targets.len(),
                });
            }
            Ok((result.is_success(), result.to_string()))
        }
    }
}

/// Joins per-port results with newlines, preserving their order.
#[must_use]
pub fn join_batch_response(results: &[OperationResult]) -> String {
    results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn targets() -> Vec<PortId> {
        vec![PortId::new(1), PortId::new(2)]
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn batch_flag_is_authoritative(targets: Vec<PortId>, #[case] overall: bool) {
        let first = OperationResult::success("port 1 acquired");
        let second = OperationResult::success("port 2 acquired");
        let response = RemoteResponse::from(BatchResponse::new(
            overall,
            vec![first.clone(), second.clone()],
        ));

        let (ok, log) = process_response(&targets, &response).expect("shapes should agree");

        assert_eq!(ok, overall);
        assert_eq!(log, format!("{first}\n{second}"));
    }

    #[rstest]
    fn batch_log_preserves_request_order(targets: Vec<PortId>) {
        let response = RemoteResponse::from(BatchResponse::new(
            false,
            vec![
                OperationResult::failure("port 1 is owned by 'lab'"),
                OperationResult::success("port 2 acquired"),
            ],
        ));

        let (_, log) = process_response(&targets, &response).expect("shapes should agree");

        assert_eq!(
            log,
            "[FAILED] port 1 is owned by 'lab'\n[SUCCESS] port 2 acquired"
        );
    }

    #[test]
    fn single_failure_uses_its_own_text() {
        let result = OperationResult::failure("port 4 does not exist");
        let response = RemoteResponse::from(result.clone());

        let verdict = process_response(&[PortId::new(4)], &response);

        assert_eq!(verdict, Ok((false, result.to_string())));
    }

    #[rstest]
    fn short_batch_is_a_protocol_mismatch(targets: Vec<PortId>) {
        let response = RemoteResponse::from(BatchResponse::new(
            true,
            vec![OperationResult::success("port 1 acquired")],
        ));

        let error = process_response(&targets, &response).expect_err("lengths differ");

        assert_eq!(
            error,
            AggregationError::BatchLengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(error.kind(), crate::error::ErrorKind::ProtocolMismatch);
    }

    #[rstest]
    fn single_result_for_many_targets_is_a_protocol_mismatch(targets: Vec<PortId>) {
        let response = RemoteResponse::from(OperationResult::success("done"));

        let result = process_response(&targets, &response);

        assert_eq!(
            result,
            Err(AggregationError::SingleResultForBatch { targets: 2 })
        );
    }

    #[rstest]
    fn succeeded_targets_follow_per_port_flags(targets: Vec<PortId>) {
        let batch = BatchResponse::new(
            false,
            vec![
                OperationResult::success("port 1 acquired"),
                OperationResult::failure("port 2 is owned by 'lab'"),
            ],
        );

        assert_eq!(batch.succeeded_targets(&targets), vec![PortId::new(1)]);
    }

    #[test]
    fn from_results_conjoins_flags() {
        let batch = BatchResponse::from_results(vec![
            OperationResult::success("a"),
            OperationResult::failure("b"),
        ]);
        assert!(!batch.is_success());
        assert!(BatchResponse::from_results(Vec::new()).is_success());
    }
}
