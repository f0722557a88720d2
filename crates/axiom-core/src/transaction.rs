use axiom_canonical::{timestamp, TransactionRequest, ValueMap};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AxiomError;
use crate::response::AxiomResponse;

/// Kind of work a transaction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Free-form AI query.
    AiQuery,
    /// Dataset analysis.
    DataAnalysis,
    /// Model prediction.
    Prediction,
    /// Optimization run.
    Optimization,
    /// Verification job.
    Verification,
}

impl TransactionType {
    /// Every transaction type.
    pub const ALL: [TransactionType; 5] = [
        TransactionType::AiQuery,
        TransactionType::DataAnalysis,
        TransactionType::Prediction,
        TransactionType::Optimization,
        TransactionType::Verification,
    ];

    /// Wire name, e.g. `ai_query`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::AiQuery => "ai_query",
            TransactionType::DataAnalysis => "data_analysis",
            TransactionType::Prediction => "prediction",
            TransactionType::Optimization => "optimization",
            TransactionType::Verification => "verification",
        }
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded, not yet dispatched.
    Pending,
    /// Dispatched, awaiting a verified response.
    Processing,
    /// Verified response received.
    Completed,
    /// Failed with an error.
    Failed,
    /// Cancelled by the caller.
    Cancelled,
}

impl TransactionStatus {
    /// True once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }
}

/// Serializable summary of a failed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionError {
    /// Stable error code (see [`AxiomError::code`]).
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Optional structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ValueMap>,
}

impl From<&AxiomError> for TransactionError {
    fn from(err: &AxiomError) -> Self {
        let details = match err {
            AxiomError::ServerError { code, .. } => {
                let mut map = ValueMap::new();
                map.insert("status".into(), i64::from(*code).into());
                Some(map)
            }
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            details,
        }
    }
}

/// Caller-side record of one transaction and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Local transaction id.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Kind of work.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Signed request.
    pub request: TransactionRequest,
    /// Verified response, once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AxiomResponse>,
    /// Creation time.
    #[serde(with = "timestamp::iso8601")]
    pub created_at: DateTime<Utc>,
    /// Completion time, once terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Failure summary, when failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TransactionError>,
}

impl Transaction {
    /// New pending transaction.
    pub fn new(user_id: Uuid, kind: TransactionType, request: TransactionRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            status: TransactionStatus::Pending,
            request,
            response: None,
            created_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }

    /// Time from creation to completion, once completed.
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.created_at)
    }

    /// Marks the transaction as dispatched.
    pub fn mark_processing(&mut self) {
        if self.status == TransactionStatus::Pending {
            self.status = TransactionStatus::Processing;
        }
    }

    /// Records a verified response. Ignored once terminal.
    pub fn complete(&mut self, response: AxiomResponse) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TransactionStatus::Completed;
        self.response = Some(response);
        self.completed_at = Some(Utc::now());
    }

    /// Records a failure. Ignored once terminal.
    pub fn fail(&mut self, err: &AxiomError) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TransactionStatus::Failed;
        self.error = Some(err.into());
        self.completed_at = Some(Utc::now());
    }

    /// Cancels a non-terminal transaction. Returns whether the state changed.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TransactionStatus::Cancelled;
        self.completed_at = Some(Utc::now());
        true
    }
}
