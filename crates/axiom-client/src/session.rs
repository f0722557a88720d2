//! Explicit session context: a client, the signed-in user, and recent transactions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use axiom_canonical::TransactionRequest;
use axiom_core::{AxiomError, AxiomResponse, Transaction, TransactionStatus, TransactionType};
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::AxiomClient;
use crate::transport::Transport;

/// Default number of transactions kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Aggregate counts over the retained history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    /// Transactions in history.
    pub total: usize,
    /// Completed transactions.
    pub completed: usize,
    /// Failed transactions.
    pub failed: usize,
    /// Cancelled transactions.
    pub cancelled: usize,
    /// `completed / (completed + failed)`, or 0 when nothing has finished.
    pub success_rate: f64,
}

/// Context object handed to whatever drives transactions on behalf of a user.
///
/// History is bounded; the oldest record is evicted first. The history lock is
/// never held across an await, so concurrent submissions proceed independently.
pub struct AxiomSession<T> {
    client: Arc<AxiomClient<T>>,
    user_id: Uuid,
    capacity: usize,
    history: Mutex<VecDeque<Transaction>>,
}

impl<T: Transport> AxiomSession<T> {
    /// New session with the default history capacity.
    pub fn new(client: Arc<AxiomClient<T>>, user_id: Uuid) -> Self {
        Self::with_capacity(client, user_id, DEFAULT_HISTORY_CAPACITY)
    }

    /// New session keeping at most `capacity` transactions (minimum 1).
    pub fn with_capacity(client: Arc<AxiomClient<T>>, user_id: Uuid, capacity: usize) -> Self {
        Self {
            client,
            user_id,
            capacity: capacity.max(1),
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// Signed-in user.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Underlying client.
    pub fn client(&self) -> &Arc<AxiomClient<T>> {
        &self.client
    }

    fn history_lock(&self) -> MutexGuard<'_, VecDeque<Transaction>> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update<F: FnOnce(&mut Transaction)>(&self, id: Uuid, f: F) {
        if let Some(tx) = self.history_lock().iter_mut().find(|tx| tx.id == id) {
            f(tx);
        }
    }

    /// Records a transaction as processing and returns its id without sending it.
    ///
    /// Pair with [`AxiomSession::dispatch`]; the id can be handed to
    /// [`AxiomSession::cancel`] while the dispatch is in flight.
    pub fn begin(&self, kind: TransactionType, request: TransactionRequest) -> Uuid {
        let mut tx = Transaction::new(self.user_id, kind, request);
        let id = tx.id;
        tx.mark_processing();
        let mut history = self.history_lock();
        while history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(tx);
        id
    }

    /// Executes a transaction recorded by [`AxiomSession::begin`] and records the outcome.
    ///
    /// The result is returned unchanged; a transaction cancelled while in
    /// flight stays cancelled in history. Unknown, evicted or already
    /// finished transactions are not sent and yield `InvalidRequest`.
    pub async fn dispatch(&self, id: Uuid) -> Result<AxiomResponse, AxiomError> {
        let (kind, request) = match self.get(id) {
            Some(tx) if !tx.status.is_terminal() => (tx.kind, tx.request),
            Some(tx) => {
                return Err(AxiomError::InvalidRequest(format!(
                    "transaction {id} is already {:?}",
                    tx.status
                )))
            }
            None => return Err(AxiomError::InvalidRequest(format!("unknown transaction {id}"))),
        };

        let result = self.client.execute_transaction(&request).await;
        match &result {
            Ok(response) => {
                info!(transaction = %id, kind = kind.as_str(), "transaction completed");
                self.update(id, |tx| tx.complete(response.clone()));
            }
            Err(err) => {
                info!(transaction = %id, kind = kind.as_str(), code = err.code(), "transaction failed");
                self.update(id, |tx| tx.fail(err));
            }
        }
        result
    }

    /// Records a transaction, executes it, and records the outcome.
    pub async fn submit(
        &self,
        kind: TransactionType,
        request: TransactionRequest,
    ) -> Result<AxiomResponse, AxiomError> {
        let id = self.begin(kind, request);
        self.dispatch(id).await
    }

    /// Re-runs a recorded transaction's operation and parameters as a new
    /// transaction with a fresh nonce and timestamp.
    pub async fn retry(&self, id: Uuid) -> Result<AxiomResponse, AxiomError> {
        let original = self
            .get(id)
            .ok_or_else(|| AxiomError::InvalidRequest(format!("unknown transaction {id}")))?;
        let request = TransactionRequest::new(
            original.request.operation(),
            original.request.parameters().clone(),
        );
        debug!(transaction = %id, nonce = %request.nonce(), "retrying transaction");
        self.submit(original.kind, request).await
    }

    /// Marks a pending or processing transaction cancelled.
    pub fn cancel(&self, id: Uuid) -> bool {
        let mut cancelled = false;
        self.update(id, |tx| cancelled = tx.cancel());
        cancelled
    }

    /// Snapshot of retained transactions, oldest first.
    pub fn history(&self) -> Vec<Transaction> {
        self.history_lock().iter().cloned().collect()
    }

    /// Looks up a retained transaction.
    pub fn get(&self, id: Uuid) -> Option<Transaction> {
        self.history_lock().iter().find(|tx| tx.id == id).cloned()
    }

    /// Drops all history.
    pub fn clear_history(&self) {
        self.history_lock().clear();
    }

    /// Counts over retained history.
    pub fn stats(&self) -> SessionStats {
        let history = self.history_lock();
        let count = |status| history.iter().filter(|tx| tx.status == status).count();
        let completed = count(TransactionStatus::Completed);
        let failed = count(TransactionStatus::Failed);
        let finished = completed + failed;
        SessionStats {
            total: history.len(),
            completed,
            failed,
            cancelled: count(TransactionStatus::Cancelled),
            success_rate: if finished == 0 {
                0.0
            } else {
                completed as f64 / finished as f64
            },
        }
    }
}
