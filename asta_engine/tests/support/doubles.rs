//! Test doubles for the external services the workflows depend on.
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
        Mutex,
    },
};

use asta_engine::{
    ledger::{LedgerKind, LedgerRecord},
    notifications::EmailMessage,
    traits::{
        LedgerError,
        LedgerWriter,
        NotificationError,
        Notifier,
        PaymentProcessor,
        PaymentProcessorError,
        ProcessorOrder,
        ProcessorOrderRequest,
    },
    XlsxLedger,
};

/// Records every email instead of sending it. Can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, email: EmailMessage) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Unreachable("The relay is down".into()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// A real spreadsheet ledger whose appends can be made to fail.
#[derive(Debug, Clone)]
pub struct FlakyLedger {
    inner: XlsxLedger,
    failing: Arc<AtomicBool>,
}

impl FlakyLedger {
    pub fn new(inner: XlsxLedger) -> Self {
        Self { inner, failing: Arc::new(AtomicBool::new(false)) }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl LedgerWriter for FlakyLedger {
    async fn append(&self, kind: LedgerKind, record: LedgerRecord) -> Result<(), LedgerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteError(kind.file_name().into(), "The disk is full".into()));
        }
        self.inner.append(kind, record).await
    }

    async fn read_all(&self, kind: LedgerKind) -> Result<Vec<LedgerRecord>, LedgerError> {
        self.inner.read_all(kind).await
    }

    fn ledger_path(&self, kind: LedgerKind) -> PathBuf {
        self.inner.ledger_path(kind)
    }
}

/// Hands out sequential order ids and remembers the last request.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessor {
    counter: Arc<AtomicU64>,
    last_request: Arc<Mutex<Option<ProcessorOrderRequest>>>,
}

impl FakeProcessor {
    pub fn last_request(&self) -> Option<ProcessorOrderRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl PaymentProcessor for FakeProcessor {
    fn key_id(&self) -> String {
        "rzp_test_key".into()
    }

    async fn create_order(&self, request: ProcessorOrderRequest) -> Result<ProcessorOrder, PaymentProcessorError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let order = ProcessorOrder {
            order_id: format!("order_{n:03}"),
            amount: request.amount,
            currency: request.currency.clone(),
        };
        *self.last_request.lock().unwrap() = Some(request);
        Ok(order)
    }
}
