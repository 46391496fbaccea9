//! Recording transport adapter.
//!
//! The test double for the pipeline's acknowledgment contract: it records
//! every signal and acknowledgment, and can be switched into a failing mode
//! to exercise the swallow-and-warn paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::OriginatorId;
use crate::ports::{Acknowledgment, Transport, TransportError};

/// Transport that records interactions instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    signals: Arc<Mutex<Vec<OriginatorId>>>,
    acks: Arc<Mutex<Vec<(OriginatorId, Acknowledgment)>>>,
    fail_signals: Arc<AtomicBool>,
    fail_acks: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `signal_processing` calls fail.
    pub fn fail_signals(&self, fail: bool) {
        self.fail_signals.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `acknowledge` calls fail.
    pub fn fail_acks(&self, fail: bool) {
        self.fail_acks.store(fail, Ordering::SeqCst);
    }

    /// Originators that received a processing signal, in order.
    pub async fn signals(&self) -> Vec<OriginatorId> {
        self.signals.lock().await.clone()
    }

    /// Recorded acknowledgments, in order.
    pub async fn acks(&self) -> Vec<(OriginatorId, Acknowledgment)> {
        self.acks.lock().await.clone()
    }

    pub async fn ack_count(&self) -> usize {
        self.acks.lock().await.len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn signal_processing(&self, originator: OriginatorId) -> Result<(), TransportError> {
        if self.fail_signals.load(Ordering::SeqCst) {
            return Err(TransportError::Delivery("signal channel down".to_string()));
        }
        self.signals.lock().await.push(originator);
        Ok(())
    }

    async fn acknowledge(
        &self,
        originator: OriginatorId,
        ack: &Acknowledgment,
    ) -> Result<(), TransportError> {
        // Failing mode still counts the attempt; the contract under test is
        // one attempt per event, not one delivery.
        self.acks.lock().await.push((originator, ack.clone()));
        if self.fail_acks.load(Ordering::SeqCst) {
            return Err(TransportError::Delivery("ack channel down".to_string()));
        }
        Ok(())
    }
}
