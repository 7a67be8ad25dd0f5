//! Operator rendezvous primitives
//!
//! The transfer loop parks twice per cycle: once after the send phase
//! (until the peer is ready to transmit) and once after reporting (before
//! the next cycle starts). Both pauses are two-party barriers with no
//! timeout. [`SyncGate`] abstracts the signal source so the controller's
//! suspension points work the same over a console keypress, a GPIO edge,
//! or a test-injected message.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;

/// Two-party barrier with no timeout.
pub trait SyncGate {
    /// Suspend until the external ready signal arrives.
    fn wait(&mut self) -> impl core::future::Future<Output = ()>;
}

/// Gate released by a `()` message on an embassy channel.
///
/// Whoever holds the sender (console task, interrupt handler, test body)
/// decides when the controller may proceed. One message releases one
/// wait; extra messages queue up to `DEPTH`.
pub struct ChannelGate<'ch, M: RawMutex, const DEPTH: usize> {
    rx: Receiver<'ch, M, (), DEPTH>,
}

impl<'ch, M: RawMutex, const DEPTH: usize> ChannelGate<'ch, M, DEPTH> {
    /// Wrap a channel receiver as a gate.
    pub fn new(rx: Receiver<'ch, M, (), DEPTH>) -> Self {
        Self { rx }
    }
}

impl<M: RawMutex, const DEPTH: usize> SyncGate for ChannelGate<'_, M, DEPTH> {
    async fn wait(&mut self) {
        self.rx.receive().await;
    }
}

/// Always-ready gate for demos and unattended soak runs.
pub struct AutoGate;

impl SyncGate for AutoGate {
    async fn wait(&mut self) {}
}
