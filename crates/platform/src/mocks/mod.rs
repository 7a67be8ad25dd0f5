//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits for
//! use in unit and integration tests: a scriptable peer behind the SPI
//! master contract, an always-ready counting gate, and a reporter that
//! records every event it sees.

#![cfg(any(test, feature = "std"))]

use crate::report::{ReportEvent, Reporter};
use crate::spi::{
    MasterConfig, PeripheralSelect, SpiMaster, Transfer, TransferDirection, TransferFault,
    TransferFlags, TransferPayload,
};
use crate::sync::SyncGate;

/// Largest payload the mocks copy and store.
pub const MOCK_PAYLOAD_CAPACITY: usize = 256;

/// How the mock peer answers a receive phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerBehavior {
    /// Echo the most recently sent payload back unchanged.
    Loopback,
    /// Echo, then invert every bit of the byte at this index.
    CorruptByte(usize),
    /// Never drive the line; the receive buffer is left untouched.
    Silent,
}

/// Descriptor fields captured for one mock transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRecord {
    /// Direction of the phase.
    pub direction: TransferDirection,
    /// Bytes the descriptor covered.
    pub len: usize,
    /// Chip-select line the descriptor addressed.
    pub peripheral_select: PeripheralSelect,
    /// Flags the descriptor carried.
    pub flags: TransferFlags,
}

/// Mock SPI master with a scriptable peer; records every descriptor.
pub struct MockSpiMaster {
    config: MasterConfig,
    peer: PeerBehavior,
    fault_plan: Option<(usize, TransferFault)>,
    last_sent: heapless::Vec<u8, MOCK_PAYLOAD_CAPACITY>,
    /// Descriptor log, capacity-bounded; excess transfers keep counting
    /// in [`MockSpiMaster::transfer_count`] but are not recorded.
    pub records: heapless::Vec<TransferRecord, 32>,
    transfers: usize,
}

impl MockSpiMaster {
    /// Create a loopback mock brought up with `config`.
    pub fn new(config: MasterConfig) -> Self {
        Self {
            config,
            peer: PeerBehavior::Loopback,
            fault_plan: None,
            last_sent: heapless::Vec::new(),
            records: heapless::Vec::new(),
            transfers: 0,
        }
    }

    /// Replace the peer behavior.
    pub fn with_peer(mut self, peer: PeerBehavior) -> Self {
        self.peer = peer;
        self
    }

    /// Fail the `nth` transfer (0-based) with `fault`, once.
    pub fn fail_transfer(mut self, nth: usize, fault: TransferFault) -> Self {
        self.fault_plan = Some((nth, fault));
        self
    }

    /// Total transfers attempted, including faulted ones.
    pub fn transfer_count(&self) -> usize {
        self.transfers
    }

    /// The payload captured from the most recent send phase.
    pub fn last_sent(&self) -> &[u8] {
        &self.last_sent
    }

    /// The configuration the mock was brought up with.
    pub fn config(&self) -> &MasterConfig {
        &self.config
    }
}

impl SpiMaster for MockSpiMaster {
    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    async fn transfer(&mut self, xfer: Transfer<'_>) -> Result<(), TransferFault> {
        let n = self.transfers;
        self.transfers += 1;

        if self.records.len() < self.records.capacity() {
            let _ = self.records.push(TransferRecord {
                direction: xfer.direction(),
                len: xfer.len(),
                peripheral_select: xfer.peripheral_select,
                flags: xfer.flags,
            });
        }

        if let Some((nth, fault)) = self.fault_plan {
            if nth == n {
                self.fault_plan = None;
                return Err(fault);
            }
        }

        match xfer.payload {
            TransferPayload::Send(data) => {
                self.last_sent.clear();
                self.last_sent
                    .extend(data.iter().copied().take(MOCK_PAYLOAD_CAPACITY));
            }
            TransferPayload::Receive(buffer) => match self.peer {
                PeerBehavior::Loopback => {
                    for (slot, byte) in buffer.iter_mut().zip(self.last_sent.iter()) {
                        *slot = *byte;
                    }
                }
                PeerBehavior::CorruptByte(index) => {
                    for (slot, byte) in buffer.iter_mut().zip(self.last_sent.iter()) {
                        *slot = *byte;
                    }
                    if let Some(slot) = buffer.get_mut(index) {
                        *slot ^= 0xFF;
                    }
                }
                PeerBehavior::Silent => {}
            },
        }
        Ok(())
    }
}

/// Always-ready gate counting how often the caller parked on it.
#[derive(Debug, Default)]
pub struct MockGate {
    /// Number of completed waits.
    pub waits: usize,
}

impl MockGate {
    /// Create a gate with zero recorded waits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyncGate for MockGate {
    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    async fn wait(&mut self) {
        self.waits += 1;
    }
}

/// Owned copy of a [`ReportEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    /// See [`ReportEvent::CycleStarted`].
    CycleStarted {
        /// Generation seeding the cycle.
        generation: u32,
    },
    /// See [`ReportEvent::DataSent`].
    DataSent {
        /// Copy of the transmitted bytes.
        data: heapless::Vec<u8, MOCK_PAYLOAD_CAPACITY>,
    },
    /// See [`ReportEvent::AwaitingPeer`].
    AwaitingPeer,
    /// See [`ReportEvent::Matched`].
    Matched {
        /// Copy of the received bytes.
        data: heapless::Vec<u8, MOCK_PAYLOAD_CAPACITY>,
    },
    /// See [`ReportEvent::Mismatched`].
    Mismatched {
        /// Number of differing positions.
        mismatches: usize,
    },
    /// See [`ReportEvent::TransferFailed`].
    TransferFailed {
        /// Faulting phase.
        direction: TransferDirection,
        /// Reported fault.
        fault: TransferFault,
    },
    /// See [`ReportEvent::AwaitingNextCycle`].
    AwaitingNextCycle,
}

impl RecordedEvent {
    /// Payload-free label, for event-sequence assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CycleStarted { .. } => "cycle_started",
            Self::DataSent { .. } => "data_sent",
            Self::AwaitingPeer => "awaiting_peer",
            Self::Matched { .. } => "matched",
            Self::Mismatched { .. } => "mismatched",
            Self::TransferFailed { .. } => "transfer_failed",
            Self::AwaitingNextCycle => "awaiting_next_cycle",
        }
    }
}

impl From<ReportEvent<'_>> for RecordedEvent {
    fn from(event: ReportEvent<'_>) -> Self {
        match event {
            ReportEvent::CycleStarted { generation } => Self::CycleStarted { generation },
            ReportEvent::DataSent { data } => Self::DataSent {
                data: data.iter().copied().take(MOCK_PAYLOAD_CAPACITY).collect(),
            },
            ReportEvent::AwaitingPeer => Self::AwaitingPeer,
            ReportEvent::Matched { data } => Self::Matched {
                data: data.iter().copied().take(MOCK_PAYLOAD_CAPACITY).collect(),
            },
            ReportEvent::Mismatched { mismatches } => Self::Mismatched { mismatches },
            ReportEvent::TransferFailed { direction, fault } => {
                Self::TransferFailed { direction, fault }
            }
            ReportEvent::AwaitingNextCycle => Self::AwaitingNextCycle,
        }
    }
}

/// Reporter that stores an owned copy of every event, capacity-bounded.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Events seen so far, oldest first.
    pub events: heapless::Vec<RecordedEvent, 64>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded event kinds, in order.
    pub fn kinds(&self) -> heapless::Vec<&'static str, 64> {
        self.events.iter().map(RecordedEvent::kind).collect()
    }
}

impl Reporter for RecordingReporter {
    async fn report(&mut self, event: ReportEvent<'_>) {
        if self.events.len() < self.events.capacity() {
            let _ = self.events.push(RecordedEvent::from(event));
        }
    }
}

/// Reporter that discards every event; for soak loops.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    async fn report(&mut self, _event: ReportEvent<'_>) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::spi::PinMode;

    fn test_config() -> MasterConfig {
        MasterConfig {
            baud_rate: 500_000,
            peripheral_select: PeripheralSelect::Pcs3,
            pin_mode: PinMode::SdoInSdoOut,
        }
    }

    fn flags() -> TransferFlags {
        TransferFlags::new()
    }

    #[tokio::test]
    async fn test_loopback_echo() {
        let mut spi = MockSpiMaster::new(test_config());
        let sent = [1u8, 2, 3, 4];
        spi.transfer(Transfer::send(&sent, PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();

        let mut rx = [0u8; 4];
        spi.transfer(Transfer::receive(&mut rx, PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();
        assert_eq!(rx, sent);
        assert_eq!(spi.transfer_count(), 2);
    }

    #[tokio::test]
    async fn test_silent_peer_leaves_buffer_untouched() {
        let mut spi = MockSpiMaster::new(test_config()).with_peer(PeerBehavior::Silent);
        spi.transfer(Transfer::send(&[5u8; 4], PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();

        let mut rx = [0u8; 4];
        spi.transfer(Transfer::receive(&mut rx, PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();
        assert_eq!(rx, [0u8; 4]);
    }

    #[tokio::test]
    async fn test_corrupt_byte_differs_from_sent() {
        let mut spi = MockSpiMaster::new(test_config()).with_peer(PeerBehavior::CorruptByte(2));
        let sent = [10u8, 20, 30, 40];
        spi.transfer(Transfer::send(&sent, PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();

        let mut rx = [0u8; 4];
        spi.transfer(Transfer::receive(&mut rx, PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();
        assert_eq!(rx[0], 10);
        assert_eq!(rx[1], 20);
        assert_ne!(rx[2], 30);
        assert_eq!(rx[3], 40);
    }

    #[tokio::test]
    async fn test_fault_fires_once() {
        let mut spi =
            MockSpiMaster::new(test_config()).fail_transfer(0, TransferFault::Timeout);
        let err = spi
            .transfer(Transfer::send(&[1u8], PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap_err();
        assert_eq!(err, TransferFault::Timeout);

        // Same call succeeds after the planned fault has fired.
        spi.transfer(Transfer::send(&[1u8], PeripheralSelect::Pcs3, flags()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_records_capture_descriptor_fields() {
        let mut spi = MockSpiMaster::new(test_config());
        let mut rx = [0u8; 8];
        spi.transfer(Transfer::send(&[0u8; 8], PeripheralSelect::Pcs1, flags()))
            .await
            .unwrap();
        spi.transfer(Transfer::receive(&mut rx, PeripheralSelect::Pcs1, flags()))
            .await
            .unwrap();

        assert_eq!(spi.records.len(), 2);
        assert_eq!(spi.records[0].direction, TransferDirection::Send);
        assert_eq!(spi.records[0].len, 8);
        assert_eq!(spi.records[0].peripheral_select, PeripheralSelect::Pcs1);
        assert_eq!(spi.records[1].direction, TransferDirection::Receive);
    }

    #[tokio::test]
    async fn test_gate_counts_waits() {
        let mut gate = MockGate::new();
        gate.wait().await;
        gate.wait().await;
        assert_eq!(gate.waits, 2);
    }

    #[tokio::test]
    async fn test_recorder_keeps_order_and_payloads() {
        let mut rep = RecordingReporter::new();
        rep.report(ReportEvent::CycleStarted { generation: 7 }).await;
        rep.report(ReportEvent::DataSent { data: &[1, 2, 3] }).await;
        rep.report(ReportEvent::Mismatched { mismatches: 1 }).await;

        assert_eq!(
            rep.kinds().as_slice(),
            ["cycle_started", "data_sent", "mismatched"]
        );
        assert_eq!(
            rep.events[1],
            RecordedEvent::DataSent {
                data: heapless::Vec::from_slice(&[1, 2, 3]).unwrap()
            }
        );
    }
}
