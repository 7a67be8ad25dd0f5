//! Transfer cycle state machine
//!
//! Drives one full send/verify round trip against the peer and repeats
//! forever: fill the transmit buffer from the generation counter, shift
//! it out, park until the operator confirms the peer is ready, clear and
//! fill the receive buffer from the wire, compare byte for byte, report,
//! park again, advance the generation. Phases are strictly sequential;
//! the buffers are reused in place, so a cycle never overlaps its
//! predecessor.

use platform::{
    ReportEvent, Reporter, SpiMaster, SyncGate, Transfer, TransferDirection, TransferFault,
    PeripheralSelect, TransferFlags,
};

use crate::buffer::CycleBuffers;

/// Phases of one transfer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CyclePhase {
    /// Between cycles.
    Idle,
    /// Seeding the transmit buffer.
    Filling,
    /// Shifting the payload out.
    Sending,
    /// Parked until the peer is ready to transmit.
    AwaitingPeerReady,
    /// Clocking the echo in.
    Receiving,
    /// Comparing echo against payload.
    Comparing,
    /// Emitting the cycle outcome.
    Reporting,
    /// A transfer fault ended the cycle early.
    Faulted,
}

/// Result of one full cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Every received byte matched.
    Matched,
    /// The echo differed; the loop continues.
    Mismatched {
        /// Number of differing positions.
        mismatches: usize,
    },
    /// The driver faulted; compare never ran.
    Faulted {
        /// Phase the fault occurred in.
        direction: TransferDirection,
        /// What the driver reported.
        fault: TransferFault,
    },
}

/// Transfer cycle controller.
///
/// Generic over:
/// - `SPI` — the [`SpiMaster`] transfer driver.
/// - `G` — the [`SyncGate`] pacing both operator rendezvous points.
/// - `R` — the [`Reporter`] sink for cycle events.
/// - `N` — bytes per half-duplex phase.
///
/// Owns the buffer pair exclusively; no other control flow touches it.
pub struct CycleController<SPI, G, R, const N: usize> {
    spi: SPI,
    gate: G,
    reporter: R,
    select: PeripheralSelect,
    flags: TransferFlags,
    buffers: CycleBuffers<N>,
    generation: u32,
    phase: CyclePhase,
}

impl<SPI, G, R, const N: usize> CycleController<SPI, G, R, N>
where
    SPI: SpiMaster,
    G: SyncGate,
    R: Reporter,
{
    /// Create a controller around an initialised driver.
    ///
    /// `select` and `flags` go into every transfer descriptor. The
    /// generation counter starts at 1.
    pub fn new(
        spi: SPI,
        gate: G,
        reporter: R,
        select: PeripheralSelect,
        flags: TransferFlags,
    ) -> Self {
        Self {
            spi,
            gate,
            reporter,
            select,
            flags,
            buffers: CycleBuffers::new(),
            generation: 1,
            phase: CyclePhase::Idle,
        }
    }

    /// Generation seeding the next (or current) cycle's payload.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Phase the controller is currently in.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Tear down, returning the driver, gate, and reporter.
    pub fn into_parts(self) -> (SPI, G, R) {
        (self.spi, self.gate, self.reporter)
    }

    /// Drive one full cycle to its outcome.
    ///
    /// The four suspension points are the two transfer futures and the
    /// two gate waits; everything between them runs to completion.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.phase = CyclePhase::Filling;
        self.buffers.fill_tx(self.generation);
        self.reporter
            .report(ReportEvent::CycleStarted {
                generation: self.generation,
            })
            .await;

        self.phase = CyclePhase::Sending;
        let send = Transfer::send(self.buffers.tx(), self.select, self.flags);
        if let Err(fault) = self.spi.transfer(send).await {
            return self.abort(TransferDirection::Send, fault).await;
        }

        self.phase = CyclePhase::AwaitingPeerReady;
        self.reporter
            .report(ReportEvent::DataSent {
                data: self.buffers.tx(),
            })
            .await;
        self.reporter.report(ReportEvent::AwaitingPeer).await;
        self.gate.wait().await;

        self.phase = CyclePhase::Receiving;
        self.buffers.clear_rx();
        let receive = Transfer::receive(self.buffers.rx_mut(), self.select, self.flags);
        if let Err(fault) = self.spi.transfer(receive).await {
            return self.abort(TransferDirection::Receive, fault).await;
        }

        self.phase = CyclePhase::Comparing;
        let mismatches = self.buffers.mismatches();

        self.phase = CyclePhase::Reporting;
        let outcome = if mismatches == 0 {
            self.reporter
                .report(ReportEvent::Matched {
                    data: self.buffers.rx(),
                })
                .await;
            CycleOutcome::Matched
        } else {
            self.reporter
                .report(ReportEvent::Mismatched { mismatches })
                .await;
            CycleOutcome::Mismatched { mismatches }
        };

        self.park_for_next_cycle().await;
        self.generation = self.generation.wrapping_add(1);
        outcome
    }

    /// Run cycles until reset or power-down; never returns.
    pub async fn run(&mut self) {
        loop {
            let _ = self.run_cycle().await;
        }
    }

    /// A transfer fault ends the cycle before compare. The generation
    /// stays put so the same payload is retried next cycle.
    async fn abort(&mut self, direction: TransferDirection, fault: TransferFault) -> CycleOutcome {
        self.phase = CyclePhase::Faulted;
        self.reporter
            .report(ReportEvent::TransferFailed { direction, fault })
            .await;
        self.park_for_next_cycle().await;
        CycleOutcome::Faulted { direction, fault }
    }

    async fn park_for_next_cycle(&mut self) {
        self.reporter.report(ReportEvent::AwaitingNextCycle).await;
        self.gate.wait().await;
        self.phase = CyclePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mocks::{MockGate, MockSpiMaster, NullReporter};
    use platform::{MasterConfig, PinMode};

    fn controller() -> CycleController<MockSpiMaster, MockGate, NullReporter, 8> {
        let config = MasterConfig {
            baud_rate: 500_000,
            peripheral_select: PeripheralSelect::Pcs3,
            pin_mode: PinMode::SdoInSdoOut,
        };
        CycleController::new(
            MockSpiMaster::new(config),
            MockGate::new(),
            NullReporter,
            PeripheralSelect::Pcs3,
            TransferFlags::new(),
        )
    }

    #[test]
    fn starts_idle_at_generation_one() {
        let controller = controller();
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.phase(), CyclePhase::Idle);
    }

    #[tokio::test]
    async fn completed_cycle_returns_to_idle() {
        let mut controller = controller();
        let outcome = controller.run_cycle().await;
        assert_eq!(outcome, CycleOutcome::Matched);
        assert_eq!(controller.phase(), CyclePhase::Idle);
        assert_eq!(controller.generation(), 2);
    }
}
