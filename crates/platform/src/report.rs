//! Cycle event reporting
//!
//! The transfer loop never talks to a console directly; it emits
//! [`ReportEvent`]s into a [`Reporter`]. Production sinks render them to
//! a debug console, tests capture them for sequence assertions.

use crate::spi::{TransferDirection, TransferFault};

/// One observable moment in a transfer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportEvent<'a> {
    /// A cycle began; the transmit buffer is filled for this generation.
    CycleStarted {
        /// Generation seeding the transmit pattern.
        generation: u32,
    },
    /// The send phase completed; `data` is what went out.
    DataSent {
        /// Bytes shifted out to the peer.
        data: &'a [u8],
    },
    /// Parked until the operator confirms the peer is ready to transmit.
    AwaitingPeer,
    /// Every received byte matched the transmit buffer.
    Matched {
        /// The echoed bytes.
        data: &'a [u8],
    },
    /// The echo differed from the transmit buffer.
    Mismatched {
        /// Number of positions that differed.
        mismatches: usize,
    },
    /// The driver faulted; the cycle was abandoned before compare.
    TransferFailed {
        /// Phase the fault occurred in.
        direction: TransferDirection,
        /// What the driver reported.
        fault: TransferFault,
    },
    /// Parked until the operator starts the next cycle.
    AwaitingNextCycle,
}

/// Sink for cycle events.
///
/// Reporting is infallible from the controller's point of view; sinks
/// that can fail swallow their own errors.
pub trait Reporter {
    /// Consume one event.
    fn report(&mut self, event: ReportEvent<'_>) -> impl core::future::Future<Output = ()>;
}
