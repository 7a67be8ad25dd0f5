//! SPI master transfer abstraction
//!
//! Trait-based contract for a synchronous-serial master that moves one
//! fixed-length buffer per half-duplex phase. The driver behind the trait
//! owns register access and clocking; callers describe each phase with a
//! [`Transfer`] descriptor and suspend on the returned future until every
//! byte has moved or the driver reports a [`TransferFault`].

/// Direction of one half-duplex transfer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferDirection {
    /// Master shifts data out to the peer.
    Send,
    /// Master clocks data in from the peer.
    Receive,
}

/// Chip-select line addressed by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralSelect {
    /// PCS0
    Pcs0,
    /// PCS1
    Pcs1,
    /// PCS2
    Pcs2,
    /// PCS3
    Pcs3,
}

impl PeripheralSelect {
    /// Hardware index of the chip-select line.
    pub const fn index(self) -> u8 {
        match self {
            Self::Pcs0 => 0,
            Self::Pcs1 => 1,
            Self::Pcs2 => 2,
            Self::Pcs3 => 3,
        }
    }
}

/// Data-pin routing between the SDI and SDO pads.
///
/// Three-wire links tie both directions to a single data pad; the
/// peripheral must know which pad carries which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// SDI receives, SDO transmits (standard 4-wire).
    SdiInSdoOut,
    /// SDI carries both directions (3-wire on the SDI pad).
    SdiInSdiOut,
    /// SDO carries both directions (3-wire on the SDO pad).
    SdoInSdoOut,
    /// SDO receives, SDI transmits (crossed 4-wire).
    SdoInSdiOut,
}

/// Per-transfer modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferFlags {
    /// Reverse byte order within each shift word.
    pub byte_swap: bool,
    /// Keep PCS asserted between frames.
    pub continuous: bool,
}

impl TransferFlags {
    /// All flags clear.
    pub const fn new() -> Self {
        Self {
            byte_swap: false,
            continuous: false,
        }
    }
}

/// Master-side bring-up configuration.
///
/// Resolved once at initialization and never reconfigured while the
/// transfer loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MasterConfig {
    /// SPI clock rate in Hz.
    pub baud_rate: u32,
    /// Chip-select line wired to the peer.
    pub peripheral_select: PeripheralSelect,
    /// Data-pin routing.
    pub pin_mode: PinMode,
}

/// Buffer side of a transfer descriptor.
///
/// Direction and buffer are inseparable: a send phase borrows the payload
/// shared, a receive phase needs exclusive access to the landing buffer.
#[derive(Debug)]
pub enum TransferPayload<'a> {
    /// Bytes to shift out.
    Send(&'a [u8]),
    /// Buffer the clocked-in bytes land in.
    Receive(&'a mut [u8]),
}

/// One half-duplex transfer descriptor.
///
/// Constructed fresh per phase, consumed by [`SpiMaster::transfer`],
/// discarded after.
#[derive(Debug)]
pub struct Transfer<'a> {
    /// Direction and buffer for this phase.
    pub payload: TransferPayload<'a>,
    /// Chip-select line to assert.
    pub peripheral_select: PeripheralSelect,
    /// Modifier flags.
    pub flags: TransferFlags,
}

impl<'a> Transfer<'a> {
    /// Describe a send-only phase.
    pub fn send(data: &'a [u8], peripheral_select: PeripheralSelect, flags: TransferFlags) -> Self {
        Self {
            payload: TransferPayload::Send(data),
            peripheral_select,
            flags,
        }
    }

    /// Describe a receive-only phase.
    pub fn receive(
        buffer: &'a mut [u8],
        peripheral_select: PeripheralSelect,
        flags: TransferFlags,
    ) -> Self {
        Self {
            payload: TransferPayload::Receive(buffer),
            peripheral_select,
            flags,
        }
    }

    /// Direction of this phase.
    pub fn direction(&self) -> TransferDirection {
        match self.payload {
            TransferPayload::Send(_) => TransferDirection::Send,
            TransferPayload::Receive(_) => TransferDirection::Receive,
        }
    }

    /// Number of bytes this phase moves.
    pub fn len(&self) -> usize {
        match &self.payload {
            TransferPayload::Send(data) => data.len(),
            TransferPayload::Receive(buffer) => buffer.len(),
        }
    }

    /// Whether the descriptor moves no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Faults a transfer driver can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferFault {
    /// Peripheral was still occupied by a previous transfer.
    Busy,
    /// Bus-level failure while shifting.
    Bus,
    /// Transfer did not complete in time.
    Timeout,
}

#[cfg(feature = "std")]
impl std::error::Error for TransferFault {}

impl core::fmt::Display for TransferFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Busy => write!(f, "peripheral busy"),
            Self::Bus => write!(f, "bus error"),
            Self::Timeout => write!(f, "transfer timeout"),
        }
    }
}

/// Blocking transfer primitive of an SPI master.
///
/// The returned future completes only when all [`Transfer::len`] bytes
/// have physically moved or the driver reports a fault. Awaiting it is
/// the caller's only suspension point during a transfer phase.
pub trait SpiMaster {
    /// Execute one half-duplex transfer to completion.
    fn transfer(
        &mut self,
        xfer: Transfer<'_>,
    ) -> impl core::future::Future<Output = Result<(), TransferFault>>;
}
