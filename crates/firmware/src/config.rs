//! Build-time transfer parameters
//!
//! All link parameters are fixed configuration constants resolved at
//! build time; there are no CLI flags or runtime knobs.

use platform::{MasterConfig, PeripheralSelect, PinMode, TransferFlags};

/// Bytes exchanged per half-duplex phase.
pub const TRANSFER_SIZE: usize = 64;

/// SPI clock rate for the link (500 kHz).
pub const TRANSFER_BAUDRATE: u32 = 500_000;

/// Chip-select line wired to the peer board.
pub const TRANSFER_SELECT: PeripheralSelect = PeripheralSelect::Pcs3;

/// Master bring-up configuration.
///
/// The link is 3-wire: SDO carries both directions, so the peer's SIN
/// ties to this board's SOUT.
pub const fn master_config() -> MasterConfig {
    MasterConfig {
        baud_rate: TRANSFER_BAUDRATE,
        peripheral_select: TRANSFER_SELECT,
        pin_mode: PinMode::SdoInSdoOut,
    }
}

/// Per-phase descriptor flags: byte-swapped shift order, PCS released
/// between frames.
pub const fn transfer_flags() -> TransferFlags {
    TransferFlags {
        byte_swap: true,
        continuous: false,
    }
}
