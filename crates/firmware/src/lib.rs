//! LinkCheck firmware
//!
//! SPI board-to-board link verifier: this board (the master) shifts a
//! generation-seeded payload out to a peer, waits for the operator to
//! arm the peer, clocks the echo back in, and compares byte for byte.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (cycle controller)
//!         ↓
//! Platform HAL (traits: SpiMaster, SyncGate, Reporter)
//!         ↓
//! Hardware Layer (embedded-hal bus drivers, console UART)
//! ```
//!
//! # Features
//!
//! - `std` - Host-side support (platform mocks, desktop examples)
//! - `defmt` - defmt::Format derives on application types
//!
//! # Examples
//!
//! ```bash
//! cargo run -p firmware --example loopback_demo --features std
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // reporting goes through the Reporter abstraction
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(async_fn_in_trait)] // single-threaded control flow, Send bounds not needed

pub mod buffer;
pub mod config;
pub mod console;
pub mod cycle;
pub mod hal;

// Re-export key types
pub use buffer::CycleBuffers;
pub use config::{master_config, transfer_flags, TRANSFER_BAUDRATE, TRANSFER_SELECT, TRANSFER_SIZE};
pub use console::{banner, ConsoleGate, ConsoleReporter, WIRING_GUIDE};
pub use cycle::{CycleController, CycleOutcome, CyclePhase};
pub use hal::SpiDeviceMaster;
