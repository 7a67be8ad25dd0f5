//! Hardware Abstraction Layer (HAL) for the LinkCheck SPI link tester
//!
//! This crate provides trait-based abstractions for everything the
//! transfer-verification loop touches, enabling development and testing
//! without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: cycle controller)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (embedded-hal drivers + PAC)
//! ```
//!
//! # Abstractions
//!
//! - [`SpiMaster`] - blocking half-duplex transfer primitive
//! - [`SyncGate`] - operator rendezvous (no-timeout two-party barrier)
//! - [`Reporter`] - pluggable sink for cycle events
//!
//! # Features
//!
//! - `std`: Enable standard library support (mocks, std error impls)
//! - `defmt`: Enable defmt::Format derives on all platform types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer the Reporter abstraction over println!
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::doc_markdown)] // pin and flag names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single-threaded control flow, Send bounds not needed

pub mod config;
pub mod mocks;
pub mod report;
pub mod spi;
pub mod sync;

// Re-export main types
pub use config::{APP_NAME, APP_TYPE, APP_VERSION};
pub use report::{ReportEvent, Reporter};
pub use spi::{
    MasterConfig, PeripheralSelect, PinMode, SpiMaster, Transfer, TransferDirection,
    TransferFault, TransferFlags, TransferPayload,
};
pub use sync::{AutoGate, ChannelGate, SyncGate};
