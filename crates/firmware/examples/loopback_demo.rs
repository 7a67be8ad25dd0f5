//! Loopback Demo
//!
//! Desktop run of the transfer cycle against the loopback mock: no
//! hardware and no operator. The gate auto-releases and the peer echoes
//! whatever was sent. Cycle 3 corrupts one byte of the echo and cycle 4
//! injects a receive fault, so all three outcomes show up once.
//!
//! Run with: cargo run -p firmware --example loopback_demo --features std

// Desktop demo -- stdout and Debug formatting are the point here.
#![allow(clippy::print_stdout, clippy::use_debug)]

use platform::mocks::{MockSpiMaster, PeerBehavior};
use platform::{AutoGate, ReportEvent, Reporter, TransferFault};

use firmware::cycle::CycleController;
use firmware::{master_config, transfer_flags, TRANSFER_SELECT, TRANSFER_SIZE};

/// Console reporter for the demo: plain stdout, one line per event,
/// hex dumps in the 16-per-line format.
struct StdoutReporter;

impl Reporter for StdoutReporter {
    async fn report(&mut self, event: ReportEvent<'_>) {
        match event {
            ReportEvent::CycleStarted { generation } => {
                println!("\n=== Cycle (generation {generation}) ===");
            }
            ReportEvent::DataSent { data } => {
                println!(" Master transmit:");
                dump(data);
            }
            ReportEvent::AwaitingPeer => println!(" [peer armed automatically]"),
            ReportEvent::Matched { data } => {
                println!(" Transfer complete: all data matched!");
                println!(" Master received:");
                dump(data);
            }
            ReportEvent::Mismatched { mismatches } => {
                println!(" Error occurred in transfer: {mismatches} byte(s) differed.");
            }
            ReportEvent::TransferFailed { direction, fault } => {
                println!(" Transfer failed ({direction:?}): {fault}");
            }
            ReportEvent::AwaitingNextCycle => println!(" [next cycle armed automatically]"),
        }
    }
}

fn dump(data: &[u8]) {
    for row in data.chunks(16) {
        let line: String = row.iter().map(|byte| format!(" 0x{byte:02X}")).collect();
        println!("{line}");
    }
}

async fn run_cycles(spi: MockSpiMaster, cycles: usize) {
    let mut controller: CycleController<_, _, _, TRANSFER_SIZE> = CycleController::new(
        spi,
        AutoGate,
        StdoutReporter,
        TRANSFER_SELECT,
        transfer_flags(),
    );
    for _ in 0..cycles {
        let outcome = controller.run_cycle().await;
        println!(" -> outcome: {outcome:?}");
    }
}

#[tokio::main]
async fn main() {
    println!(
        "{} {} ({})",
        platform::APP_NAME,
        platform::APP_VERSION,
        platform::APP_TYPE
    );
    for line in firmware::WIRING_GUIDE {
        println!("{line}");
    }
    println!("\n[mock link: every wire above is simulated in-process]");

    // Two clean loopback cycles.
    run_cycles(MockSpiMaster::new(master_config()), 2).await;

    // One cycle against a peer that corrupts byte 5 of the echo.
    run_cycles(
        MockSpiMaster::new(master_config()).with_peer(PeerBehavior::CorruptByte(5)),
        1,
    )
    .await;

    // One cycle whose receive phase times out, then its retry.
    run_cycles(
        MockSpiMaster::new(master_config()).fail_transfer(1, TransferFault::Timeout),
        2,
    )
    .await;
}
