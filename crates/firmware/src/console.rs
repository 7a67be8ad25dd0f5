//! Debug-console reporting and operator pacing
//!
//! Renders cycle events in the classic debug-console format (hex dumps,
//! 16 values per line) over any [`embedded_io_async::Write`] sink, and
//! implements the operator rendezvous as a single discarded keypress on
//! any [`embedded_io_async::Read`] source. Console loss never fails a
//! cycle: write errors are swallowed.

use core::fmt::Write as _;

use embedded_io_async::{Read, Write};
use heapless::String;
use platform::{ReportEvent, Reporter, SyncGate, TransferDirection, APP_NAME, APP_TYPE, APP_VERSION};

/// Hex values per dump line.
const DUMP_COLUMNS: usize = 16;

/// Line assembly buffer: 16 values of ` 0xNN` plus CRLF.
const LINE_CAPACITY: usize = 96;

/// Link wiring expected by this application, one console line each.
pub const WIRING_GUIDE: &[&str] = &[
    "This board is the master; the peer board is the slave.",
    "Check the line connection before starting:",
    "   CLK  --   CLK",
    "   PCS  --   PCS",
    "   SOUT --   SIN",
    "   GND  --   GND",
];

/// Write the startup banner: application identity plus wiring guide.
pub async fn banner<W: Write>(out: &mut W) {
    let mut title: String<LINE_CAPACITY> = String::new();
    let _ = write!(title, "\r\n{APP_NAME} {APP_VERSION} ({APP_TYPE})\r\n");
    let _ = out.write_all(title.as_bytes()).await;
    for line in WIRING_GUIDE {
        let _ = out.write_all(line.as_bytes()).await;
        let _ = out.write_all(b"\r\n").await;
    }
}

/// Renders [`ReportEvent`]s onto a console byte sink.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Wrap a console sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Tear down, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    async fn line(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes()).await;
    }

    async fn dump(&mut self, data: &[u8]) {
        for row in data.chunks(DUMP_COLUMNS) {
            let mut line: String<LINE_CAPACITY> = String::new();
            for byte in row {
                let _ = write!(line, " 0x{byte:02X}");
            }
            let _ = line.push_str("\r\n");
            let _ = self.out.write_all(line.as_bytes()).await;
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    async fn report(&mut self, event: ReportEvent<'_>) {
        match event {
            ReportEvent::CycleStarted { .. } => {}
            ReportEvent::DataSent { data } => {
                self.line("\r\n Master transmit:\r\n").await;
                self.dump(data).await;
            }
            ReportEvent::AwaitingPeer => {
                self.line("\r\nMaster transmit complete! Input any character to continue.\r\n")
                    .await;
                self.line("Make sure the peer board is ready to transmit before you do.\r\n")
                    .await;
            }
            ReportEvent::Matched { data } => {
                self.line("\r\nTransfer complete: all data matched!\r\n").await;
                self.line("\r\n Master received:\r\n").await;
                self.dump(data).await;
            }
            ReportEvent::Mismatched { mismatches } => {
                let mut line: String<LINE_CAPACITY> = String::new();
                let _ = write!(
                    line,
                    "\r\nError occurred in transfer: {mismatches} byte(s) differed.\r\n"
                );
                let _ = self.out.write_all(line.as_bytes()).await;
            }
            ReportEvent::TransferFailed { direction, fault } => {
                let phase = match direction {
                    TransferDirection::Send => "send",
                    TransferDirection::Receive => "receive",
                };
                let mut line: String<LINE_CAPACITY> = String::new();
                let _ = write!(line, "\r\nTransfer failed during {phase}: {fault}\r\n");
                let _ = self.out.write_all(line.as_bytes()).await;
            }
            ReportEvent::AwaitingNextCycle => {
                self.line("\r\nPress any key to run again\r\n").await;
            }
        }
    }
}

/// Operator rendezvous over a console: one keypress, value discarded.
pub struct ConsoleGate<R: Read> {
    input: R,
}

impl<R: Read> ConsoleGate<R> {
    /// Wrap a console byte source.
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> SyncGate for ConsoleGate<R> {
    async fn wait(&mut self) {
        let mut key = [0u8; 1];
        // EOF and read errors release the gate rather than wedge the loop.
        let _ = self.input.read(&mut key).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::fmt::Write as _;

    use platform::TransferFault;

    struct SliceSink {
        bytes: Vec<u8>,
    }

    impl SliceSink {
        fn new() -> Self {
            Self { bytes: Vec::new() }
        }

        fn text(&self) -> &str {
            core::str::from_utf8(&self.bytes).unwrap()
        }
    }

    impl embedded_io_async::ErrorType for SliceSink {
        type Error = Infallible;
    }

    impl embedded_io_async::Write for SliceSink {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct KeySource {
        reads: usize,
    }

    impl embedded_io_async::ErrorType for KeySource {
        type Error = Infallible;
    }

    impl embedded_io_async::Read for KeySource {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.reads += 1;
            if let Some(slot) = buf.first_mut() {
                *slot = b'\n';
            }
            Ok(buf.len().min(1))
        }
    }

    #[tokio::test]
    async fn dump_prints_sixteen_values_per_line() {
        let data: Vec<u8> = (0u8..32).collect();
        let mut reporter = ConsoleReporter::new(SliceSink::new());
        reporter.report(ReportEvent::DataSent { data: &data }).await;

        let sink = reporter.into_inner();
        let mut expected = String::new();
        expected.push_str("\r\n Master transmit:\r\n");
        for row in data.chunks(16) {
            for byte in row {
                let _ = write!(expected, " 0x{byte:02X}");
            }
            expected.push_str("\r\n");
        }
        assert_eq!(sink.text(), expected.as_str());
    }

    #[tokio::test]
    async fn matched_reports_success_and_dumps_received() {
        let mut reporter = ConsoleReporter::new(SliceSink::new());
        reporter
            .report(ReportEvent::Matched { data: &[0xAB, 0xCD] })
            .await;

        let text = reporter.into_inner();
        let text = text.text().to_string();
        assert!(text.contains("all data matched"));
        assert!(text.contains(" Master received:"));
        assert!(text.contains(" 0xAB 0xCD"));
    }

    #[tokio::test]
    async fn mismatch_reports_exact_count() {
        let mut reporter = ConsoleReporter::new(SliceSink::new());
        reporter
            .report(ReportEvent::Mismatched { mismatches: 3 })
            .await;
        assert!(reporter
            .into_inner()
            .text()
            .contains("Error occurred in transfer: 3 byte(s) differed."));
    }

    #[tokio::test]
    async fn fault_report_names_phase_and_fault() {
        let mut reporter = ConsoleReporter::new(SliceSink::new());
        reporter
            .report(ReportEvent::TransferFailed {
                direction: TransferDirection::Receive,
                fault: TransferFault::Timeout,
            })
            .await;

        let sink = reporter.into_inner();
        assert!(sink.text().contains("during receive"));
        assert!(sink.text().contains("transfer timeout"));
    }

    #[tokio::test]
    async fn banner_names_application_and_wiring() {
        let mut sink = SliceSink::new();
        banner(&mut sink).await;
        assert!(sink.text().contains(APP_NAME));
        assert!(sink.text().contains("SOUT --   SIN"));
    }

    #[tokio::test]
    async fn console_gate_consumes_one_keypress_per_wait() {
        let mut gate = ConsoleGate::new(KeySource { reads: 0 });
        gate.wait().await;
        gate.wait().await;
        assert_eq!(gate.input.reads, 2);
    }
}
