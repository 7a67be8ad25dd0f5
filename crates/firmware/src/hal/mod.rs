//! embedded-hal bridge
//!
//! Adapts any async [`SpiDevice`] (CS management included) to the
//! [`platform::SpiMaster`] contract, so the cycle controller runs over
//! whatever bus driver the board HAL provides.

use embedded_hal_async::spi::SpiDevice;
use platform::{MasterConfig, SpiMaster, Transfer, TransferFault, TransferPayload};

/// SPI master backed by an embedded-hal-async [`SpiDevice`].
///
/// The device must already be brought up with the parameters in
/// `config`; the bridge only records them.
pub struct SpiDeviceMaster<SPI> {
    spi: SPI,
    config: MasterConfig,
}

impl<SPI: SpiDevice> SpiDeviceMaster<SPI> {
    /// Wrap an initialised device.
    pub fn new(spi: SPI, config: MasterConfig) -> Self {
        Self { spi, config }
    }

    /// The bring-up parameters the device was configured with.
    pub fn config(&self) -> &MasterConfig {
        &self.config
    }

    /// Tear down, returning the device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> SpiMaster for SpiDeviceMaster<SPI> {
    async fn transfer(&mut self, xfer: Transfer<'_>) -> Result<(), TransferFault> {
        // Byte order within the shift word is the bus driver's concern at
        // 8-bit frame size; xfer.flags.byte_swap has no effect here.
        match xfer.payload {
            TransferPayload::Send(data) => self
                .spi
                .write(data)
                .await
                .map_err(|_| TransferFault::Bus),
            TransferPayload::Receive(buffer) => self
                .spi
                .read(buffer)
                .await
                .map_err(|_| TransferFault::Bus),
        }
    }
}
