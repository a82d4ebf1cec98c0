//! Hardware interface abstraction
//!
//! [`DisplayInterface`] is the seam between the driver and the bus. [`Interface`]
//! implements it for an embedded-hal SPI device plus two GPIO lines.
//!
//! ## Hardware Requirements
//!
//! The controller requires:
//! - SPI bus (MOSI + SCK), with chip-select owned by the [`SpiDevice`]
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!
//! Each [`SpiDevice::write`] is one chip-select cycle, so every
//! [`send_command`](DisplayInterface::send_command) and every
//! [`send_data`](DisplayInterface::send_data) call is a separate
//! select/transfer/deselect transaction.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use tft_raster::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // Pulse the reset line
//! let _ = interface.reset(&mut delay);
//!
//! // Send command
//! let _ = interface.send_command(0x01); // Software reset
//!
//! // Send data
//! let _ = interface.send_data(&[0x00, 0x00, 0x00, 0xEF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default time the reset line is held low, in milliseconds
pub const DEFAULT_RESET_HOLD_MS: u32 = 100;

/// Default settle time after releasing reset, in milliseconds
pub const DEFAULT_RESET_SETTLE_MS: u32 = 100;

/// Command/data transport to the panel controller
///
/// [`Display`](crate::display::Display) only ever talks to the panel through
/// these three calls. Implement it directly for buses [`Interface`] does not
/// cover, such as a manually toggled CS line or an 8080 parallel port.
pub trait DisplayInterface {
    /// Transport error, reported unmodified inside [`Error::Interface`](crate::Error::Interface)
    type Error: Debug;

    /// Send one command byte with DC low, in its own chip-select cycle
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a burst of data bytes with DC high
    ///
    /// The whole slice goes out under a single chip-select assertion; the
    /// driver relies on this for row bursts.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line low, release it, and wait for the controller
    /// to come back up
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Failure of the SPI bus or of a control pin
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// The SPI transfer failed
    Spi(SpiErr),
    /// Driving DC or RST failed
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation over embedded-hal v1.0
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`] (owns chip-select)
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Time RST is held low during reset
    reset_hold_ms: u32,
    /// Time to wait after RST is released
    reset_settle_ms: u32,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Take ownership of the bus and the two control lines
    ///
    /// Reset timing starts at [`DEFAULT_RESET_HOLD_MS`] /
    /// [`DEFAULT_RESET_SETTLE_MS`].
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            dc,
            rst,
            reset_hold_ms: DEFAULT_RESET_HOLD_MS,
            reset_settle_ms: DEFAULT_RESET_SETTLE_MS,
        }
    }

    /// Set the reset pulse timings in milliseconds
    pub fn set_reset_timing(&mut self, hold_ms: u32, settle_ms: u32) -> &mut Self {
        self.reset_hold_ms = hold_ms;
        self.reset_settle_ms = settle_ms;
        self
    }

    /// Get the reset pulse timings (hold, settle) in milliseconds
    pub fn reset_timing(&self) -> (u32, u32) {
        (self.reset_hold_ms, self.reset_settle_ms)
    }

    /// Release the owned peripherals
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(self.reset_hold_ms);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(self.reset_settle_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    /// Records every SPI transaction as one entry
    #[derive(Debug, Default)]
    struct MockSpi {
        transactions: Vec<Vec<u8>>,
        fail: bool,
    }

    impl SpiErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            let mut bytes = Vec::new();
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    bytes.extend_from_slice(data);
                }
            }
            self.transactions.push(bytes);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct MockPin {
        high: bool,
        toggles: usize,
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.toggles += 1;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.toggles += 1;
            Ok(())
        }
    }

    struct RecordingDelay {
        total_ms: u32,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn interface() -> Interface<MockSpi, MockPin, MockPin> {
        Interface::new(MockSpi::default(), MockPin::default(), MockPin::default())
    }

    #[test]
    fn test_command_sets_dc_low() {
        let mut interface = interface();
        interface.send_command(0x2C).unwrap();
        let (spi, dc, _) = interface.release();
        assert!(!dc.high);
        assert_eq!(spi.transactions, alloc::vec![alloc::vec![0x2C]]);
    }

    #[test]
    fn test_data_burst_is_one_transaction() {
        let mut interface = interface();
        interface.send_data(&[0x00, 0x39, 0x01, 0x17]).unwrap();
        let (spi, dc, _) = interface.release();
        assert!(dc.high);
        assert_eq!(spi.transactions.len(), 1);
        assert_eq!(spi.transactions[0], [0x00, 0x39, 0x01, 0x17]);
    }

    #[test]
    fn test_reset_pulse_timing() {
        let mut interface = interface();
        let mut delay = RecordingDelay { total_ms: 0 };
        interface.reset(&mut delay).unwrap();
        assert_eq!(delay.total_ms, 200);
        let (_, _, rst) = interface.release();
        assert!(rst.high);
        assert_eq!(rst.toggles, 2);
    }

    #[test]
    fn test_set_reset_timing() {
        let mut interface = interface();
        assert_eq!(
            interface.reset_timing(),
            (DEFAULT_RESET_HOLD_MS, DEFAULT_RESET_SETTLE_MS)
        );
        interface.set_reset_timing(20, 150);
        assert_eq!(interface.reset_timing(), (20, 150));
    }

    #[test]
    fn test_spi_failure_propagates() {
        let mut interface = Interface::new(
            MockSpi {
                fail: true,
                ..MockSpi::default()
            },
            MockPin::default(),
            MockPin::default(),
        );
        let result = interface.send_data(&[0xFF]);
        assert!(matches!(result, Err(InterfaceError::Spi(MockError))));
    }
}
