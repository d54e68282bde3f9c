//! ESP32 firmware entry: the UART console wired to the I2C register
//! probe.
//!
//! UART0 carries both the inbound JSON command lines and the rendered
//! reports; the target device hangs off the I2C master on GPIO18/GPIO19.

#[cfg(target_arch = "xtensa")]
mod firmware {
    use core::fmt;

    use esp_idf_svc::{
        hal::{
            delay::TickType,
            gpio::AnyIOPin,
            i2c::{config::Config as I2cConfig, I2cDriver},
            prelude::*,
            uart::{config::Config as UartConfig, UartDriver},
        },
        log::EspLogger,
        sys::{self, EspError},
    };

    use eeprom_probe::{
        bus::{I2cDevice, DEFAULT_DEVICE_ADDR},
        dispatcher::{Dispatcher, LineSource, LINE_BUF_SIZE},
    };

    /// Serial console baud rate.
    const UART_BAUD: u32 = 115_200;
    /// I2C clock.
    const I2C_FREQ_HZ: u32 = 100_000;
    /// How long one transport poll blocks waiting for input.
    const LINE_POLL_MS: u64 = 50;

    /// Accumulates UART chunks and releases one NUL-terminated line per
    /// newline.
    struct UartLineSource<'d> {
        uart: &'d UartDriver<'d>,
        pending: [u8; LINE_BUF_SIZE],
        len: usize,
    }

    impl<'d> UartLineSource<'d> {
        fn new(uart: &'d UartDriver<'d>) -> Self {
            Self {
                uart,
                pending: [0u8; LINE_BUF_SIZE],
                len: 0,
            }
        }

        /// Move the first complete line out of the pending buffer.
        ///
        /// A full buffer with no newline is handed up as-is; the decoder
        /// rejects it.
        fn take_line(&mut self, buf: &mut [u8]) -> Option<usize> {
            let newline = self.pending[..self.len].iter().position(|&b| b == b'\n');
            let line_len = match newline {
                Some(pos) => pos,
                None if self.len == self.pending.len() => self.len,
                None => return None,
            };

            buf[..line_len].copy_from_slice(&self.pending[..line_len]);
            if line_len < buf.len() {
                buf[line_len] = 0;
            }

            let consumed = newline.map_or(line_len, |pos| pos + 1);
            self.pending.copy_within(consumed..self.len, 0);
            self.len -= consumed;
            Some(line_len)
        }
    }

    impl LineSource for UartLineSource<'_> {
        fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize> {
            if self.len < self.pending.len() {
                let timeout = TickType::new_millis(LINE_POLL_MS).ticks();
                if let Ok(n) = self.uart.read(&mut self.pending[self.len..], timeout) {
                    self.len += n;
                }
            }
            self.take_line(buf)
        }
    }

    /// Console report writer over the UART TX side.
    struct UartOut<'d> {
        uart: &'d UartDriver<'d>,
    }

    impl fmt::Write for UartOut<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut bytes = s.as_bytes();
            while !bytes.is_empty() {
                let n = self.uart.write(bytes).map_err(|_| fmt::Error)?;
                bytes = &bytes[n..];
            }
            Ok(())
        }
    }

    pub fn run() -> Result<(), EspError> {
        sys::link_patches();
        EspLogger::initialize_default();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        let uart = UartDriver::new(
            peripherals.uart0,
            pins.gpio1,
            pins.gpio3,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &UartConfig::new().baudrate(Hertz(UART_BAUD)),
        )?;

        let i2c = I2cDriver::new(
            peripherals.i2c0,
            pins.gpio18, // SDA
            pins.gpio19, // SCL
            &I2cConfig::new().baudrate(Hertz(I2C_FREQ_HZ)),
        )?;
        let mut device = I2cDevice::new(i2c, DEFAULT_DEVICE_ADDR);

        log::info!(
            "register probe ready, device address {:#04X}",
            DEFAULT_DEVICE_ADDR
        );

        let mut out = UartOut { uart: &uart };
        let mut dispatcher = Dispatcher::new(UartLineSource::new(&uart), &mut device);
        dispatcher.run(&mut out)
    }
}

#[cfg(target_arch = "xtensa")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::run()
}

#[cfg(not(target_arch = "xtensa"))]
fn main() {
    eprintln!("eeprom-probe firmware targets the ESP32 (xtensa); run `cargo test` on the host");
}
