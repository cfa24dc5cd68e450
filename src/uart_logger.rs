//! Log drain to the serial port.
//!
//! Formats [`LogEntry`]s as text and writes them to any `core::fmt::Write`.
//! On target the writer wraps a UART TX driver; on host it is a `String`.
//!
//! Format: `[   12.345] LEVEL: message` with the timestamp in seconds of
//! beacon time.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self { baud_rate: 115200 }
    }
}

/// Write one entry followed by a newline.
pub fn write_entry<W: Write>(out: &mut W, entry: &LogEntry) -> core::fmt::Result {
    let ms = entry.timestamp_us / 1000;
    writeln!(
        out,
        "[{:5}.{:03}] {}: {}",
        ms / 1000,
        ms % 1000,
        entry.level.as_str(),
        entry.text()
    )
}

/// Drain everything pending in `stream` into `out`.
///
/// Also reports (and resets) the dropped counter. Returns the number of
/// entries written.
pub fn drain_to<W: Write, const N: usize>(stream: &LogStream<N>, out: &mut W) -> usize {
    let mut written = 0;
    while let Some(entry) = stream.drain() {
        if write_entry(out, &entry).is_err() {
            break;
        }
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }

    written
}

/// `fmt::Write` adapter over the UART TX driver.
#[cfg(target_os = "espidf")]
pub struct UartWriter<'d>(pub UartTxDriver<'d>);

#[cfg(target_os = "espidf")]
impl Write for UartWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| core::fmt::Error)
    }
}

/// Initialize UART1 TX-only for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartWriter<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
    .map(UartWriter)
}
