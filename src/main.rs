//! FnBeacon - firmware entry point
//!
//! 1. Bring up key/attenuator GPIOs, sidetone LEDC and the log UART
//! 2. Send the boot message once
//! 3. Repeat the beacon message forever, draining the log between passes

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::delay::Delay;
    use esp_idf_svc::hal::gpio::PinDriver;
    use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::units::Hertz;

    use fn_beacon::hal::PinOutput;
    use fn_beacon::uart_logger::{self, UartLoggerConfig};
    use fn_beacon::{
        estimate_cycle_us, rt_error, rt_info, Beacon, BeaconConfig, CwKeyer, PowerLevel,
        SpeedRegister, BEACON_LOG, FAULTS,
    };

    esp_idf_svc::sys::link_patches();

    let config = BeaconConfig::default();
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Log UART on GPIO6 (TX only)
    let mut uart =
        uart_logger::init_uart_logger(peripherals.uart1, pins.gpio6, &UartLoggerConfig::default())?;
    BEACON_LOG.set_level(config.log_level);

    // Key and attenuator lines
    let key = PinDriver::output(pins.gpio4)?;
    let medium = PinDriver::output(pins.gpio5)?;
    let low = PinDriver::output(pins.gpio7)?;

    // Sidetone square wave on GPIO8
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default().frequency(Hertz(config.sidetone_hz)),
    )?;
    let tone = LedcDriver::new(peripherals.ledc.channel0, &timer, pins.gpio8)?;

    let mut output = PinOutput::new(key, medium, low, tone, &FAULTS)
        .key_active_high(config.key_active_high);
    fn_beacon::OutputSink::set_key(&mut output, false);
    fn_beacon::OutputSink::set_power_level(&mut output, PowerLevel::High);

    let speed = SpeedRegister::new(config.wpm);
    let mut beacon = Beacon::new(CwKeyer::new(output, Delay::new_default()), &speed)
        .with_log(&BEACON_LOG);

    rt_info!(BEACON_LOG, 0, "{}", env!("VERSION_STRING"));
    rt_info!(
        BEACON_LOG,
        0,
        "cycle {} ms @ {} wpm",
        estimate_cycle_us(config.message, speed.get()) / 1000,
        speed.get()
    );

    beacon.transmit(config.boot_message, speed.get());
    uart_logger::drain_to(&BEACON_LOG, &mut uart);

    loop {
        let report = beacon.transmit(config.message, speed.get());

        if report.rejected_speeds > 0 || report.ignored > 0 {
            rt_info!(
                BEACON_LOG,
                beacon.elapsed_us(),
                "pass: {} rejected speeds, {} ignored bytes",
                report.rejected_speeds,
                report.ignored
            );
        }

        if let Some(fault) = FAULTS.take() {
            rt_error!(
                BEACON_LOG,
                beacon.elapsed_us(),
                "FAULT: {} ({}), total {}",
                fault.code.as_str(),
                fault.detail,
                fault.count
            );
        }

        uart_logger::drain_to(&BEACON_LOG, &mut uart);
    }
}

/// Host builds only carry the library; the firmware runs on ESP-IDF.
#[cfg(not(target_os = "espidf"))]
fn main() {}
