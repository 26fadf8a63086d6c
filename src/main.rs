mod config;

#[cfg(target_os = "espidf")]
mod hal;

#[cfg(not(target_os = "espidf"))]
mod bench;

use config::Config;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use clock::Clock;
    use esp_idf_svc::hal::{delay::FreeRtos, gpio::PinDriver, peripherals::Peripherals};
    use esp_idf_svc::log::EspLogger;
    use log::info;
    use motion::{Motion, Panel};
    use sensors::{LightSensor, SampledComparator, SunLocator};

    // Required for ESP-IDF patches
    esp_idf_svc::sys::link_patches();

    EspLogger::initialize_default();
    let config = Config::load()?;
    info!("Configuration: {:?}", config);

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Light-sensing elements A and B
    let levels = hal::AdcLevels::new(peripherals.adc1, pins.gpio2, pins.gpio3)?;
    let comparator = SampledComparator::new(levels, FreeRtos);
    let locator = SunLocator::new(LightSensor::new(comparator, config.thresholds()));

    let enable = PinDriver::output(pins.gpio17)?; // Motor enable
    let direction = PinDriver::output(pins.gpio16)?; // Motor direction
    let indicator = PinDriver::output(pins.gpio7)?; // Dark indicator
    let motion = Motion::new(enable, direction, config.motor());

    let mut panel = Panel::new(locator, motion, indicator, Clock::new(FreeRtos), config.panel());
    panel.run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Forwards the `log` records of every crate; RUST_LOG overrides the level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    bench::run(&config)
}
