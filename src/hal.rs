//! ESP-IDF wiring for the comparator seam.
//!
//! The ESP32 has no analog comparator with a reference ladder, so both
//! elements are sampled with the continuous ADC and compared in software by
//! `sensors::SampledComparator`.

use esp_idf_svc::hal::adc::{
    AdcContConfig, AdcContDriver, AdcMeasurement, Attenuated, EmptyAdcChannels, ADC1,
};
use esp_idf_svc::hal::gpio::{ADCPin, Gpio2, Gpio3};
use sensors::LevelSource;

const SAMPLES: usize = 64;
const READ_TIMEOUT_TICKS: u32 = 100;
const FULL_SCALE: u32 = 4095;

pub struct AdcLevels<'a> {
    driver: AdcContDriver<'a>,
    channels: [u16; 2],
}

impl<'a> AdcLevels<'a> {
    pub fn new(adc: ADC1, element_a: Gpio2, element_b: Gpio3) -> anyhow::Result<AdcLevels<'a>> {
        let att_a = Attenuated::db11(element_a);
        let att_b = Attenuated::db11(element_b);

        let temp_channel = EmptyAdcChannels::chain(att_a);
        let adc_channels = temp_channel.chain(att_b);

        let adc_config = AdcContConfig::default();
        let driver = AdcContDriver::new(adc, &adc_config, adc_channels)?;

        Ok(AdcLevels {
            driver,
            channels: [<Gpio2 as ADCPin>::CHANNEL as u16, <Gpio3 as ADCPin>::CHANNEL as u16],
        })
    }
}

impl LevelSource for AdcLevels<'_> {
    type Error = anyhow::Error;

    fn start(&mut self) -> anyhow::Result<()> {
        self.driver.start()?;
        Ok(())
    }

    /// Averages the samples of each element, matched by ADC channel.
    fn sample(&mut self) -> anyhow::Result<[u32; 2]> {
        let mut samples: [AdcMeasurement; SAMPLES] = [Default::default(); SAMPLES];
        let count = self.driver.read(&mut samples, READ_TIMEOUT_TICKS)?;

        let mut sums = [0u32; 2];
        let mut counts = [0u32; 2];
        for sample in &samples[..count] {
            if let Some(slot) = self.channels.iter().position(|&c| c == sample.channel()) {
                sums[slot] += sample.data() as u32;
                counts[slot] += 1;
            }
        }
        anyhow::ensure!(
            counts[0] > 0 && counts[1] > 0,
            "ADC returned {} samples without both elements",
            count
        );
        Ok([sums[0] / counts[0], sums[1] / counts[1]])
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        self.driver.stop()?;
        Ok(())
    }

    fn full_scale(&self) -> u32 {
        FULL_SCALE
    }
}
