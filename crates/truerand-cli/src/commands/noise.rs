use std::path::Path;

use truerand_core::{Fetcher, NoiseConfig, Transport, build_noise};

use super::fail;

pub fn run<T: Transport>(fetcher: &Fetcher<T>, config: NoiseConfig, output: &str) {
    if let Err(e) = config.validate() {
        fail(e);
    }
    println!(
        "Fetching {} frequencies in [{}, {}] Hz for {}s at {} Hz...",
        config.frequency_count(),
        config.min_freq,
        config.max_freq,
        config.duration_secs,
        config.sampling_rate
    );

    match build_noise(fetcher, &config, Path::new(output)) {
        Ok(samples) => println!("Wrote {} samples to {output}", samples.len()),
        Err(e) => fail(e),
    }
}
