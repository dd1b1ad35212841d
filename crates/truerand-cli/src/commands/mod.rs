pub mod image;
pub mod integers;
pub mod noise;
pub mod quota;

use std::time::Duration;

use truerand_core::{Fetcher, FetcherConfig, ReqwestTransport};

use crate::ServiceArgs;

/// Translate the global service flags into a fetcher config.
pub fn fetcher_config(args: &ServiceArgs) -> FetcherConfig {
    FetcherConfig {
        max_request_size: args.max_request_size,
        max_failed_attempts: args.max_failed,
        request_interval: Duration::from_millis(args.interval_ms),
        timeout: args
            .timeout_sec
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(Duration::from_secs_f64),
        ..FetcherConfig::default()
    }
    .with_base_url(&args.base_url)
}

/// Build a fetcher over the real HTTP transport, or exit.
pub fn make_fetcher(args: &ServiceArgs) -> Fetcher<ReqwestTransport> {
    let config = fetcher_config(args);
    match ReqwestTransport::new(config.timeout) {
        Ok(transport) => Fetcher::new(transport, config),
        Err(e) => fail(e),
    }
}

/// Print an error and exit with status 1.
pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
