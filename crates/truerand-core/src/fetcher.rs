//! Bounded-retry batch fetcher.
//!
//! Algorithm:
//! 1. Split the requested count into batches of at most `max_request_size`
//! 2. Request each batch in turn, sleeping `request_interval` after every call
//! 3. A non-success reply (or no reply at all) costs one attempt from the
//!    retry budget and the same batch is requested again
//! 4. Once the budget is spent the whole fetch fails; partial results are dropped
//!
//! Every failure kind draws from the same budget. A rate-limit reply and a
//! malformed-request reply are treated alike.

use std::time::Duration;

use serde::Serialize;

use crate::error::{FetchError, Result};
use crate::request::{self, Base, BatchRequest, OutputFormat, SeedMode};
use crate::transport::Transport;

/// Public random.org endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.random.org/";
/// Largest `num` the service accepts in one request.
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 10_000;
/// Failed attempts tolerated before a fetch gives up.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 10;

/// Fetcher settings.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Service root, with trailing `/`.
    pub base_url: String,
    pub max_request_size: usize,
    pub max_failed_attempts: u32,
    /// Pause after every request, successful or not.
    pub request_interval: Duration,
    /// HTTP timeout for the reqwest transport. `None` keeps the client default.
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            request_interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

impl FetcherConfig {
    /// Config pointing at `base_url`, normalised to end with `/`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        self
    }
}

/// Counters for one completed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    /// HTTP requests issued, including failed ones.
    pub requests: u32,
    pub failed_attempts: u32,
    /// Integers returned to the caller.
    pub integers: usize,
}

/// Fetches integers from the service through a [`Transport`].
pub struct Fetcher<T: Transport> {
    transport: T,
    config: FetcherConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: FetcherConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `total` integers in `[min, max]`, decimal, fresh seed.
    pub fn integers(&self, total: usize, min: i64, max: i64) -> Result<Vec<i64>> {
        self.fetch_integers(
            total,
            min,
            max,
            Base::default(),
            OutputFormat::default(),
            SeedMode::default(),
        )
    }

    /// `total` integers in `[min, max]` with explicit base, format and seed.
    pub fn fetch_integers(
        &self,
        total: usize,
        min: i64,
        max: i64,
        base: Base,
        format: OutputFormat,
        seed: SeedMode,
    ) -> Result<Vec<i64>> {
        let request = BatchRequest {
            count: total,
            min,
            max,
            base,
            format,
            seed,
        };
        self.fetch(&request).map(|(values, _)| values)
    }

    /// Fetch `request.count` integers, splitting into batches as needed.
    pub fn fetch(&self, request: &BatchRequest) -> Result<(Vec<i64>, FetchStats)> {
        request.validate(usize::MAX)?;
        if request.format != OutputFormat::Plain {
            return Err(FetchError::InvalidRequest(format!(
                "format '{}' cannot be parsed into integers",
                request.format
            )));
        }
        if self.config.max_request_size == 0 {
            return Err(FetchError::InvalidRequest(
                "max_request_size must be positive".into(),
            ));
        }

        let total = request.count;
        let mut values = Vec::with_capacity(total.min(self.config.max_request_size));
        let mut generated = 0usize;
        let mut stats = FetchStats::default();

        while generated < total {
            if stats.failed_attempts > self.config.max_failed_attempts {
                log::error!(
                    "giving up after {} failed attempts ({generated}/{total} integers)",
                    stats.failed_attempts
                );
                return Err(FetchError::MaxRetriesExceeded {
                    attempts: stats.failed_attempts,
                    generated,
                    requested: total,
                });
            }

            let batch = BatchRequest {
                count: self.config.max_request_size.min(total - generated),
                ..request.clone()
            };
            batch.validate(self.config.max_request_size)?;
            let url = batch.url(&self.config.base_url);
            log::debug!("requesting {} integers: {url}", batch.count);

            stats.requests += 1;
            match self.transport.get(&url) {
                Ok(response) if response.is_success() => {
                    let parsed = parse_batch(&response.body, &batch)?;
                    values.extend(parsed);
                    generated += batch.count;
                }
                Ok(response) => {
                    stats.failed_attempts += 1;
                    log::warn!(
                        "attempt failed with HTTP {} ({}/{}): {}",
                        response.status,
                        stats.failed_attempts,
                        self.config.max_failed_attempts,
                        response.body.trim()
                    );
                }
                Err(e) => {
                    stats.failed_attempts += 1;
                    log::warn!(
                        "attempt failed ({}/{}): {e}",
                        stats.failed_attempts,
                        self.config.max_failed_attempts
                    );
                }
            }

            if !self.config.request_interval.is_zero() {
                std::thread::sleep(self.config.request_interval);
            }
        }

        stats.integers = values.len();
        log::info!(
            "fetched {} integers in {} request(s), {} failed",
            stats.integers,
            stats.requests,
            stats.failed_attempts
        );
        Ok((values, stats))
    }

    /// Remaining bit allowance for this client's IP.
    ///
    /// Negative values mean the allowance is spent and further requests will
    /// be refused until it refills.
    pub fn quota(&self) -> Result<i64> {
        let url = request::quota_url(&self.config.base_url);
        log::debug!("checking quota: {url}");
        let response = self.transport.get(&url)?;
        if !response.is_success() {
            return Err(FetchError::Transport {
                status: response.status,
                body: response.body,
            });
        }
        let line = response.body.trim();
        line.parse().map_err(|_| FetchError::Parse {
            line: line.to_string(),
            base: 10,
        })
    }
}

/// Parse a plain-text reply and check it against the batch that asked for it.
fn parse_batch(body: &str, batch: &BatchRequest) -> Result<Vec<i64>> {
    let radix = batch.base.radix();
    let values = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            i64::from_str_radix(line, radix).map_err(|_| FetchError::Parse {
                line: line.to_string(),
                base: radix,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != batch.count {
        return Err(FetchError::BatchSizeMismatch {
            expected: batch.count,
            got: values.len(),
        });
    }
    if let Some(&value) = values.iter().find(|v| !(batch.min..=batch.max).contains(*v)) {
        return Err(FetchError::OutOfRange {
            value,
            min: batch.min,
            max: batch.max,
        });
    }
    Ok(values)
}
