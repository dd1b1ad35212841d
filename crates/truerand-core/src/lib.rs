//! # truerand-core
//!
//! True-random integers from [random.org](https://www.random.org/clients/http/),
//! and two things to do with them: an RGB bitmap and a white-noise WAV file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use truerand_core::{Fetcher, FetcherConfig, ReqwestTransport};
//!
//! let transport = ReqwestTransport::new(None).unwrap();
//! let fetcher = Fetcher::new(transport, FetcherConfig::default());
//!
//! let dice = fetcher.integers(10, 1, 6).unwrap();
//! assert_eq!(dice.len(), 10);
//! ```
//!
//! ## Architecture
//!
//! Transport (HTTP GET) → Fetcher (batching + retry budget) → flat `Vec<i64>`
//! → [`PixelGrid`] or [`white_noise_samples`] → `image` / `hound` encoder.
//!
//! The service caps a single request at 10 000 integers, so the [`Fetcher`]
//! splits larger counts into batches and requests them one at a time,
//! pausing between calls. Failed calls draw from a fixed retry budget; once
//! it is spent the fetch fails as a whole and no artifact is written.

pub mod error;
pub mod fetcher;
pub mod noise;
pub mod pixels;
pub mod request;
pub mod transport;

pub use error::{ArtifactError, FetchError, Result};
pub use fetcher::{FetchStats, Fetcher, FetcherConfig};
pub use noise::{NoiseConfig, build_noise, white_noise_samples, write_wav};
pub use pixels::{PixelGrid, build_image};
pub use request::{Base, BatchRequest, OutputFormat, SeedMode};
pub use transport::{EchoTransport, HttpResponse, MockTransport, ReqwestTransport, Transport};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
