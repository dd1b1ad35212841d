//! Parameters for a single call to the random.org integer generator.
//!
//! A [`BatchRequest`] maps one-to-one onto the query string of
//! `GET {base_url}integers/`. The service caps `num` per request, so the
//! [`Fetcher`](crate::fetcher::Fetcher) splits large counts into several
//! batches before anything here is built.

use std::str::FromStr;

use crate::error::FetchError;

/// Smallest value the service accepts for `min`/`max`.
pub const MIN_VALUE: i64 = -1_000_000_000;
/// Largest value the service accepts for `min`/`max`.
pub const MAX_VALUE: i64 = 1_000_000_000;

/// Number base the service renders integers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Base {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hex,
}

impl Base {
    /// Radix for parsing response lines.
    pub fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }
}

impl TryFrom<u32> for Base {
    type Error = FetchError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Self::Binary),
            8 => Ok(Self::Octal),
            10 => Ok(Self::Decimal),
            16 => Ok(Self::Hex),
            other => Err(FetchError::InvalidRequest(format!(
                "unsupported base {other} (expected 2, 8, 10 or 16)"
            ))),
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.radix())
    }
}

/// Response body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Newline-separated integers.
    #[default]
    Plain,
    /// An HTML page. Not parseable by the fetcher.
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Html => write!(f, "html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "html" => Ok(Self::Html),
            other => Err(FetchError::InvalidRequest(format!(
                "unknown format '{other}' (expected plain or html)"
            ))),
        }
    }
}

/// How the service seeds its generator for this request (the `rnd` parameter).
///
/// `Identifier` and `Date` make the output reproducible: the same seed and
/// parameters always return the same integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SeedMode {
    /// Fresh randomness for every request.
    #[default]
    New,
    /// Pregenerated sequence keyed by an arbitrary identifier (`id.<identifier>`).
    Identifier(String),
    /// Pregenerated sequence keyed by an ISO date (`date.<YYYY-MM-DD>`).
    Date(String),
}

impl std::fmt::Display for SeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Identifier(id) => write!(f, "id.{id}"),
            Self::Date(date) => write!(f, "date.{date}"),
        }
    }
}

impl FromStr for SeedMode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "new" {
            return Ok(Self::New);
        }
        if let Some(id) = s.strip_prefix("id.").filter(|id| !id.is_empty()) {
            return Ok(Self::Identifier(id.to_string()));
        }
        if let Some(date) = s.strip_prefix("date.").filter(|d| !d.is_empty()) {
            return Ok(Self::Date(date.to_string()));
        }
        Err(FetchError::InvalidRequest(format!(
            "unknown seed mode '{s}' (expected new, id.<identifier> or date.<iso-date>)"
        )))
    }
}

/// Parameters for one HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub base: Base,
    pub format: OutputFormat,
    pub seed: SeedMode,
}

impl BatchRequest {
    /// Check the parameters against what the service will accept.
    ///
    /// `max_count` is the per-request ceiling; pass `usize::MAX` to validate
    /// the overall fetch before it is split into batches.
    pub fn validate(&self, max_count: usize) -> Result<(), FetchError> {
        if self.count == 0 {
            return Err(FetchError::InvalidRequest("count must be positive".into()));
        }
        if self.count > max_count {
            return Err(FetchError::InvalidRequest(format!(
                "count {} exceeds the per-request maximum of {max_count}",
                self.count
            )));
        }
        if self.min > self.max {
            return Err(FetchError::InvalidRequest(format!(
                "min {} is greater than max {}",
                self.min, self.max
            )));
        }
        if self.min < MIN_VALUE || self.max > MAX_VALUE {
            return Err(FetchError::InvalidRequest(format!(
                "range [{}, {}] exceeds [{MIN_VALUE}, {MAX_VALUE}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Full request URL. `base_url` is expected to end with `/`.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{base_url}integers/?num={}&min={}&max={}&col=1&base={}&format={}&rnd={}",
            self.count, self.min, self.max, self.base, self.format, self.seed
        )
    }
}

/// Quota check URL for the caller's IP.
pub fn quota_url(base_url: &str) -> String {
    format!("{base_url}quota/?format=plain")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(count: usize, min: i64, max: i64) -> BatchRequest {
        BatchRequest {
            count,
            min,
            max,
            base: Base::default(),
            format: OutputFormat::default(),
            seed: SeedMode::default(),
        }
    }

    // -----------------------------------------------------------------------
    // URL building
    // -----------------------------------------------------------------------

    #[test]
    fn test_url_defaults() {
        let url = request(5, 1, 100).url("https://www.random.org/");
        assert_eq!(
            url,
            "https://www.random.org/integers/?num=5&min=1&max=100&col=1&base=10&format=plain&rnd=new"
        );
    }

    #[test]
    fn test_url_carries_base_and_seed() {
        let mut req = request(3, 0, 255);
        req.base = Base::Hex;
        req.seed = SeedMode::Identifier("demo".into());
        let url = req.url("http://localhost/");
        assert!(url.contains("base=16"));
        assert!(url.contains("rnd=id.demo"));
    }

    #[test]
    fn test_quota_url() {
        assert_eq!(
            quota_url("https://www.random.org/"),
            "https://www.random.org/quota/?format=plain"
        );
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn test_validate_accepts_single_value_range() {
        assert!(request(1, 7, 7).validate(10_000).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        assert!(matches!(
            request(0, 1, 2).validate(10_000),
            Err(FetchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        assert!(request(1, 10, 1).validate(10_000).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_batch() {
        assert!(request(10_001, 1, 2).validate(10_000).is_err());
        assert!(request(10_001, 1, 2).validate(usize::MAX).is_ok());
    }

    #[test]
    fn test_validate_rejects_range_beyond_service_limits() {
        assert!(request(1, MIN_VALUE - 1, 0).validate(10).is_err());
        assert!(request(1, 0, MAX_VALUE + 1).validate(10).is_err());
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn test_seed_mode_parse_and_display() {
        assert_eq!("new".parse::<SeedMode>().unwrap(), SeedMode::New);
        let date: SeedMode = "date.2024-01-31".parse().unwrap();
        assert_eq!(date, SeedMode::Date("2024-01-31".into()));
        assert_eq!(date.to_string(), "date.2024-01-31");
        assert!("id.".parse::<SeedMode>().is_err());
        assert!("fresh".parse::<SeedMode>().is_err());
    }

    #[test]
    fn test_base_from_radix() {
        assert_eq!(Base::try_from(2).unwrap(), Base::Binary);
        assert_eq!(Base::try_from(16).unwrap().radix(), 16);
        assert!(Base::try_from(3).is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("json".parse::<OutputFormat>().is_err());
    }
}
