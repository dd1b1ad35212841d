//! CLI for truerand — random.org integers, bitmaps and white noise.

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "truerand")]
#[command(about = "truerand — true-random integers from random.org, as numbers, pictures or noise")]
#[command(version = truerand_core::VERSION)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that talks to the service.
#[derive(Args)]
pub struct ServiceArgs {
    /// Service root URL
    #[arg(long, global = true, default_value = truerand_core::fetcher::DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum integers per HTTP request
    #[arg(long, global = true, default_value_t = truerand_core::fetcher::DEFAULT_MAX_REQUEST_SIZE)]
    max_request_size: usize,

    /// Failed requests tolerated before giving up
    #[arg(long, global = true, default_value_t = truerand_core::fetcher::DEFAULT_MAX_FAILED_ATTEMPTS)]
    max_failed: u32,

    /// Pause between requests in milliseconds
    #[arg(long, global = true, default_value = "1000")]
    interval_ms: u64,

    /// HTTP timeout in seconds (default: client default)
    #[arg(long, global = true)]
    timeout_sec: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print random integers, one per line
    Integers {
        /// How many integers to fetch
        #[arg(long, short = 'n', default_value = "10")]
        count: usize,

        /// Smallest possible value
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        min: i64,

        /// Largest possible value
        #[arg(long, default_value = "100", allow_negative_numbers = true)]
        max: i64,

        /// Number base of the service's reply
        #[arg(long, default_value = "10", value_parser = ["2", "8", "10", "16"])]
        base: String,

        /// Seed mode: new, id.<identifier> or date.<iso-date>
        #[arg(long, default_value = "new")]
        rnd: String,

        /// Print a JSON object with values and request stats instead of lines
        #[arg(long)]
        json: bool,
    },

    /// Build a random RGB bitmap
    Image {
        /// Image width in pixels
        #[arg(long, default_value = "64")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "64")]
        height: u32,

        /// Output path; the encoder follows the extension
        #[arg(long, short = 'o', default_value = "random.bmp")]
        output: String,
    },

    /// Build a white-noise WAV clip
    Noise {
        /// Sampling rate in Hz
        #[arg(long, default_value = "44100")]
        rate: u32,

        /// Clip length in seconds
        #[arg(long, default_value = "1")]
        duration: u32,

        /// Lowest frequency in Hz
        #[arg(long, default_value = "20")]
        min_freq: u32,

        /// Highest frequency in Hz
        #[arg(long, default_value = "20000")]
        max_freq: u32,

        /// Peak amplitude as a fraction of full scale
        #[arg(long, default_value = "0.5")]
        amplitude: f64,

        /// Output path
        #[arg(long, short = 'o', default_value = "noise.wav")]
        output: String,
    },

    /// Show the remaining random.org bit allowance for this IP
    Quota,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let fetcher = commands::make_fetcher(&cli.service);

    match cli.command {
        Commands::Integers {
            count,
            min,
            max,
            base,
            rnd,
            json,
        } => commands::integers::run(&fetcher, count, min, max, &base, &rnd, json),
        Commands::Image {
            width,
            height,
            output,
        } => commands::image::run(&fetcher, width, height, &output),
        Commands::Noise {
            rate,
            duration,
            min_freq,
            max_freq,
            amplitude,
            output,
        } => commands::noise::run(
            &fetcher,
            truerand_core::NoiseConfig {
                sampling_rate: rate,
                duration_secs: duration,
                min_freq,
                max_freq,
                amplitude,
            },
            &output,
        ),
        Commands::Quota => commands::quota::run(&fetcher),
    }
}
