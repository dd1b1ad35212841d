//! Integration tests for truerand-core.
//!
//! These drive the full pipeline through scripted transports:
//! fetch → reshape → encode → read back from disk.

use truerand_core::{
    ArtifactError, Base, EchoTransport, FetchError, Fetcher, FetcherConfig, HttpResponse,
    MockTransport, NoiseConfig, OutputFormat, ReqwestTransport, SeedMode, build_image,
    build_noise,
};

fn quick_config() -> FetcherConfig {
    FetcherConfig {
        request_interval: std::time::Duration::ZERO,
        ..FetcherConfig::default()
    }
}

#[test]
fn ten_dice_from_mocked_service() {
    let mock = MockTransport::new();
    mock.set_fallback(HttpResponse::ok("5\n3\n100\n1\n42\n77\n8\n64\n12\n99\n"));
    let fetcher = Fetcher::new(mock.clone(), quick_config());

    let values = fetcher.integers(10, 1, 100).unwrap();
    assert_eq!(values.len(), 10);
    assert!(values.iter().all(|v| (1..=100).contains(v)));
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn large_fetch_is_split_into_three_batches() {
    let echo = EchoTransport::new();
    let fetcher = Fetcher::new(&echo, quick_config());

    let values = fetcher.integers(25_000, 0, 255).unwrap();
    assert_eq!(values.len(), 25_000);
    assert_eq!(echo.batch_sizes(), vec![10_000, 10_000, 5_000]);
}

#[test]
fn seed_and_base_reach_the_wire() {
    let mock = MockTransport::new();
    mock.push(HttpResponse::ok("1f\n"));
    let fetcher = Fetcher::new(mock.clone(), quick_config());

    let values = fetcher
        .fetch_integers(
            1,
            0,
            255,
            Base::Hex,
            OutputFormat::Plain,
            SeedMode::Date("2024-02-29".into()),
        )
        .unwrap();
    assert_eq!(values, vec![31]);
    let url = &mock.calls()[0];
    assert!(url.contains("base=16"));
    assert!(url.contains("rnd=date.2024-02-29"));
    assert!(url.contains("col=1"));
}

#[test]
fn image_is_written_from_fetched_values() {
    let mock = MockTransport::new();
    let flat: Vec<String> = (1..=12).map(|v| v.to_string()).collect();
    mock.push(HttpResponse::ok(flat.join("\n")));
    let fetcher = Fetcher::new(mock, quick_config());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random.bmp");
    let grid = build_image(&fetcher, 2, 2, &path).unwrap();
    assert_eq!(grid.pixel(1, 1), Some((10, 11, 12)));

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3]);
    assert_eq!(decoded.get_pixel(1, 0).0, [4, 5, 6]);
    assert_eq!(decoded.get_pixel(0, 1).0, [7, 8, 9]);
}

#[test]
fn failed_fetch_writes_no_image() {
    let mock = MockTransport::new();
    let fetcher = Fetcher::new(mock.clone(), quick_config());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random.png");
    let err = build_image(&fetcher, 4, 4, &path).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::Fetch(FetchError::MaxRetriesExceeded { attempts: 11, .. })
    ));
    assert!(!path.exists());
    assert_eq!(mock.call_count(), 11);
}

#[test]
fn noise_clip_is_written_from_fetched_frequencies() {
    let echo = EchoTransport::new();
    let fetcher = Fetcher::new(&echo, quick_config());
    let config = NoiseConfig {
        sampling_rate: 800,
        duration_secs: 3,
        min_freq: 100,
        max_freq: 400,
        amplitude: 0.5,
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.wav");
    let samples = build_noise(&fetcher, &config, &path).unwrap();
    assert_eq!(samples.len(), 2_400);
    assert_eq!(echo.batch_sizes(), vec![800]);

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 800);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 2_400);
}

#[test]
fn short_reply_fails_loudly() {
    let mock = MockTransport::new();
    mock.push(HttpResponse::ok("1\n2\n"));
    let fetcher = Fetcher::new(mock, quick_config());
    assert!(matches!(
        fetcher.integers(3, 0, 9),
        Err(FetchError::BatchSizeMismatch {
            expected: 3,
            got: 2
        })
    ));
}

#[test]
#[ignore] // Run with: cargo test -- --ignored (hits random.org)
fn live_service_returns_requested_count() {
    let transport = ReqwestTransport::new(None).unwrap();
    let fetcher = Fetcher::new(transport, FetcherConfig::default());
    let values = fetcher.integers(5, 1, 6).unwrap();
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|v| (1..=6).contains(v)));
}
