use truerand_core::{Base, BatchRequest, Fetcher, OutputFormat, SeedMode, Transport};

use super::fail;

pub fn run<T: Transport>(
    fetcher: &Fetcher<T>,
    count: usize,
    min: i64,
    max: i64,
    base: &str,
    rnd: &str,
    json: bool,
) {
    let request = match build_request(count, min, max, base, rnd) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    let (values, stats) = match fetcher.fetch(&request) {
        Ok(result) => result,
        Err(e) => fail(e),
    };

    if json {
        let out = serde_json::json!({
            "min": min,
            "max": max,
            "base": request.base.radix(),
            "rnd": request.seed.to_string(),
            "values": values,
            "stats": stats,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(e),
        }
    } else {
        for v in values {
            println!("{v}");
        }
    }
}

fn build_request(
    count: usize,
    min: i64,
    max: i64,
    base: &str,
    rnd: &str,
) -> truerand_core::Result<BatchRequest> {
    let radix: u32 = base.parse().map_err(|_| {
        truerand_core::FetchError::InvalidRequest(format!("base '{base}' is not a number"))
    })?;
    Ok(BatchRequest {
        count,
        min,
        max,
        base: Base::try_from(radix)?,
        format: OutputFormat::Plain,
        seed: rnd.parse::<SeedMode>()?,
    })
}
