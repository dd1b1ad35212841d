use std::path::Path;

use truerand_core::{Fetcher, PixelGrid, Transport, build_image};

use super::fail;

pub fn run<T: Transport>(fetcher: &Fetcher<T>, width: u32, height: u32, output: &str) {
    let needed = match PixelGrid::required_values(width, height) {
        Ok(n) => n,
        Err(e) => fail(e),
    };
    let batches = needed.div_ceil(fetcher.config().max_request_size.max(1));
    println!(
        "Fetching {needed} integers for a {width}x{height} image ({batches} request(s))..."
    );

    match build_image(fetcher, width, height, Path::new(output)) {
        Ok(_) => println!("Wrote {output}"),
        Err(e) => fail(e),
    }
}
