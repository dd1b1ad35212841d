use truerand_core::{Fetcher, Transport};

use super::fail;

pub fn run<T: Transport>(fetcher: &Fetcher<T>) {
    match fetcher.quota() {
        Ok(bits) if bits < 0 => {
            println!("Quota exhausted ({bits} bits); requests will be refused until it refills.")
        }
        Ok(bits) => println!("Remaining quota: {bits} bits"),
        Err(e) => fail(e),
    }
}
