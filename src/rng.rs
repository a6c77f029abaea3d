use getrandom::getrandom;
use log::warn;
use oorandom::Rand64;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn rng64(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

/// A seed from the OS generator. Falls back to the clock when that fails.
pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    match getrandom(&mut buf) {
        Ok(()) => u128::from_le_bytes(buf),
        Err(error) => {
            warn!("OS random source unavailable ({}), seeding from the clock", error);
            clock_seed()
        }
    }
}

fn clock_seed() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

/// Draws a full 128 bit seed from `rng`, used to hand every ant its own stream.
pub fn derive_seed(rng: &mut Rand64) -> u128 {
    rng.rand_u64() as u128 + ((rng.rand_u64() as u128) << 64)
}
