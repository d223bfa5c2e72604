//! Per-request identifiers for the `x-correlation-id` and `idempotency-key` headers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Builder;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Draws a fresh identifier from `rng`.
///
/// A working source yields a version 4 UUID string. When the source reports a failure the
/// identifier comes from a clock-seeded generator instead and is a 32 character hex string.
/// Identifiers are advisory, so uniqueness is best-effort in both cases.
pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(e) => {
            log::debug!("Secure random source failed, using fallback identifier: {}", e);
            fallback()
        }
    }
}

fn fallback() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut rng = StdRng::seed_from_u64(nanos ^ sequence.rotate_left(32));
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
