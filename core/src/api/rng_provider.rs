use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Random source the client draws request identifiers from.
pub trait RngProvider: RngCore + CryptoRng + Send + Sync {}

impl RngProvider for OsRng {}
