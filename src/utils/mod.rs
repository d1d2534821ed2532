//! Shared utilities.

mod hash;
mod numeric;

pub use hash::record_fingerprint;
pub use numeric::round2;
