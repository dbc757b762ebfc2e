//! Policies consulted before any request leaves the process

pub mod rate_limit;
pub mod read_only;

pub use rate_limit::{RateLimiter, GLOBAL_KEY};
pub use read_only::ReadOnlyGate;
