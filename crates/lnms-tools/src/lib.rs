//! lnms-tools: the LibreNMS operation catalog and invocation pipeline
//!
//! - `operation`: static operation specs and parameter shaping
//! - `catalog`: every exposed LibreNMS operation, grouped by API area
//! - `registry`: name-indexed lookup over the catalog
//! - `policy`: read-only gate and sliding-window rate limiter
//! - `pipeline`: policies + gateway, one call at a time

pub mod catalog;
pub mod operation;
pub mod pipeline;
pub mod policy;
pub mod registry;

pub use operation::{BodyShape, OperationSpec, ParamKind, ParamLocation, ParamSpec};
pub use pipeline::Pipeline;
pub use policy::{RateLimiter, ReadOnlyGate, GLOBAL_KEY};
pub use registry::{OperationDefinition, OperationRegistry};
