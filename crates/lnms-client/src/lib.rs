//! lnms-client: request gateway for the LibreNMS REST API
//!
//! - `gateway`: the [`Gateway`] seam and its reqwest implementation
//! - `path`: placeholder substitution with per-segment percent-encoding

pub mod gateway;
pub mod path;

pub use gateway::{ApiRequest, BoxedGateway, Gateway, HttpGateway, AUTH_HEADER};
pub use path::{encode_segment, render_path};
