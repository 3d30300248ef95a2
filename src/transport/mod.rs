//! Transport layer: wire-format details of the gateway's JSON request body.

mod payload;

pub use payload::{build_payload, encode_payload};
