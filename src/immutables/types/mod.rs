//! Types for immutable bundle operations.

mod request;
mod response;

pub use request::{BundleRequest, Immutable, UnsealRequest};
pub use response::{Bundle, BundleResponse, ContractTag, NftfiMetadata};
