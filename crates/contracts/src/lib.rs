//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Key Model
//! - Every `Record` carries its partition key in field 0 of `values`
//! - Keys are opaque scalars: equality and hashing only, no ordering

mod context;
mod error;
mod handler;
mod key;
mod record;
mod schema;

pub use context::*;
pub use error::*;
pub use handler::*;
pub use key::PartitionKey;
pub use record::{Record, RequestId};
pub use schema::*;
