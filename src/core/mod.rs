//! Invoice types, the fluent builder, and the result/error model.
//!
//! Nothing in this module performs network I/O; the builder only hands
//! a finished request to the [`EnvoiceClient`](crate::EnvoiceClient).

mod builder;
mod date;
mod error;
mod result;
mod types;

pub use builder::*;
pub use date::IntoDateString;
pub use error::*;
pub use result::*;
pub use types::*;
