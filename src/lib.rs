//! # envoice
//!
//! Client for the [envoice.dev](https://envoice.dev) API, which renders
//! ZUGFeRD/Factur-X compliant PDF invoices and validates existing ones.
//!
//! Amounts are [`rust_decimal::Decimal`] in the API and go over the wire
//! as JSON numbers.
//!
//! ## Quick Start
//!
//! ```no_run
//! # fn main() -> envoice::Result<()> {
//! use envoice::*;
//! use rust_decimal::Decimal;
//!
//! let client = EnvoiceClient::new("env_sandbox_xxx")?;
//! let result = client
//!     .invoice()
//!     .number("2026-001")
//!     .date("2026-01-15")
//!     .seller(PartyBuilder::new("Acme GmbH").vat_id("DE123456789").city("Berlin").country("DE"))
//!     .buyer(PartyBuilder::new("Kunde AG").city("München").country("DE"))
//!     .add_item("Consulting", Decimal::new(10, 0), Decimal::new(150, 0))
//!     .generate()?;
//!
//! if let InvoiceResult::Success(invoice) = result {
//!     invoice.save_pdf(&invoice.filename)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors vs. failures
//!
//! Input problems (missing required fields, or a 422 response with field
//! details) come back as [`InvoiceResult::Failure`]. Everything else
//! (quota, other HTTP errors, timeouts, connection errors) is an
//! [`EnvoiceError`].
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `blocking` (default) | Synchronous `generate`, `validate`, `get_account` |
//!
//! The `_async` variants are always available.

pub mod client;
pub mod core;

// Re-export at crate root for convenience
pub use crate::client::{ClientConfig, EnvoiceClient};
pub use crate::core::*;
