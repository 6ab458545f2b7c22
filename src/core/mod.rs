//! Core invoice types, validation, and construction.
//!
//! An [`Invoice`] can only be obtained from an [`InvoiceRecord`] (untrusted
//! JSON input) or an [`InvoiceBuilder`]; both run the full rule set and
//! report every violation at once.

mod builder;
pub mod cantons;
mod error;
mod record;
pub mod tariff;
mod timestamp;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use record::*;
pub use tariff::{TariffCode, is_known_tariff_code};
pub use timestamp::*;
pub use types::*;
pub use validation::*;
