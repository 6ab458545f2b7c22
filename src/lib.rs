//! # facture
//!
//! Invoicing for therapy services billed under the Tarif 590 standard:
//! validated invoice records, bank-facing payment references and a
//! template-driven layout of the invoice document.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use facture::core::*;
//! use facture::reference::{ReferenceType, resolve};
//!
//! let json = r#"{
//!     "author": {
//!         "name": "Cabinet Léman", "street": "Rue du Lac 4", "zipcode": "1003",
//!         "city": "Lausanne", "phone": "+41 21 555 12 12",
//!         "email": "contact@leman.ch", "iban": "CH4431999123000889012"
//!     },
//!     "therapist": {
//!         "firstname": "Anna", "lastname": "Keller", "street": "Rue du Lac 4",
//!         "zipcode": "1003", "city": "Lausanne", "phone": "+41 21 555 12 13"
//!     },
//!     "patient": {
//!         "firstname": "Nicholas", "lastname": "Ailleboust",
//!         "street": "Tösstalstrasse 97", "zipcode": "8872", "city": "Weesen",
//!         "canton": "SG", "birthdate": -1118102400, "gender": "woman",
//!         "email": "NicholasAilleboust@teleworm.us"
//!     },
//!     "servicePrice": 120,
//!     "services": [{ "date": 1600000000000, "duration": 60, "code": 1200 }],
//!     "timestamp": 1600000000000
//! }"#;
//!
//! let invoice = Invoice::from_json(json).unwrap();
//! assert_eq!(invoice.total_amount().to_string(), "120.00");
//!
//! let reference = resolve(&invoice).unwrap();
//! assert_eq!(reference.kind, ReferenceType::Qrr);
//! assert_eq!(reference.value, "000000000000016000000000002");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, validation, checksums, payment references |
//! | `template` (default) | Content model, template loading, layout resolution, QR bill payload |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod checksum;

#[cfg(feature = "core")]
pub mod reference;

#[cfg(feature = "template")]
pub mod template;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
