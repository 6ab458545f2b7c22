//! Template-driven invoice layout.
//!
//! Templates are JSON arrays of content records. Each file holds one kind
//! of content, and the caller picks the matching loader. A [`TemplateSet`]
//! is loaded once at start-up from a [`RenderConfig`], then shared
//! read-only by every render; [`compose`] binds it to one invoice.
//!
//! # Content kinds
//!
//! | Kind | Required fields |
//! |------|-----------------|
//! | `text` | `x`, `y`, `content`, `font` |
//! | `graphic` | `x`, `y`, `width`, `height`, `source` |
//! | `value` | `x`, `y`, `field`, `font` (`row` for `service.*` fields) |
//! | `swiss_qr_code` | `x`, `y`, `payment` (creditor, amount, reference) |

mod config;
mod content;
mod field;
mod layout;
mod loader;
mod qrbill;
mod set;

use std::path::PathBuf;

use thiserror::Error;

pub use config::{ENV_VAR, Environment, Layer, RenderConfig};
pub use content::*;
pub use field::{Bindings, DATE_FORMAT, Field};
pub use layout::{Document, Placed, compose};
pub use loader::{TemplateContent, load_items, load_template, parse_items, parse_template};
pub use qrbill::{BillParty, QrBill};
pub use set::TemplateSet;

/// Errors raised while loading configuration and templates, or binding them to an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or a record lacks a required field.
    #[error("malformed {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but its values are unusable.
    #[error("invalid record {index} in {}: {message}", path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        message: String,
    },

    /// The configuration file has no section for the selected environment.
    #[error("no configuration section for environment '{name}'")]
    Environment { name: String },

    /// A payment block could not be filled from the invoice.
    #[error("binding error: {0}")]
    Binding(String),
}
