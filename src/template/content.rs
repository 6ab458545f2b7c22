//! Placeable content items.
//!
//! Coordinates and sizes are millimetres from the top-left corner of the page.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::field::Field;

/// Which kind of content a template file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Graphic,
    Value,
    SwissQrCode,
}

impl ContentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Graphic => "graphic",
            Self::Value => "value",
            Self::SwissQrCode => "swiss_qr_code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    /// Points.
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

/// Fixed text, e.g. a column header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(flatten)]
    pub position: Position,
    pub content: String,
    pub font: Font,
    #[serde(default)]
    pub align: Align,
}

/// An image or vector graphic, e.g. the page frame or a logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub size: Size,
    /// Image location, handed through to the document composer.
    pub source: PathBuf,
}

/// Text taken from the invoice at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(flatten)]
    pub position: Position,
    pub field: Field,
    /// Service row (0-based) for `service.*` fields.
    #[serde(default)]
    pub row: Option<usize>,
    pub font: Font,
    #[serde(default)]
    pub align: Align,
}

/// Where a payment-block field comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// `{ "field": "author.iban" }`
    Field { field: Field },
    /// A fixed string.
    Literal(String),
}

/// Payment data of a QR bill, as sources to resolve per invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTemplate {
    pub creditor_iban: Source,
    pub creditor_name: Source,
    pub creditor_street: Source,
    pub creditor_locality: Source,
    #[serde(default = "default_country")]
    pub creditor_country: String,
    pub amount: Source,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub reference: Source,
    pub reference_type: Source,
    #[serde(default)]
    pub debtor_name: Option<Source>,
    #[serde(default)]
    pub debtor_street: Option<Source>,
    #[serde(default)]
    pub debtor_locality: Option<Source>,
    #[serde(default = "default_country")]
    pub debtor_country: String,
    #[serde(default)]
    pub message: Option<Source>,
}

fn default_country() -> String {
    "CH".into()
}

fn default_currency() -> String {
    "CHF".into()
}

/// A Swiss QR-bill payment block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwissQRCode {
    #[serde(flatten)]
    pub position: Position,
    /// Edge length of the square QR code.
    #[serde(default = "default_qr_size")]
    pub size: f32,
    pub payment: PaymentTemplate,
}

fn default_qr_size() -> f32 {
    46.0
}

/// One positioned element of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Text(Text),
    Graphic(Graphic),
    Value(Value),
    SwissQrCode(SwissQRCode),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Text(_) => ContentKind::Text,
            Self::Graphic(_) => ContentKind::Graphic,
            Self::Value(_) => ContentKind::Value,
            Self::SwissQrCode(_) => ContentKind::SwissQrCode,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Text(t) => t.position,
            Self::Graphic(g) => g.position,
            Self::Value(v) => v.position,
            Self::SwissQrCode(q) => q.position,
        }
    }
}

impl From<Text> for ContentItem {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Graphic> for ContentItem {
    fn from(graphic: Graphic) -> Self {
        Self::Graphic(graphic)
    }
}

impl From<Value> for ContentItem {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<SwissQRCode> for ContentItem {
    fn from(code: SwissQRCode) -> Self {
        Self::SwissQrCode(code)
    }
}
