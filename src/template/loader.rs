//! Parse template files into content items.
//!
//! A file either loads completely or not at all: the first malformed or
//! invalid record fails the whole call and no items are returned.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::ConfigError;
use super::content::*;

/// A content variant that can be loaded from a template file.
pub trait TemplateContent: DeserializeOwned + Into<ContentItem> {
    const KIND: ContentKind;

    /// Checks beyond what deserialization enforces.
    fn check(&self) -> Result<(), String>;
}

impl TemplateContent for Text {
    const KIND: ContentKind = ContentKind::Text;

    fn check(&self) -> Result<(), String> {
        check_position(self.position)?;
        check_font(&self.font)
    }
}

impl TemplateContent for Graphic {
    const KIND: ContentKind = ContentKind::Graphic;

    fn check(&self) -> Result<(), String> {
        check_position(self.position)?;
        let Size { width, height } = self.size;
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Err(format!(
                "size must be positive, got {}x{}",
                self.size.width, self.size.height
            ));
        }
        if self.source.as_os_str().is_empty() {
            return Err("graphic source must not be empty".into());
        }
        Ok(())
    }
}

impl TemplateContent for Value {
    const KIND: ContentKind = ContentKind::Value;

    fn check(&self) -> Result<(), String> {
        check_position(self.position)?;
        check_font(&self.font)?;
        match (self.field.is_service_row(), self.row) {
            (true, None) => Err(format!("{:?} needs a service row", self.field)),
            (false, Some(_)) => Err(format!("{:?} is not a service field", self.field)),
            _ => Ok(()),
        }
    }
}

impl TemplateContent for SwissQRCode {
    const KIND: ContentKind = ContentKind::SwissQrCode;

    fn check(&self) -> Result<(), String> {
        check_position(self.position)?;
        if self.size.is_nan() || self.size <= 0.0 {
            return Err(format!("size must be positive, got {}", self.size));
        }
        let payment = &self.payment;
        if !matches!(payment.currency.as_str(), "CHF" | "EUR") {
            return Err(format!("currency must be CHF or EUR, got '{}'", payment.currency));
        }
        if let Source::Literal(kind) = &payment.reference_type {
            if !matches!(kind.as_str(), "QRR" | "SCOR" | "NON") {
                return Err(format!("unknown reference type '{kind}'"));
            }
        }
        let sources = [
            Some(&payment.creditor_iban),
            Some(&payment.creditor_name),
            Some(&payment.creditor_street),
            Some(&payment.creditor_locality),
            Some(&payment.amount),
            Some(&payment.reference),
            Some(&payment.reference_type),
            payment.debtor_name.as_ref(),
            payment.debtor_street.as_ref(),
            payment.debtor_locality.as_ref(),
            payment.message.as_ref(),
        ];
        for source in sources.into_iter().flatten() {
            if let Source::Field { field } = source {
                if field.is_service_row() {
                    return Err(format!("{field:?} cannot feed a payment block"));
                }
            }
        }
        Ok(())
    }
}

fn check_position(position: Position) -> Result<(), String> {
    if position.x.is_finite() && position.y.is_finite() && position.x >= 0.0 && position.y >= 0.0 {
        Ok(())
    } else {
        Err(format!("position ({}, {}) is off the page", position.x, position.y))
    }
}

fn check_font(font: &Font) -> Result<(), String> {
    if font.family.trim().is_empty() {
        return Err("font family must not be empty".into());
    }
    if font.size.is_nan() || font.size <= 0.0 {
        return Err(format!("font size must be positive, got {}", font.size));
    }
    Ok(())
}

/// Load a homogeneous template file as typed records, in declaration order.
pub fn load_items<T: TemplateContent>(path: &Path) -> Result<Vec<T>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_items::<T>(&json, path)?;
    log::debug!(
        "loaded {} {} item(s) from {}",
        items.len(),
        T::KIND.name(),
        path.display()
    );
    Ok(items)
}

/// Parse template JSON as typed records. `origin` only labels errors.
pub fn parse_items<T: TemplateContent>(json: &str, origin: &Path) -> Result<Vec<T>, ConfigError> {
    let items: Vec<T> = serde_json::from_str(json).map_err(|source| ConfigError::Malformed {
        path: origin.to_path_buf(),
        source,
    })?;
    for (index, item) in items.iter().enumerate() {
        item.check().map_err(|message| ConfigError::Invalid {
            path: origin.to_path_buf(),
            index,
            message,
        })?;
    }
    Ok(items)
}

/// Load a template file holding content of `kind`.
pub fn load_template(path: &Path, kind: ContentKind) -> Result<Vec<ContentItem>, ConfigError> {
    match kind {
        ContentKind::Text => load_items::<Text>(path).map(into_items),
        ContentKind::Graphic => load_items::<Graphic>(path).map(into_items),
        ContentKind::Value => load_items::<Value>(path).map(into_items),
        ContentKind::SwissQrCode => load_items::<SwissQRCode>(path).map(into_items),
    }
}

/// Parse in-memory template JSON holding content of `kind`.
pub fn parse_template(json: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ConfigError> {
    let origin = PathBuf::from("<memory>");
    match kind {
        ContentKind::Text => parse_items::<Text>(json, &origin).map(into_items),
        ContentKind::Graphic => parse_items::<Graphic>(json, &origin).map(into_items),
        ContentKind::Value => parse_items::<Value>(json, &origin).map(into_items),
        ContentKind::SwissQrCode => parse_items::<SwissQRCode>(json, &origin).map(into_items),
    }
}

fn into_items<T: Into<ContentItem>>(items: Vec<T>) -> Vec<ContentItem> {
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"{"family": "Arial", "size": 9}"#;

    #[test]
    fn text_in_declaration_order() {
        let json = format!(
            r#"[{{"x": 10, "y": 10, "content": "Patient", "font": {FONT}}},
                {{"x": 10, "y": 20, "content": "Thérapeute", "font": {FONT}}}]"#
        );
        let items = parse_template(&json, ContentKind::Text).unwrap();
        assert_eq!(items.len(), 2);
        match (&items[0], &items[1]) {
            (ContentItem::Text(a), ContentItem::Text(b)) => {
                assert_eq!(a.content, "Patient");
                assert_eq!(b.content, "Thérapeute");
            }
            other => panic!("unexpected items {other:?}"),
        }
    }

    #[test]
    fn missing_field_fails_whole_file() {
        let json = format!(
            r#"[{{"x": 10, "y": 10, "content": "Patient", "font": {FONT}}},
                {{"x": 10, "y": 20, "font": {FONT}}}]"#
        );
        let err = parse_template(&json, ContentKind::Text).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn invalid_geometry_reports_index() {
        let json = format!(r#"[{{"x": -1, "y": 10, "content": "Patient", "font": {FONT}}}]"#);
        match parse_template(&json, ContentKind::Text).unwrap_err() {
            ConfigError::Invalid { index, .. } => assert_eq!(index, 0),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn service_fields_need_rows() {
        let json = format!(r#"[{{"x": 10, "y": 10, "field": "service.code", "font": {FONT}}}]"#);
        assert!(parse_template(&json, ContentKind::Value).is_err());

        let json = format!(
            r#"[{{"x": 10, "y": 10, "field": "service.code", "row": 0, "font": {FONT}}}]"#
        );
        assert_eq!(parse_template(&json, ContentKind::Value).unwrap().len(), 1);

        let json = format!(
            r#"[{{"x": 10, "y": 10, "field": "invoice.total", "row": 0, "font": {FONT}}}]"#
        );
        assert!(parse_template(&json, ContentKind::Value).is_err());
    }

    #[test]
    fn not_an_array() {
        assert!(parse_template("{}", ContentKind::Graphic).is_err());
        assert!(parse_template("[]", ContentKind::Graphic).unwrap().is_empty());
    }

    #[test]
    fn missing_file() {
        let err = load_template(Path::new("/nonexistent/template.json"), ContentKind::Text)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
