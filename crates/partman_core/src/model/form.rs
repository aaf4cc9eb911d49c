//! Text form projection of a part.
//!
//! # Responsibility
//! - Render a `Part` into the text fields shown by edit/creation screens.
//! - Parse those text fields back into `PartFields`.
//!
//! # Invariants
//! - Parsed tag lists never contain empty or padded entries.
//! - An unparsable quantity never overwrites a known value; the caller
//!   supplies the fallback.

use crate::model::part::{Part, PartFields};

/// Separator used when rendering tags into a single text field.
pub const TAG_JOIN_SEPARATOR: &str = ", ";

/// Editable text fields of a part form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartForm {
    pub name: String,
    /// Comma-delimited tags.
    pub tags_text: String,
    pub location: String,
    pub qty_text: String,
}

impl PartForm {
    /// Renders an existing part for editing.
    pub fn from_part(part: &Part) -> Self {
        Self {
            name: part.name.clone(),
            tags_text: part.tags.join(TAG_JOIN_SEPARATOR),
            location: part.location.clone(),
            qty_text: format_qty(part.qty),
        }
    }

    /// Converts form text into part attributes.
    ///
    /// `qty_fallback` is used when `qty_text` does not hold a finite number:
    /// the current quantity on edit, `0.0` on create.
    pub fn to_fields(&self, qty_fallback: f64) -> PartFields {
        PartFields {
            name: self.name.clone(),
            tags: parse_tags(&self.tags_text),
            location: self.location.clone(),
            qty: parse_qty(&self.qty_text).unwrap_or(qty_fallback),
        }
    }
}

/// Splits comma-delimited text into tags.
///
/// Surrounding whitespace is trimmed and empty entries are dropped, so
/// `"a, b,,  c "` yields `["a", "b", "c"]` and blank input yields no tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses quantity text; returns `None` for unparsable or non-finite input.
pub fn parse_qty(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Formats a quantity with the shortest representation that round-trips.
pub fn format_qty(qty: f64) -> String {
    format!("{qty}")
}

#[cfg(test)]
mod tests {
    use super::{format_qty, parse_qty, parse_tags, PartForm};
    use crate::model::part::{Part, PartFields};

    #[test]
    fn parse_tags_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_tags(" fastener,metal , ,  m4 ,"),
            vec!["fastener", "metal", "m4"]
        );
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn parse_tags_trims_tabs_and_newlines_around_commas() {
        assert_eq!(parse_tags("\tmetal\n,\r\nm4\t"), vec!["metal", "m4"]);
    }

    #[test]
    fn parse_tags_keeps_inner_spaces() {
        assert_eq!(parse_tags("hex head, m4"), vec!["hex head", "m4"]);
    }

    #[test]
    fn parse_qty_rejects_garbage_and_non_finite() {
        assert_eq!(parse_qty(" 12.5 "), Some(12.5));
        assert_eq!(parse_qty("-3"), Some(-3.0));
        assert_eq!(parse_qty("twelve"), None);
        assert_eq!(parse_qty("NaN"), None);
        assert_eq!(parse_qty("inf"), None);
        assert_eq!(parse_qty(""), None);
    }

    #[test]
    fn format_qty_is_shortest() {
        assert_eq!(format_qty(120.0), "120");
        assert_eq!(format_qty(0.25), "0.25");
    }

    #[test]
    fn form_renders_and_parses_back() {
        let part = Part::new(PartFields::new(
            "Bolt M4",
            vec!["fastener".to_string(), "metal".to_string()],
            "Bin 3",
            120.0,
        ));
        let form = PartForm::from_part(&part);
        assert_eq!(form.tags_text, "fastener, metal");
        assert_eq!(form.qty_text, "120");
        assert_eq!(form.to_fields(0.0), part.fields());
    }

    #[test]
    fn unparsable_qty_uses_fallback() {
        let form = PartForm {
            name: "Washer".to_string(),
            tags_text: "metal".to_string(),
            location: "Bin 1".to_string(),
            qty_text: "lots".to_string(),
        };
        assert_eq!(form.to_fields(42.0).qty, 42.0);
        assert_eq!(form.to_fields(0.0).qty, 0.0);
    }
}
