//! Column descriptors and per-column display settings.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::SemanticType;

/// How a column's values should be formatted, overriding the semantic type.
///
/// Hints come from user-editable column settings; an explicit hint always
/// wins over the inferred [`SemanticType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    /// Numeric value rendered as a percentage with the given decimals
    /// (settings string `"0.00%"`).
    Percent {
        /// Digits after the decimal point.
        decimals: usize,
    },
    /// Numeric value rendered with a fixed number of decimals
    /// (settings string `"0.00"`).
    Fixed {
        /// Digits after the decimal point.
        decimals: usize,
    },
    /// Temporal value reduced to its date half.
    DateOnly,
    /// Temporal value reduced to its time half.
    TimeOnly,
    /// Raw string form, no type-specific formatting.
    Verbatim,
}

/// Matches numeric settings strings: `0`, `0.00`, `0%`, `0.000%`, ...
fn numeric_hint_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0(?:\.(0+))?(%)?$").expect("static pattern is valid"))
}

impl FormatHint {
    /// Parse a column-settings formatting string.
    ///
    /// Returns `None` for strings that are not a recognized hint; callers
    /// treat that as "no hint" rather than an error.
    ///
    /// # Example
    ///
    /// ```
    /// use resultgrid_core::FormatHint;
    ///
    /// assert_eq!(FormatHint::parse("0.00%"), Some(FormatHint::Percent { decimals: 2 }));
    /// assert_eq!(FormatHint::parse("0.0"), Some(FormatHint::Fixed { decimals: 1 }));
    /// assert_eq!(FormatHint::parse("date"), Some(FormatHint::DateOnly));
    /// assert_eq!(FormatHint::parse("???"), None);
    /// ```
    #[must_use]
    pub fn parse(hint: &str) -> Option<Self> {
        let trimmed = hint.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "date" => return Some(FormatHint::DateOnly),
            "time" => return Some(FormatHint::TimeOnly),
            "verbatim" | "raw" => return Some(FormatHint::Verbatim),
            _ => {}
        }

        let captures = numeric_hint_pattern().captures(trimmed)?;
        let decimals = captures.get(1).map_or(0, |m| m.as_str().len());
        if captures.get(2).is_some() {
            Some(FormatHint::Percent { decimals })
        } else {
            Some(FormatHint::Fixed { decimals })
        }
    }
}

/// User-controlled display settings for one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Header label shown instead of the column name.
    pub label: Option<String>,
    /// Formatting override for the column's values.
    pub format_hint: Option<FormatHint>,
}

impl DisplaySettings {
    /// Create empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the formatting override.
    #[must_use]
    pub fn format_hint(mut self, hint: FormatHint) -> Self {
        self.format_hint = Some(hint);
        self
    }

    /// Set the formatting override from a settings string.
    ///
    /// Unrecognized strings leave the hint unset (logged, not an error).
    #[must_use]
    pub fn format_str(mut self, hint: &str) -> Self {
        self.format_hint = FormatHint::parse(hint);
        if self.format_hint.is_none() && !hint.trim().is_empty() {
            tracing::debug!(hint, "Ignoring unrecognized format hint");
        }
        self
    }
}

/// Metadata for one column of a query result.
///
/// Identity is `name`. Column order comes from the response schema and is
/// fixed for the lifetime of a query; descriptors are never mutated after
/// the first successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name from the response schema.
    pub name: String,
    /// Classification used to pick a formatter.
    pub semantic_type: SemanticType,
    /// Optional user display settings.
    pub settings: Option<DisplaySettings>,
}

impl ColumnDescriptor {
    /// Create a descriptor with no display settings.
    #[must_use]
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            settings: None,
        }
    }

    /// Attach display settings.
    #[must_use]
    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The header title: the settings label when present, else the name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.settings
            .as_ref()
            .and_then(|s| s.label.as_deref())
            .unwrap_or(&self.name)
    }

    /// The formatting override, if any.
    #[must_use]
    pub fn format_hint(&self) -> Option<FormatHint> {
        self.settings.as_ref().and_then(|s| s.format_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_hints() {
        assert_eq!(FormatHint::parse("0%"), Some(FormatHint::Percent { decimals: 0 }));
        assert_eq!(
            FormatHint::parse("0.00%"),
            Some(FormatHint::Percent { decimals: 2 })
        );
        assert_eq!(
            FormatHint::parse("0.0000%"),
            Some(FormatHint::Percent { decimals: 4 })
        );
    }

    #[test]
    fn test_parse_fixed_hints() {
        assert_eq!(FormatHint::parse("0"), Some(FormatHint::Fixed { decimals: 0 }));
        assert_eq!(FormatHint::parse("0.00"), Some(FormatHint::Fixed { decimals: 2 }));
    }

    #[test]
    fn test_parse_keyword_hints() {
        assert_eq!(FormatHint::parse("date"), Some(FormatHint::DateOnly));
        assert_eq!(FormatHint::parse("TIME"), Some(FormatHint::TimeOnly));
        assert_eq!(FormatHint::parse("raw"), Some(FormatHint::Verbatim));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(FormatHint::parse(""), None);
        assert_eq!(FormatHint::parse("#,##0"), None);
        assert_eq!(FormatHint::parse("0.1"), None);
    }

    #[test]
    fn test_title_prefers_label() {
        let plain = ColumnDescriptor::new("created_at", SemanticType::Temporal);
        assert_eq!(plain.title(), "created_at");

        let labelled = plain
            .clone()
            .with_settings(DisplaySettings::new().label("Created"));
        assert_eq!(labelled.title(), "Created");
    }

    #[test]
    fn test_format_hint_accessor() {
        let column = ColumnDescriptor::new("ratio", SemanticType::Numeric)
            .with_settings(DisplaySettings::new().format_str("0.00%"));
        assert_eq!(column.format_hint(), Some(FormatHint::Percent { decimals: 2 }));

        let unhinted = ColumnDescriptor::new("ratio", SemanticType::Numeric)
            .with_settings(DisplaySettings::new().format_str("not-a-hint"));
        assert_eq!(unhinted.format_hint(), None);
    }
}
