//! The column formatter registry.
//!
//! [`format`] maps `(column, value, row, row index, context)` to a
//! [`PresentedCell`]. It holds no state and is deterministic: the same
//! input always yields the same output, so it is safe to call repeatedly
//! and from anywhere.
//!
//! Dispatch order: the column's explicit [`FormatHint`] wins when present;
//! otherwise the column's [`SemanticType`] picks the formatter. Anything
//! unrecognized, and any hint/value mismatch, degrades to the raw string
//! form with a diagnostic marker — formatting never fails.

use resultgrid_core::{CellValue, ColumnDescriptor, FormatHint, RawRow, SemanticType};

/// Marker appended to cells that fell back to raw stringification.
const DEGRADED_MARKER: &str = " ⚠";

/// Formatting configuration shared by all columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text shown for NULL cells.
    pub null_text: String,
    /// Whether integer parts of numbers get thousands separators.
    pub group_thousands: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            null_text: "(null)".to_string(),
            group_thousands: true,
        }
    }
}

impl RenderOptions {
    /// Create the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text shown for NULL cells.
    #[must_use]
    pub fn null_text(mut self, text: impl Into<String>) -> Self {
        self.null_text = text.into();
        self
    }

    /// Disable thousands separators.
    #[must_use]
    pub fn without_grouping(mut self) -> Self {
        self.group_thousands = false;
        self
    }
}

/// Query-level metadata available to every formatter.
///
/// The context is built once per query by the caller and passed explicitly;
/// formatters never capture ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Human label of the originating query, for diagnostics.
    pub query_label: Option<String>,
    /// Base path for linking key-like columns to a detail view.
    ///
    /// When set, numeric `id`/`*_id` cells carry a link of the form
    /// `{base}/{value}`.
    pub detail_link_base: Option<String>,
    /// Shared formatting configuration.
    pub options: RenderOptions,
}

impl RenderContext {
    /// Create a context with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query label.
    #[must_use]
    pub fn query_label(mut self, label: impl Into<String>) -> Self {
        self.query_label = Some(label.into());
        self
    }

    /// Set the detail-view base path for key-like columns.
    #[must_use]
    pub fn detail_link_base(mut self, base: impl Into<String>) -> Self {
        self.detail_link_base = Some(base.into());
        self
    }

    /// Set the formatting options.
    #[must_use]
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// One formatted cell, ready for the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedCell {
    /// Display text.
    pub text: String,
    /// Optional click/link target.
    pub link: Option<String>,
    /// Whether formatting fell back to raw stringification.
    pub degraded: bool,
}

impl PresentedCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
            degraded: false,
        }
    }

    fn linked(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            degraded: false,
        }
    }
}

/// Format one cell.
///
/// `row` and `row_index` give formatters access to the cell's row context;
/// the built-in formatters use them only for diagnostics, but the contract
/// keeps them available.
#[must_use]
pub fn format(
    column: &ColumnDescriptor,
    value: &CellValue,
    row: &RawRow,
    row_index: usize,
    context: &RenderContext,
) -> PresentedCell {
    if value.is_null() {
        return PresentedCell::plain(&context.options.null_text);
    }

    let formatted = match column.format_hint() {
        Some(hint) => format_with_hint(hint, value, context),
        None => Some(format_by_type(column, value, context)),
    };

    formatted.unwrap_or_else(|| degrade(column, value, row, row_index))
}

/// Apply an explicit hint; `None` means the hint does not fit the value.
fn format_with_hint(
    hint: FormatHint,
    value: &CellValue,
    context: &RenderContext,
) -> Option<PresentedCell> {
    match hint {
        FormatHint::Percent { decimals } => {
            let v = value.as_f64()?;
            Some(PresentedCell::plain(format!(
                "{:.decimals$}%",
                v * 100.0,
                decimals = decimals
            )))
        }
        FormatHint::Fixed { decimals } => {
            let v = value.as_f64()?;
            let text = format!("{v:.decimals$}", decimals = decimals);
            Some(PresentedCell::plain(group_number(
                &text,
                context.options.group_thousands,
            )))
        }
        FormatHint::DateOnly => {
            let normalized = normalize_timestamp(value.as_str()?);
            Some(PresentedCell::plain(
                normalized.split(' ').next().unwrap_or(&normalized).to_string(),
            ))
        }
        FormatHint::TimeOnly => {
            let normalized = normalize_timestamp(value.as_str()?);
            let time = normalized.split(' ').nth(1)?;
            Some(PresentedCell::plain(time.to_string()))
        }
        FormatHint::Verbatim => Some(PresentedCell::plain(value.to_string())),
    }
}

/// Apply the semantic-type formatter. Infallible: mismatched shapes fall
/// through to plain stringification without the degraded marker only when
/// the type formatter itself can represent them.
fn format_by_type(
    column: &ColumnDescriptor,
    value: &CellValue,
    context: &RenderContext,
) -> PresentedCell {
    match column.semantic_type {
        SemanticType::Numeric => {
            let text = group_number(&value.to_string(), context.options.group_thousands);
            match key_link(column, value, context) {
                Some(link) => PresentedCell::linked(text, link),
                None => PresentedCell::plain(text),
            }
        }
        SemanticType::Temporal => match value.as_str() {
            Some(s) => PresentedCell::plain(normalize_timestamp(s)),
            None => PresentedCell::plain(value.to_string()),
        },
        SemanticType::Boolean => PresentedCell::plain(value.to_string()),
        SemanticType::Structured => PresentedCell::plain(value.to_string()),
        SemanticType::Text => {
            let text = value.to_string();
            if text.starts_with("http://") || text.starts_with("https://") {
                let link = text.clone();
                PresentedCell::linked(text, link)
            } else {
                PresentedCell::plain(text)
            }
        }
    }
}

/// Raw string form plus the diagnostic marker.
fn degrade(
    column: &ColumnDescriptor,
    value: &CellValue,
    row: &RawRow,
    row_index: usize,
) -> PresentedCell {
    tracing::debug!(
        column = %column.name,
        row_index,
        cells = row.len(),
        "Formatter fell back to raw string form"
    );
    PresentedCell {
        text: format!("{value}{DEGRADED_MARKER}"),
        link: None,
        degraded: true,
    }
}

/// Detail-view link for key-like numeric columns.
fn key_link(
    column: &ColumnDescriptor,
    value: &CellValue,
    context: &RenderContext,
) -> Option<String> {
    let base = context.detail_link_base.as_deref()?;
    let name = column.name.as_str();
    if name == "id" || name.ends_with("_id") {
        Some(format!("{base}/{value}"))
    } else {
        None
    }
}

/// Normalize an engine timestamp string for display.
///
/// `2024-01-15T10:30:00.123456Z` becomes `2024-01-15 10:30:00`; bare dates
/// pass through unchanged.
fn normalize_timestamp(s: &str) -> String {
    let spaced = s.trim().replace('T', " ");
    let without_zone = spaced.trim_end_matches('Z');
    match without_zone.split_once('.') {
        Some((head, _fraction)) => head.to_string(),
        None => without_zone.to_string(),
    }
}

/// Insert thousands separators into the integer part of a numeric string.
fn group_number(text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    // Scientific notation passes through untouched.
    if text.contains(['e', 'E']) {
        return text.to_string();
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
