//! Cell classification and plain-text table rendering

use crate::executor::ResultSet;
use crate::record::Value;

use super::view::SortDirective;

/// Display class of one cell, decided from its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Integer or Float: right-aligned
    Numeric,
    /// Text or NotANumber: left-aligned
    Text,
}

impl CellFormat {
    pub fn of(value: &Value) -> Self {
        if value.is_numeric() {
            CellFormat::Numeric
        } else {
            CellFormat::Text
        }
    }
}

/// Renders result sets as plain-text tables
pub struct TableRenderer;

impl TableRenderer {
    /// Text shown for a result set with no rows
    pub const EMPTY: &'static str = "No results";

    /// Renders `result` with the directive's column marked in the header.
    pub fn render(result: &ResultSet, directive: &SortDirective) -> String {
        if result.is_empty() {
            return Self::EMPTY.to_string();
        }

        let headers: Vec<String> = result
            .columns
            .iter()
            .map(|c| match directive.marker_for(c) {
                Some(marker) => format!("{} {}", c, marker),
                None => c.clone(),
            })
            .collect();

        let cells: Vec<Vec<(String, CellFormat)>> = result
            .rows
            .iter()
            .map(|r| {
                r.values()
                    .iter()
                    .map(|v| (v.to_string(), CellFormat::of(v)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|(s, _)| s.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        // A header follows its column only when every cell is numeric
        let header_formats: Vec<CellFormat> = (0..headers.len())
            .map(|i| {
                if cells
                    .iter()
                    .all(|row| matches!(row.get(i), Some((_, CellFormat::Numeric))))
                {
                    CellFormat::Numeric
                } else {
                    CellFormat::Text
                }
            })
            .collect();

        let mut lines = Vec::with_capacity(cells.len() + 2);
        lines.push(Self::line(
            headers.iter().zip(&header_formats).map(|(h, f)| (h.as_str(), *f)),
            &widths,
        ));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &cells {
            lines.push(Self::line(row.iter().map(|(s, f)| (s.as_str(), *f)), &widths));
        }

        lines.join("\n")
    }

    fn line<'a>(cells: impl Iterator<Item = (&'a str, CellFormat)>, widths: &[usize]) -> String {
        cells
            .zip(widths)
            .map(|((text, format), width)| Self::pad(text, format, *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }

    fn pad(text: &str, format: CellFormat, width: usize) -> String {
        let fill = " ".repeat(width.saturating_sub(text.chars().count()));
        match format {
            CellFormat::Numeric => format!("{}{}", fill, text),
            CellFormat::Text => format!("{}{}", text, fill),
        }
    }
}
