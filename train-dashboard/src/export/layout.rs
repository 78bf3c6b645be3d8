//! Page geometry, cell wrapping and table pagination.
//!
//! Cells never lose text: anything wider than its column wraps onto further
//! lines and the row grows to its tallest cell. Pages are filled by height,
//! so a page of wrapped rows holds fewer of them.

use std::ops::Range;

use crate::board::COLUMN_HEADERS;

use super::document::ExportDocument;

/// A4 portrait, millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const LEFT_MARGIN_MM: f32 = 10.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

/// Distance between baselines inside one cell.
pub const LINE_HEIGHT_MM: f32 = 4.0;
/// Space added below the last line of a row.
pub const ROW_PADDING_MM: f32 = 3.0;

/// Title baselines, measured from the bottom of the page.
pub const DOCUMENT_TITLE_Y_MM: f32 = 287.0;
pub const SECTION_TITLE_Y_MM: f32 = 277.0;

/// Top edge of the column header row.
pub const SECTION_HEADER_TOP_MM: f32 = 271.0;
pub const CONTINUATION_HEADER_TOP_MM: f32 = 291.0;

/// Column widths, in header order. Sums to the printable width.
pub const COLUMN_WIDTHS_MM: [f32; 6] = [30.0, 28.0, 24.0, 36.0, 36.0, 36.0];

/// The wrapped lines of each cell in a row.
pub type RowLines = [Vec<String>; 6];

/// One physical page of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// Index into [`ExportDocument::sections`].
    pub section: usize,
    /// Rows of that section printed on this page.
    pub rows: Range<usize>,
    /// First page of its section: carries the section title.
    pub starts_section: bool,
}

/// Rough character budget for a column at the body font size.
pub fn column_chars(width_mm: f32) -> usize {
    // Helvetica averages about half an em per glyph; 9pt is ~1.6mm.
    (width_mm / 1.7).floor() as usize
}

/// Break `text` into lines of at most `max_chars`.
///
/// Lines break between words; a word longer than a whole line is split. The
/// built-in PDF fonts only cover single-byte text, so anything outside ASCII
/// is replaced with '?'. Empty text still yields one (empty) line.
pub fn wrap_cell(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let sanitized: String = text
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                ' '
            } else if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                '?'
            }
        })
        .collect();

    let mut lines = Vec::new();
    let mut line = String::new();
    for mut word in sanitized.split_whitespace() {
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let (head, tail) = word.split_at(max_chars);
            lines.push(head.to_string());
            word = tail;
        }
        if word.is_empty() {
            continue;
        }
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= max_chars {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap every cell of a row to its column width.
pub fn wrap_row(cells: &[&str; 6]) -> RowLines {
    std::array::from_fn(|i| wrap_cell(cells[i], column_chars(COLUMN_WIDTHS_MM[i])))
}

/// Height of a row: its tallest cell plus padding.
pub fn row_height(lines: &RowLines) -> f32 {
    let tallest = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
    tallest as f32 * LINE_HEIGHT_MM + ROW_PADDING_MM
}

fn header_height() -> f32 {
    row_height(&wrap_row(&COLUMN_HEADERS))
}

/// Height left for rows on the first page of a section.
pub fn first_page_height() -> f32 {
    SECTION_HEADER_TOP_MM - header_height() - BOTTOM_MARGIN_MM
}

/// Height left for rows on a continuation page.
pub fn continuation_height() -> f32 {
    CONTINUATION_HEADER_TOP_MM - header_height() - BOTTOM_MARGIN_MM
}

/// Split rows of the given heights into pages.
///
/// The first page has `first_mm` of room and every later page `rest_mm`.
/// A row taller than a whole page still gets a page of its own. An empty
/// table still gets one (empty) page.
pub fn paginate(heights: &[f32], first_mm: f32, rest_mm: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut room = first_mm;
    let mut used = 0.0;

    for (i, &height) in heights.iter().enumerate() {
        if i > start && used + height > room {
            pages.push(start..i);
            start = i;
            room = rest_mm;
            used = 0.0;
        }
        used += height;
    }
    pages.push(start..heights.len());
    pages
}

/// Lay out every section of `doc` onto physical pages.
pub fn layout(doc: &ExportDocument) -> Vec<PageSpec> {
    let first = first_page_height();
    let rest = continuation_height();

    doc.sections()
        .iter()
        .enumerate()
        .flat_map(|(section, s)| {
            let heights: Vec<f32> = s
                .rows
                .iter()
                .map(|row| row_height(&wrap_row(&row.cells())))
                .collect();
            paginate(&heights, first, rest)
                .into_iter()
                .enumerate()
                .map(move |(i, rows)| PageSpec {
                    section,
                    rows,
                    starts_section: i == 0,
                })
        })
        .collect()
}
