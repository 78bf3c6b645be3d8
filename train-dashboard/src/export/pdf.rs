//! PDF rendering with printpdf.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::board::COLUMN_HEADERS;

use super::document::ExportDocument;
use super::error::ExportError;
use super::layout::{
    COLUMN_WIDTHS_MM, CONTINUATION_HEADER_TOP_MM, DOCUMENT_TITLE_Y_MM, LEFT_MARGIN_MM,
    LINE_HEIGHT_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, SECTION_HEADER_TOP_MM, SECTION_TITLE_Y_MM,
    layout, row_height, wrap_row,
};

const LAYER_NAME: &str = "Layer 1";
const TITLE_SIZE: f32 = 16.0;
const SECTION_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 9.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render `doc` to PDF bytes.
///
/// Every section starts on a fresh page; sections too long for one page
/// continue on further pages with the column header repeated. Long cell text
/// wraps within its column.
pub fn render_pdf(doc: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    let pages = layout(doc);

    let (pdf, first_page, first_layer) = PdfDocument::new(
        doc.title(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            pdf.get_page(page_index).get_layer(layer_index)
        };

        if i == 0 {
            layer.use_text(
                doc.title(),
                TITLE_SIZE,
                Mm(LEFT_MARGIN_MM),
                Mm(DOCUMENT_TITLE_Y_MM),
                &fonts.bold,
            );
        }

        let section = &doc.sections()[page.section];
        let header_top = if page.starts_section {
            layer.use_text(
                section.title.as_str(),
                SECTION_SIZE,
                Mm(LEFT_MARGIN_MM),
                Mm(SECTION_TITLE_Y_MM),
                &fonts.bold,
            );
            SECTION_HEADER_TOP_MM
        } else {
            CONTINUATION_HEADER_TOP_MM
        };

        let mut top = draw_row(&layer, &COLUMN_HEADERS, header_top, &fonts.bold);
        for row in &section.rows[page.rows.clone()] {
            top = draw_row(&layer, &row.cells(), top, &fonts.regular);
        }
    }

    pdf.save_to_bytes().map_err(pdf_error)
}

/// Draw a row whose top edge sits at `top`. Returns the top of the next row.
fn draw_row(
    layer: &PdfLayerReference,
    cells: &[&str; 6],
    top: f32,
    font: &IndirectFontRef,
) -> f32 {
    let lines = wrap_row(cells);
    let mut x = LEFT_MARGIN_MM;
    for (cell, width) in lines.iter().zip(COLUMN_WIDTHS_MM) {
        let mut y = top - LINE_HEIGHT_MM;
        for line in cell {
            layer.use_text(line.as_str(), BODY_SIZE, Mm(x), Mm(y), font);
            y -= LINE_HEIGHT_MM;
        }
        x += width;
    }
    top - row_height(&lines)
}

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf {
        message: e.to_string(),
    }
}
