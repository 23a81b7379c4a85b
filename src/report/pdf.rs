use super::{paginate, ReportRenderer, ReportRow, ReportTable};
use crate::delivery::RenderError;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

// A4 portrait, all lengths in millimeters.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TITLE_BAND_HEIGHT: f32 = 16.0;
const TITLE_GAP: f32 = 8.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const FOOTER_Y: f32 = 10.0;

const TITLE_FONT_SIZE: f32 = 28.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const CELL_FONT_SIZE: f32 = 10.0;
const FOOTER_FONT_SIZE: f32 = 8.0;

const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const HIGHLIGHT: (f32, f32, f32) = (0.976, 0.906, 0.624); // #F9E79F
const TITLE_TEXT: (f32, f32, f32) = (0.2, 0.2, 0.2); // #333333
const HEADER_TEXT: (f32, f32, f32) = (0.0, 0.5, 0.0);
const CELL_TEXT: (f32, f32, f32) = (0.0, 0.0, 0.0);
const GRID: (f32, f32, f32) = (0.75, 0.75, 0.75);

/// Renders the report as an A4 PDF using the built-in Helvetica fonts.
#[derive(Debug, Default)]
pub struct PdfReportRenderer {}

impl PdfReportRenderer {
    pub fn new() -> Self {
        PdfReportRenderer {}
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, table: &ReportTable) -> Result<Vec<u8>, RenderError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            table.title.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let (first_page_rows, page_rows) = page_capacities();
        let pages = paginate(table.rows.len(), first_page_rows, page_rows);
        let total = pages.len();
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

        for (index, range) in pages.into_iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            let mut top = PAGE_HEIGHT - MARGIN;
            if index == 0 {
                draw_title(&layer, &bold, &table.title, top);
                top -= TITLE_BAND_HEIGHT + TITLE_GAP;
            }

            fill_band(&layer, top, ROW_HEIGHT, HIGHLIGHT);
            draw_row(&layer, &bold, &table.headers, top, HEADER_FONT_SIZE, HEADER_TEXT);
            top -= ROW_HEIGHT;

            for row in &table.rows[range] {
                draw_row(&layer, &regular, row, top, CELL_FONT_SIZE, CELL_TEXT);
                top -= ROW_HEIGHT;
                draw_rule(&layer, top);
            }

            layer.set_fill_color(rgb(TITLE_TEXT));
            layer.use_text(
                footer_text(index + 1, total, &generated_at),
                FOOTER_FONT_SIZE,
                Mm(MARGIN),
                Mm(FOOTER_Y),
                &regular,
            );
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}

/// Rows fitting on the first page (below the heading) and on the following
/// pages, header row excluded.
fn page_capacities() -> (usize, usize) {
    let table_height = PAGE_HEIGHT - 2.0 * MARGIN - ROW_HEIGHT;
    let first = (table_height - TITLE_BAND_HEIGHT - TITLE_GAP) / ROW_HEIGHT;
    let others = table_height / ROW_HEIGHT;
    (first.floor() as usize, others.floor() as usize)
}

fn column_width() -> f32 {
    (PAGE_WIDTH - 2.0 * MARGIN) / 3.0
}

/// Shorten `text` so it fits in `width` millimeters at `font_size` points.
fn fit_text(text: &str, width: f32, font_size: f32) -> String {
    let glyph = AVG_GLYPH_WIDTH * font_size * PT_TO_MM;
    let max_chars = (width / glyph).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn footer_text(page: usize, total: usize, generated_at: &str) -> String {
    format!("{} / {}    {}", page, total, generated_at)
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Pdf(err.to_string())
}

fn fill_band(layer: &PdfLayerReference, top: f32, height: f32, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
    layer.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(top - height),
        Mm(PAGE_WIDTH - MARGIN),
        Mm(top),
    ));
}

fn draw_title(layer: &PdfLayerReference, font: &IndirectFontRef, title: &str, top: f32) {
    fill_band(layer, top, TITLE_BAND_HEIGHT, HIGHLIGHT);
    layer.set_fill_color(rgb(TITLE_TEXT));
    layer.use_text(
        fit_text(title, PAGE_WIDTH - 2.0 * (MARGIN + CELL_PADDING), TITLE_FONT_SIZE),
        TITLE_FONT_SIZE,
        Mm(MARGIN + CELL_PADDING),
        Mm(top - TITLE_BAND_HEIGHT + 4.0),
        font,
    );
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    cells: &ReportRow,
    top: f32,
    font_size: f32,
    color: (f32, f32, f32),
) {
    let width = column_width();
    let baseline = top - ROW_HEIGHT + 2.5;
    layer.set_fill_color(rgb(color));
    for (column, cell) in cells.iter().enumerate() {
        let x = MARGIN + column as f32 * width + CELL_PADDING;
        layer.use_text(
            fit_text(cell, width - 2.0 * CELL_PADDING, font_size),
            font_size,
            Mm(x),
            Mm(baseline),
            font,
        );
    }
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    layer.set_outline_color(rgb(GRID));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}
