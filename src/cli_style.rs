//! Terminal look of the binary and the interactive shell.

use crate::catalog::Movie;
use crate::report::{ReportRow, ReportTable};
use clap::builder::styling::{AnsiColor, Color as AnsiPaint, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color, Stylize};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

// Same highlight as the PDF report bands.
const STRAW: Color = Color::Rgb {
    r: 249,
    g: 231,
    b: 159,
};
const GREEN: Color = Color::Rgb {
    r: 0,
    g: 200,
    b: 120,
};
const ORANGE: Color = Color::Rgb {
    r: 255,
    g: 165,
    b: 0,
};
const RED: Color = Color::Rgb {
    r: 255,
    g: 85,
    b: 85,
};
const BLUE: Color = Color::Rgb {
    r: 100,
    g: 149,
    b: 237,
};
const DIM: Color = Color::Rgb {
    r: 128,
    g: 128,
    b: 128,
};

const SECTION_WIDTH: usize = 60;

pub fn get_styles() -> Styles {
    fn bold(color: AnsiColor) -> Style {
        Style::new().bold().fg_color(Some(AnsiPaint::Ansi(color)))
    }

    Styles::styled()
        .usage(bold(AnsiColor::Yellow).underline())
        .header(bold(AnsiColor::Yellow).underline())
        .literal(bold(AnsiColor::Green))
        .valid(bold(AnsiColor::Green))
        .invalid(bold(AnsiColor::Red))
        .error(bold(AnsiColor::Red))
        .placeholder(Style::new().fg_color(Some(AnsiPaint::Ansi(AnsiColor::BrightBlack))))
}

pub fn get_prompt() -> String {
    format!("{} ", "movies ❯".with(STRAW).bold())
}

fn print_status_line(glyph: &str, color: Color, message: &str) {
    println!(" {} {}", glyph.with(color).bold(), message.with(color));
}

pub fn print_success(message: &str) {
    print_status_line("✓", GREEN, message);
}

pub fn print_error(message: &str) {
    print_status_line("✗", RED, message);
}

pub fn print_warning(message: &str) {
    print_status_line("⚠", ORANGE, message);
}

pub fn print_info(message: &str) {
    print_status_line("ℹ", BLUE, message);
}

/// `╭── Title ──╮` centered in [`SECTION_WIDTH`].
fn section_rule(title: &str) -> String {
    let label = format!(" {} ", title);
    let fill = SECTION_WIDTH.saturating_sub(label.width());
    let left = fill / 2;
    format!("╭{}{}{}╮", "─".repeat(left), label, "─".repeat(fill - left))
}

pub fn print_section_header(title: &str) {
    println!();
    println!("{}", section_rule(title).with(STRAW).attribute(Attribute::Bold));
}

pub fn print_section_footer() {
    println!("{}", format!("╰{}╯", "─".repeat(SECTION_WIDTH)).with(STRAW));
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        "●".with(STRAW),
        format!("{}:", key).with(DIM),
        value
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    println!("{}{}  {}", "  ".repeat(indent), "▶".with(STRAW), item);
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        "○".with(DIM),
        message.with(DIM).attribute(Attribute::Italic)
    );
}

/// The selected movies drawn as a box table, with the same columns as the
/// PDF report.
pub struct MovieTable {
    headers: ReportRow,
    rows: Vec<ReportRow>,
    widths: [usize; 3],
}

impl MovieTable {
    pub fn from_movies(movies: &[Arc<Movie>]) -> Self {
        let ReportTable { headers, rows, .. } = ReportTable::from_movies("", movies);
        let mut widths = headers.clone().map(|h| h.width());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        MovieTable {
            headers,
            rows,
            widths,
        }
    }

    fn border(&self, left: char, junction: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&junction.to_string()), right)
    }

    fn row_line(&self, row: &ReportRow) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(self.widths)
            .map(|(cell, width)| {
                format!(" {}{} ", cell, " ".repeat(width.saturating_sub(cell.width())))
            })
            .collect();
        format!("│{}│", cells.join("│"))
    }

    /// Uncolored lines: top border, header, separator, one line per movie,
    /// bottom border.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.border('╭', '┬', '╮'),
            self.row_line(&self.headers),
            self.border('├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| self.row_line(row)));
        lines.push(self.border('╰', '┴', '╯'));
        lines
    }

    pub fn print(&self) {
        let last = self.rows.len() + 3;
        for (i, line) in self.lines().into_iter().enumerate() {
            match i {
                1 => println!("{}", line.with(GREEN).bold()),
                0 | 2 => println!("{}", line.with(STRAW)),
                i if i == last => println!("{}", line.with(STRAW)),
                _ => println!("{}", line),
            }
        }
    }
}
