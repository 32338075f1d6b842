//! A small bordered text table whose cells carry terminal styles.
//!
//! Widths are measured on the unstyled text, so styles never disturb alignment.

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use std::{fmt::Write as _, io};

/// Foreground-colored style.
pub fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

/// Bold foreground-colored style.
pub fn fg_bold(color: Color) -> ContentStyle {
    ContentStyle {
        attributes: Attributes::from(Attribute::Bold),
        ..fg(color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: ContentStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, ContentStyle::default())
    }

    pub fn styled(text: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.style == ContentStyle::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub spans: Vec<Span>,
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::empty().plain_span(text)
    }

    pub fn styled(text: impl Into<String>, style: ContentStyle) -> Self {
        Self::empty().styled_span(text, style)
    }

    pub fn plain_span(self, text: impl Into<String>) -> Self {
        self.span(Span::plain(text))
    }

    pub fn styled_span(self, text: impl Into<String>, style: ContentStyle) -> Self {
        self.span(Span::styled(text, style))
    }

    pub fn span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// Unstyled text of the cell.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }

    fn write(&self, out: &mut String, width: usize, colored: bool) {
        for span in &self.spans {
            if colored && !span.is_plain() {
                // Writing into a String cannot fail.
                let _ = write!(out, "{}", span.style.apply(span.text.as_str()));
            } else {
                out.push_str(&span.text);
            }
        }
        out.extend(std::iter::repeat_n(' ', width.saturating_sub(self.width())));
    }
}

/// Rows of cells; the first row is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unstyled text of column `col` for every row, header included.
    pub fn column_text(&self, col: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(col).map(Cell::text).unwrap_or_default())
            .collect()
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::width)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Draw the table with box borders and a rule between rows.
    pub fn render(&self, colored: bool) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        rule(&mut out, &widths, ['┌', '┬', '┐']);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                rule(&mut out, &widths, ['├', '┼', '┤']);
            }
            out.push('│');
            for (col, width) in widths.iter().enumerate() {
                out.push(' ');
                match row.get(col) {
                    Some(cell) => cell.write(&mut out, *width, colored),
                    None => out.extend(std::iter::repeat_n(' ', *width)),
                }
                out.push_str(" │");
            }
            out.push('\n');
        }
        rule(&mut out, &widths, ['└', '┴', '┘']);
        out
    }

    pub fn write_to<W: io::Write>(&self, mut writer: W, colored: bool) -> io::Result<()> {
        writer.write_all(self.render(colored).as_bytes())?;
        writer.flush()
    }
}

fn rule(out: &mut String, widths: &[usize], [left, mid, right]: [char; 3]) {
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push(mid);
        }
        out.extend(std::iter::repeat_n('─', width + 2));
    }
    out.push(right);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new();
        table.push_row(vec![Cell::plain("City"), Cell::plain("Temp")]);
        table.push_row(vec![
            Cell::styled("Şu An", fg_bold(Color::Green)),
            Cell::plain("8°C"),
        ]);
        table
    }

    #[test]
    fn renders_bordered_rows_without_color() {
        let expected = "\
┌───────┬──────┐
│ City  │ Temp │
├───────┼──────┤
│ Şu An │ 8°C  │
└───────┴──────┘
";
        assert_eq!(sample().render(false), expected);
    }

    #[test]
    fn colored_render_keeps_alignment_of_plain_text() {
        let colored = sample().render(true);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("Şu An"));
        assert_eq!(colored.lines().count(), 5);
    }

    #[test]
    fn cell_text_and_width_ignore_styles() {
        let cell = Cell::plain("30% ").styled_span("(Rain)", fg(Color::Blue));
        assert_eq!(cell.text(), "30% (Rain)");
        assert_eq!(cell.width(), 10);
        assert!(cell.spans[0].is_plain());
        assert!(!cell.spans[1].is_plain());
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(Table::new().render(true), "");
    }

    #[test]
    fn write_to_emits_rendered_text() {
        let mut buf = Vec::new();
        sample().write_to(&mut buf, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), sample().render(false));
    }
}
