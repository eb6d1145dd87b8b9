//! Plain-text rendering of a grid frame.

use std::fmt::Write;

use opsgrid::column::Alignment;
use opsgrid::grid::HeaderCell;
use opsgrid::{RenderFrame, SortDirection};
use unicode_width::UnicodeWidthStr;

/// Separator drawn after the last pinned column.
const PIN_EDGE: &str = " ┃ ";
const GAP: &str = "   ";

fn header_label(cell: &HeaderCell) -> String {
    if cell.is_checkbox() {
        return match cell.checkbox {
            Some(opsgrid::grid::CheckState::Checked) => "[x]".into(),
            Some(opsgrid::grid::CheckState::Indeterminate) => "[-]".into(),
            _ => "[ ]".into(),
        };
    }
    let sort = match cell.sort {
        Some(SortDirection::Asc) => " ↑",
        Some(SortDirection::Desc) => " ↓",
        None => "",
    };
    format!("{}{}", cell.header, sort)
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    let len = text.width();
    let fill = width.saturating_sub(len);
    match align {
        Alignment::Left => format!("{text}{}", " ".repeat(fill)),
        Alignment::Right => format!("{}{text}", " ".repeat(fill)),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

/// Render the frame as aligned text: header, rule, rows, pager line.
pub fn render_text(frame: &RenderFrame) -> String {
    let labels: Vec<String> = frame.header.iter().map(header_label).collect();
    let body: Vec<Vec<String>> = frame
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell.content.text()).collect())
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            body.iter()
                .filter_map(|cells| cells.get(i))
                .map(|text| text.width())
                .chain(std::iter::once(label.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = |i: usize| -> &'static str {
        let is_edge = frame.header[i]
            .pinned
            .is_some_and(|offset| offset.is_last_pinned);
        if is_edge { PIN_EDGE } else { GAP }
    };

    let mut out = String::new();
    let mut line = String::new();
    for (i, label) in labels.iter().enumerate() {
        line.push_str(&pad(label, widths[i], frame.header[i].align));
        line.push_str(separator(i));
    }
    let _ = writeln!(out, "{}", line.trim_end());
    let _ = writeln!(out, "{}", "─".repeat(line.trim_end().width()));

    for (row, cells) in frame.rows.iter().zip(&body) {
        line.clear();
        for (i, text) in cells.iter().enumerate() {
            let align = row.cells[i].align;
            line.push_str(&pad(text, widths[i], align));
            line.push_str(separator(i));
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let page = &frame.page;
    let _ = writeln!(
        out,
        "\npage {}/{} ({} rows)",
        page.page + 1,
        page.page_count.max(1),
        page.total
    );
    out
}

#[cfg(test)]
mod tests {
    use opsgrid::{Column, ColumnType, Grid, GridConfig, Row};

    use super::*;

    fn frame(config: GridConfig) -> RenderFrame {
        let columns = vec![
            Column::new("event", "Event", ColumnType::Hierarchical).pinnable(),
            Column::new("stake", "Stake", ColumnType::Number).align(Alignment::Right),
        ];
        let rows = vec![
            Row::new("r1")
                .field("event", "Final")
                .field("stake", 1200)
                .with_children(vec![Row::new("r1a").field("event", "Leg").field("stake", 5)]),
        ];
        Grid::new(config).render(&columns, &rows)
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&frame(GridConfig::default().with_hierarchical(true)));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Event"));
        assert!(lines[1].starts_with('─'));
        assert!(lines[2].starts_with("▾ Final"));
        assert!(lines[2].ends_with("1200"));
        assert!(lines[3].starts_with("    Leg"));
        assert!(lines[3].ends_with("   5"));
        assert_eq!(lines.last(), Some(&"page 1/1 (2 rows)"));
    }

    #[test]
    fn test_render_text_marks_pinned_edge() {
        let config = GridConfig::default()
            .with_default_pinned(vec!["event".into()])
            .with_pinned_initially(true);
        let text = render_text(&frame(config));

        assert!(text.lines().next().is_some_and(|l| l.contains('┃')));
    }

    #[test]
    fn test_pad_alignment() {
        assert_eq!(pad("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(pad("ab", 4, Alignment::Right), "  ab");
        assert_eq!(pad("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(pad("abcdef", 3, Alignment::Left), "abcdef");
    }
}
