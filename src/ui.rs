//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Two side-by-side translation panels with a shared scroll offset
//! - Row layout with balanced heights (an aligned row pair always occupies
//!   the same number of lines in both panels)
//! - Status bar with position, date, and mode info
//! - Help overlay
//!
//! It also provides plain-text renderers for CLI mode, reusing the same
//! row-wrapping logic.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::books::translated_book_name;
use crate::model::{
    strip_markup, AlignedRow, AppMode, AppState, ComparisonView, Passage, RowLayout, Side,
};

/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Indent for wrapped continuation lines of a verse.
const CONTINUATION_INDENT: &str = "    ";
/// Minimum text width we will wrap to.
const MIN_TEXT_WIDTH: usize = 8;

/// Calculates the visible content height and per-panel text width.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    // -2 for panel borders, -1 for the status bar
    let visible_lines = terminal_height.saturating_sub(STATUS_BAR_HEIGHT + 2) as usize;
    // Two panels split the width; -2 per panel for borders
    let text_width = ((terminal_width / 2).saturating_sub(2) as usize).max(MIN_TEXT_WIDTH);
    (visible_lines, text_width)
}

/// Wraps one aligned row into display lines for the given text width.
///
/// The same function drives layout computation, panel rendering, and the
/// plain-text renderers, so heights always agree.
pub fn wrap_row_text(row: &AlignedRow, width: usize) -> Vec<String> {
    let width = width.max(MIN_TEXT_WIDTH);
    match row {
        AlignedRow::Heading { content } => {
            let text = strip_markup(content);
            let text = text.trim();
            if text.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(text, width).into_iter().map(|l| l.into_owned()).collect()
            }
        }
        AlignedRow::EmptyHeading => vec![String::new()],
        AlignedRow::Verse(record) => {
            let text = format!(
                "{}:{} {}",
                record.chapter,
                record.verse,
                strip_markup(&record.content).trim()
            );
            let options = textwrap::Options::new(width).subsequent_indent(CONTINUATION_INDENT);
            textwrap::wrap(&text, options).into_iter().map(|l| l.into_owned()).collect()
        }
        AlignedRow::EmptyVerse(reference) => {
            vec![format!("{}:{} —", reference.chapter, reference.verse)]
        }
    }
}

/// Computes the shared row layout for a comparison at the given text width.
///
/// Every row pair gets the taller of its two wrapped heights, which is what
/// keeps the panels in lockstep under one scroll offset.
pub fn compute_layout(view: &ComparisonView, width: usize) -> Vec<RowLayout> {
    let mut layout = Vec::with_capacity(view.row_count());
    let mut first_line = 0;
    for i in 0..view.row_count() {
        let h1 = wrap_row_text(&view.rows1[i], width).len();
        let h2 = wrap_row_text(&view.rows2[i], width).len();
        let lines = h1.max(h2).max(1);
        layout.push(RowLayout { first_line, lines });
        first_line += lines;
    }
    layout
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Main layout: content area + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(area);

    let content_area = main_layout[0];
    let status_area = main_layout[1];

    // Split content area into the two translation panels
    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content_area);

    render_panel(frame, state, Side::Left, content_layout[0]);
    render_panel(frame, state, Side::Right, content_layout[1]);
    render_status_bar(frame, state, status_area);

    if state.show_help {
        render_help_overlay(frame, area);
    }
}

/// Renders one translation panel.
fn render_panel(frame: &mut Frame, state: &AppState, side: Side, area: Rect) {
    let translation = match side {
        Side::Left => &state.translation1,
        Side::Right => &state.translation2,
    };

    let focused = state.focus == side;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = panel_title(state, side, translation);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = if let Some(error) = &state.error {
        vec![
            Line::default(),
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )),
        ]
    } else {
        visible_panel_lines(state, side, inner_width, inner_height)
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Builds the visible slice of a panel's document lines.
fn visible_panel_lines(
    state: &AppState,
    side: Side,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let Some(view) = &state.view else {
        return Vec::new();
    };
    let rows = match side {
        Side::Left => &view.rows1,
        Side::Right => &view.rows2,
    };
    // Layout is recomputed on every load and resize; a mismatch means we
    // are mid-transition, so draw nothing for this frame.
    if state.layout.len() != rows.len() {
        return Vec::new();
    }

    let selected = match side {
        Side::Left => &state.selected_left,
        Side::Right => &state.selected_right,
    };
    let focused = state.focus == side;
    let first_visible = state.scroll_line;
    let last_visible = state.scroll_line + height;

    let mut lines = Vec::with_capacity(height);
    for (i, row) in rows.iter().enumerate() {
        let slot = state.layout[i];
        if slot.first_line + slot.lines <= first_visible {
            continue;
        }
        if slot.first_line >= last_visible {
            break;
        }

        let wrapped = wrap_row_text(row, width);
        let is_cursor = i == state.cursor;
        let is_selected = selected.contains(&i);

        for j in 0..slot.lines {
            let doc_line = slot.first_line + j;
            if doc_line < first_visible || doc_line >= last_visible {
                continue;
            }
            let text = wrapped.get(j).cloned().unwrap_or_default();
            lines.push(style_row_line(row, text, j == 0, is_cursor && focused, is_selected));
        }
    }
    lines
}

/// Styles one display line of a row.
fn style_row_line(
    row: &AlignedRow,
    text: String,
    is_first: bool,
    is_cursor: bool,
    is_selected: bool,
) -> Line<'static> {
    let base = match row {
        AlignedRow::Heading { .. } => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        AlignedRow::EmptyHeading => Style::default().fg(Color::DarkGray),
        AlignedRow::Verse(_) => Style::default(),
        AlignedRow::EmptyVerse(_) => Style::default().fg(Color::DarkGray),
    };

    let style = if is_cursor {
        base.bg(Color::White).fg(Color::Black)
    } else if is_selected {
        base.bg(Color::DarkGray)
    } else {
        base
    };

    // Color the verse-number prefix of a verse's first line.
    if let (AlignedRow::Verse(record), true, false) = (row, is_first, is_cursor) {
        let prefix_len = format!("{}:{} ", record.chapter, record.verse).len();
        if text.len() >= prefix_len {
            let (number, rest) = text.split_at(prefix_len);
            return Line::from(vec![
                Span::styled(number.to_string(), style.fg(Color::Cyan)),
                Span::styled(rest.to_string(), style),
            ]);
        }
    }
    Line::from(Span::styled(text, style))
}

/// Panel title: translation plus the book under the cursor, in that
/// translation's own book naming.
fn panel_title(state: &AppState, side: Side, translation: &str) -> String {
    let book = state
        .view
        .as_ref()
        .and_then(|view| {
            let rows = match side {
                Side::Left => &view.rows1,
                Side::Right => &view.rows2,
            };
            current_book(rows, state.cursor)
        })
        .map(|book| translated_book_name(&book, translation).to_string());

    match book {
        Some(book) => format!(" {translation} · {book} "),
        None => format!(" {translation} "),
    }
}

/// The book of the nearest verse slot at or before the cursor.
fn current_book(rows: &[AlignedRow], cursor: usize) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let start = cursor.min(rows.len() - 1);
    rows[..=start]
        .iter()
        .rev()
        .chain(rows.get(start + 1..).unwrap_or_default().iter())
        .find_map(|row| row.reference().map(|r| r.book))
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let position_info = format!(
        "Row {}/{} | {} | {} vs {} ",
        state.cursor + 1,
        state.row_count().max(1),
        state.date.format("%b %-d"),
        state.translation1,
        state.translation2,
    );

    // Show warning or status message if present
    let message = state.status_message.as_deref().unwrap_or("? for help");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat(
                (area.width as usize).saturating_sub(left_len + position_info.chars().count()),
            ),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}

/// Renders the help overlay over the given area.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered_rect(area, 46, 18);
    let lines: Vec<Line> = [
        "j/k, arrows   move between rows",
        "Ctrl+d/u      half page down/up",
        "g/G           first/last row",
        "Tab, h/l      switch panel",
        "Space         select verse",
        "y             copy selection (printed on exit)",
        "Esc           clear selection",
        "b             toggle bold copy",
        "[ / ]         previous/next day",
        "1 / 2         cycle left/right translation",
        ":MM-DD        jump to date",
        ":q            quit",
        "",
        "press any key to close",
    ]
    .into_iter()
    .map(Line::from)
    .collect();

    let block = Block::default().borders(Borders::ALL).title(" Help ");
    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}

/// A centered rectangle of at most the given size within `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Renders a comparison as two plain-text columns (CLI mode).
pub fn render_comparison_text(
    view: &ComparisonView,
    translation1: &str,
    translation2: &str,
    width: usize,
) -> String {
    let column = ((width.saturating_sub(3)) / 2).max(MIN_TEXT_WIDTH);
    let layout = compute_layout(view, column);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<column$} │ {:<column$}\n",
        translation1, translation2
    ));
    out.push_str(&format!("{0} │ {0}\n", "─".repeat(column)));

    for (i, slot) in layout.iter().enumerate() {
        let left = wrap_row_text(&view.rows1[i], column);
        let right = wrap_row_text(&view.rows2[i], column);
        for j in 0..slot.lines {
            let l = left.get(j).map(String::as_str).unwrap_or("");
            let r = right.get(j).map(String::as_str).unwrap_or("");
            out.push_str(&format!("{l:<column$} │ {r:<column$}\n"));
        }
    }
    out
}

/// Renders a single translation's passage as plain text (CLI mode).
///
/// Verses are grouped under book headers; pericope headings are printed
/// above the verse that starts them, as in the daily reading view.
pub fn render_passage_text(passage: &Passage, width: usize) -> String {
    let width = width.max(MIN_TEXT_WIDTH);
    let mut out = String::new();
    let mut current_book = "";

    for record in &passage.verses {
        if record.book != current_book {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&record.book);
            out.push('\n');
            out.push_str(&"─".repeat(record.book.chars().count().min(width)));
            out.push('\n');
            current_book = &record.book;
        }

        let key = record.reference().heading_key();
        if let Some(heading) = passage.headings.get(&key) {
            let heading = strip_markup(heading);
            out.push('\n');
            for line in textwrap::wrap(heading.trim(), width) {
                out.push_str(&line);
                out.push('\n');
            }
        }

        let text = format!(
            "{}:{} {}",
            record.chapter,
            record.verse,
            strip_markup(&record.content).trim()
        );
        let options = textwrap::Options::new(width).subsequent_indent(CONTINUATION_INDENT);
        for line in textwrap::wrap(&text, options) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingsMap, VerseRecord, VerseRef};

    fn verse_row(chapter: u32, verse: u32, text: &str) -> AlignedRow {
        AlignedRow::Verse(VerseRecord::new("Genesis", chapter, verse, text))
    }

    #[test]
    fn test_wrap_row_text_heights() {
        let short = verse_row(1, 1, "In the beginning");
        assert_eq!(wrap_row_text(&short, 40).len(), 1);

        let long = verse_row(1, 1, "In the beginning God created the heavens and the earth");
        assert!(wrap_row_text(&long, 20).len() > 1);

        let empty_verse = AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 2));
        assert_eq!(wrap_row_text(&empty_verse, 40), vec!["1:2 —"]);

        assert_eq!(wrap_row_text(&AlignedRow::EmptyHeading, 40).len(), 1);
    }

    #[test]
    fn test_wrap_row_continuation_indent() {
        let long = verse_row(1, 1, "one two three four five six seven eight nine ten");
        let lines = wrap_row_text(&long, 16);
        assert!(lines.len() > 1);
        for line in &lines[1..] {
            assert!(line.starts_with(CONTINUATION_INDENT));
        }
    }

    #[test]
    fn test_compute_layout_takes_max_height() {
        let view = ComparisonView {
            rows1: vec![verse_row(1, 1, "short")],
            rows2: vec![verse_row(
                1,
                1,
                "a much longer rendering of the very same verse that wraps",
            )],
        };
        let layout = compute_layout(&view, 20);
        assert_eq!(layout.len(), 1);
        let expected = wrap_row_text(&view.rows2[0], 20).len();
        assert_eq!(layout[0].lines, expected);
        assert_eq!(layout[0].first_line, 0);
    }

    #[test]
    fn test_compute_layout_accumulates_lines() {
        let view = ComparisonView {
            rows1: vec![
                AlignedRow::Heading { content: "Creation".into() },
                verse_row(1, 1, "In the beginning"),
            ],
            rows2: vec![AlignedRow::EmptyHeading, verse_row(1, 1, "Pada mulanya")],
        };
        let layout = compute_layout(&view, 40);
        assert_eq!(layout[0].first_line, 0);
        assert_eq!(layout[1].first_line, layout[0].lines);
    }

    #[test]
    fn test_render_comparison_text_columns() {
        let view = ComparisonView {
            rows1: vec![
                verse_row(1, 1, "In the beginning"),
                verse_row(1, 2, "The earth was without form"),
            ],
            rows2: vec![
                verse_row(1, 1, "Pada mulanya"),
                AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 2)),
            ],
        };
        let text = render_comparison_text(&view, "ESV", "TB", 80);

        assert!(text.starts_with("ESV"));
        assert!(text.contains("TB"));
        assert!(text.contains("1:1 In the beginning"));
        assert!(text.contains("1:2 —"));
        // Every line has the column separator in the same position.
        let column = (80 - 3) / 2;
        for line in text.lines() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(chars[column], ' ');
            assert_eq!(chars[column + 1], '│');
            assert_eq!(chars[column + 2], ' ');
        }
    }

    #[test]
    fn test_render_passage_text_groups_by_book() {
        let mut headings = HeadingsMap::new();
        headings.insert("Genesis 1:1".to_string(), "<b>Creation</b>".to_string());
        let passage = Passage::new(
            vec![
                VerseRecord::new("Genesis", 1, 1, "In the beginning"),
                VerseRecord::new("Matthew", 1, 1, "The book of the genealogy"),
            ],
            headings,
        );
        let text = render_passage_text(&passage, 60);

        assert!(text.contains("Genesis\n"));
        assert!(text.contains("Matthew\n"));
        assert!(text.contains("Creation\n"));
        assert!(!text.contains("<b>"));
        let genesis_pos = text.find("Genesis").unwrap();
        let matthew_pos = text.find("Matthew").unwrap();
        assert!(genesis_pos < matthew_pos);
    }

    #[test]
    fn test_calculate_visible_dimensions() {
        let (lines, text_width) = calculate_visible_dimensions(120, 40);
        // 40 - 1 (status) - 2 (borders) = 37 lines
        assert_eq!(lines, 37);
        // 120 / 2 - 2 (borders) = 58 columns
        assert_eq!(text_width, 58);
    }
}
