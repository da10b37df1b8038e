//! Data model for the reading viewer.
//!
//! This module contains all data structures for representing:
//! - Verse references, verse records, and fetched passages
//! - Aligned comparison rows
//! - Viewport state (shared scroll, cursor, selection)
//! - Application state
//!
//! The comparison types mirror the engine contract: two equal-length row
//! sequences where index `i` on both sides is the same logical position.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::books::{self, BookOrder, BIBLE_VERSIONS};
use crate::selection::{self, SelectedVerse};

/// Identifies a single verse: book, chapter, and verse number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseRef {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    /// Creates a new reference.
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Returns the key used by heading maps: `"{book} {chapter}:{verse}"`.
    pub fn heading_key(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }

    /// Orders two references.
    ///
    /// Within one book the comparison is numeric on `(chapter, verse)`.
    /// Across books it consults the given order table. Without a table, or
    /// when either book is missing from it, this side is treated as earlier.
    /// That fallback is a deliberate, documented heuristic — callers that
    /// care about cross-book order must supply a table covering their books.
    pub fn cmp_with(&self, other: &VerseRef, order: Option<&BookOrder>) -> Ordering {
        if self.book == other.book {
            (self.chapter, self.verse).cmp(&(other.chapter, other.verse))
        } else {
            match order.and_then(|o| Some((o.rank(&self.book)?, o.rank(&other.book)?))) {
                Some((a, b)) => a.cmp(&b),
                None => Ordering::Less,
            }
        }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Accepts a JSON number or a numeric string.
///
/// The verse API is loose about numeric fields; chapter and verse numbers
/// arrive as either kind depending on the translation.
pub(crate) fn de_flexible_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u32),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A single fetched verse. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerseRecord {
    pub book: String,
    #[serde(deserialize_with = "de_flexible_u32")]
    pub chapter: u32,
    #[serde(deserialize_with = "de_flexible_u32")]
    pub verse: u32,
    /// Verse text; may contain inline markup.
    pub content: String,
}

impl VerseRecord {
    /// Creates a new record.
    pub fn new(
        book: impl Into<String>,
        chapter: u32,
        verse: u32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
            content: content.into(),
        }
    }

    /// Returns this record's reference.
    pub fn reference(&self) -> VerseRef {
        VerseRef::new(self.book.clone(), self.chapter, self.verse)
    }
}

/// Pericope headings keyed by `"{book} {chapter}:{verse}"` of the verse that
/// starts the pericope. Values may contain inline markup.
pub type HeadingsMap = HashMap<String, String>;

/// One translation's fetched data for a day: ordered verses plus headings.
///
/// Verses are kept in the order the API returned them, which is assumed
/// canonical per-book sequential order.
#[derive(Debug, Clone, Default)]
pub struct Passage {
    pub verses: Vec<VerseRecord>,
    pub headings: HeadingsMap,
}

impl Passage {
    /// Creates a passage from verses and a headings map.
    pub fn new(verses: Vec<VerseRecord>, headings: HeadingsMap) -> Self {
        Self { verses, headings }
    }
}

/// One row of an aligned comparison side.
///
/// The engine guarantees that row `i` on both sides is the same logical
/// position: heading slots face heading slots, verse slots face verse slots
/// at the same reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignedRow {
    /// A pericope heading present on this side.
    Heading { content: String },
    /// The other side has a heading at this position, this side does not.
    EmptyHeading,
    /// A verse present on this side.
    Verse(VerseRecord),
    /// The other side has a verse at this reference, this side does not.
    /// Carries the reference for context; never any content.
    EmptyVerse(VerseRef),
}

impl AlignedRow {
    /// True for `Heading` and `EmptyHeading` rows.
    pub fn is_heading_slot(&self) -> bool {
        matches!(self, AlignedRow::Heading { .. } | AlignedRow::EmptyHeading)
    }

    /// True for `Verse` and `EmptyVerse` rows.
    pub fn is_verse_slot(&self) -> bool {
        !self.is_heading_slot()
    }

    /// Returns the verse record for a present verse row.
    pub fn as_verse(&self) -> Option<&VerseRecord> {
        match self {
            AlignedRow::Verse(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the reference a verse slot stands for.
    pub fn reference(&self) -> Option<VerseRef> {
        match self {
            AlignedRow::Verse(record) => Some(record.reference()),
            AlignedRow::EmptyVerse(reference) => Some(reference.clone()),
            _ => None,
        }
    }
}

/// Removes inline markup from verse or heading content for terminal display.
///
/// Tags are dropped; the handful of entities the API emits are decoded.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    if out.contains('&') {
        out = out
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");
    }
    out
}

/// A loaded, aligned comparison of two translations.
///
/// `rows1.len() == rows2.len()` by construction of the alignment engine.
#[derive(Debug, Clone)]
pub struct ComparisonView {
    pub rows1: Vec<AlignedRow>,
    pub rows2: Vec<AlignedRow>,
}

impl ComparisonView {
    /// Number of aligned row pairs.
    pub fn row_count(&self) -> usize {
        self.rows1.len()
    }
}

/// Which comparison panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Layout of one aligned row pair on screen.
///
/// Both panels give a row pair the same number of lines (the taller of the
/// two wrapped heights), so a shared scroll offset keeps them in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// First line this row occupies in the virtual document.
    pub first_line: usize,
    /// Number of lines the row occupies (≥ 1).
    pub lines: usize,
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// Displayed reading-plan date
    pub date: NaiveDate,
    /// Left panel translation
    pub translation1: String,
    /// Right panel translation
    pub translation2: String,
    /// Loaded comparison, if the last load succeeded
    pub view: Option<ComparisonView>,
    /// Visible error from the last failed load
    pub error: Option<String>,
    /// Per-row layout for the current panel width
    pub layout: Vec<RowLayout>,
    /// Total virtual document height in lines
    pub total_lines: usize,
    /// First visible line (shared by both panels)
    pub scroll_line: usize,
    /// Visible content height in lines
    pub visible_lines: usize,
    /// Current row index
    pub cursor: usize,
    /// Focused panel
    pub focus: Side,
    /// Selected verse rows in the left panel
    pub selected_left: BTreeSet<usize>,
    /// Selected verse rows in the right panel
    pub selected_right: BTreeSet<usize>,
    /// Whether copied text uses Unicode-bold headers and verse numbers
    pub bold_copy: bool,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Set when a date or version change requires refetching
    pub needs_reload: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Copy text staged for printing after the terminal is restored
    pub pending_copy: Option<String>,
}

impl AppState {
    /// Creates a new application state for a date and translation pair.
    pub fn new(
        date: NaiveDate,
        translation1: impl Into<String>,
        translation2: impl Into<String>,
    ) -> Self {
        Self {
            date,
            translation1: translation1.into(),
            translation2: translation2.into(),
            view: None,
            error: None,
            layout: Vec::new(),
            total_lines: 0,
            scroll_line: 0,
            visible_lines: 0,
            cursor: 0,
            focus: Side::Left,
            selected_left: BTreeSet::new(),
            selected_right: BTreeSet::new(),
            bold_copy: false,
            mode: AppMode::Normal,
            show_help: false,
            should_quit: false,
            needs_reload: false,
            status_message: None,
            pending_copy: None,
        }
    }

    /// Installs a freshly loaded comparison, resetting viewport and selection.
    pub fn set_view(&mut self, view: ComparisonView) {
        self.view = Some(view);
        self.error = None;
        self.layout.clear();
        self.total_lines = 0;
        self.scroll_line = 0;
        self.cursor = 0;
        self.selected_left.clear();
        self.selected_right.clear();
    }

    /// Enters the visible error state (failed verses fetch, missing readings).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.view = None;
        self.layout.clear();
        self.total_lines = 0;
        self.scroll_line = 0;
        self.cursor = 0;
        self.selected_left.clear();
        self.selected_right.clear();
    }

    /// Installs the row layout computed for the current panel width.
    pub fn set_layout(&mut self, layout: Vec<RowLayout>) {
        self.total_lines = layout.last().map(|l| l.first_line + l.lines).unwrap_or(0);
        self.layout = layout;
        self.clamp_scroll();
        self.ensure_cursor_visible();
    }

    /// Number of aligned row pairs in the current view.
    pub fn row_count(&self) -> usize {
        self.view.as_ref().map(ComparisonView::row_count).unwrap_or(0)
    }

    /// Updates the viewport height based on terminal dimensions.
    pub fn update_viewport_size(&mut self, visible_lines: usize) {
        self.visible_lines = visible_lines;
        self.clamp_scroll();
        self.ensure_cursor_visible();
    }

    /// Moves the cursor up by one row.
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor down by one row.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.row_count() {
            self.cursor += 1;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the cursor to the first row.
    pub fn goto_top(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    /// Moves the cursor to the last row.
    pub fn goto_bottom(&mut self) {
        self.cursor = self.row_count().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Scrolls down by half a viewport.
    pub fn half_page_down(&mut self) {
        self.scroll_by(self.visible_lines as isize / 2);
    }

    /// Scrolls up by half a viewport.
    pub fn half_page_up(&mut self) {
        self.scroll_by(-(self.visible_lines as isize / 2));
    }

    /// Scrolls down by a full viewport.
    pub fn page_down(&mut self) {
        self.scroll_by(self.visible_lines as isize);
    }

    /// Scrolls up by a full viewport.
    pub fn page_up(&mut self) {
        self.scroll_by(-(self.visible_lines as isize));
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_line as isize + delta;
        self.scroll_line = target.max(0) as usize;
        self.clamp_scroll();
        self.snap_cursor_into_view();
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.total_lines.saturating_sub(self.visible_lines);
        self.scroll_line = self.scroll_line.min(max_scroll);
    }

    /// Index of the row occupying the given document line.
    fn row_at_line(&self, line: usize) -> usize {
        let idx = self
            .layout
            .partition_point(|l| l.first_line + l.lines <= line);
        idx.min(self.layout.len().saturating_sub(1))
    }

    /// Keeps the cursor's row inside the visible line range.
    fn ensure_cursor_visible(&mut self) {
        let Some(row) = self.layout.get(self.cursor).copied() else {
            return;
        };
        if row.first_line < self.scroll_line {
            self.scroll_line = row.first_line;
        } else {
            let bottom = row.first_line + row.lines;
            if bottom > self.scroll_line + self.visible_lines {
                self.scroll_line = bottom.saturating_sub(self.visible_lines);
            }
        }
        self.clamp_scroll();
    }

    /// After a scroll, pulls the cursor back into the visible range.
    fn snap_cursor_into_view(&mut self) {
        let Some(row) = self.layout.get(self.cursor).copied() else {
            return;
        };
        if row.first_line + row.lines <= self.scroll_line {
            self.cursor = self.row_at_line(self.scroll_line);
        } else if row.first_line >= self.scroll_line + self.visible_lines {
            let last_visible = (self.scroll_line + self.visible_lines).saturating_sub(1);
            self.cursor = self.row_at_line(last_visible);
        }
    }

    /// Switches keyboard focus to the other panel.
    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
    }

    /// Toggles selection of the cursor row on the focused panel.
    ///
    /// Only present verses are selectable; placeholders carry no content.
    pub fn toggle_select(&mut self) {
        let Some(view) = &self.view else { return };
        let rows = match self.focus {
            Side::Left => &view.rows1,
            Side::Right => &view.rows2,
        };
        if rows.get(self.cursor).map(|r| r.as_verse().is_some()) != Some(true) {
            return;
        }
        let selected = match self.focus {
            Side::Left => &mut self.selected_left,
            Side::Right => &mut self.selected_right,
        };
        if !selected.remove(&self.cursor) {
            selected.insert(self.cursor);
        }
        let count = self.selected_left.len() + self.selected_right.len();
        self.status_message = if count > 0 {
            Some(format!(
                "{count} verse{} selected",
                if count == 1 { "" } else { "s" }
            ))
        } else {
            None
        };
    }

    /// Clears the selection on both panels.
    pub fn clear_selection(&mut self) {
        self.selected_left.clear();
        self.selected_right.clear();
    }

    /// Toggles Unicode-bold copy formatting.
    pub fn toggle_bold_copy(&mut self) {
        self.bold_copy = !self.bold_copy;
        self.status_message = Some(format!(
            "Bold copy {}",
            if self.bold_copy { "on" } else { "off" }
        ));
    }

    /// Collects selected verses in visual order: left panel first, then right.
    pub fn selected_verses(&self) -> Vec<SelectedVerse> {
        let Some(view) = &self.view else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let sides = [
            (&self.selected_left, &view.rows1, &self.translation1),
            (&self.selected_right, &view.rows2, &self.translation2),
        ];
        for (selected, rows, version) in sides {
            for &row in selected {
                if let Some(record) = rows.get(row).and_then(AlignedRow::as_verse) {
                    out.push(SelectedVerse {
                        version: version.clone(),
                        book: books::translated_book_name(&record.book, version).to_string(),
                        chapter: record.chapter,
                        verse: record.verse,
                        text: strip_markup(&record.content).trim().to_string(),
                    });
                }
            }
        }
        out
    }

    /// Formats the current selection and stages it for printing on exit.
    pub fn yank_selection(&mut self) {
        let verses = self.selected_verses();
        if verses.is_empty() {
            self.status_message = Some("Nothing selected".to_string());
            return;
        }
        let count = verses.len();
        self.pending_copy = Some(selection::format_selection(&verses, self.bold_copy));
        self.status_message = Some(format!(
            "Copied {count} verse{} — printed on exit",
            if count == 1 { "" } else { "s" }
        ));
        self.clear_selection();
    }

    /// Moves to the next day and schedules a reload.
    pub fn next_day(&mut self) {
        if let Some(next) = self.date.succ_opt() {
            self.date = next;
            self.needs_reload = true;
        }
    }

    /// Moves to the previous day and schedules a reload.
    pub fn prev_day(&mut self) {
        if let Some(prev) = self.date.pred_opt() {
            self.date = prev;
            self.needs_reload = true;
        }
    }

    /// Cycles a panel's translation through the supported versions.
    pub fn cycle_version(&mut self, side: Side) {
        let current = match side {
            Side::Left => &self.translation1,
            Side::Right => &self.translation2,
        };
        let next = BIBLE_VERSIONS
            .iter()
            .position(|v| *v == current.as_str())
            .map(|i| BIBLE_VERSIONS[(i + 1) % BIBLE_VERSIONS.len()])
            .unwrap_or(BIBLE_VERSIONS[0]);
        match side {
            Side::Left => self.translation1 = next.to_string(),
            Side::Right => self.translation2 = next.to_string(),
        }
        self.needs_reload = true;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    ///
    /// - `:q` / `:quit` — quit
    /// - `:h` / `:help` — show the help overlay
    /// - `:MM-DD` — jump to a date in the current year
    pub fn execute_command(&mut self) {
        if let AppMode::Command(ref cmd) = self.mode.clone() {
            match cmd.as_str() {
                "q" | "quit" => self.should_quit = true,
                "h" | "help" => self.show_help = true,
                _ => {
                    if let Some(date) = parse_month_day(cmd, self.date.year()) {
                        self.date = date;
                        self.needs_reload = true;
                    } else {
                        self.status_message = Some(format!("Unknown command: {}", cmd));
                    }
                }
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Dismisses the help overlay.
    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }
}

/// Parses `"MM-DD"` into a date in the given year.
pub fn parse_month_day(input: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = input.split_once('-')?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()
    }

    #[test]
    fn test_reference_equality_and_key() {
        let a = VerseRef::new("Genesis", 1, 1);
        let b = VerseRef::new("Genesis", 1, 1);
        assert_eq!(a, b);
        assert_eq!(a.heading_key(), "Genesis 1:1");
        assert_ne!(a, VerseRef::new("Genesis", 1, 2));
    }

    #[test]
    fn test_reference_ordering_within_book() {
        let order = BookOrder::canonical();
        let a = VerseRef::new("Genesis", 1, 31);
        let b = VerseRef::new("Genesis", 2, 1);
        assert_eq!(a.cmp_with(&b, Some(&order)), Ordering::Less);
        assert_eq!(b.cmp_with(&a, Some(&order)), Ordering::Greater);
        assert_eq!(a.cmp_with(&a.clone(), None), Ordering::Equal);
    }

    #[test]
    fn test_reference_ordering_across_books() {
        let order = BookOrder::canonical();
        let matthew = VerseRef::new("Matthew", 1, 1);
        let genesis = VerseRef::new("Genesis", 50, 26);
        assert_eq!(genesis.cmp_with(&matthew, Some(&order)), Ordering::Less);
        assert_eq!(matthew.cmp_with(&genesis, Some(&order)), Ordering::Greater);
        // Without a table the receiver wins, whatever the books are.
        assert_eq!(matthew.cmp_with(&genesis, None), Ordering::Less);
        // Unknown book names also fall back.
        let unknown = VerseRef::new("Enoch", 1, 1);
        assert_eq!(unknown.cmp_with(&genesis, Some(&order)), Ordering::Less);
    }

    #[test]
    fn test_verse_record_lenient_numbers() {
        let json = r#"{"book":"Genesis","chapter":"1","verse":2,"content":"..."}"#;
        let record: VerseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chapter, 1);
        assert_eq!(record.verse, 2);
        assert_eq!(record.reference(), VerseRef::new("Genesis", 1, 2));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("<span class=\"wj\">said</span>"), "said");
        assert_eq!(strip_markup("a&nbsp;b &amp; c"), "a b & c");
    }

    #[test]
    fn test_aligned_row_slots() {
        let heading = AlignedRow::Heading {
            content: "Creation".into(),
        };
        let verse = AlignedRow::Verse(VerseRecord::new("Genesis", 1, 1, "In the beginning"));
        let empty = AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 2));
        assert!(heading.is_heading_slot());
        assert!(AlignedRow::EmptyHeading.is_heading_slot());
        assert!(verse.is_verse_slot());
        assert!(verse.as_verse().is_some());
        assert_eq!(empty.reference(), Some(VerseRef::new("Genesis", 1, 2)));
        assert_eq!(heading.reference(), None);
    }

    fn two_verse_view() -> ComparisonView {
        let rows: Vec<AlignedRow> = (1..=2)
            .map(|v| AlignedRow::Verse(VerseRecord::new("Genesis", 1, v, format!("v{v}"))))
            .collect();
        ComparisonView {
            rows1: rows.clone(),
            rows2: rows,
        }
    }

    #[test]
    fn test_cursor_movement_and_bounds() {
        let mut state = AppState::new(sample_date(), "ESV", "TB");
        state.set_view(two_verse_view());
        state.set_layout(vec![
            RowLayout { first_line: 0, lines: 2 },
            RowLayout { first_line: 2, lines: 3 },
        ]);
        state.update_viewport_size(3);

        assert_eq!(state.cursor, 0);
        state.move_up();
        assert_eq!(state.cursor, 0);
        state.move_down();
        assert_eq!(state.cursor, 1);
        // Row 1 spans lines 2..5; a 3-line viewport must scroll to line 2.
        assert_eq!(state.scroll_line, 2);
        state.move_down();
        assert_eq!(state.cursor, 1);
        state.move_up();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.scroll_line, 0);
    }

    #[test]
    fn test_selection_toggle_and_yank() {
        let mut state = AppState::new(sample_date(), "ESV", "TB");
        state.set_view(two_verse_view());
        state.set_layout(vec![
            RowLayout { first_line: 0, lines: 1 },
            RowLayout { first_line: 1, lines: 1 },
        ]);
        state.update_viewport_size(10);

        state.toggle_select();
        assert!(state.selected_left.contains(&0));
        state.switch_focus();
        state.toggle_select();
        assert!(state.selected_right.contains(&0));

        let verses = state.selected_verses();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].version, "ESV");
        assert_eq!(verses[1].version, "TB");

        state.yank_selection();
        assert!(state.pending_copy.is_some());
        assert!(state.selected_left.is_empty() && state.selected_right.is_empty());

        // Toggling twice deselects.
        state.focus = Side::Left;
        state.toggle_select();
        state.toggle_select();
        assert!(state.selected_left.is_empty());
    }

    #[test]
    fn test_placeholder_rows_not_selectable() {
        let mut state = AppState::new(sample_date(), "ESV", "TB");
        let rows1 = vec![AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 1))];
        let rows2 = vec![AlignedRow::Verse(VerseRecord::new("Genesis", 1, 1, "x"))];
        state.set_view(ComparisonView { rows1, rows2 });
        state.set_layout(vec![RowLayout { first_line: 0, lines: 1 }]);
        state.toggle_select();
        assert!(state.selected_left.is_empty());
        state.switch_focus();
        state.toggle_select();
        assert!(state.selected_right.contains(&0));
    }

    #[test]
    fn test_version_cycling() {
        let mut state = AppState::new(sample_date(), "ESV", "CUV");
        state.cycle_version(Side::Left);
        assert_eq!(state.translation1, "KJV");
        assert!(state.needs_reload);
        // CUV is last in the list; cycling wraps around.
        state.cycle_version(Side::Right);
        assert_eq!(state.translation2, "TB");
        // Unlisted versions restart at the beginning of the list.
        state.translation1 = "WEB".to_string();
        state.cycle_version(Side::Left);
        assert_eq!(state.translation1, "TB");
    }

    #[test]
    fn test_execute_command_date_jump() {
        let mut state = AppState::new(sample_date(), "ESV", "TB");
        state.enter_command_mode();
        for c in "12-25".chars() {
            state.command_input(c);
        }
        state.execute_command();
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        assert!(state.needs_reload);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn test_execute_command_unknown() {
        let mut state = AppState::new(sample_date(), "ESV", "TB");
        state.enter_command_mode();
        state.command_input('x');
        state.execute_command();
        assert_eq!(state.status_message.as_deref(), Some("Unknown command: x"));
        assert!(!state.should_quit);
    }

    #[test]
    fn test_parse_month_day() {
        assert_eq!(
            parse_month_day("02-29", 2024),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_month_day("02-29", 2025), None);
        assert_eq!(parse_month_day("13-01", 2025), None);
        assert_eq!(parse_month_day("junk", 2025), None);
    }
}
