//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Loading day data (concurrent per-translation fetches) and alignment
//! - State updates and rendering
//!
//! Loads are synchronous within the event-loop turn that requested them, so
//! a stale fetch can never race a newer one into the alignment step.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::align::align_passages;
use crate::api::{ApiResult, Client};
use crate::books::BookOrder;
use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::{AppState, ComparisonView, Passage};
use crate::plan::ReadingPlan;
use crate::ui::{calculate_visible_dimensions, compute_layout, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Verse API client
    client: Client,
    /// Yearly reading plan
    plan: ReadingPlan,
    /// Canonical book order for cross-book alignment
    book_order: BookOrder,
    /// Per-panel text width from the last layout pass
    text_width: usize,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state and collaborators.
    pub fn new(state: AppState, client: Client, plan: ReadingPlan) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            client,
            plan,
            book_order: BookOrder::canonical(),
            text_width: 0,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    ///
    /// Returns the copy text staged by the user, if any, so the caller can
    /// print it once the terminal is restored.
    pub fn run(&mut self) -> Result<Option<String>> {
        // Initial viewport setup and load
        self.update_viewport_size()?;
        self.load_current_day();

        loop {
            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.mode, self.state.show_help);

                // Handle resize specially to update viewport
                if let Action::Resize(_, _) = action {
                    self.update_viewport_size()?;
                }

                apply_action(&mut self.state, action);

                if self.state.needs_reload {
                    self.state.needs_reload = false;
                    self.load_current_day();
                }

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(self.state.pending_copy.take())
    }

    /// Updates the viewport size based on terminal dimensions, recomputing
    /// the row layout when the panel width changed.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (visible_lines, text_width) = calculate_visible_dimensions(size.width, size.height);
        if text_width != self.text_width {
            self.text_width = text_width;
            self.relayout();
        }
        self.state.update_viewport_size(visible_lines);
        Ok(())
    }

    /// Recomputes the shared row layout for the current view.
    fn relayout(&mut self) {
        if let Some(view) = &self.state.view {
            let layout = compute_layout(view, self.text_width);
            self.state.set_layout(layout);
        }
    }

    /// Loads and aligns the current date's readings for both translations.
    ///
    /// A missing plan entry or a failed verses fetch puts the state into
    /// its visible error condition instead of tearing the app down.
    fn load_current_day(&mut self) {
        let Some(verses_string) = self.plan.verses_string_for(self.state.date) else {
            self.state.set_error(format!(
                "No readings found for {}.",
                self.state.date.format("%B %-d")
            ));
            return;
        };

        let (passage1, passage2) = fetch_both(
            &self.client,
            &self.state.translation1,
            &self.state.translation2,
            &verses_string,
        );

        match (passage1, passage2) {
            (Ok(passage1), Ok(passage2)) => {
                let (rows1, rows2) =
                    align_passages(&passage1, &passage2, Some(&self.book_order));
                self.state.set_view(ComparisonView { rows1, rows2 });
                self.relayout();
                self.state.status_message = Some(verses_string);
            }
            (Err(error), _) => {
                self.state
                    .set_error(format!("{}: {error}", self.state.translation1));
            }
            (_, Err(error)) => {
                self.state
                    .set_error(format!("{}: {error}", self.state.translation2));
            }
        }
    }
}

/// Fetches both translations' day data concurrently and joins the results.
///
/// The two sides are independent fan-out requests; alignment only starts
/// once both are fully materialized.
pub fn fetch_both(
    client: &Client,
    translation1: &str,
    translation2: &str,
    verses_string: &str,
) -> (ApiResult<Passage>, ApiResult<Passage>) {
    std::thread::scope(|scope| {
        let handle = scope.spawn(|| client.fetch_day_data(translation2, verses_string));
        let result1 = client.fetch_day_data(translation1, verses_string);
        let result2 = match handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        (result1, result2)
    })
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the application to completion.
///
/// Returns the staged copy text, printed by the caller after the terminal
/// is restored.
pub fn run_app(state: AppState, client: Client, plan: ReadingPlan) -> Result<Option<String>> {
    let mut app = App::new(state, client, plan)?;
    app.run()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::model::AppState;

    #[test]
    fn test_app_state_creation() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let state = AppState::new(date, "ESV", "TB");

        assert_eq!(state.row_count(), 0);
        assert!(!state.should_quit);
        assert!(state.view.is_none());
        assert!(state.error.is_none());
    }
}
