//! # lectio - Terminal Daily Bible Reader
//!
//! A terminal-based viewer for daily Bible readings with side-by-side
//! translation comparison, built on ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `model`: Data structures for references, verses, aligned rows, and
//!   application state
//! - `books`: Canonical book order and per-version book names
//! - `align`: The comparison alignment engine (two-pointer merge)
//! - `plan`: Yearly reading plan and day-of-year handling
//! - `api`: Verse API client (verses and pericope headings)
//! - `selection`: Verse selection formatting for copying
//! - `event`: Keyboard event handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui, plus plain-text renderers
//! - `controller`: Orchestration of loads and state transitions
//!
//! The alignment engine is the heart of the crate: given two independently
//! fetched passages it produces two equal-length, positionally aligned row
//! sequences, inserting placeholders where one side lacks a verse or
//! heading. Everything else feeds it or renders its output.

pub mod align;
pub mod api;
pub mod books;
pub mod controller;
pub mod event;
pub mod model;
pub mod plan;
pub mod selection;
pub mod ui;
