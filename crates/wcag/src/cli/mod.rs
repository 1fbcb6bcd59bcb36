//! CLI module for the WCAG checklist
//!
//! Every command opens the same checklist session the terminal UI uses, so
//! filtering, search and progress behave identically in both.

pub mod error;
pub mod output;

pub mod check;
pub mod config;
pub mod context;
pub mod progress;
pub mod report;
pub mod search;
pub mod theme;

pub mod tui;

