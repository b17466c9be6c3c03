//! Case-file math mysteries.
//!
//! Content documents are validated by [`schema`] into typed [`case::Case`]
//! and [`puzzle::Puzzle`] values, answers are judged by [`grade`], and
//! [`quip`] supplies seeded flavor text and card decks. Loading a content
//! directory, configuration and the progress snapshot sit around that core.
pub mod case;
pub mod cli;
pub mod config;
pub mod content;
pub mod grade;
pub mod progress;
pub mod puzzle;
pub mod quip;
pub mod schema;
pub mod workflow;
