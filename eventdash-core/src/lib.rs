//! Core library for eventdash.
//!
//! - `client`: the events API (`EventClient`, `EventSource`)
//! - `categorize`: today / this week / upcoming buckets
//! - `board` and `detail`: list and detail view state
//! - `banner`: banner image checks and upload session

pub mod banner;
pub mod board;
pub mod categorize;
pub mod client;
pub mod config;
pub mod credential;
pub mod date_range;
pub mod detail;
pub mod error;
pub mod event;

pub use event::*;
