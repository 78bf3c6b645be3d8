//! Train schedule dashboard.
//!
//! Polls a train feed, sorts upcoming arrivals into four fixed categories,
//! and serves them as an auto-scrolling web dashboard with a PDF export.

pub mod board;
pub mod config;
pub mod domain;
pub mod export;
pub mod feed;
pub mod web;
