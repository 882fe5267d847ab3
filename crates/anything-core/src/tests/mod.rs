//! Scenario tests for anything-core
//!
//! The launcher is driven through a recording fake host bridge on a paused
//! tokio clock, covering:
//! - Debounce coalescing and stale-response discard
//! - Window geometry and recentering
//! - Keyboard/pointer navigation and the Escape policy
//! - Reset guard, focus handling and progress routing
//! - Settings view editing and persistence
//! - Lazy thumbnails
//! - Configuration loading and defaults

mod dispatcher_tests;
mod fixtures;
