//! Terminal host for the Anything launcher.
//!
//! The binary drives `anything_core::Launcher` from a crossterm event loop.
//! This library half holds the pieces that do not touch the terminal: the
//! simulated window that turns pixel geometry into a screen rectangle, and
//! the mapping from terminal key events to the configured hotkey.

pub mod keymap;
pub mod window;
