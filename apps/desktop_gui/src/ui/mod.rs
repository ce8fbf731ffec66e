//! UI layer for the desktop console: app shell and widgets.

pub mod app;
pub mod widgets;

pub use app::ConsoleApp;
