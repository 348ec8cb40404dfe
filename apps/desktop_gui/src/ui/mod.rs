//! UI layer for the desktop app: app shell and roster/signup panels.

pub mod app;

pub use app::SignupDeskApp;
