//! shoplist library - terminal shopping lists on a Parse-compatible backend
//!
//! The binary is a thin shell over these modules; everything below is
//! exercised directly by the unit tests.

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod list_editor;
pub mod model;
pub mod notification;
pub mod session;
pub mod sidebar;
pub mod suggestions;
pub mod theme;
pub mod widgets;
pub mod worker;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use app::{App, Focus, Screen};
pub use config::Config;
