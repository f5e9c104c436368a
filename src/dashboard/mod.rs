//! Dashboard UI Module
//!
//! Form-based surface over the extraction pipeline and the record store:
//! an extraction view (upload, preview, save) and a modification view
//! (edit and delete stored cards).

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::DashboardApp;
pub use state::{DashboardState, DashboardView};
