//! Reusable dashboard components

pub mod sidebar;

pub use sidebar::render_sidebar;
