//! User Interface layer for wslmate
//!
//! Contains all UI-related code:
//! - Theme definitions and colors
//! - Reusable widgets
//! - Main render loop with module routing

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use render::ModuleTab;
pub use theme::Theme;
