//! Module system for wslmate
//!
//! One module per tab. Modules only hold selection and popup state and
//! turn key presses into [`crate::app::Action`]s; the app runs them.

pub mod archives;
pub mod distros;
pub mod install;
pub mod picker;
pub mod relocate;
pub mod settings;
