//! WSL interaction layer
//!
//! Handles all interactions with the wsl tool:
//! - Process execution (captured and detached)
//! - Listing parsing (online catalog, installed distros)
//! - Archive naming and discovery
//! - Operations (install, run, export, import, delete, relocate)

pub mod archive;
pub mod listing;
pub mod ops;
pub mod runner;

pub use archive::Archive;
pub use ops::{Confirmation, RelocateReport, Wsl};
pub use runner::WslCli;
