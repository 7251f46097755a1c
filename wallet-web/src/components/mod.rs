//! UI Components

pub mod navbar;
pub mod panels;

pub use navbar::Navbar;
pub use panels::{ErrorPanel, InfoPanel};
