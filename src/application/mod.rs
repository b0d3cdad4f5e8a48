//! # Application Layer
//!
//! Ports implemented by the connector layer and the chat use case that
//! orchestrates them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
