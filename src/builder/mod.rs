//! Builder API for assembling the initial robot state.
//!
//! This module provides a fluent builder and a macro for setting up a deck
//! with minimal boilerplate while checking it for consistency.

pub mod error;
pub mod macros;
pub mod robot;

pub use error::BuildError;
pub use robot::RobotStateBuilder;
