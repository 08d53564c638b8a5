//! Validation of step arguments using Stillwater's `Validation`.
//!
//! Compound creators check their arguments once, when they are built, and
//! independently of any robot state. Rules accumulate every violation
//! instead of stopping at the first, so a caller sees the whole list at
//! once.
//!
//! # Example
//!
//! ```rust
//! use stepgen::compound::TransferArgs;
//! use stepgen::validation::ValidateArgs;
//!
//! let args = TransferArgs::new(
//!     "p300",
//!     "source",
//!     vec!["A1".to_string(), "A2".to_string()],
//!     "dest",
//!     vec!["B1".to_string()],
//!     0.0,
//! );
//!
//! // Mismatched well counts and a zero volume are both reported
//! assert!(args.validate().is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{ArgumentCheck, ValidateArgs};
pub use violations::ArgumentViolation;
