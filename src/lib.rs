
//! A symbolic algebra engine: immutable expression trees over
//! numbers, symbols, and linear algebra, with simplification,
//! differentiation, and pointwise evaluation.

pub mod error;
pub mod expr;
pub mod parsing;
pub mod util;

pub use error::Error;
