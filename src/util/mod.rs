
//! Small helpers with no knowledge of the expression language.

pub mod grid;
pub mod numeric;
pub mod stricteq;
