//! Utility modules

pub mod commitment;
pub mod validation;
