//! Utilities.

pub mod bbox;
