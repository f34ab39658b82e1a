//! Game implementations.

pub mod quarto;
