//! Command handlers for the binary. Each returns the text to print.

pub mod autocomplete;
pub mod currency;
pub mod setup;
pub mod ui;
pub mod variation;
