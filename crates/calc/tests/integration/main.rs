//! Integration tests for formtype-calc
//!
//! Calculation trees over shared connections, combined with conditions
//! and managers from the other crates.

mod invoice;
mod properties;
