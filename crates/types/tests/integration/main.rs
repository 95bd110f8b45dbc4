//! Integration tests for formtype-types
//!
//! These tests exercise managers through the public surface only: the
//! prelude, the registry and configuration documents.

mod cultures;
mod registry;
mod round_trip;
mod scenarios;
