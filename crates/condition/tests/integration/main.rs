//! Integration tests for formtype-condition
//!
//! Conditions wired to managers and connections the way a form host
//! would: managers built from configuration, connections shared between
//! rules and updated in place.

mod form;
mod host;
