//! Crew roster parsing server.
//!
//! Reads the text extracted from a crew duty roster, groups it into flight,
//! standby and rest duties, and resolves the airports those duties mention.

pub mod airports;
pub mod cache;
pub mod config;
pub mod domain;
pub mod parser;
pub mod web;
