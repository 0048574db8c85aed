//! Error types for parsing.
//!
//! This module defines the diagnostics produced while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for structural mismatches and bad literals
//! - Suggestions shown by the command line front end

pub mod errors;
