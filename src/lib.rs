//! Macrolog Library
//!
//! Core functionality for food logging and nutrition tracking.

pub mod build_info;
pub mod db;
pub mod fdc;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
