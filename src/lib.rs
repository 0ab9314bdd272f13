//! learncat library
//!
//! Fetches the Microsoft Learn catalog (or reuses a cached copy), normalizes
//! its collections into typed graph nodes and declares the id-based links
//! between them.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod graph;
pub mod logging;
pub mod pipeline;
pub mod refresh;
