//! Textbook marketplace analytics over student listings, book metadata
//! and market prices.

pub mod cli;
pub mod config;
pub mod parsers;
pub mod services;
pub mod types;
