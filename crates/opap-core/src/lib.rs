//! OPAP Draws Client Core Library
//!
//! This crate fetches lottery draw results from the OPAP REST services
//! and decodes them into typed records.
//!
//! # Features
//! - Latest, by-number and by-date lookups for every numeric game
//! - The same three lookups for the Propo games, with string outcomes
//! - Injectable `reqwest::Client` transport and configurable base URL
//! - Raw request building and execution for advanced callers
//!
//! Every operation performs exactly one HTTP round trip. There is no
//! caching, retrying or rate limiting.

pub mod client;
pub mod draws;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, OpapClient, Response, DEFAULT_BASE_URL, DEFAULT_DRAWS_ENDPOINT};
pub use draws::DrawsService;
pub use error::{OpapError, Result};
pub use types::{Draw, Game, PropoDraw, PropoGame};
