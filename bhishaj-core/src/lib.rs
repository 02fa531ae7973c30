//! Core of the Bhishaj health assistant
//!
//! In-memory chat sessions with simulated replies, media attachment
//! plumbing, the mock X-ray analysis and the habits catalog. Nothing here
//! talks to a network or persists state.

pub mod chat;
pub mod config;
pub mod error;
pub mod habits;
pub mod logging;
pub mod media;
pub mod schedule;
pub mod utils;
pub mod xray;

pub use error::{Error, Result};
