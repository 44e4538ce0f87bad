//! Core of telegram-owl: attachment loading and Bot API request composition.
//!
//! This crate is transport-agnostic. File access and the HTTP boundary live behind
//! ports (traits) so the pipeline can be exercised with in-memory fakes; the
//! reqwest-backed implementation is in `owl-telegram`.

pub mod attachment;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod methods;
pub mod ports;
pub mod utils;

pub use errors::{Error, Result};
