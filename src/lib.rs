//! Book reader server library.
//!
//! This library provides the core functionality for the book reader
//! backend: the local PDF library, the remote file registry, and the
//! streaming proxy for files held by the Telegram Bot API.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
