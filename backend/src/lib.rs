//! # FloatChat Backend
//!
//! Conversational explorer for synthetic ARGO ocean-float data.
//!
//! The crate generates reproducible float catalogs per ocean region, filters
//! them with a declarative [`models::FilterSpec`], classifies free-text
//! queries into filters and plot choices, aggregates and exports the result,
//! and keeps chat conversations in a file-locked JSON history. An axum server
//! exposes all of it as a REST API.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Regions, float records, filter specifications
//! - [`services`]: Catalog generation, classification, summaries, plots, chat answers
//! - [`transformations`]: Filter engine over float records
//! - [`chat`]: Conversation store, history persistence, completion providers
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types

// FloatChatError carries provider and I/O errors inline
#![allow(clippy::result_large_err)]

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;

pub mod routes;

pub mod services;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{FloatChatError, FloatChatResult};
