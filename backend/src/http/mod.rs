//! HTTP server module for the FloatChat backend.
//!
//! An axum server exposing the catalog, classification and chat services as a
//! REST API, plus a Server-Sent Events endpoint for streamed provider replies.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Query/body parsing and validation                     │
//! │  - JSON, CSV and SSE responses                           │
//! │  - CORS, compression, error handling                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/, transformations/)              │
//! │  - Catalog generation and filtering                      │
//! │  - Classification, summaries, plots, chat answers        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Chat state (chat/)                                      │
//! │  - ConversationStore behind a RwLock                     │
//! │  - Locked JSON history file, completion provider         │
//! └──────────────────────────────────────────────────────────┘
//! ```

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
