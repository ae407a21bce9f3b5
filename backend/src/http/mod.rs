//! HTTP server module.
//!
//! This module provides an axum-based HTTP server that exposes the scheduler
//! and report renderer both as a server-rendered form and as a JSON API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Form / JSON parsing and validation                     │
//! │  - HTML page rendering, file downloads                    │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Scheduler (scheduler/)                                   │
//! │  - Appointment date arithmetic                            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - PDF and XLSX report encoding                           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

pub use router::{bind_listener, create_router};
pub use state::AppState;
