//! chatproxy sits between chat clients and a generative language model
//! provider and reports every exchange to an external quality-evaluation
//! service without delaying the user-visible reply.
//!
//! # Overview
//! Each `POST /chat` request is validated, forwarded to the model backend,
//! timed, and answered. After the answer is known, the exchange (prompt,
//! response, latency, model) is handed to the evaluation dispatcher on an
//! independent task; the reply path never waits for it and never observes
//! its outcome.
//!
//! # Architecture
//! The crate is organized into modules that map one-to-one onto the pieces
//! of that flow:

/// HTTP surface: router, handlers and wire-only response types
pub mod api;

/// Backend adapter for the generative model provider
pub mod backends;

/// Process configuration, loaded once at startup
pub mod config;

/// Error types and handling
pub mod error;

/// Fire-and-forget reporting to the evaluator service
pub mod evaluator;

/// Per-request chat orchestration
pub mod orchestrator;
