#![deny(missing_docs)]

//! Core library for the grammar-notes batch annotator.

/// Chat-completion client that produces translation and grammar notes.
pub mod annotation;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Run counters.
pub mod metrics;
/// Segmentation, chunking, and file orchestration.
pub mod processing;
