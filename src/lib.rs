//! OCR Server Library
//!
//! HTTP front end for an external OCR engine. A request uploads an image
//! and a language code as multipart form data; the server stages the
//! image to a private temp directory, runs the engine behind a bounded
//! admission gate, and answers with the engine's JSON output wrapped in
//! a result envelope.
//!
//! # Modules
//!
//! - `gate`: admission control bounding concurrent recognition jobs
//! - `job`: per-request staging directory and timing
//! - `engine`: pluggable invoker for the external recognition engine
//! - `lang`: immutable user-code to engine-locale table
//! - `routes`: the HTTP surface

pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod job;
pub mod lang;
pub mod routes;
pub mod state;
