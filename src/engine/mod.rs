//! Engine invocation
//!
//! The recognition engine is an opaque black box behind the
//! [`EngineInvoker`] trait: given a staged image path and an
//! engine-facing locale code, it produces one JSON value or fails.
//! [`ProcessInvoker`] is the out-of-process variant; an in-process
//! library binding would implement the same trait.

pub mod process;

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

pub use process::ProcessInvoker;

/// Engine invocation failures, all reported to the client as 5xx
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to run OCR engine: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("OCR engine exited with {status}: {stderr}")]
    Exit {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("OCR engine produced invalid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

/// Pluggable boundary to the recognition engine.
///
/// Implementations must be safe under concurrent calls; the process
/// variant gets this for free by spawning a fresh child per call.
#[async_trait]
pub trait EngineInvoker: Send + Sync {
    /// Recognize text in the image at `image` using the engine locale
    /// `locale`, returning the engine's raw JSON output.
    async fn recognize(&self, image: &Path, locale: &str) -> Result<Value, EngineError>;
}
