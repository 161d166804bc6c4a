//! Configuration management for the OCR server

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jobs: JobsConfig,
    pub upload: UploadConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct JobsConfig {
    /// Maximum number of recognition jobs in flight at once
    pub max_parallel: usize,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Hard cap on the request body; oversized uploads are rejected
    /// before staging begins
    pub max_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Command invoked as `<command> --lang=<locale> <image>`
    pub command: String,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5174,
            },
            jobs: JobsConfig {
                max_parallel: default_parallelism(),
            },
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            engine: EngineConfig {
                command: "run_ocr".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            jobs: JobsConfig {
                max_parallel: env::var("MAX_PARALLEL_JOBS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.jobs.max_parallel),
            },
            upload: UploadConfig {
                max_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.upload.max_bytes),
            },
            engine: EngineConfig {
                command: env::var("OCR_ENGINE_CMD").unwrap_or(defaults.engine.command),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();

        assert_eq!(config.server.port, 5174);
        assert!(config.jobs.max_parallel >= 1);
        assert_eq!(config.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.engine.command, "run_ocr");
    }
}
