//! Out-of-process engine invoker
//!
//! Spawns the configured engine command once per job, matching the
//! original deployment shape (`run_ocr --lang=<locale> <image>`), and
//! parses its stdout as a single JSON value. Each call gets its own
//! child process, so concurrent jobs share no engine state.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use super::{EngineError, EngineInvoker};

/// Invoker that shells out to an external recognition command
pub struct ProcessInvoker {
    command: String,
}

impl ProcessInvoker {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl EngineInvoker for ProcessInvoker {
    async fn recognize(&self, image: &Path, locale: &str) -> Result<Value, EngineError> {
        tracing::debug!(
            command = %self.command,
            locale = %locale,
            image = %image.display(),
            "spawning OCR engine"
        );

        let output = Command::new(&self.command)
            .arg(format!("--lang={locale}"))
            .arg(image)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                command = %self.command,
                status = %output.status,
                stderr = %stderr,
                "OCR engine failed"
            );
            return Err(EngineError::Exit {
                status: output.status,
                stderr,
            });
        }

        let value = serde_json::from_slice(&output.stdout)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn fake_engine(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("engine.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_parsed_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_engine(dir.path(), r#"echo '[["hello", 0.99]]'"#);

        let invoker = ProcessInvoker::new(cmd.display().to_string());
        let value = invoker
            .recognize(Path::new("/dev/null"), "en")
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!([["hello", 0.99]]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn locale_and_image_are_passed_as_arguments() {
        let dir = tempfile::tempdir().unwrap();
        // Echoes its own arguments back as a JSON array
        let cmd = fake_engine(dir.path(), r#"printf '["%s", "%s"]' "$1" "$2""#);

        let invoker = ProcessInvoker::new(cmd.display().to_string());
        let value = invoker
            .recognize(Path::new("/tmp/image.png"), "german")
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!(["--lang=german", "/tmp/image.png"]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_engine(dir.path(), "echo 'model load failed' >&2\nexit 3");

        let invoker = ProcessInvoker::new(cmd.display().to_string());
        let err = invoker
            .recognize(Path::new("/dev/null"), "en")
            .await
            .unwrap_err();

        match err {
            EngineError::Exit { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "model load failed");
            }
            other => panic!("expected Exit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_stdout_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_engine(dir.path(), "echo 'not json at all'");

        let invoker = ProcessInvoker::new(cmd.display().to_string());
        let err = invoker
            .recognize(Path::new("/dev/null"), "en")
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn missing_command_is_a_spawn_error() {
        let invoker = ProcessInvoker::new("/nonexistent/run_ocr");
        let err = invoker
            .recognize(Path::new("/dev/null"), "en")
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Spawn(_)));
    }
}
