//! PDF rendering through an external `wkhtmltopdf` process.
//!
//! The HTML document is piped to the renderer's stdin and the PDF is read
//! back from its stdout. Every render spawns its own child process; the
//! child is killed if the render times out or the future is dropped.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Arguments that make `wkhtmltopdf` read HTML from stdin and write the PDF
/// to stdout.
pub const WKHTMLTOPDF_ARGS: &[&str] = &["--quiet", "--enable-local-file-access", "-", "-"];

/// Default wall-clock budget for a single render.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to spawn renderer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("renderer I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("renderer exited with code {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("renderer timed out after {0:?}")]
    Timeout(Duration),

    #[error("renderer produced no output")]
    EmptyOutput,
}

/// Turns a complete HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: String) -> Result<Vec<u8>, RenderError>;
}

/// [`PdfRenderer`] that shells out to a `wkhtmltopdf` binary.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    binary: String,
    args: Vec<String>,
    timeout: Duration,
}

impl WkhtmltopdfRenderer {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            args: WKHTMLTOPDF_ARGS.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// Replace the argument list passed to the binary.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for WkhtmltopdfRenderer {
    fn default() -> Self {
        Self::new("wkhtmltopdf", DEFAULT_RENDER_TIMEOUT)
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: String) -> Result<Vec<u8>, RenderError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(RenderError::Spawn)?;

        // Feed stdin from a separate task so a large document cannot deadlock
        // against a full stdout pipe.
        let stdin = child.stdin.take();
        let writer = tokio::spawn(async move {
            match stdin {
                Some(mut stdin) => {
                    stdin.write_all(html.as_bytes()).await?;
                    stdin.shutdown().await
                }
                None => Ok(()),
            }
        });

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout))?
            .map_err(RenderError::Io)?;

        let write_result = writer
            .await
            .unwrap_or_else(|e| Err(std::io::Error::other(e)));

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                binary = %self.binary,
                code = ?output.status.code(),
                %stderr,
                "PDF renderer failed",
            );
            return Err(RenderError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        write_result.map_err(RenderError::Io)?;

        tracing::debug!(bytes = output.stdout.len(), "PDF rendered");
        Ok(output.stdout)
    }
}
