use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use tracing::{debug, warn};

use crate::error::ExportError;
use crate::pipeline::{RenderProgress, RenderStage};
use crate::styles::PageOptions;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One HTML → PDF job.
pub struct RenderJob<'a> {
    pub html: &'a str,
    pub page: &'a PageOptions,
    /// Where the PDF must be written. The renderer owns nothing else.
    pub dest: &'a Path,
    pub progress: &'a RenderProgress,
}

/// The heavyweight layout/rasterization engine.
///
/// Implementations must release whatever they acquire (processes, temp
/// files) on every exit path, including errors and timeouts. A failure is
/// reported as [`ExportError::RenderFailure`] or
/// [`ExportError::RenderTimeout`]; the caller does not retry.
///
/// Methods return boxed futures for dyn compatibility.
pub trait DocumentRenderer: Send + Sync {
    fn render_to_file<'a>(&'a self, job: RenderJob<'a>) -> BoxFuture<'a, Result<(), ExportError>>;
}

/// Headless Chromium driven through its print-to-PDF command line.
///
/// One browser process per render, killed when the render future is
/// dropped (timeout or cancellation) and reaped on normal exit.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.extra_args.extend(args);
        self
    }

    /// Full argument list for one job, input URL last.
    pub fn command_args(&self, page: &PageOptions, dest: &Path, source_url: &str) -> Vec<String> {
        let mut args = vec![
            "--headless=new".to_string(),
            "--no-sandbox".to_string(),
            "--disable-setuid-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            format!("--window-size={},{}", page.viewport_width, page.viewport_height),
            format!("--virtual-time-budget={}", page.settle_delay_ms),
            "--run-all-compositor-stages-before-draw".to_string(),
            format!("--print-to-pdf={}", dest.display()),
        ];
        if !page.display_header_footer {
            args.push("--no-pdf-header-footer".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args.push(source_url.to_string());
        args
    }

    async fn render(&self, job: RenderJob<'_>) -> Result<(), ExportError> {
        // The browser loads the document from disk so relative resources and
        // fonts resolve the same way as in a normal page load.
        let mut source = tempfile::Builder::new()
            .prefix("healthpro-report-")
            .suffix(".html")
            .tempfile()
            .map_err(|e| ExportError::RenderFailure(format!("failed to stage HTML: {e}")))?;
        source
            .write_all(job.html.as_bytes())
            .and_then(|()| source.flush())
            .map_err(|e| ExportError::RenderFailure(format!("failed to stage HTML: {e}")))?;
        let url = format!("file://{}", source.path().display());

        let args = self.command_args(job.page, job.dest, &url);
        debug!(binary = %self.binary.display(), ?args, "launching renderer");

        let child = tokio::process::Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExportError::RenderFailure(format!("failed to launch {}: {e}", self.binary.display()))
            })?;
        job.progress.advance(RenderStage::AwaitingLayout);

        let output = match tokio::time::timeout(job.page.timeout(), child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| ExportError::RenderFailure(format!("renderer I/O: {e}")))?,
            Err(_) => {
                warn!(timeout_secs = job.page.timeout_secs, "renderer timed out, killing process");
                return Err(ExportError::RenderTimeout {
                    seconds: job.page.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::RenderFailure(format!(
                "renderer exited with {}: {}",
                output.status,
                tail(&stderr, 512)
            )));
        }

        job.progress.advance(RenderStage::Paginating);
        let written = match tokio::fs::metadata(job.dest).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                return Err(ExportError::RenderFailure(format!("renderer output unreadable: {e}")));
            }
        };
        if written == 0 {
            return Err(ExportError::RenderFailure("renderer produced no output".to_string()));
        }
        Ok(())
    }
}

impl DocumentRenderer for ChromiumRenderer {
    fn render_to_file<'a>(&'a self, job: RenderJob<'a>) -> BoxFuture<'a, Result<(), ExportError>> {
        Box::pin(self.render(job))
    }
}

fn tail(s: &str, max: usize) -> &str {
    let s = s.trim();
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
