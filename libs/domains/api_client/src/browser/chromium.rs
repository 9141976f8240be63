use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tracing::{debug, trace, warn};

use super::{BrowserHandle, BrowserLauncher};
use crate::config::BrowserConfig;
use crate::error::{ApiClientError, ApiClientResult};

/// Executables tried in order when no explicit path is configured.
const CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

const DEVTOOLS_PREFIX: &str = "DevTools listening on ";

const DEFAULT_ARGS: &[&str] = &[
    "--headless=new",
    "--disable-gpu",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-extensions",
    "--remote-debugging-port=0",
];

/// Launches Chromium-family browsers as headless child processes.
pub struct ChromiumLauncher {
    config: BrowserConfig,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// The configured executable, or the first candidate found on `PATH`.
    pub fn resolve_executable(&self) -> ApiClientResult<PathBuf> {
        if let Some(path) = &self.config.executable {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(ApiClientError::Browser(format!(
                "browser executable not found: {}",
                path.display()
            )));
        }

        let path_var = std::env::var_os("PATH").unwrap_or_default();
        std::env::split_paths(&path_var)
            .flat_map(|dir| CANDIDATES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                ApiClientError::Browser(format!(
                    "no headless browser found on PATH (tried {})",
                    CANDIDATES.join(", ")
                ))
            })
    }

    fn profile_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "api-client-browser-{}-{}",
            std::process::id(),
            nanos
        ))
    }

    /// Read stderr until the DevTools endpoint is announced, then keep
    /// draining it in the background so the browser never blocks on a full pipe.
    async fn wait_for_devtools(stderr: ChildStderr) -> ApiClientResult<String> {
        let mut lines = BufReader::new(stderr).lines();

        while let Some(line) = lines.next_line().await? {
            trace!(line = %line, "browser stderr");
            if let Some(url) = line.strip_prefix(DEVTOOLS_PREFIX) {
                let url = url.trim().to_string();
                tokio::spawn(async move {
                    while let Ok(Some(line)) = lines.next_line().await {
                        trace!(line = %line, "browser stderr");
                    }
                });
                return Ok(url);
            }
        }

        Err(ApiClientError::Browser(
            "browser exited before announcing its DevTools endpoint".to_string(),
        ))
    }

    async fn spawn(&self, executable: &Path) -> ApiClientResult<ChromiumHandle> {
        let profile_dir = Self::profile_dir();

        let mut child = Command::new(executable)
            .args(DEFAULT_ARGS)
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .args(&self.config.extra_args)
            .arg("about:blank")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ApiClientError::Browser(format!(
                    "failed to start {}: {}",
                    executable.display(),
                    e
                ))
            })?;

        let stderr = child.stderr.take().ok_or_else(|| {
            ApiClientError::Browser("browser stderr was not captured".to_string())
        })?;

        let timeout = Duration::from_secs(self.config.launch_timeout_secs);
        let websocket_url = match tokio::time::timeout(timeout, Self::wait_for_devtools(stderr))
            .await
        {
            Ok(Ok(url)) => url,
            Ok(Err(err)) => {
                Self::abort(&mut child, &profile_dir).await;
                return Err(err);
            }
            Err(_) => {
                Self::abort(&mut child, &profile_dir).await;
                return Err(ApiClientError::Browser(format!(
                    "browser did not start within {}s",
                    self.config.launch_timeout_secs
                )));
            }
        };

        Ok(ChromiumHandle {
            child,
            websocket_url,
            profile_dir,
            closed: false,
        })
    }

    /// Tear down a browser that never became ready.
    async fn abort(child: &mut Child, profile_dir: &Path) {
        if let Err(e) = child.kill().await {
            warn!(error = %e, pid = child.id(), "Failed to kill browser after failed launch");
        }
        report_profile_removal(tokio::fs::remove_dir_all(profile_dir).await, profile_dir);
    }
}

fn report_profile_removal(result: std::io::Result<()>, path: &Path) {
    if let Err(e) = result {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove browser profile directory"
            );
        }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> ApiClientResult<Box<dyn BrowserHandle>> {
        let executable = self.resolve_executable()?;
        debug!(executable = %executable.display(), "Launching headless browser");

        let handle = self.spawn(&executable).await?;
        debug!(websocket_url = %handle.websocket_url(), "DevTools endpoint ready");
        Ok(Box::new(handle))
    }
}

/// A headless browser child process and its throwaway profile directory.
///
/// Dropping a handle that was never closed kills the process and removes the
/// profile directory synchronously.
pub struct ChromiumHandle {
    child: Child,
    websocket_url: String,
    profile_dir: PathBuf,
    closed: bool,
}

impl ChromiumHandle {
    /// DevTools websocket endpoint announced by the browser
    pub fn websocket_url(&self) -> &str {
        &self.websocket_url
    }
}

#[async_trait]
impl BrowserHandle for ChromiumHandle {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn close(&mut self) -> ApiClientResult<()> {
        if self.child.try_wait()?.is_none() {
            self.child.kill().await?;
        }
        self.closed = true;

        report_profile_removal(
            tokio::fs::remove_dir_all(&self.profile_dir).await,
            &self.profile_dir,
        );

        Ok(())
    }
}

impl Drop for ChromiumHandle {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        if let Err(e) = self.child.start_kill() {
            if e.kind() != std::io::ErrorKind::InvalidInput {
                warn!(error = %e, "Failed to kill dropped browser");
            }
        }
        // Reap so the profile directory is no longer in use.
        if let Err(e) = wait_briefly(&mut self.child) {
            debug!(error = %e, "Dropped browser did not exit in time");
        }
        report_profile_removal(std::fs::remove_dir_all(&self.profile_dir), &self.profile_dir);
    }
}

fn wait_briefly(child: &mut Child) -> std::io::Result<()> {
    for _ in 0..50 {
        if child.try_wait()?.is_some() {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "browser still running",
    ))
}
