//! Headless Chrome session management

use crate::error::{AppError, Result};
use crate::runner::{BrowserLauncher, BrowserSession};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::{sleep, Instant};

/// Browser binaries probed, in order, when no explicit path is configured
const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// How a browser session should be launched
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Remote-debugging port the session must listen on
    pub port: u16,
    /// Explicit browser binary; well-known names are probed when unset
    pub chrome_path: Option<PathBuf>,
    /// Maximum time to wait for the DevTools endpoint to come up
    pub startup_timeout: Duration,
}

impl LaunchOptions {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            chrome_path: None,
            startup_timeout: Duration::from_secs(15),
        }
    }

    pub fn with_chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }
}

/// Launches headless Chrome and waits for its DevTools endpoint
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    http: reqwest::Client,
}

impl ChromeLauncher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .map_err(|e| AppError::browser(format!("failed to build readiness probe client: {}", e)))?;
        Ok(Self { http })
    }

    fn spawn(&self, binary: &str, options: &LaunchOptions) -> std::io::Result<Child> {
        let user_data_dir =
            std::env::temp_dir().join(format!("pagebench-chrome-{}", options.port));

        Command::new(binary)
            .arg("--headless=new")
            .arg(format!("--remote-debugging-port={}", options.port))
            .arg(format!("--user-data-dir={}", user_data_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-gpu")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
    }

    /// Poll the DevTools version endpoint until the session answers
    async fn wait_until_ready(&self, port: u16, startup_timeout: Duration) -> Result<()> {
        let endpoint = format!("http://127.0.0.1:{}/json/version", port);
        let deadline = Instant::now() + startup_timeout;

        loop {
            match self.http.get(&endpoint).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                _ if Instant::now() >= deadline => {
                    return Err(AppError::browser(format!(
                        "DevTools endpoint on port {} not ready within {}s",
                        port,
                        startup_timeout.as_secs()
                    )));
                }
                _ => sleep(Duration::from_millis(200)).await,
            }
        }
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>> {
        let candidates: Vec<String> = match &options.chrome_path {
            Some(path) => vec![path.display().to_string()],
            None => CHROME_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        };

        let mut child = None;
        let mut last_error = None;
        for binary in &candidates {
            match self.spawn(binary, options) {
                Ok(spawned) => {
                    child = Some(spawned);
                    break;
                }
                Err(e) => last_error = Some(format!("{}: {}", binary, e)),
            }
        }

        let child = child.ok_or_else(|| {
            AppError::browser(format!(
                "no browser binary could be started ({})",
                last_error.unwrap_or_else(|| "no candidates".to_string())
            ))
        })?;

        let mut session = ChromeSession {
            child,
            port: options.port,
            killed: false,
        };

        if let Err(e) = self.wait_until_ready(options.port, options.startup_timeout).await {
            // The half-started process must not outlive the failed launch
            let _ = session.kill().await;
            return Err(e);
        }

        Ok(Box::new(session))
    }
}

/// A running headless Chrome process bound to a debugging port
#[derive(Debug)]
pub struct ChromeSession {
    child: Child,
    port: u16,
    killed: bool,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    fn port(&self) -> u16 {
        self.port
    }

    async fn kill(&mut self) -> Result<()> {
        if self.killed {
            return Ok(());
        }
        self.killed = true;

        self.child
            .kill()
            .await
            .map_err(|e| AppError::browser(format!("failed to kill browser session: {}", e)))?;
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Fallback only; the pipelines kill explicitly on every exit path
        if !self.killed {
            let _ = self.child.start_kill();
        }
    }
}
