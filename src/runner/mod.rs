//! Collaborator seams: the audit engine and the browser session
//!
//! The pipelines never talk to Lighthouse or Chrome directly; they go through
//! these traits so tests can substitute scripted collaborators.

pub mod browser;
pub mod lighthouse;

pub use browser::{ChromeLauncher, ChromeSession, LaunchOptions};
pub use lighthouse::LighthouseRunner;

use crate::error::Result;
use crate::models::report::AuditReport;
use crate::models::settings::AuditSettings;
use async_trait::async_trait;

/// Runs one audit for a URL under the given settings.
///
/// Implementations manage a single shared browser-automation port, so calls
/// must never overlap; the pipelines enforce this by awaiting each run before
/// starting the next.
#[async_trait]
pub trait AuditRunner: Send + Sync {
    async fn run(&self, url: &str, settings: &AuditSettings) -> Result<AuditReport>;
}

/// Launches a browser-automation session
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserSession>>;
}

/// A launched browser instance exposing its debugging port.
///
/// Must be killed exactly once, on every exit path; implementations back this
/// up with a best-effort kill on drop.
#[async_trait]
pub trait BrowserSession: Send + std::fmt::Debug {
    /// Debugging port the audit engine should attach to
    fn port(&self) -> u16;

    /// Terminate the browser process
    async fn kill(&mut self) -> Result<()>;
}
