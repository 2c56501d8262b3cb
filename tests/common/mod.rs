//! Shared scripted collaborators for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use pagebench::error::{AppError, Result};
use pagebench::models::{AuditReport, AuditSettings};
use pagebench::runner::{AuditRunner, BrowserLauncher, BrowserSession, LaunchOptions};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a minimal engine report with the given score and audit values
pub fn make_report(score: f64, audits: &[(&str, Option<f64>)]) -> AuditReport {
    let mut audit_map = serde_json::Map::new();
    for (id, value) in audits {
        let entry = match value {
            Some(v) => serde_json::json!({ "numericValue": v }),
            None => serde_json::json!({}),
        };
        audit_map.insert(id.to_string(), entry);
    }

    let raw = serde_json::json!({
        "categories": { "performance": { "score": score } },
        "audits": audit_map,
    });
    serde_json::from_value(raw).expect("valid scripted report")
}

/// Audit runner that replays a scripted response sequence and records the
/// URL and port of every invocation, in order
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<AuditReport>>>,
    calls: Mutex<Vec<(String, u16)>>,
}

impl ScriptedRunner {
    pub fn new(responses: Vec<Result<AuditReport>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations observed so far, as (url, settings.port) pairs
    pub fn calls(&self) -> Vec<(String, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditRunner for ScriptedRunner {
    async fn run(&self, url: &str, settings: &AuditSettings) -> Result<AuditReport> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), settings.port));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted response left")))
    }
}

/// Browser session that counts kill invocations
#[derive(Debug)]
pub struct MockSession {
    port: u16,
    kills: Arc<AtomicUsize>,
    fail_kill: bool,
}

#[async_trait]
impl BrowserSession for MockSession {
    fn port(&self) -> u16 {
        self.port
    }

    async fn kill(&mut self) -> Result<()> {
        self.kills.fetch_add(1, Ordering::SeqCst);
        if self.fail_kill {
            Err(AppError::browser("scripted kill failure"))
        } else {
            Ok(())
        }
    }
}

/// Launcher handing out mock sessions on a fixed port
pub struct MockLauncher {
    pub port: u16,
    pub fail_launch: bool,
    pub fail_kill: bool,
    pub launches: Arc<AtomicUsize>,
    pub kills: Arc<AtomicUsize>,
}

impl MockLauncher {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            fail_launch: false,
            fail_kill: false,
            launches: Arc::new(AtomicUsize::new(0)),
            kills: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn kill_count(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }

    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    async fn launch(&self, _options: &LaunchOptions) -> Result<Box<dyn BrowserSession>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(AppError::browser("scripted launch failure"));
        }
        Ok(Box::new(MockSession {
            port: self.port,
            kills: self.kills.clone(),
            fail_kill: self.fail_kill,
        }))
    }
}
