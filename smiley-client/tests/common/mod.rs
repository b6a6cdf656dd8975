//! Shared helpers for smiley-client integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::{Value, json};
use smiley_client::{ClientConfig, DaemonProcess, ProcessHost, Result, SmileyClient};
use std::sync::Arc;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Process host that records launches and terminations instead of running anything.
#[derive(Default)]
pub struct RecordingHost {
    pub already_running: bool,
    pub spawned: Mutex<Vec<String>>,
    pub terminated: Arc<Mutex<Vec<u32>>>,
}

impl RecordingHost {
    pub fn with_daemon_running() -> Self {
        Self {
            already_running: true,
            ..Self::default()
        }
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().len()
    }

    pub fn terminate_count(&self) -> usize {
        self.terminated.lock().len()
    }
}

struct RecordedProcess {
    pid: u32,
    terminated: Arc<Mutex<Vec<u32>>>,
}

impl DaemonProcess for RecordedProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn terminate(&mut self) -> Result<()> {
        self.terminated.lock().push(self.pid);
        Ok(())
    }
}

impl ProcessHost for RecordingHost {
    fn is_running(&self, _program: &str) -> Result<bool> {
        Ok(self.already_running)
    }

    fn spawn(&self, program: &str, _args: &[String]) -> Result<Box<dyn DaemonProcess>> {
        let mut spawned = self.spawned.lock();
        spawned.push(program.to_string());
        Ok(Box::new(RecordedProcess {
            pid: 4000 + spawned.len() as u32,
            terminated: Arc::clone(&self.terminated),
        }))
    }
}

/// A client pointed at `server` that never launches a daemon.
pub fn client_for(server: &MockServer) -> SmileyClient {
    let config = ClientConfig::new("u", "p", server.address().port()).with_host("127.0.0.1");
    SmileyClient::with_process_host(config, Arc::new(RecordingHost::default()))
        .expect("client should build")
}

/// Expect exactly one call of `rpc_method` with exactly `params`, answering with `result`.
pub async fn expect_call(server: &MockServer, rpc_method: &str, params: Value, result: Value) {
    let id = format!("{}python_client", rpc_method);
    Mock::given(method("POST"))
        .and(body_json(json!({
            "jsonrpc": "1.0",
            "id": id,
            "method": rpc_method,
            "params": params,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": result,
            "error": null,
            "id": id,
        })))
        .expect(1)
        .mount(server)
        .await;
}
