use crate::supervisor::{DaemonSupervisor, ProcessHost, SystemHost};
use crate::transport::RpcTransport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smiley_core::{ClientConfig, Params, Result, Secret};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for a smileycoin daemon's JSON-RPC interface.
///
/// Every RPC method of the daemon is exposed as a typed async method (see the
/// `rpc` modules). Construction optionally launches a local daemon; the client
/// owns that daemon and releases it when dropped.
///
/// # Example
///
/// ```no_run
/// use smiley_client::SmileyClient;
/// use smiley_core::ClientConfig;
///
/// #[tokio::main]
/// async fn main() -> smiley_core::Result<()> {
///     let config = ClientConfig::new("smileyrpc", "secret", 14243).with_start_server(true);
///     let client = SmileyClient::new(config)?;
///
///     let height = client.get_block_count().await?;
///     println!("chain height: {}", height);
///
///     let balance = client.get_balance(None, None).await?;
///     println!("balance: {} SMLY", balance);
///
///     Ok(())
/// }
/// ```
pub struct SmileyClient {
    transport: RpcTransport,
    supervisor: DaemonSupervisor,
}

impl SmileyClient {
    /// Create a client, launching the daemon if the config asks for it.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_process_host(config, Arc::new(SystemHost))
    }

    /// Create a client whose daemon lifecycle goes through `host`.
    pub fn with_process_host(config: ClientConfig, host: Arc<dyn ProcessHost>) -> Result<Self> {
        let transport = RpcTransport::new(&config)?;
        let supervisor = DaemonSupervisor::with_host(&config, host);
        supervisor.start()?;

        debug!("client ready for {}", transport.endpoint());
        Ok(Self {
            transport,
            supervisor,
        })
    }

    /// Create a client from the config file at the default location.
    pub fn from_default_config() -> Result<Self> {
        Self::new(ClientConfig::load()?)
    }

    pub fn builder() -> SmileyClientBuilder {
        SmileyClientBuilder::new()
    }

    /// Call any daemon method with positional params and return the raw result.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.transport.call(method, params).await
    }

    /// Call any daemon method and deserialize the result.
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        self.transport.call_as(method, params).await
    }

    pub(crate) async fn request<T: DeserializeOwned>(&self, method: &str, params: Params) -> Result<T> {
        self.transport.call_as(method, params.into_vec()).await
    }

    /// Launch the daemon if it is not running. See [`DaemonSupervisor::start`].
    pub fn start_server(&self) -> Result<()> {
        self.supervisor.start()
    }

    /// Stop the daemon if this client launched it. See [`DaemonSupervisor::stop`].
    pub fn stop_server(&self) -> Result<()> {
        self.supervisor.stop()
    }

    pub fn supervisor(&self) -> &DaemonSupervisor {
        &self.supervisor
    }

    pub fn transport(&self) -> &RpcTransport {
        &self.transport
    }
}

/// Builder for creating a `SmileyClient` with custom configuration.
pub struct SmileyClientBuilder {
    config: ClientConfig,
    host: Arc<dyn ProcessHost>,
}

impl SmileyClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            host: Arc::new(SystemHost),
        }
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<Secret>) -> Self {
        self.config.rpc_user = user.into();
        self.config.rpc_password = password.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.rpc_host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.rpc_port = port;
        self
    }

    pub fn start_server(mut self, start: bool) -> Self {
        self.config.start_server = start;
        self
    }

    pub fn shutdown_after_run(mut self, shutdown: bool) -> Self {
        self.config.shutdown_after_run = shutdown;
        self
    }

    /// Set the daemon executable and its arguments.
    pub fn daemon(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.config.daemon_program = program.into();
        self.config.daemon_args = args;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Route daemon lifecycle through a custom process host.
    pub fn process_host(mut self, host: Arc<dyn ProcessHost>) -> Self {
        self.host = host;
        self
    }

    /// Build the client, launching the daemon if configured to.
    pub fn build(self) -> Result<SmileyClient> {
        SmileyClient::with_process_host(self.config, self.host)
    }
}

impl Default for SmileyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
