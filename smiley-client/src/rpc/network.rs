use crate::SmileyClient;
use serde_json::Value;
use smiley_core::model::{AddNodeCommand, NetTotals};
use smiley_core::{Params, Result};

impl SmileyClient {
    /// Add or remove a node from the addnode list, or try it once.
    pub async fn add_node(&self, node: &str, command: AddNodeCommand) -> Result<()> {
        self.request("addnode", Params::new().arg(node).arg(command))
            .await
    }

    /// Information about added nodes; with `dns` false only the node list is returned.
    pub async fn get_added_node_info(&self, dns: bool, node: Option<&str>) -> Result<Value> {
        self.request("getaddednodeinfo", Params::new().arg(dns).opt(node))
            .await
    }

    pub async fn get_connection_count(&self) -> Result<u64> {
        self.request("getconnectioncount", Params::new()).await
    }

    pub async fn get_net_totals(&self) -> Result<NetTotals> {
        self.request("getnettotals", Params::new()).await
    }

    pub async fn get_network_info(&self) -> Result<Value> {
        self.request("getnetworkinfo", Params::new()).await
    }

    pub async fn get_peer_info(&self) -> Result<Vec<Value>> {
        self.request("getpeerinfo", Params::new()).await
    }

    /// General daemon state: version, balance, block height, connections.
    pub async fn get_info(&self) -> Result<Value> {
        self.request("getinfo", Params::new()).await
    }
}
