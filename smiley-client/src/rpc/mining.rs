use crate::SmileyClient;
use serde_json::Value;
use smiley_core::{Params, Result};

impl SmileyClient {
    pub async fn get_generate(&self) -> Result<bool> {
        self.request("getgenerate", Params::new()).await
    }

    /// Turn generation on or off. `proc_limit` of -1 means unlimited.
    pub async fn set_generate(&self, generate: bool, proc_limit: Option<i32>) -> Result<()> {
        self.request("setgenerate", Params::new().arg(generate).opt(proc_limit))
            .await
    }

    pub async fn get_hashes_per_sec(&self) -> Result<u64> {
        self.request("gethashespersec", Params::new()).await
    }

    pub async fn get_mining_info(&self) -> Result<Value> {
        self.request("getmininginfo", Params::new()).await
    }

    pub async fn get_block_template(&self, request: Option<&Value>) -> Result<Value> {
        self.request("getblocktemplate", Params::new().opt(request.cloned()))
            .await
    }

    /// Submit a block. Returns `None` on acceptance, otherwise the rejection reason.
    pub async fn submit_block(&self, hex: &str, parameters: Option<&Value>) -> Result<Option<String>> {
        let params = Params::new().arg(hex).opt(parameters.cloned());
        self.request("submitblock", params).await
    }
}
