use crate::SmileyClient;
use serde_json::Value;
use smiley_core::{Params, Result};

impl SmileyClient {
    /// Hash of the tip of the longest chain.
    pub async fn get_best_block_hash(&self) -> Result<String> {
        self.request("getbestblockhash", Params::new()).await
    }

    /// Block data for `hash`: a JSON object, or the serialized hex string when `verbose` is false.
    pub async fn get_block(&self, hash: &str, verbose: Option<bool>) -> Result<Value> {
        self.request("getblock", Params::new().arg(hash).opt_or(verbose, true))
            .await
    }

    pub async fn get_blockchain_info(&self) -> Result<Value> {
        self.request("getblockchaininfo", Params::new()).await
    }

    /// Number of blocks in the longest chain.
    pub async fn get_block_count(&self) -> Result<u64> {
        self.request("getblockcount", Params::new()).await
    }

    pub async fn get_block_hash(&self, height: u64) -> Result<String> {
        self.request("getblockhash", Params::new().arg(height)).await
    }

    /// Proof-of-work difficulty. Returned as raw JSON since multi-algorithm
    /// daemons report one value per algorithm.
    pub async fn get_difficulty(&self) -> Result<Value> {
        self.request("getdifficulty", Params::new()).await
    }

    /// Transaction ids in the memory pool, or full entries when `verbose`.
    pub async fn get_raw_mempool(&self, verbose: Option<bool>) -> Result<Value> {
        self.request("getrawmempool", Params::new().opt_or(verbose, false))
            .await
    }

    /// Details about an unspent output. `None` when the output is spent or unknown.
    pub async fn get_tx_out(
        &self,
        txid: &str,
        vout: u32,
        include_mempool: Option<bool>,
    ) -> Result<Option<Value>> {
        let params = Params::new()
            .arg(txid)
            .arg(vout)
            .opt_or(include_mempool, true);
        self.request("gettxout", params).await
    }

    pub async fn get_tx_out_set_info(&self) -> Result<Value> {
        self.request("gettxoutsetinfo", Params::new()).await
    }

    /// Verify the chain database. `check_level` is 0-4, `num_blocks` 0 means all.
    pub async fn verify_chain(&self, check_level: Option<u32>, num_blocks: Option<u32>) -> Result<bool> {
        let params = Params::new()
            .opt_or(check_level, 3)
            .opt_or(num_blocks, 288);
        self.request("verifychain", params).await
    }

    /// The richest addresses known to the daemon.
    pub async fn get_rich_addresses(&self) -> Result<Value> {
        self.request("getrichaddresses", Params::new()).await
    }
}
