use crate::SmileyClient;
use serde_json::{Map, Value};
use smiley_core::model::{OutPoint, PrevOut, SigHashType, SignedTransaction, encode_hex};
use smiley_core::{Params, Result, SmileyError};
use std::collections::BTreeMap;

impl SmileyClient {
    /// Build an unsigned transaction spending `inputs` and paying `outputs`
    /// (address to amount). `data` is attached hex-encoded as a `data` output.
    ///
    /// The transaction is neither stored in the wallet nor broadcast.
    pub async fn create_raw_transaction(
        &self,
        inputs: &[OutPoint],
        outputs: &BTreeMap<String, f64>,
        data: Option<&[u8]>,
    ) -> Result<String> {
        let mut targets: Map<String, Value> = outputs
            .iter()
            .map(|(address, amount)| (address.clone(), Value::from(*amount)))
            .collect();
        if let Some(data) = data {
            if targets.contains_key("data") {
                return Err(SmileyError::InvalidParams(
                    "outputs already contain a data entry".to_string(),
                ));
            }
            targets.insert("data".to_string(), Value::from(encode_hex(data)));
        }

        let params = Params::new()
            .arg(serde_json::to_value(inputs)?)
            .arg(targets);
        self.request("createrawtransaction", params).await
    }

    pub async fn decode_raw_transaction(&self, hex: &str) -> Result<Value> {
        self.request("decoderawtransaction", Params::new().arg(hex))
            .await
    }

    pub async fn decode_script(&self, hex: &str) -> Result<Value> {
        self.request("decodescript", Params::new().arg(hex)).await
    }

    /// Raw transaction data: the hex string, or a decoded object when `verbose`.
    pub async fn get_raw_transaction(&self, txid: &str, verbose: bool) -> Result<Value> {
        let params = Params::new().arg(txid).arg(u8::from(verbose));
        self.request("getrawtransaction", params).await
    }

    /// Broadcast a signed transaction and return its id.
    pub async fn send_raw_transaction(&self, hex: &str, allow_high_fees: Option<bool>) -> Result<String> {
        let params = Params::new().arg(hex).opt(allow_high_fees);
        self.request("sendrawtransaction", params).await
    }

    /// Sign the inputs of a raw transaction.
    ///
    /// `prev_outs` describes inputs the daemon does not know yet; `private_keys`
    /// restricts signing to those keys instead of the wallet's.
    pub async fn sign_raw_transaction(
        &self,
        hex: &str,
        prev_outs: Option<&[PrevOut]>,
        private_keys: Option<&[String]>,
        sighash: Option<SigHashType>,
    ) -> Result<SignedTransaction> {
        let prev_outs = prev_outs.map(serde_json::to_value).transpose()?;
        let private_keys = private_keys.map(|keys| keys.to_vec());
        let params = Params::new()
            .arg(hex)
            .opt(prev_outs)
            .opt(private_keys)
            .opt(sighash);
        self.request("signrawtransaction", params).await
    }
}
