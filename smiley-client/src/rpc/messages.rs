use crate::SmileyClient;
use serde_json::Value;
use smiley_core::{Params, Result};

impl SmileyClient {
    /// Encrypt `message` with the public key of `address`.
    pub async fn encrypt_message(&self, address: &str, message: &str) -> Result<String> {
        self.request("encryptmessage", Params::new().arg(address).arg(message))
            .await
    }

    /// Decrypt a message sent to `address`, which must be in the wallet.
    pub async fn decrypt_message(&self, address: &str, encrypted: &str) -> Result<String> {
        self.request("decryptmessage", Params::new().arg(address).arg(encrypted))
            .await
    }

    pub async fn get_messages(&self) -> Result<Value> {
        self.request("getmessages", Params::new()).await
    }

    /// Answer the sender of `txid` with `amount` and an attached message.
    pub async fn reply_with_message(&self, txid: &str, amount: f64, message: &str) -> Result<String> {
        let params = Params::new().arg(txid).arg(amount).arg(message);
        self.request("replywithmessage", params).await
    }
}
