use crate::SmileyClient;
use serde_json::Value;
use smiley_core::model::{
    AddressValidation, MultisigAddress, OutPoint, ReceivedByAccount, ReceivedByAddress,
    UnspentOutput,
};
use smiley_core::{Params, Result, SmileyError};
use std::collections::BTreeMap;

/// Confirmations the daemon requires by default.
const DEFAULT_MINCONF: u32 = 1;

fn check_multisig(required: u32, keys: &[String]) -> Result<()> {
    if required == 0 || required as usize > keys.len() {
        return Err(SmileyError::InvalidParams(format!(
            "{} signatures required but {} keys given",
            required,
            keys.len()
        )));
    }
    Ok(())
}

impl SmileyClient {
    /// Add an n-of-m multisig address to the wallet. Keys are addresses or
    /// hex-encoded public keys.
    pub async fn add_multisig_address(
        &self,
        required: u32,
        keys: &[String],
        account: Option<&str>,
    ) -> Result<String> {
        check_multisig(required, keys)?;
        let params = Params::new().arg(required).arg(keys.to_vec()).opt(account);
        self.request("addmultisigaddress", params).await
    }

    /// Create an n-of-m multisig address without adding it to the wallet.
    pub async fn create_multisig(&self, required: u32, keys: &[String]) -> Result<MultisigAddress> {
        check_multisig(required, keys)?;
        let params = Params::new().arg(required).arg(keys.to_vec());
        self.request("createmultisig", params).await
    }

    /// Copy wallet.dat to `destination` (a directory or file path on the daemon's host).
    pub async fn backup_wallet(&self, destination: &str) -> Result<()> {
        self.request("backupwallet", Params::new().arg(destination))
            .await
    }

    pub async fn dump_priv_key(&self, address: &str) -> Result<String> {
        self.request("dumpprivkey", Params::new().arg(address)).await
    }

    pub async fn dump_wallet(&self, filename: &str) -> Result<()> {
        self.request("dumpwallet", Params::new().arg(filename)).await
    }

    /// Encrypt the wallet. The daemon shuts down afterwards.
    pub async fn encrypt_wallet(&self, passphrase: &str) -> Result<String> {
        self.request("encryptwallet", Params::new().arg(passphrase))
            .await
    }

    pub async fn get_account(&self, address: &str) -> Result<String> {
        self.request("getaccount", Params::new().arg(address)).await
    }

    /// Current receiving address for `account`.
    pub async fn get_account_address(&self, account: &str) -> Result<String> {
        self.request("getaccountaddress", Params::new().arg(account))
            .await
    }

    pub async fn get_addresses_by_account(&self, account: &str) -> Result<Vec<String>> {
        self.request("getaddressesbyaccount", Params::new().arg(account))
            .await
    }

    /// Balance of `account`, or of the whole wallet when no account is given.
    pub async fn get_balance(&self, account: Option<&str>, minconf: Option<u32>) -> Result<f64> {
        let params = Params::new()
            .opt_or(account, "*")
            .opt(minconf);
        self.request("getbalance", params).await
    }

    /// A fresh receiving address. `pattern` asks for a vanity address
    /// containing that string.
    pub async fn get_new_address(&self, account: Option<&str>, pattern: Option<&str>) -> Result<String> {
        let params = Params::new().opt_or(account, "").opt(pattern);
        self.request("getnewaddress", params).await
    }

    pub async fn get_raw_change_address(&self) -> Result<String> {
        self.request("getrawchangeaddress", Params::new()).await
    }

    pub async fn get_received_by_account(&self, account: &str, minconf: Option<u32>) -> Result<f64> {
        let params = Params::new().arg(account).opt(minconf);
        self.request("getreceivedbyaccount", params).await
    }

    pub async fn get_received_by_address(&self, address: &str, minconf: Option<u32>) -> Result<f64> {
        let params = Params::new().arg(address).opt(minconf);
        self.request("getreceivedbyaddress", params).await
    }

    pub async fn get_transaction(&self, txid: &str) -> Result<Value> {
        self.request("gettransaction", Params::new().arg(txid)).await
    }

    pub async fn get_unconfirmed_balance(&self) -> Result<f64> {
        self.request("getunconfirmedbalance", Params::new()).await
    }

    pub async fn get_wallet_info(&self) -> Result<Value> {
        self.request("getwalletinfo", Params::new()).await
    }

    /// Import a private key (as returned by `dump_priv_key`).
    pub async fn import_priv_key(
        &self,
        private_key: &str,
        label: Option<&str>,
        rescan: Option<bool>,
    ) -> Result<()> {
        let params = Params::new()
            .arg(private_key)
            .opt_or(label, "")
            .opt(rescan);
        self.request("importprivkey", params).await
    }

    pub async fn import_wallet(&self, filename: &str) -> Result<()> {
        self.request("importwallet", Params::new().arg(filename))
            .await
    }

    pub async fn keypool_refill(&self, new_size: Option<u32>) -> Result<()> {
        self.request("keypoolrefill", Params::new().opt(new_size))
            .await
    }

    /// Balance per account name.
    pub async fn list_accounts(&self, minconf: Option<u32>) -> Result<BTreeMap<String, f64>> {
        self.request("listaccounts", Params::new().opt(minconf)).await
    }

    pub async fn list_address_groupings(&self) -> Result<Vec<Value>> {
        self.request("listaddressgroupings", Params::new()).await
    }

    /// Outputs currently locked against spending.
    pub async fn list_lock_unspent(&self) -> Result<Vec<OutPoint>> {
        self.request("listlockunspent", Params::new()).await
    }

    pub async fn list_received_by_account(
        &self,
        minconf: Option<u32>,
        include_empty: Option<bool>,
    ) -> Result<Vec<ReceivedByAccount>> {
        let params = Params::new()
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt(include_empty);
        self.request("listreceivedbyaccount", params).await
    }

    pub async fn list_received_by_address(
        &self,
        minconf: Option<u32>,
        include_empty: Option<bool>,
    ) -> Result<Vec<ReceivedByAddress>> {
        let params = Params::new()
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt(include_empty);
        self.request("listreceivedbyaddress", params).await
    }

    /// Wallet transactions since `block_hash`, or all of them when omitted.
    pub async fn list_since_block(
        &self,
        block_hash: Option<&str>,
        target_confirmations: Option<u32>,
    ) -> Result<Value> {
        let params = Params::new()
            .opt_or(block_hash, "")
            .opt(target_confirmations);
        self.request("listsinceblock", params).await
    }

    /// Up to `count` most recent transactions for `account` (all accounts when
    /// omitted), skipping the first `skip`.
    pub async fn list_transactions(
        &self,
        account: Option<&str>,
        count: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<Value>> {
        let params = Params::new()
            .opt_or(account, "*")
            .opt_or(count, 10)
            .opt(skip);
        self.request("listtransactions", params).await
    }

    /// Unspent outputs with between `minconf` and `maxconf` confirmations,
    /// optionally restricted to `addresses`.
    pub async fn list_unspent(
        &self,
        minconf: Option<u32>,
        maxconf: Option<u32>,
        addresses: Option<&[String]>,
    ) -> Result<Vec<UnspentOutput>> {
        let params = Params::new()
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt_or(maxconf, 9_999_999)
            .opt(addresses.map(|a| a.to_vec()));
        self.request("listunspent", params).await
    }

    /// Lock (`unlock` false) or unlock outputs for automatic coin selection.
    pub async fn lock_unspent(&self, unlock: bool, outputs: &[OutPoint]) -> Result<bool> {
        let params = Params::new()
            .arg(unlock)
            .arg(serde_json::to_value(outputs)?);
        self.request("lockunspent", params).await
    }

    /// Move funds between two accounts of this wallet (no transaction is created).
    pub async fn move_funds(
        &self,
        from_account: &str,
        to_account: &str,
        amount: f64,
        minconf: Option<u32>,
        comment: Option<&str>,
    ) -> Result<bool> {
        let params = Params::new()
            .arg(from_account)
            .arg(to_account)
            .arg(amount)
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt(comment);
        self.request("move", params).await
    }

    /// Send from an account to an address. Returns the txid.
    pub async fn send_from(
        &self,
        from_account: &str,
        to_address: &str,
        amount: f64,
        minconf: Option<u32>,
        comment: Option<&str>,
        comment_to: Option<&str>,
    ) -> Result<String> {
        let params = Params::new()
            .arg(from_account)
            .arg(to_address)
            .arg(amount)
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt_or(comment, "")
            .opt(comment_to);
        self.request("sendfrom", params).await
    }

    /// Pay several addresses in one transaction. Returns the txid.
    pub async fn send_many(
        &self,
        from_account: &str,
        amounts: &BTreeMap<String, f64>,
        minconf: Option<u32>,
        comment: Option<&str>,
    ) -> Result<String> {
        let params = Params::new()
            .arg(from_account)
            .arg(serde_json::to_value(amounts)?)
            .opt_or(minconf, DEFAULT_MINCONF)
            .opt(comment);
        self.request("sendmany", params).await
    }

    /// Send `amount` to `address`. Returns the txid.
    pub async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
        comment: Option<&str>,
        comment_to: Option<&str>,
    ) -> Result<String> {
        let params = Params::new()
            .arg(address)
            .arg(amount)
            .opt_or(comment, "")
            .opt(comment_to);
        self.request("sendtoaddress", params).await
    }

    pub async fn set_account(&self, address: &str, account: &str) -> Result<()> {
        self.request("setaccount", Params::new().arg(address).arg(account))
            .await
    }

    /// Set the fee per kilobyte.
    pub async fn set_tx_fee(&self, amount: f64) -> Result<bool> {
        self.request("settxfee", Params::new().arg(amount)).await
    }

    pub async fn sign_message(&self, address: &str, message: &str) -> Result<String> {
        self.request("signmessage", Params::new().arg(address).arg(message))
            .await
    }

    pub async fn verify_message(&self, address: &str, signature: &str, message: &str) -> Result<bool> {
        let params = Params::new().arg(address).arg(signature).arg(message);
        self.request("verifymessage", params).await
    }

    pub async fn validate_address(&self, address: &str) -> Result<AddressValidation> {
        self.request("validateaddress", Params::new().arg(address))
            .await
    }

    /// Merge up to `inputs` small outputs of `address` into one.
    pub async fn consolidate(&self, address: &str, inputs: u32) -> Result<Value> {
        self.request("consolidate", Params::new().arg(address).arg(inputs))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multisig_requires_enough_keys() {
        let keys = vec!["a".to_string(), "b".to_string()];
        assert!(check_multisig(2, &keys).is_ok());
        assert!(check_multisig(3, &keys).is_err());
        assert!(check_multisig(0, &keys).is_err());
    }
}
