//! Typed arguments and results for the smileycoin RPC surface.
//!
//! Argument types convert into the JSON values the daemon expects at the
//! transport boundary. Result types cover the well-known structures; anything
//! daemon-specific is returned as raw JSON by the client.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Date-time layout the coupon service expects (no separator between date and time).
pub const COUPON_DATETIME_FORMAT: &str = "%d/%m/%Y%H:%M";

/// Format a coupon date-time the way `addcoupon` expects it.
///
/// ```
/// use chrono::NaiveDate;
/// use smiley_core::model::coupon_datetime;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(coupon_datetime(&dt), "07/03/202409:05");
/// ```
pub fn coupon_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(COUPON_DATETIME_FORMAT).to_string()
}

/// Lowercase hex encoding, used for `data` outputs of raw transactions.
pub fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// Action for `addnode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddNodeCommand {
    Add,
    Remove,
    /// Try a single connection without adding the node to the list.
    OneTry,
}

impl AddNodeCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::OneTry => "onetry",
        }
    }
}

impl fmt::Display for AddNodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddNodeCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "onetry" => Ok(Self::OneTry),
            _ => Err(format!("unknown addnode command: {}", s)),
        }
    }
}

impl From<AddNodeCommand> for Value {
    fn from(cmd: AddNodeCommand) -> Self {
        Value::from(cmd.as_str())
    }
}

/// Signature hash type for `signrawtransaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigHashType {
    #[default]
    All,
    None,
    Single,
    AllAnyoneCanPay,
    NoneAnyoneCanPay,
    SingleAnyoneCanPay,
}

impl SigHashType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::None => "NONE",
            Self::Single => "SINGLE",
            Self::AllAnyoneCanPay => "ALL|ANYONECANPAY",
            Self::NoneAnyoneCanPay => "NONE|ANYONECANPAY",
            Self::SingleAnyoneCanPay => "SINGLE|ANYONECANPAY",
        }
    }
}

impl fmt::Display for SigHashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SigHashType> for Value {
    fn from(kind: SigHashType) -> Self {
        Value::from(kind.as_str())
    }
}

/// Kind of ledger service registered with `createservice`.
///
/// The daemon identifies the kind by its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    CouponSales,
    Ubi,
    BookChapter,
    Traceability,
    NonprofitOrganization,
    Dex,
    Survey,
    OrganizationGroup,
}

impl ServiceType {
    pub fn code(&self) -> u8 {
        match self {
            Self::CouponSales => 1,
            Self::Ubi => 2,
            Self::BookChapter => 3,
            Self::Traceability => 4,
            Self::NonprofitOrganization => 5,
            Self::Dex => 6,
            Self::Survey => 7,
            Self::OrganizationGroup => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::CouponSales),
            2 => Some(Self::Ubi),
            3 => Some(Self::BookChapter),
            4 => Some(Self::Traceability),
            5 => Some(Self::NonprofitOrganization),
            6 => Some(Self::Dex),
            7 => Some(Self::Survey),
            8 => Some(Self::OrganizationGroup),
            _ => None,
        }
    }
}

impl From<ServiceType> for Value {
    fn from(kind: ServiceType) -> Self {
        Value::from(kind.code().to_string())
    }
}

/// A transaction output being spent or locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: String,
    pub vout: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

impl OutPoint {
    pub fn new(txid: impl Into<String>, vout: u32) -> Self {
        Self {
            txid: txid.into(),
            vout,
            sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// A previous output supplied to `signrawtransaction` when it is not yet in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrevOut {
    pub txid: String,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(
        rename = "redeemScript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub redeem_script: Option<String>,
}

/// An entry of `listunspent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub txid: String,
    pub vout: u32,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(rename = "redeemScript", default)]
    pub redeem_script: Option<String>,
    pub amount: f64,
    pub confirmations: u64,
}

/// Result of `validateaddress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressValidation {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "ismine", default)]
    pub is_mine: Option<bool>,
    #[serde(rename = "isscript", default)]
    pub is_script: Option<bool>,
    #[serde(default)]
    pub pubkey: Option<String>,
    #[serde(rename = "iscompressed", default)]
    pub is_compressed: Option<bool>,
    #[serde(default)]
    pub account: Option<String>,
}

/// Result of `createmultisig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigAddress {
    pub address: String,
    #[serde(rename = "redeemScript")]
    pub redeem_script: String,
}

/// Result of `signrawtransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub hex: String,
    /// Whether every input now carries a complete signature.
    pub complete: bool,
}

/// Result of `getnettotals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTotals {
    #[serde(rename = "totalbytesrecv")]
    pub total_bytes_recv: u64,
    #[serde(rename = "totalbytessent")]
    pub total_bytes_sent: u64,
    #[serde(rename = "timemillis")]
    pub time_millis: u64,
}

/// An entry of `listreceivedbyaddress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedByAddress {
    pub address: String,
    #[serde(default)]
    pub account: Option<String>,
    pub amount: f64,
    pub confirmations: u64,
}

/// An entry of `listreceivedbyaccount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedByAccount {
    pub account: String,
    pub amount: f64,
    pub confirmations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_coupon_datetime_has_no_separator() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(coupon_datetime(&dt), "31/12/202323:59");
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(b"hi\x00\xff"), "686900ff");
        assert_eq!(encode_hex(&[]), "");
    }

    #[test]
    fn test_addnode_command_wire_form() {
        assert_eq!(Value::from(AddNodeCommand::OneTry), json!("onetry"));
        assert_eq!("ADD".parse::<AddNodeCommand>().unwrap(), AddNodeCommand::Add);
        assert!("drop".parse::<AddNodeCommand>().is_err());
    }

    #[test]
    fn test_sighash_wire_form() {
        assert_eq!(SigHashType::default().as_str(), "ALL");
        assert_eq!(
            Value::from(SigHashType::SingleAnyoneCanPay),
            json!("SINGLE|ANYONECANPAY")
        );
    }

    #[test]
    fn test_service_type_codes() {
        assert_eq!(Value::from(ServiceType::Dex), json!("6"));
        assert_eq!(ServiceType::from_code(8), Some(ServiceType::OrganizationGroup));
        assert_eq!(ServiceType::from_code(0), None);
    }

    #[test]
    fn test_outpoint_omits_missing_sequence() {
        let point = serde_json::to_value(OutPoint::new("ab", 1)).unwrap();
        assert_eq!(point, json!({"txid": "ab", "vout": 1}));

        let point = serde_json::to_value(OutPoint::new("ab", 1).with_sequence(7)).unwrap();
        assert_eq!(point, json!({"txid": "ab", "vout": 1, "sequence": 7}));
    }

    #[test]
    fn test_prevout_uses_daemon_field_names() {
        let prev = PrevOut {
            txid: "ab".to_string(),
            vout: 0,
            script_pub_key: "76a9".to_string(),
            redeem_script: None,
        };
        assert_eq!(
            serde_json::to_value(prev).unwrap(),
            json!({"txid": "ab", "vout": 0, "scriptPubKey": "76a9"})
        );
    }

    #[test]
    fn test_address_validation_invalid() {
        let v: AddressValidation = serde_json::from_value(json!({"isvalid": false})).unwrap();
        assert!(!v.is_valid);
        assert!(v.address.is_none());
    }
}
