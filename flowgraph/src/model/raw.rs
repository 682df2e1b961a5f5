use serde::Deserialize;
use serde::Serialize;

// Wire schema of the ledger indexing service (rawaddr / rawtx endpoints).
// Only the fields the graph needs are modelled; everything else is ignored.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub txs: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub inputs: Vec<RawInput>,
    #[serde(default)]
    pub out: Vec<RawOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// Absent for coinbase inputs
    #[serde(default)]
    pub prev_out: Option<RawOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOutput {
    #[serde(default)]
    pub addr: Option<String>,
    /// `null` on some incomplete records; read as zero
    #[serde(default)]
    pub value: Option<u64>,
}
