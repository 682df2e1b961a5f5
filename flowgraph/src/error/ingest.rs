use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to parse ledger record: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Address record carries no address and none was supplied")]
    MissingAddress,
}
