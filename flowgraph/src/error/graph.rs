use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Link references unknown node: {0}")]
    UnknownNode(String),
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),
}
