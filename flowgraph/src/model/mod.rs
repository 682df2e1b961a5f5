pub mod graph;
pub mod raw;
pub mod transaction;

pub use graph::GraphExport;
pub use graph::GraphLink;
pub use graph::GraphModel;
pub use graph::GraphNode;
pub use graph::GraphSummary;
pub use graph::NodeGroup;
pub use raw::RawAddress;
pub use raw::RawTransaction;
pub use transaction::AddressView;
pub use transaction::Transaction;
pub use transaction::TransferEndpoint;
