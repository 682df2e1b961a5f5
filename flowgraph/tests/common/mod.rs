#![allow(dead_code)]

use flowgraph::model::AddressView;
use flowgraph::model::Transaction;
use flowgraph::model::TransferEndpoint;

pub fn endpoint(
    address: &str,
    value: f64,
) -> TransferEndpoint {
    TransferEndpoint::new(address, value)
}

/// A receives from B, pays C and sends change to itself
pub fn abc_view() -> AddressView {
    AddressView::new(
        "A",
        vec![Transaction::new(
            "t1",
            vec![endpoint("B", 1.0)],
            vec![endpoint("C", 0.5), endpoint("A", 0.5)],
        )],
    )
}

/// Primary address with `fan` payers and `fan` payees in one transaction
pub fn star_view(fan: usize) -> AddressView {
    let inputs = (0..fan).map(|i| endpoint(&format!("in{}", i), 1.0)).collect();
    let outputs = (0..fan).map(|i| endpoint(&format!("out{}", i), 0.25)).collect();
    AddressView::new("1HubAddressUnderTest", vec![Transaction::new("hub", inputs, outputs)])
}
