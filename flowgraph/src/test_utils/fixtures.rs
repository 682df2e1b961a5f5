use crate::model::AddressView;
use crate::model::Transaction;
use crate::model::TransferEndpoint;

/// Test fixtures for creating consistent address views
pub struct TestFixtures;

impl TestFixtures {
    fn endpoint(
        address: &str,
        value: f64,
    ) -> TransferEndpoint {
        TransferEndpoint::new(address, value)
    }

    /// B pays A, A pays C and sends change back to itself
    pub fn change_to_self_view() -> AddressView {
        AddressView::new(
            "A",
            vec![Transaction::new(
                "t1",
                vec![Self::endpoint("B", 1.0)],
                vec![Self::endpoint("C", 0.5), Self::endpoint("A", 0.5)],
            )],
        )
    }

    /// A spends its own output
    pub fn self_spend_view() -> AddressView {
        AddressView::new(
            "A",
            vec![Transaction::new(
                "t1",
                vec![Self::endpoint("A", 2.0)],
                vec![Self::endpoint("D", 1.5), Self::endpoint("A", 0.4)],
            )],
        )
    }

    /// B pays A `count` times in separate transactions
    pub fn repeated_payer_view(count: usize) -> AddressView {
        let transactions = (0..count)
            .map(|i| Transaction::new(format!("t{}", i), vec![Self::endpoint("B", 1.0)], vec![]))
            .collect();
        AddressView::new("A", transactions)
    }

    /// B and E appear first in one role and later in the opposite one
    pub fn role_swap_view() -> AddressView {
        AddressView::new(
            "A",
            vec![
                Transaction::new("t1", vec![Self::endpoint("B", 1.0)], vec![Self::endpoint("E", 0.3)]),
                Transaction::new("t2", vec![Self::endpoint("E", 0.2)], vec![Self::endpoint("B", 0.1)]),
            ],
        )
    }

    /// Primary address with `fan` distinct payers and `fan` distinct payees
    pub fn star_view(fan: usize) -> AddressView {
        let inputs = (0..fan).map(|i| Self::endpoint(&format!("in{}", i), 1.0 + i as f64)).collect();
        let outputs = (0..fan).map(|i| Self::endpoint(&format!("out{}", i), 0.5)).collect();
        AddressView::new("1PrimaryAddressForLayoutTests", vec![Transaction::new("star", inputs, outputs)])
    }
}
