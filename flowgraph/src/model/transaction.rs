use serde::Deserialize;
use serde::Serialize;

/// One resolved side of a transfer: an address and the amount it moved, in whole coins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEndpoint {
    pub address: String,
    pub value: f64,
}

impl TransferEndpoint {
    pub fn new(
        address: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            address: address.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub inputs: Vec<TransferEndpoint>,
    pub outputs: Vec<TransferEndpoint>,
}

impl Transaction {
    pub fn new(
        hash: impl Into<String>,
        inputs: Vec<TransferEndpoint>,
        outputs: Vec<TransferEndpoint>,
    ) -> Self {
        Self {
            hash: hash.into(),
            inputs,
            outputs,
        }
    }

    pub fn total_input(&self) -> f64 {
        self.inputs.iter().map(|input| input.value).sum()
    }

    pub fn total_output(&self) -> f64 {
        self.outputs.iter().map(|output| output.value).sum()
    }

    /// Inputs minus outputs. Only meaningful when every endpoint resolved.
    pub fn fee(&self) -> f64 {
        (self.total_input() - self.total_output()).max(0.0)
    }
}

/// The queried address together with its transactions, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressView {
    pub address: String,
    pub transactions: Vec<Transaction>,
}

impl AddressView {
    pub fn new(
        address: impl Into<String>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            address: address.into(),
            transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_fee() {
        let tx = Transaction::new(
            "t1",
            vec![TransferEndpoint::new("A", 0.25), TransferEndpoint::new("B", 0.75)],
            vec![TransferEndpoint::new("C", 0.9)],
        );

        assert_eq!(tx.total_input(), 1.0);
        assert_eq!(tx.total_output(), 0.9);
        assert!((tx.fee() - 0.1).abs() < 1e-12);

        let coinbase = Transaction::new("cb", vec![], vec![TransferEndpoint::new("M", 6.25)]);
        assert_eq!(coinbase.fee(), 0.0);
    }
}
