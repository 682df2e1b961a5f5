//! Conversion from the ledger service's raw records to [`AddressView`]s.
//!
//! Endpoints without a resolvable address (coinbase inputs, non-standard
//! outputs) are dropped here so that the graph builder only ever sees
//! complete data. Amounts are converted from satoshis to whole coins.

use tracing::debug;

use crate::constants::UNKNOWN_ADDRESS;
use crate::error::IngestError;
use crate::model::AddressView;
use crate::model::RawAddress;
use crate::model::RawTransaction;
use crate::model::Transaction;
use crate::model::TransferEndpoint;
use crate::model::raw::RawOutput;
use crate::utils::satoshis_to_btc;

fn resolve(output: &RawOutput) -> Option<TransferEndpoint> {
    output
        .addr
        .as_ref()
        .map(|addr| TransferEndpoint::new(addr.clone(), satoshis_to_btc(output.value.unwrap_or(0))))
}

pub fn ingest_raw_transaction(raw: &RawTransaction) -> Transaction {
    let inputs: Vec<TransferEndpoint> =
        raw.inputs.iter().filter_map(|input| input.prev_out.as_ref().and_then(resolve)).collect();
    let outputs: Vec<TransferEndpoint> = raw.out.iter().filter_map(resolve).collect();

    let dropped = raw.inputs.len() + raw.out.len() - inputs.len() - outputs.len();
    if dropped > 0 {
        debug!("ingest::transaction::{}::dropped_unresolved_endpoints::{}", raw.hash, dropped);
    }

    Transaction::new(raw.hash.clone(), inputs, outputs)
}

/// View of an address record. Transactions keep the order the service returned them in.
pub fn ingest_address(
    raw: &RawAddress,
    address: &str,
) -> AddressView {
    let transactions = raw.txs.iter().map(ingest_raw_transaction).collect();
    AddressView::new(address, transactions)
}

/// View of a single transaction, centred on its first resolved input address.
pub fn ingest_transaction(raw: &RawTransaction) -> AddressView {
    let transaction = ingest_raw_transaction(raw);
    let address = transaction
        .inputs
        .first()
        .map(|input| input.address.clone())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

    AddressView::new(address, vec![transaction])
}

/// Parse an address record. `address` overrides the record's own address field.
pub fn parse_address_json(
    json: &str,
    address: Option<&str>,
) -> Result<AddressView, IngestError> {
    let raw: RawAddress = serde_json::from_str(json)?;
    let address = match address {
        Some(address) => address.to_string(),
        None => raw.address.clone().ok_or(IngestError::MissingAddress)?,
    };

    Ok(ingest_address(&raw, &address))
}

pub fn parse_transaction_json(json: &str) -> Result<AddressView, IngestError> {
    let raw: RawTransaction = serde_json::from_str(json)?;
    Ok(ingest_transaction(&raw))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const RAW_TX: &str = r#"{
        "hash": "t1",
        "inputs": [
            { "prev_out": { "addr": "B", "value": 100000000 } },
            { "prev_out": { "value": 5000 } },
            { "sequence": 4294967295 }
        ],
        "out": [
            { "addr": "C", "value": 50000000 },
            { "value": 0, "script": "6a" },
            { "addr": "A", "value": 50000000 }
        ]
    }"#;

    #[test]
    fn drops_unresolved_endpoints_and_scales_values() {
        let view = parse_transaction_json(RAW_TX).unwrap();

        assert_eq!(view.address, "B");
        let tx = &view.transactions[0];
        assert_eq!(tx.inputs, vec![TransferEndpoint::new("B", 1.0)]);
        assert_eq!(tx.outputs, vec![TransferEndpoint::new("C", 0.5), TransferEndpoint::new("A", 0.5)]);
    }

    #[test]
    fn coinbase_transaction_centres_on_unknown() {
        let view = parse_transaction_json(r#"{"hash":"cb","inputs":[{}],"out":[{"addr":"M","value":625000000}]}"#)
            .unwrap();

        assert_eq!(view.address, UNKNOWN_ADDRESS);
        assert_eq!(view.transactions[0].outputs[0].value, 6.25);
    }

    #[test]
    fn address_record_keeps_source_order() {
        let json = format!(r#"{{"address":"A","n_tx":2,"txs":[{},{{"hash":"t2"}}]}}"#, RAW_TX);
        let view = parse_address_json(&json, None).unwrap();

        assert_eq!(view.address, "A");
        let hashes: Vec<&str> = view.transactions.iter().map(|tx| tx.hash.as_str()).collect();
        assert_eq!(hashes, vec!["t1", "t2"]);
    }

    #[test]
    fn incomplete_transaction_does_not_block_record() {
        let json = r#"{
            "address": "A",
            "txs": [
                { "inputs": [{ "prev_out": { "addr": "B", "value": null } }], "out": [] },
                { "hash": "t2", "out": [{ "addr": "C", "value": 25000000 }] }
            ]
        }"#;
        let view = parse_address_json(json, None).unwrap();

        assert_eq!(view.transactions.len(), 2);
        assert_eq!(view.transactions[0].hash, "");
        assert_eq!(view.transactions[0].inputs, vec![TransferEndpoint::new("B", 0.0)]);
        assert_eq!(view.transactions[1].hash, "t2");
        assert_eq!(view.transactions[1].outputs, vec![TransferEndpoint::new("C", 0.25)]);
    }

    #[test]
    fn explicit_address_overrides_record() {
        let view = parse_address_json(r#"{"address":"A","txs":[]}"#, Some("Q")).unwrap();
        assert_eq!(view.address, "Q");
    }

    #[test]
    fn missing_address_is_an_error() {
        assert!(matches!(parse_address_json(r#"{"txs":[]}"#, None), Err(IngestError::MissingAddress)));
        assert!(matches!(parse_address_json("not json", None), Err(IngestError::ParseError(_))));
    }
}
