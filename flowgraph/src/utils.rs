use crate::constants::CURRENCY_SYMBOL;
use crate::constants::SATOSHIS_PER_BTC;

pub fn satoshis_to_btc(satoshis: u64) -> f64 {
    satoshis as f64 / SATOSHIS_PER_BTC
}

/// First `keep` characters of an address followed by `...`, whatever its length
pub fn truncate_address(
    address: &str,
    keep: usize,
) -> String {
    let prefix: String = address.chars().take(keep).collect();
    format!("{}...", prefix)
}

pub fn format_btc(value: f64) -> String {
    format!("{:.8} {}", value, CURRENCY_SYMBOL)
}
