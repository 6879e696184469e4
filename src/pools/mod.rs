pub mod definitions;
pub mod table;

pub use definitions::{POOL_DEFINITIONS, PoolDefinition};
pub use table::{PoolIdentity, PoolTable, TableError};

/// Canonical slug every unrecognized pool name resolves to.
pub const UNKNOWN_SLUG: &str = "unknown";

/// Reduce a raw pool name or slug to its lookup key: ASCII lowercase with
/// everything except letters and digits removed. `"BTC.com"`, `"btc-com"`
/// and `"btc com"` all become `"btccom"`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Resolve against the built-in table.
pub fn resolve(raw: Option<&str>) -> PoolIdentity {
    PoolTable::builtin().resolve(raw)
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn separators_collapse_to_same_key() {
        for raw in ["BTC.com", "btc-com", "btc com", "  BTC_com  ", "Btc/Com"] {
            assert_eq!(normalize(raw), "btccom", "raw={raw:?}");
        }
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(normalize("Fóundry USA"), "fundryusa");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" -. "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["Foundry-USA", "1THash.top", "OCEAN.xyz", "Huobi.pool"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
