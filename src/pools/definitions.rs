/// One canonical mining pool and the spellings it is known by.
#[derive(Debug, Clone, Copy)]
pub struct PoolDefinition {
    pub slug: &'static str,
    pub name: &'static str,
    /// Six hex digits, no leading `#`.
    pub color: &'static str,
    /// Extra spellings seen in coinbase tags and third-party APIs.
    /// The slug and display name are always variants of themselves.
    pub aliases: &'static [&'static str],
}

const fn pool(
    slug: &'static str,
    name: &'static str,
    color: &'static str,
    aliases: &'static [&'static str],
) -> PoolDefinition {
    PoolDefinition {
        slug,
        name,
        color,
        aliases,
    }
}

/// Built-in mapping table. The table version fingerprints these rows in
/// order, so any edit here, reordering included, changes it.
pub static POOL_DEFINITIONS: &[PoolDefinition] = &[
    pool("foundryusa", "Foundry USA", "F7931A", &["Foundry", "Foundry Digital", "FoundryUSAPool"]),
    pool("antpool", "AntPool", "D81B2C", &["Ant Pool", "Bitmain AntPool"]),
    pool("f2pool", "F2Pool", "1E88E5", &["F2 Pool", "DiscusFish", "Discus Fish"]),
    pool("viabtc", "ViaBTC", "EC6A2E", &["Via BTC"]),
    pool("binancepool", "Binance Pool", "F0B90B", &["Binance", "BinancePool.com"]),
    pool("marapool", "MARA Pool", "0033A0", &["MARA", "Marathon", "Marathon Digital", "MaraPool.com"]),
    pool("luxor", "Luxor", "7B3FE4", &["Luxor Mining", "Luxor Tech"]),
    pool("braiinspool", "Braiins Pool", "00B386", &["Braiins", "SlushPool", "Slush Pool", "Slush"]),
    pool("btccom", "BTC.com", "2E7D32", &["BTC com", "BTCcom Pool"]),
    pool("poolin", "Poolin", "3D5AFE", &["Poolin.com"]),
    pool("spiderpool", "SpiderPool", "8E24AA", &["Spider Pool"]),
    pool("sbicrypto", "SBI Crypto", "0091DA", &["SBICrypto Pool"]),
    pool("ocean", "OCEAN", "0277BD", &["OCEAN.xyz", "Ocean Mining"]),
    pool("secpool", "SECPOOL", "5D4037", &["SEC Pool"]),
    pool("bitfufupool", "BitFuFuPool", "FF7043", &["BitFuFu"]),
    pool("whitepool", "WhitePool", "B0BEC5", &["White Pool"]),
    pool("ultimuspool", "ULTIMUSPOOL", "C2185B", &["Ultimus", "Ultimus Pool"]),
    pool("carbonnegative", "Carbon Negative", "43A047", &["CarbonNegative Pool"]),
    pool("titan", "Titan", "546E7A", &["Titan.io", "Titan Pool"]),
    pool("kucoinpool", "KuCoinPool", "24AE8F", &["KuCoin", "KuCoin Pool"]),
    pool("emcdpool", "EMCD", "FF5722", &["EMCD Pool", "emcd.io"]),
    pool("sigmapoolcom", "Sigmapool.com", "6A1B9A", &["Sigma Pool", "SigmaPool"]),
    pool("bitcoincom", "Bitcoin.com", "0AC18E", &["Bitcoin com Pool"]),
    pool("miningsquared", "Mining Squared", "FFB300", &["BSquared", "B Squared", "MiningSquared Pool"]),
    pool("1thash", "1THash", "9E9D24", &["1 THash", "1THash.top"]),
    pool("okexpool", "OKExPool", "455A64", &["OKEx", "OKX", "OKX Pool", "OKKONG"]),
    pool("huobipool", "Huobi.pool", "1565C0", &["Huobi", "Huobi Pool", "HTX", "HTX Pool"]),
    pool("novablock", "NovaBlock", "4DB6AC", &["Nova Block"]),
    pool("unknown", "Unknown", "9E9E9E", &["Unknown Pool", "Other"]),
];
