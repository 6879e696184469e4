use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A block as reported by the data provider. `pool_slug` is whatever the
/// provider called the miner; it is only trusted after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedBlock {
    pub height: u64,
    #[serde(default)]
    pub pool_slug: Option<String>,
    pub timestamp: i64, // Unix timestamp (UTC)
}

impl MinedBlock {
    pub fn new(height: u64, pool_slug: impl Into<String>, timestamp: i64) -> Self {
        Self {
            height,
            pool_slug: Some(pool_slug.into()),
            timestamp,
        }
    }
}

/// Hashrate share of one pool over an observation window, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolShare {
    pub slug: String,
    pub hashrate_pct: f64,
}

impl PoolShare {
    pub fn new(slug: impl Into<String>, hashrate_pct: f64) -> Self {
        Self {
            slug: slug.into(),
            hashrate_pct,
        }
    }
}

/// Trailing period over which hashrate shares are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    Week,
}

impl Window {
    #[cfg(test)]
    const ALL: [Window; 3] = [Window::Day, Window::ThreeDays, Window::Week];

    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Day => "24h",
            Window::ThreeDays => "3d",
            Window::Week => "1w",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Window::Day),
            "3d" => Ok(Window::ThreeDays),
            "1w" => Ok(Window::Week),
            _ => Err("window must be one of 24h, 3d, 1w"),
        }
    }
}

/// Observed vs. expected performance of one canonical pool. Recomputed on
/// every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStatistic {
    pub slug: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub hashrate_pct: f64,
    pub expected_blocks: f64,
    pub actual_blocks: u64,
    pub luck: f64,
}

#[cfg(test)]
mod tests {
    use super::{MinedBlock, Window};

    #[test]
    fn window_parses_and_displays() {
        for w in Window::ALL {
            assert_eq!(w.as_str().parse::<Window>(), Ok(w));
            assert_eq!(w.to_string(), w.as_str());
        }
        assert!("1m".parse::<Window>().is_err());
        assert!("24H".parse::<Window>().is_err());
    }

    #[test]
    fn window_uses_period_strings_in_json() {
        assert_eq!(serde_json::to_string(&Window::Week).unwrap(), "\"1w\"");
        let w: Window = serde_json::from_str("\"3d\"").unwrap();
        assert_eq!(w, Window::ThreeDays);
    }

    #[test]
    fn block_without_pool_deserializes() {
        let b: MinedBlock = serde_json::from_str(r#"{"height":5,"timestamp":10}"#).unwrap();
        assert_eq!(b.pool_slug, None);
        assert_eq!(b.height, 5);
    }
}
