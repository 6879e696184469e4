//! Block-time arithmetic behind the "when is the next block" bets.

use super::model::MinedBlock;

/// Mean spacing between consecutive blocks, in seconds. Blocks must be
/// ascending by height. Each interval is clamped to at least one second
/// since miner timestamps can go backwards. `None` with fewer than 2 blocks.
pub fn average_interval(blocks: &[MinedBlock]) -> Option<f64> {
    if blocks.len() < 2 {
        return None;
    }
    let total: f64 = blocks
        .windows(2)
        .map(|pair| pair[1].timestamp.saturating_sub(pair[0].timestamp).max(1) as f64)
        .sum();
    Some(total / (blocks.len() - 1) as f64)
}

/// Expected Unix time at which `target_height` is mined. Saturates at
/// `i64::MAX` instead of wrapping.
pub fn eta(tip_height: u64, tip_timestamp: i64, target_height: u64, mean_interval: f64) -> i64 {
    let remaining = target_height.saturating_sub(tip_height);
    // float -> int casts saturate
    let offset = (remaining as f64 * mean_interval).round() as i64;
    tip_timestamp.saturating_add(offset)
}

/// Seconds left until `eta`; zero once it has passed.
pub fn countdown(eta: i64, now: i64) -> i64 {
    eta.saturating_sub(now).max(0)
}

/// Chance the next block arrives within `secs`, treating arrivals as a
/// Poisson process with the given mean interval.
pub fn probability_within(secs: f64, mean_interval: f64) -> f64 {
    if secs <= 0.0 || mean_interval <= 0.0 {
        return 0.0;
    }
    1.0 - (-secs / mean_interval).exp()
}
