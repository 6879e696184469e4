use std::collections::HashMap;

use super::model::{MinedBlock, PoolShare, PoolStatistic};
use crate::pools::{PoolIdentity, PoolTable};

/// Per-pool tallies before expectation and luck are derived.
struct Bucket {
    identity: PoolIdentity,
    hashrate_pct: f64,
    actual_blocks: u64,
}

/// Resolve share slugs and merge rows naming the same canonical pool,
/// keeping first-seen order.
pub fn canonical_shares(table: &PoolTable, shares: &[PoolShare]) -> Vec<PoolShare> {
    let mut out: Vec<PoolShare> = Vec::with_capacity(shares.len());
    let mut index: HashMap<&'static str, usize> = HashMap::new();
    for share in shares {
        let slug = table.resolve(Some(&share.slug)).slug;
        match index.get(slug) {
            Some(&i) => out[i].hashrate_pct += share.hashrate_pct,
            None => {
                index.insert(slug, out.len());
                out.push(PoolShare::new(slug, share.hashrate_pct));
            }
        }
    }
    out
}

/// [`compute_stats_with`] against the built-in pool table.
pub fn compute_stats(blocks: &[MinedBlock], shares: &[PoolShare]) -> Vec<PoolStatistic> {
    compute_stats_with(PoolTable::builtin(), blocks, shares)
}

/// Compare how many of `blocks` each pool actually mined with how many its
/// hashrate share says it should have.
///
/// - Block and share slugs both go through the resolver; share rows that
///   land on the same canonical pool are summed.
/// - `expected = hashrate_pct * blocks.len() / 100`.
/// - `luck = actual / expected * 100`, or `0` when nothing was expected.
/// - Pools with neither share nor blocks are dropped. A pool that mined
///   blocks without a share row (including `unknown`) is kept with a 0%
///   share, so every block is counted in exactly one returned entry.
/// - Sorted by `hashrate_pct` descending; the sort is stable, ties keep
///   share order followed by order of first appearance in `blocks`.
pub fn compute_stats_with(
    table: &PoolTable,
    blocks: &[MinedBlock],
    shares: &[PoolShare],
) -> Vec<PoolStatistic> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<&'static str, usize> = HashMap::new();

    let mut bucket_for = |identity: PoolIdentity| -> usize {
        *index.entry(identity.slug).or_insert_with(|| {
            buckets.push(Bucket {
                identity,
                hashrate_pct: 0.0,
                actual_blocks: 0,
            });
            buckets.len() - 1
        })
    };

    let mut share_slots = Vec::with_capacity(shares.len());
    for share in shares {
        share_slots.push((bucket_for(table.resolve(Some(&share.slug))), share.hashrate_pct));
    }
    let mut block_slots = Vec::with_capacity(blocks.len());
    for block in blocks {
        block_slots.push(bucket_for(table.resolve(block.pool_slug.as_deref())));
    }

    for (slot, pct) in share_slots {
        buckets[slot].hashrate_pct += pct;
    }
    for slot in block_slots {
        buckets[slot].actual_blocks += 1;
    }

    let total_blocks = blocks.len() as f64;
    let mut stats: Vec<PoolStatistic> = buckets
        .into_iter()
        .filter(|b| b.hashrate_pct > 0.0 || b.actual_blocks > 0)
        .map(|b| {
            let expected_blocks = b.hashrate_pct * total_blocks / 100.0;
            let luck = if expected_blocks > 0.0 {
                b.actual_blocks as f64 / expected_blocks * 100.0
            } else {
                0.0
            };
            PoolStatistic {
                slug: b.identity.slug,
                name: b.identity.name,
                color: b.identity.color,
                hashrate_pct: b.hashrate_pct,
                expected_blocks,
                actual_blocks: b.actual_blocks,
                luck,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.hashrate_pct.total_cmp(&a.hashrate_pct));
    stats
}
