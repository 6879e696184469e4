use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

use super::definitions::{POOL_DEFINITIONS, PoolDefinition};
use super::{UNKNOWN_SLUG, normalize};

/// Canonical identity of a mining pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolIdentity {
    pub slug: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

/// Returned when a table has no usable `unknown` row.
const UNKNOWN_IDENTITY: PoolIdentity = PoolIdentity {
    slug: UNKNOWN_SLUG,
    name: "Unknown",
    color: "9E9E9E",
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("slug '{0}' is not canonical (lowercase letters and digits only)")]
    NonCanonicalSlug(&'static str),

    #[error("pool '{0}' is defined more than once")]
    DuplicateSlug(&'static str),

    #[error("pool '{0}' has an empty display name")]
    EmptyName(&'static str),

    #[error("pool '{slug}' has invalid color '{color}' (want 6 hex digits)")]
    InvalidColor {
        slug: &'static str,
        color: &'static str,
    },

    #[error("pool '{slug}' has variant '{variant}' with no letters or digits")]
    EmptyVariant {
        slug: &'static str,
        variant: &'static str,
    },

    #[error("variant key '{key}' claimed by both '{first}' and '{second}'")]
    VariantCollision {
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("table has no 'unknown' pool")]
    MissingUnknown,
}

/// Read-only lookup tables built once from a definition list.
///
/// Construction never fails: on a variant collision the first pool to
/// claim the key keeps it. Use [`PoolTable::validate`] (or
/// [`PoolTable::new`]) to reject such tables.
#[derive(Debug)]
pub struct PoolTable {
    definitions: &'static [PoolDefinition],
    variants: HashMap<String, &'static str>,
    names: HashMap<&'static str, &'static str>,
    colors: HashMap<&'static str, &'static str>,
    version: String,
}

static BUILTIN: LazyLock<PoolTable> = LazyLock::new(|| PoolTable::build(POOL_DEFINITIONS));

impl PoolTable {
    /// Build and validate a table.
    pub fn new(definitions: &'static [PoolDefinition]) -> Result<Self, TableError> {
        let table = Self::build(definitions);
        table.validate()?;
        Ok(table)
    }

    /// The process-wide table, shared by every request.
    pub fn builtin() -> &'static PoolTable {
        &BUILTIN
    }

    fn build(definitions: &'static [PoolDefinition]) -> Self {
        let mut variants = HashMap::new();
        let mut names = HashMap::with_capacity(definitions.len());
        let mut colors = HashMap::with_capacity(definitions.len());

        for def in definitions {
            names.entry(def.slug).or_insert(def.name);
            colors.entry(def.slug).or_insert(def.color);
            for key in variant_keys(def) {
                if !key.is_empty() {
                    variants.entry(key).or_insert(def.slug);
                }
            }
        }

        Self {
            definitions,
            variants,
            names,
            colors,
            version: fingerprint(definitions),
        }
    }

    /// Check the table invariants: canonical slugs map to themselves, every
    /// slug has a name and a 6-hex-digit color, no variant is claimed twice.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut claims: HashMap<String, &'static str> = HashMap::new();
        let mut seen = HashSet::new();

        for def in self.definitions {
            if def.slug.is_empty() || normalize(def.slug) != def.slug {
                return Err(TableError::NonCanonicalSlug(def.slug));
            }
            if !seen.insert(def.slug) {
                return Err(TableError::DuplicateSlug(def.slug));
            }
            if def.name.trim().is_empty() {
                return Err(TableError::EmptyName(def.slug));
            }
            if !is_hex_color(def.color) {
                return Err(TableError::InvalidColor {
                    slug: def.slug,
                    color: def.color,
                });
            }

            for (variant, key) in std::iter::once(def.name)
                .chain(def.aliases.iter().copied())
                .zip(variant_keys(def).skip(1))
            {
                if key.is_empty() {
                    return Err(TableError::EmptyVariant {
                        slug: def.slug,
                        variant,
                    });
                }
            }

            for key in variant_keys(def) {
                match claims.entry(key) {
                    Entry::Occupied(claim) if *claim.get() != def.slug => {
                        return Err(TableError::VariantCollision {
                            key: claim.key().clone(),
                            first: *claim.get(),
                            second: def.slug,
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(claim) => {
                        claim.insert(def.slug);
                    }
                }
            }
        }

        if !seen.contains(UNKNOWN_SLUG) {
            return Err(TableError::MissingUnknown);
        }
        Ok(())
    }

    /// Map any raw pool name to its canonical identity. Absent, empty and
    /// unrecognized input all resolve to `unknown`.
    pub fn resolve(&self, raw: Option<&str>) -> PoolIdentity {
        let slug = raw
            .map(normalize)
            .and_then(|key| self.variants.get(&key).copied())
            .unwrap_or(UNKNOWN_SLUG);
        self.identity(slug).unwrap_or(UNKNOWN_IDENTITY)
    }

    /// Identity of an already-canonical slug.
    pub fn identity(&self, slug: &str) -> Option<PoolIdentity> {
        let (&slug, &name) = self.names.get_key_value(slug)?;
        let color = self.colors.get(slug).copied()?;
        Some(PoolIdentity {
            slug,
            name,
            color,
        })
    }

    /// All canonical identities, in definition order.
    pub fn identities(&self) -> Vec<PoolIdentity> {
        let mut seen = HashSet::new();
        self.definitions
            .iter()
            .filter(|def| seen.insert(def.slug))
            .filter_map(|def| self.identity(def.slug))
            .collect()
    }

    /// Short hex fingerprint of the definition rows.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of distinct pools, `unknown` included.
    pub fn pool_count(&self) -> usize {
        self.names.len()
    }

    /// Every normalized variant key and the slug it resolves to.
    #[cfg(test)]
    fn variants(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.variants.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Lookup keys contributed by one definition: slug first, then the
/// display name, then each alias.
fn variant_keys(def: &PoolDefinition) -> impl Iterator<Item = String> + '_ {
    std::iter::once(def.slug)
        .chain(std::iter::once(def.name))
        .chain(def.aliases.iter().copied())
        .map(normalize)
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 6 && hex::decode(color).is_ok()
}

fn fingerprint(definitions: &[PoolDefinition]) -> String {
    let mut hasher = Sha256::new();
    for def in definitions {
        hasher.update(def.slug.as_bytes());
        hasher.update(b"|");
        hasher.update(def.name.as_bytes());
        hasher.update(b"|");
        hasher.update(def.color.as_bytes());
        for alias in def.aliases {
            hasher.update(b"|");
            hasher.update(alias.as_bytes());
        }
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::{PoolTable, TableError};
    use crate::pools::{PoolDefinition, UNKNOWN_SLUG, resolve};

    #[test]
    fn builtin_table_is_valid() {
        assert_eq!(PoolTable::builtin().validate(), Ok(()));
    }

    #[test]
    fn resolve_is_idempotent_for_every_variant() {
        let table = PoolTable::builtin();
        for (key, _) in table.variants() {
            let first = table.resolve(Some(key));
            let again = table.resolve(Some(first.slug));
            assert_eq!(first, again, "variant {key}");
        }
        for def in crate::pools::POOL_DEFINITIONS {
            for raw in std::iter::once(def.name).chain(def.aliases.iter().copied()) {
                let first = table.resolve(Some(raw));
                assert_eq!(first.slug, def.slug, "raw {raw}");
                assert_eq!(table.resolve(Some(first.slug)), first);
            }
        }
    }

    #[test]
    fn resolve_is_total() {
        for raw in [None, Some(""), Some("   "), Some("totally-unknown-pool-xyz")] {
            let id = resolve(raw);
            assert_eq!(id.slug, UNKNOWN_SLUG, "raw {raw:?}");
            assert_eq!(id.name, "Unknown");
        }
    }

    #[test]
    fn every_identity_has_name_and_color() {
        let table = PoolTable::builtin();
        for (_, slug) in table.variants() {
            let id = table.identity(slug).expect("slug has identity");
            assert!(!id.name.is_empty());
            assert_eq!(id.color.len(), 6);
            assert!(id.color.chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_eq!(table.identities().len(), table.pool_count());
    }

    #[test]
    fn spellings_of_foundry_agree() {
        for raw in ["Foundry-USA", "foundry usa", "Foundry", "FOUNDRYUSA", "foundryusa"] {
            assert_eq!(resolve(Some(raw)).slug, "foundryusa", "raw {raw}");
        }
        assert_eq!(resolve(Some("Foundry USA")).name, "Foundry USA");
    }

    #[test]
    fn spellings_of_btc_com_agree() {
        for raw in ["BTC.com", "btc-com", "btc com"] {
            assert_eq!(resolve(Some(raw)).slug, "btccom");
        }
    }

    #[test]
    fn legacy_names_map_to_current_pool() {
        assert_eq!(resolve(Some("SlushPool")).slug, "braiinspool");
        assert_eq!(resolve(Some("Marathon")).slug, "marapool");
        assert_eq!(resolve(Some("OKX")).slug, "okexpool");
    }

    static COLLIDING: &[PoolDefinition] = &[
        PoolDefinition {
            slug: "alpha",
            name: "Alpha",
            color: "112233",
            aliases: &["Shared Name"],
        },
        PoolDefinition {
            slug: "beta",
            name: "Beta",
            color: "445566",
            aliases: &["shared-name"],
        },
        PoolDefinition {
            slug: "unknown",
            name: "Unknown",
            color: "9E9E9E",
            aliases: &[],
        },
    ];

    #[test]
    fn collision_is_rejected_but_first_claim_wins_when_built() {
        let err = PoolTable::new(COLLIDING).unwrap_err();
        assert_eq!(
            err,
            TableError::VariantCollision {
                key: "sharedname".into(),
                first: "alpha",
                second: "beta",
            }
        );

        let lenient = PoolTable::build(COLLIDING);
        assert_eq!(lenient.resolve(Some("SHARED NAME")).slug, "alpha");
    }

    static BAD_COLOR: &[PoolDefinition] = &[PoolDefinition {
        slug: "unknown",
        name: "Unknown",
        color: "#9E9E9",
        aliases: &[],
    }];

    #[test]
    fn bad_color_is_rejected() {
        assert!(matches!(
            PoolTable::new(BAD_COLOR),
            Err(TableError::InvalidColor { slug: "unknown", .. })
        ));
    }

    static NO_UNKNOWN: &[PoolDefinition] = &[PoolDefinition {
        slug: "alpha",
        name: "Alpha",
        color: "112233",
        aliases: &[],
    }];

    #[test]
    fn table_without_unknown_still_resolves_unknown() {
        assert_eq!(
            PoolTable::new(NO_UNKNOWN).unwrap_err(),
            TableError::MissingUnknown
        );
        let lenient = PoolTable::build(NO_UNKNOWN);
        assert_eq!(lenient.resolve(Some("nope")).slug, UNKNOWN_SLUG);
    }

    #[test]
    fn version_tracks_rows() {
        let a = PoolTable::build(COLLIDING);
        let b = PoolTable::build(NO_UNKNOWN);
        assert_eq!(a.version(), PoolTable::build(COLLIDING).version());
        assert_ne!(a.version(), b.version());
        assert_eq!(PoolTable::builtin().version().len(), 16);
    }

    #[test]
    fn version_tracks_row_order() {
        let reordered = crate::pools::POOL_DEFINITIONS.to_vec().leak();
        reordered.swap(0, 1);
        let swapped = PoolTable::new(reordered).unwrap();
        assert_ne!(swapped.version(), PoolTable::builtin().version());
        assert_eq!(swapped.pool_count(), PoolTable::builtin().pool_count());
    }
}
