//! Repository trait: the read-only interface every derivation works against.
//!
//! Services are generic over [`DataRepository`] so that the in-memory
//! [`RecordStore`](super::RecordStore) can be swapped for a hand-built fixture
//! in tests without touching the aggregation code.

use std::collections::BTreeMap;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{BannerInfo, Operator, Region};

/// Read access to the operator and banner records.
pub trait DataRepository {
    /// All operators keyed by id.
    fn operators(&self) -> &BTreeMap<String, Operator>;

    /// Banners of `region`, oldest first.
    fn banners(&self, region: Region) -> &[BannerInfo];

    /// Operators released in `region`, ascending by release timestamp.
    /// Ties keep collection (id) order.
    fn chronological(&self, region: Region) -> Vec<&Operator>;

    /// SHA-256 of the dataset this repository was built from.
    fn checksum(&self) -> &str;

    /// Look up one operator by id.
    fn operator(&self, id: &str) -> RepositoryResult<&Operator> {
        self.operators().get(id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Operator '{}' does not exist", id),
                ErrorContext::new("operator")
                    .with_entity("operator")
                    .with_entity_id(id),
            )
        })
    }

    /// Number of banners on record for `region`.
    fn banner_count(&self, region: Region) -> usize {
        self.banners(region).len()
    }

    /// Operators of the most recent release batch in `region`, ordered by
    /// rarity descending then name.
    fn latest_operators(&self, region: Region) -> Vec<&Operator> {
        let ordered = self.chronological(region);
        let Some(latest) = ordered.last().and_then(|op| op.released(region)) else {
            return Vec::new();
        };
        let mut batch: Vec<&Operator> = ordered
            .into_iter()
            .rev()
            .take_while(|op| op.released(region) == Some(latest))
            .collect();
        batch.sort_by(|a, b| b.rarity.cmp(&a.rarity).then_with(|| a.name.cmp(&b.name)));
        batch
    }
}
