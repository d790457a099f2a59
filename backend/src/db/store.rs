//! In-memory record store.
//!
//! Holds the parsed dataset for the lifetime of the process together with the
//! per-region chronological index. Nothing here mutates after construction.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use super::checksum::calculate_checksum;
use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use super::repository::DataRepository;
use crate::models::{BannerCategory, BannerInfo, Operator, Region};

/// The dataset document as shipped with the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub operators: BTreeMap<String, Operator>,
    /// Banners keyed by region code (`"EN"`, `"CN"`).
    #[serde(default)]
    pub banners: BTreeMap<String, Vec<BannerInfo>>,
}

/// Immutable store of operators and banners.
#[derive(Debug, Clone)]
pub struct RecordStore {
    operators: BTreeMap<String, Operator>,
    banners: BTreeMap<Region, Vec<BannerInfo>>,
    chronology: BTreeMap<Region, Vec<String>>,
    checksum: String,
}

impl RecordStore {
    /// Parse and validate a dataset document.
    pub fn from_json_str(content: &str) -> RepositoryResult<Self> {
        let de = &mut serde_json::Deserializer::from_str(content);
        let dataset: Dataset = serde_path_to_error::deserialize(&mut *de).map_err(|e| {
            RepositoryError::parse_with_context(
                e.inner().to_string(),
                ErrorContext::new("load_dataset")
                    .with_entity("dataset")
                    .with_details(format!("path={}", e.path())),
            )
        })?;
        de.end().map_err(|e| {
            RepositoryError::parse_with_context(
                e.to_string(),
                ErrorContext::new("load_dataset").with_entity("dataset"),
            )
        })?;

        Self::build(dataset, calculate_checksum(content))
    }

    /// Read a dataset document from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> RepositoryResult<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| {
            RepositoryError::parse_with_context(
                format!("Failed to read dataset: {}", e),
                ErrorContext::new("load_dataset").with_entity("dataset"),
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Load a dataset document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigurationError {
                message: format!("Failed to read dataset file: {}", e),
                context: ErrorContext::new("load_dataset")
                    .with_entity("dataset")
                    .with_entity_id(path.display()),
            }
        })?;
        info!("Loading dataset from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Build a store from already decoded records.
    pub fn from_dataset(dataset: Dataset) -> RepositoryResult<Self> {
        let serialized = serde_json::to_string(&dataset).map_err(|e| {
            RepositoryError::parse_with_context(
                e.to_string(),
                ErrorContext::new("from_dataset").with_entity("dataset"),
            )
        })?;
        Self::build(dataset, calculate_checksum(&serialized))
    }

    /// Build a store from a list of operators and per-region banners.
    pub fn from_records<I>(
        operators: I,
        banners: BTreeMap<Region, Vec<BannerInfo>>,
    ) -> RepositoryResult<Self>
    where
        I: IntoIterator<Item = Operator>,
    {
        let dataset = Dataset {
            operators: operators
                .into_iter()
                .map(|op| (op.id.clone(), op))
                .collect(),
            banners: banners
                .into_iter()
                .map(|(region, list)| (region.code().to_string(), list))
                .collect(),
        };
        Self::from_dataset(dataset)
    }

    fn build(dataset: Dataset, checksum: String) -> RepositoryResult<Self> {
        let mut operators = dataset.operators;
        for (id, op) in operators.iter_mut() {
            if op.id.is_empty() {
                op.id = id.clone();
            }
            validate_operator(op)?;
        }

        let mut banners = BTreeMap::new();
        for (code, list) in dataset.banners {
            let region: Region = code.parse().map_err(|e: String| {
                RepositoryError::validation_with_context(
                    e,
                    ErrorContext::new("load_dataset").with_entity("banners"),
                )
            })?;
            for banner in &list {
                validate_banner(banner, "banners", region.code())?;
            }
            banners.insert(region, list);
        }

        let chronology = Region::ALL
            .iter()
            .map(|&region| (region, build_chronology(&operators, region)))
            .collect::<BTreeMap<_, _>>();

        info!(
            "Dataset loaded: {} operators, {} EN banners, {} CN banners (checksum {})",
            operators.len(),
            banners.get(&Region::En).map_or(0, Vec::len),
            banners.get(&Region::Cn).map_or(0, Vec::len),
            &checksum[..checksum.len().min(12)]
        );

        Ok(Self {
            operators,
            banners,
            chronology,
            checksum,
        })
    }

    /// Number of operators on record.
    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }
}

impl DataRepository for RecordStore {
    fn operators(&self) -> &BTreeMap<String, Operator> {
        &self.operators
    }

    fn banners(&self, region: Region) -> &[BannerInfo] {
        self.banners.get(&region).map_or(&[], Vec::as_slice)
    }

    fn chronological(&self, region: Region) -> Vec<&Operator> {
        self.chronology
            .get(&region)
            .map(|ids| ids.iter().filter_map(|id| self.operators.get(id)).collect())
            .unwrap_or_default()
    }

    fn checksum(&self) -> &str {
        &self.checksum
    }
}

fn build_chronology(operators: &BTreeMap<String, Operator>, region: Region) -> Vec<String> {
    let mut released: Vec<(&String, i64)> = operators
        .iter()
        .filter_map(|(id, op)| op.released(region).map(|ts| (id, ts.millis())))
        .collect();
    // Stable: ties keep id order.
    released.sort_by_key(|&(_, ts)| ts);
    debug!(
        "Chronological index for {}: {} of {} operators",
        region,
        released.len(),
        operators.len()
    );
    released.into_iter().map(|(id, _)| id.clone()).collect()
}

fn validate_operator(op: &Operator) -> RepositoryResult<()> {
    let context = || {
        ErrorContext::new("load_dataset")
            .with_entity("operator")
            .with_entity_id(&op.id)
    };

    if !(1..=6).contains(&op.rarity) {
        return Err(RepositoryError::validation_with_context(
            format!("rarity must be between 1 and 6, got {}", op.rarity),
            context(),
        ));
    }
    if !op.is_released_anywhere() {
        return Err(RepositoryError::validation_with_context(
            "operator has no release in any region",
            context(),
        ));
    }
    for region in Region::ALL {
        match op.released(region) {
            None => warn!("Operator '{}' is not released in {}", op.id, region),
            Some(ts) if !ts.is_representable() => {
                return Err(RepositoryError::validation_with_context(
                    format!(
                        "{} release timestamp {} is outside the calendar range",
                        region,
                        ts.millis()
                    ),
                    context(),
                ));
            }
            Some(_) => {}
        }
    }

    for region in Region::ALL {
        for category in BannerCategory::ALL {
            let appearances = op.appearances(region, category);
            for banner in appearances {
                validate_banner(banner, "operator", &op.id)?;
            }
            if appearances.windows(2).any(|w| w[0].start > w[1].start) {
                return Err(RepositoryError::validation_with_context(
                    format!(
                        "{} {} appearances are not in chronological order",
                        region, category
                    ),
                    context(),
                ));
            }
        }
    }
    Ok(())
}

fn validate_banner(banner: &BannerInfo, entity: &str, owner: &str) -> RepositoryResult<()> {
    if !banner.start.is_representable() || !banner.end.is_representable() {
        return Err(RepositoryError::validation_with_context(
            format!(
                "banner '{}' has a timestamp outside the calendar range ({}..{})",
                banner.title,
                banner.start.millis(),
                banner.end.millis()
            ),
            ErrorContext::new("load_dataset")
                .with_entity(entity)
                .with_entity_id(owner),
        ));
    }
    if banner.start > banner.end {
        return Err(RepositoryError::validation_with_context(
            format!(
                "banner '{}' ends before it starts ({} > {})",
                banner.title,
                banner.start.millis(),
                banner.end.millis()
            ),
            ErrorContext::new("load_dataset")
                .with_entity(entity)
                .with_entity_id(owner),
        ));
    }
    if banner.is_shop_debut() && !banner.is_rotating {
        warn!(
            "Banner '{}' lists a shop debut but is not rotating; it is ignored by debut analysis",
            banner.title
        );
    }
    Ok(())
}
