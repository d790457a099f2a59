//! Image path lookup for portraits, class icons and faction emblems.
//!
//! The lookup document is keyed first by context, then by name:
//! `{ "portraits": { "Amiya": "img/portraits/amiya.png" }, "classes": {...} }`.
//! Operator ids and names produced by the services are the join keys.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};

/// Which family of images a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageContext {
    Portraits,
    Classes,
    Factions,
}

impl ImageContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageContext::Portraits => "portraits",
            ImageContext::Classes => "classes",
            ImageContext::Factions => "factions",
        }
    }
}

impl FromStr for ImageContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portraits" => Ok(ImageContext::Portraits),
            "classes" => Ok(ImageContext::Classes),
            "factions" => Ok(ImageContext::Factions),
            other => Err(format!("Unknown image context '{}'", other)),
        }
    }
}

/// Static `(context, name) -> relative path` map.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    entries: HashMap<ImageContext, HashMap<String, String>>,
}

impl ImageIndex {
    pub fn from_json_str(content: &str) -> RepositoryResult<Self> {
        let de = &mut serde_json::Deserializer::from_str(content);
        let raw: HashMap<String, HashMap<String, String>> =
            serde_path_to_error::deserialize(&mut *de).map_err(|e| {
                RepositoryError::parse_with_context(
                    e.inner().to_string(),
                    ErrorContext::new("load_images")
                        .with_entity("images")
                        .with_details(format!("path={}", e.path())),
                )
            })?;

        let mut entries = HashMap::new();
        for (context, names) in raw {
            match context.parse::<ImageContext>() {
                Ok(ctx) => {
                    entries.insert(ctx, names);
                }
                Err(e) => warn!("{}; skipping {} entries", e, names.len()),
            }
        }
        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RepositoryError::ConfigurationError {
            message: format!("Failed to read image map: {}", e),
            context: ErrorContext::new("load_images").with_entity_id(path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Resolve an image path; unknown pairs are `NotFound`.
    pub fn resolve(&self, context: ImageContext, name: &str) -> RepositoryResult<&str> {
        self.try_resolve(context, name).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Image could not be found",
                ErrorContext::new("resolve_image")
                    .with_entity(context.as_str())
                    .with_entity_id(name),
            )
        })
    }

    /// Resolve an image path, for renderers that fall back to plain text.
    pub fn try_resolve(&self, context: ImageContext, name: &str) -> Option<&str> {
        self.entries
            .get(&context)
            .and_then(|names| names.get(name))
            .map(String::as_str)
    }

    /// Total number of entries across all contexts.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: &str = r#"{
        "portraits": {"Amiya": "img/portraits/amiya.png"},
        "classes": {"Caster": "img/classes/caster.png"},
        "factions": {"Rhodes Island": "img/factions/rhodes.png"},
        "skins": {"Amiya": "img/skins/amiya.png"}
    }"#;

    #[test]
    fn test_resolve_known_pair() {
        let index = ImageIndex::from_json_str(IMAGES).unwrap();
        assert_eq!(
            index.resolve(ImageContext::Portraits, "Amiya").unwrap(),
            "img/portraits/amiya.png"
        );
        assert_eq!(
            index.try_resolve(ImageContext::Classes, "Caster"),
            Some("img/classes/caster.png")
        );
    }

    #[test]
    fn test_resolve_unknown_pair_is_not_found() {
        let index = ImageIndex::from_json_str(IMAGES).unwrap();
        let err = index.resolve(ImageContext::Factions, "Nowhere").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(err.context().entity.as_deref(), Some("factions"));
        assert_eq!(err.context().entity_id.as_deref(), Some("Nowhere"));
    }

    #[test]
    fn test_context_is_part_of_key() {
        let index = ImageIndex::from_json_str(IMAGES).unwrap();
        assert!(index.try_resolve(ImageContext::Classes, "Amiya").is_none());
    }

    #[test]
    fn test_unknown_context_skipped() {
        let index = ImageIndex::from_json_str(IMAGES).unwrap();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = ImageIndex::from_json_str(r#"{"portraits": {"Amiya": 3}}"#).unwrap_err();
        assert!(matches!(err, RepositoryError::ParseError { .. }));
        let details = err.context().details.clone().unwrap_or_default();
        assert!(details.contains("portraits.Amiya"), "details: {}", details);
    }
}
