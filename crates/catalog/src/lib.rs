use std::{collections::HashMap, fmt, fs, path::Path, str::FromStr};

use serde::Deserialize;
use shared::{
    domain::{Category, ItemId, MenuItem, ParseCategoryError},
    error::CatalogError,
};
use thiserror::Error;
use tracing::info;

/// Immutable, ordered menu catalog. Construction validates the input once
/// (unique ids, non-negative prices); lookups trust the invariants after
/// that.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
    index: HashMap<ItemId, usize>,
}

/// Which catalog subset the presentation layer is asked to render. Exactly
/// one filter is active at a time; selecting one never touches cart state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuFilter {
    #[default]
    All,
    Category(Category),
}

impl MenuFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            MenuFilter::All => true,
            MenuFilter::Category(selected) => selected == category,
        }
    }
}

impl fmt::Display for MenuFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuFilter::All => f.write_str("all"),
            MenuFilter::Category(category) => f.write_str(category.as_str()),
        }
    }
}

impl FromStr for MenuFilter {
    type Err = ParseCategoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "all" {
            return Ok(MenuFilter::All);
        }
        raw.parse::<Category>().map(MenuFilter::Category)
    }
}

#[derive(Debug, Error)]
pub enum MenuLoadError {
    #[error("failed to read menu file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse menu document")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct MenuDocument {
    #[serde(rename = "item", default)]
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Parses a `[[item]]` menu document, the external catalog input
    /// supplied once at startup.
    pub fn from_toml_str(raw: &str) -> Result<Self, MenuLoadError> {
        let document: MenuDocument = toml::from_str(raw)?;
        Ok(Self::new(document.items)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuLoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| MenuLoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            items = catalog.len(),
            "loaded menu catalog"
        );
        Ok(catalog)
    }

    pub fn lookup(&self, id: &ItemId) -> Option<&MenuItem> {
        self.index.get(id).map(|position| &self.items[*position])
    }

    /// Original catalog index of an item, used to keep cart lines in
    /// catalog order within a category.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn filter(&self, filter: MenuFilter) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| filter.matches(item.category))
            .collect()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
