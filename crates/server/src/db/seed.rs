//! Catalog seeding from YAML.
//!
//! The built-in demo catalog is compiled into the binary; a different file
//! can be supplied through `SHOWROOM_SEED_FILE`. Every entry is validated
//! the same way admin input is, and one bad entry rejects the whole file.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use showroom_core::{NewProduct, ValidationError};

use super::{ProductStore, RepositoryError};

/// Built-in demo catalog.
pub const DEFAULT_CATALOG: &str = include_str!("../../seed/products.yaml");

/// Errors that can occur while seeding the catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The seed document is not a valid product list.
    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An entry failed product validation.
    #[error("seed entry {index} ({name}): {source}")]
    Invalid {
        index: usize,
        name: String,
        source: ValidationError,
    },

    /// The store rejected an entry.
    #[error("failed to store seed entry: {0}")]
    Store(#[from] RepositoryError),
}

/// Parse and validate a YAML product list.
///
/// # Errors
///
/// Returns `SeedError::Parse` for malformed YAML and `SeedError::Invalid`
/// for the first entry that fails validation.
pub fn parse_catalog(yaml: &str) -> Result<Vec<NewProduct>, SeedError> {
    let products: Vec<NewProduct> = serde_yaml::from_str(yaml)?;

    for (index, product) in products.iter().enumerate() {
        product.validate().map_err(|source| SeedError::Invalid {
            index,
            name: product.name.clone(),
            source,
        })?;
    }

    Ok(products)
}

/// Load the catalog from `file`, or the built-in one when `None`.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or does not validate.
pub async fn load_catalog(file: Option<&Path>) -> Result<Vec<NewProduct>, SeedError> {
    match file {
        Some(path) => {
            let yaml = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            parse_catalog(&yaml)
        }
        None => parse_catalog(DEFAULT_CATALOG),
    }
}

/// Insert every product into the store, returning how many were added.
///
/// # Errors
///
/// Returns `SeedError::Store` if the store rejects an entry.
pub async fn seed_products(
    store: &ProductStore,
    products: Vec<NewProduct>,
) -> Result<usize, SeedError> {
    let count = products.len();
    for product in products {
        store.create(product).await?;
    }
    info!(count, "Seeded catalog products");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use showroom_core::{Category, ProductId, final_price};

    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let products = parse_catalog(DEFAULT_CATALOG).unwrap();
        assert_eq!(products.len(), 5);

        let first = products.first().unwrap();
        assert_eq!(first.name, "Modern Sofa");
        assert_eq!(first.category, Category::Furniture);

        for product in &products {
            assert_eq!(
                product.final_price,
                final_price(product.mrp, product.discount),
                "{} has an inconsistent final price",
                product.name
            );
        }
    }

    #[test]
    fn test_invalid_entry_is_reported_with_index() {
        let yaml = r"
- name: Good Chair
  category: furniture
  subcategory: chairs
  imageUrl: /img/chair.png
  mrp: 10
  discount: 0
  finalPrice: 10
- name: Bad Tablet
  category: electronics
  subcategory: sofas
  imageUrl: /img/tablet.png
  mrp: 10
  discount: 0
  finalPrice: 10
";
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, SeedError::Invalid { index: 1, .. }));
        assert!(err.to_string().contains("Bad Tablet"));
    }

    #[test]
    fn test_unknown_category_is_a_parse_error() {
        let yaml = r"
- name: Robot
  category: toys
  subcategory: robots
  imageUrl: /img/robot.png
  mrp: 10
  discount: 0
  finalPrice: 10
";
        assert!(matches!(parse_catalog(yaml), Err(SeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_seed_products_fills_store() {
        let store = ProductStore::new();
        let products = load_catalog(None).await.unwrap();

        let count = seed_products(&store, products).await.unwrap();
        assert_eq!(count, 5);
        assert_eq!(store.len().await, 5);
        assert_eq!(
            store.get(ProductId::new(5)).await.unwrap().name,
            "Smartphone"
        );
    }

    #[tokio::test]
    async fn test_missing_seed_file_is_io_error() {
        let result = load_catalog(Some(Path::new("/nonexistent/showroom/seed.yaml"))).await;
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
