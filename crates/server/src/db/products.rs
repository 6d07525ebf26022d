//! Product store.
//!
//! Holds the catalog in insertion order. Ids come from a counter that only
//! moves forward, so an id is never reissued after its product is deleted.

use tokio::sync::RwLock;

use showroom_core::{NewProduct, Product, ProductId, ProductUpdate};

use super::RepositoryError;

/// In-memory product store.
#[derive(Debug)]
pub struct ProductStore {
    table: RwLock<ProductTable>,
}

#[derive(Debug)]
struct ProductTable {
    /// Next id to hand out. Never derived from `products.len()`.
    next_id: i32,
    products: Vec<Product>,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Create an empty store. The first product gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ProductTable {
                next_id: 1,
                products: Vec::new(),
            }),
        }
    }

    /// List all products in insertion order.
    pub async fn list_all(&self) -> Vec<Product> {
        self.table.read().await.products.clone()
    }

    /// List products with an exact category match and, when given, an exact
    /// subcategory match.
    ///
    /// An unknown category simply matches nothing.
    pub async fn list_by_category(&self, category: &str, subcategory: Option<&str>) -> Vec<Product> {
        self.table
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.category.as_str() == category)
            .filter(|p| subcategory.is_none_or(|sub| p.subcategory == sub))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// The query is trimmed first; a blank query matches nothing.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.table
            .read()
            .await
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.table
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    /// Store a new product under a fresh id and return the stored record.
    ///
    /// No business rules are checked here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id space is exhausted.
    pub async fn create(&self, input: NewProduct) -> Result<Product, RepositoryError> {
        let mut table = self.table.write().await;

        let id = ProductId::new(table.next_id);
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Conflict("product id space exhausted".to_string()))?;

        let product = input.with_id(id);
        table.products.push(product.clone());
        Ok(product)
    }

    /// Merge `update` into the stored product and return the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        self.update_with(id, |_| Ok::<_, RepositoryError>(update))
            .await
    }

    /// Build an update from the current record and merge it, all under one
    /// write lock.
    ///
    /// `build` sees the record exactly as the merge will, so checks made
    /// against it cannot be invalidated by a concurrent writer. If `build`
    /// fails the record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` (converted into `E`) if no product
    /// has this id, or the error returned by `build`.
    pub async fn update_with<F, E>(&self, id: ProductId, build: F) -> Result<Product, E>
    where
        F: FnOnce(&Product) -> Result<ProductUpdate, E>,
        E: From<RepositoryError>,
    {
        let mut table = self.table.write().await;
        let product = table
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let update = build(product)?;
        update.apply_to(product);
        Ok(product.clone())
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id, including
    /// when it was already deleted.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        let index = table
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        table.products.remove(index);
        Ok(())
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.table.read().await.products.len()
    }

    /// Whether the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use showroom_core::Category;

    use super::*;

    fn product(name: &str, category: Category, subcategory: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            category,
            subcategory: subcategory.to_string(),
            image_url: format!("/uploads/{name}.png"),
            mrp: 100,
            discount: 20,
            final_price: 80,
        }
    }

    async fn store_with_catalog() -> ProductStore {
        let store = ProductStore::new();
        store
            .create(NewProduct {
                description: "Elegant and comfortable modern sofa".to_string(),
                ..product("Modern Sofa", Category::Furniture, "sofas")
            })
            .await
            .unwrap();
        store
            .create(product("Minimalist Chair", Category::Furniture, "chairs"))
            .await
            .unwrap();
        store
            .create(product("Premium Laptop", Category::Electronics, "laptops"))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_lists_once() {
        let store = ProductStore::new();
        let input = product("Lamp", Category::Furniture, "chairs");

        let created = store.create(input.clone()).await.unwrap();
        assert_eq!(created.id, ProductId::new(1));
        assert_eq!(created, input.with_id(created.id));

        let all = store.list_all().await;
        assert_eq!(all.iter().filter(|p| **p == created).count(), 1);
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let store = store_with_catalog().await;
        let names: Vec<String> = store.list_all().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Modern Sofa", "Minimalist Chair", "Premium Laptop"]);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let store = ProductStore::new();
        let mut seen = HashSet::new();

        for round in 0..5 {
            let created = store
                .create(product(&format!("Item {round}"), Category::Furniture, "beds"))
                .await
                .unwrap();
            assert!(seen.insert(created.id), "id {} reissued", created.id);
            // Delete the last element, the case that breaks length-derived ids
            store.delete(created.id).await.unwrap();
        }

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_by_category_and_subcategory() {
        let store = store_with_catalog().await;

        let furniture = store.list_by_category("furniture", None).await;
        assert_eq!(furniture.len(), 2);
        assert!(furniture.iter().all(|p| p.category == Category::Furniture));

        let chairs = store.list_by_category("furniture", Some("chairs")).await;
        assert_eq!(chairs.len(), 1);
        assert!(
            chairs
                .iter()
                .all(|p| p.category == Category::Furniture && p.subcategory == "chairs")
        );

        let mismatched = store.list_by_category("electronics", Some("chairs")).await;
        assert!(mismatched.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_unknown_category_is_empty() {
        let store = store_with_catalog().await;
        assert!(store.list_by_category("toys", None).await.is_empty());
        assert!(store.list_by_category("Furniture", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_trimmed() {
        let store = store_with_catalog().await;

        let upper = store.search("SOFA").await;
        let lower = store.search("sofa").await;
        let padded = store.search("  sofa  ").await;
        assert_eq!(upper, lower);
        assert_eq!(lower, padded);
        assert_eq!(lower.len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_description() {
        let store = store_with_catalog().await;
        let results = store.search("comfortable").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "Modern Sofa");
    }

    #[tokio::test]
    async fn test_blank_search_matches_nothing() {
        let store = store_with_catalog().await;
        assert!(store.search("").await.is_empty());
        assert!(store.search(" \t ").await.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = store_with_catalog().await;
        let before = store.get(ProductId::new(2)).await.unwrap();

        let after = store
            .update(
                ProductId::new(2),
                ProductUpdate {
                    name: Some("X".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(after.name, "X");
        assert_eq!(
            Product {
                name: before.name.clone(),
                ..after.clone()
            },
            before
        );
        assert_eq!(store.get(ProductId::new(2)).await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_update_after_delete_is_not_found() {
        let store = store_with_catalog().await;
        store.delete(ProductId::new(1)).await.unwrap();

        let result = store
            .update(
                ProductId::new(1),
                ProductUpdate {
                    name: Some("X".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;
        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_twice_fails_second_time() {
        let store = store_with_catalog().await;
        assert_eq!(store.delete(ProductId::new(3)).await, Ok(()));
        assert_eq!(
            store.delete(ProductId::new(3)).await,
            Err(RepositoryError::NotFound)
        );
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = ProductStore::new();
        assert_eq!(
            store.get(ProductId::new(99)).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_lamp_scenario() {
        let store = store_with_catalog().await;
        let lamp = store
            .create(product("Lamp", Category::Furniture, "chairs"))
            .await
            .unwrap();
        assert_eq!(lamp.id, ProductId::new(4));

        let chairs = store.list_by_category("furniture", Some("chairs")).await;
        assert!(chairs.contains(&lamp));

        let electronics = store.list_by_category("electronics", None).await;
        assert!(!electronics.contains(&lamp));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(ProductStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(product(&format!("P{i}"), Category::Electronics, "tablets"))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.len().await, 32);
    }

    #[tokio::test]
    async fn test_update_with_rejection_leaves_record_untouched() {
        let store = store_with_catalog().await;
        let before = store.get(ProductId::new(2)).await.unwrap();

        let result = store
            .update_with(ProductId::new(2), |_| {
                Err::<ProductUpdate, _>(RepositoryError::Conflict("rejected".to_string()))
            })
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(store.get(ProductId::new(2)).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_with_sees_prior_writer() {
        let store = store_with_catalog().await;
        let chair = ProductId::new(2);

        // Another admin moves the chair to electronics/laptops first
        store
            .update(
                chair,
                ProductUpdate {
                    category: Some(Category::Electronics),
                    subcategory: Some("laptops".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();

        // A subcategory-only change is checked against the current category
        let sofas = ProductUpdate {
            subcategory: Some("sofas".to_string()),
            ..ProductUpdate::default()
        };
        let result = store
            .update_with(chair, |existing| {
                sofas
                    .validate_against(existing)
                    .map(|()| sofas.clone())
                    .map_err(|_| RepositoryError::Conflict("invalid pair".to_string()))
            })
            .await;
        assert!(result.is_err());

        let stored = store.get(chair).await.unwrap();
        assert_eq!(stored.category, Category::Electronics);
        assert_eq!(stored.subcategory, "laptops");
    }

    #[tokio::test]
    async fn test_interleaved_validated_updates_keep_pairs_consistent() {
        let store = Arc::new(store_with_catalog().await);
        let chair = ProductId::new(2);

        let updates = [
            ProductUpdate {
                category: Some(Category::Electronics),
                subcategory: Some("laptops".to_string()),
                ..ProductUpdate::default()
            },
            ProductUpdate {
                subcategory: Some("sofas".to_string()),
                ..ProductUpdate::default()
            },
            ProductUpdate {
                category: Some(Category::Furniture),
                subcategory: Some("beds".to_string()),
                ..ProductUpdate::default()
            },
            ProductUpdate {
                subcategory: Some("tablets".to_string()),
                ..ProductUpdate::default()
            },
        ];

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                let changes = updates[i % updates.len()].clone();
                tokio::spawn(async move {
                    let _ = store
                        .update_with(chair, |existing| {
                            changes
                                .validate_against(existing)
                                .map(|()| changes.clone())
                                .map_err(|_| RepositoryError::Conflict("invalid".to_string()))
                        })
                        .await;
                    let stored = store.get(chair).await.unwrap();
                    assert!(
                        stored.category.has_subcategory(&stored.subcategory),
                        "invalid pair stored: {}/{}",
                        stored.category,
                        stored.subcategory
                    );
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
    }
}
