//! Product domain types.
//!
//! [`Product`] is the stored record. [`NewProduct`] is the creation input
//! (everything except the id) and [`ProductUpdate`] is an explicit partial
//! update: each `Some` field replaces the stored value, each `None` keeps it.
//!
//! The store never validates business rules. Callers run
//! [`NewProduct::validate`] or [`ProductUpdate::validate_against`] first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::category::{Category, UnknownCategory};
use super::id::ProductId;
use super::price::MAX_DISCOUNT;

/// Errors for caller-supplied product data that violates a required shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The category is not one of the known categories.
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// The subcategory does not belong to the category.
    #[error("subcategory '{subcategory}' is not valid for category '{category}'")]
    InvalidSubcategory {
        category: Category,
        subcategory: String,
    },

    /// The discount is not a percentage between 0 and 100.
    #[error("discount must be between 0 and {MAX_DISCOUNT}, got {0}")]
    DiscountOutOfRange(u8),

    /// A numeric field could not be parsed as a non-negative integer.
    #[error("{field} must be a non-negative integer, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The sort option is not recognised.
    #[error("unknown sort option: {0}")]
    UnknownSort(String),
}

/// A catalog product as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub subcategory: String,
    pub image_url: String,
    /// Manufacturer retail price.
    pub mrp: u32,
    /// Discount percentage, 0-100.
    pub discount: u8,
    pub final_price: u32,
}

/// Input for creating a product. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub subcategory: String,
    pub image_url: String,
    pub mrp: u32,
    pub discount: u8,
    pub final_price: u32,
}

impl NewProduct {
    /// Attach an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            image_url: self.image_url,
            mrp: self.mrp,
            discount: self.discount,
            final_price: self.final_price,
        }
    }

    /// Check required fields, the discount range and the category pairing.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("imageUrl", &self.image_url)?;
        check_discount(self.discount)?;
        check_subcategory(self.category, &self.subcategory)
    }
}

/// Partial update for a product. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<u32>,
}

impl ProductUpdate {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.image_url.is_none()
            && self.mrp.is_none()
            && self.discount.is_none()
            && self.final_price.is_none()
    }

    /// Merge this update into `product`, field by field.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(subcategory) = self.subcategory {
            product.subcategory = subcategory;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(mrp) = self.mrp {
            product.mrp = mrp;
        }
        if let Some(discount) = self.discount {
            product.discount = discount;
        }
        if let Some(final_price) = self.final_price {
            product.final_price = final_price;
        }
    }

    /// Validate the update as it would apply to `existing`.
    ///
    /// The category/subcategory pairing is checked on the merged result, so
    /// changing only the subcategory is checked against the stored category.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate_against(&self, existing: &Product) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(image_url) = &self.image_url {
            require_text("imageUrl", image_url)?;
        }
        if let Some(discount) = self.discount {
            check_discount(discount)?;
        }
        if self.category.is_some() || self.subcategory.is_some() {
            let category = self.category.unwrap_or(existing.category);
            let subcategory = self.subcategory.as_deref().unwrap_or(&existing.subcategory);
            check_subcategory(category, subcategory)?;
        }
        Ok(())
    }
}

/// Ordering options for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    /// Insertion order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    /// Sort `products` in place. The sort is stable, so ties keep insertion order.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by_key(|p| p.final_price),
            Self::PriceDesc => products.sort_by(|a, b| b.final_price.cmp(&a.final_price)),
            Self::NameAsc => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
            Self::NameDesc => products.sort_by(|a, b| compare_names(&b.name, &a.name)),
        }
    }
}

impl std::str::FromStr for ProductSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            other => Err(ValidationError::UnknownSort(other.to_owned())),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

const fn check_discount(discount: u8) -> Result<(), ValidationError> {
    if discount > MAX_DISCOUNT {
        return Err(ValidationError::DiscountOutOfRange(discount));
    }
    Ok(())
}

fn check_subcategory(category: Category, subcategory: &str) -> Result<(), ValidationError> {
    if !category.has_subcategory(subcategory) {
        return Err(ValidationError::InvalidSubcategory {
            category,
            subcategory: subcategory.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lamp() -> NewProduct {
        NewProduct {
            name: "Lamp".to_string(),
            description: "Warm reading lamp".to_string(),
            category: Category::Furniture,
            subcategory: "chairs".to_string(),
            image_url: "/uploads/lamp.png".to_string(),
            mrp: 100,
            discount: 20,
            final_price: 80,
        }
    }

    #[test]
    fn test_new_product_validates() {
        assert_eq!(lamp().validate(), Ok(()));
    }

    #[test]
    fn test_new_product_rejects_blank_name() {
        let mut product = lamp();
        product.name = "   ".to_string();
        assert_eq!(
            product.validate(),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_new_product_rejects_foreign_subcategory() {
        let mut product = lamp();
        product.subcategory = "laptops".to_string();
        assert!(matches!(
            product.validate(),
            Err(ValidationError::InvalidSubcategory { .. })
        ));
    }

    #[test]
    fn test_new_product_rejects_discount_over_100() {
        let mut product = lamp();
        product.discount = 101;
        assert_eq!(
            product.validate(),
            Err(ValidationError::DiscountOutOfRange(101))
        );
    }

    #[test]
    fn test_update_only_touches_set_fields() {
        let mut product = lamp().with_id(ProductId::new(1));
        let before = product.clone();

        ProductUpdate {
            name: Some("X".to_string()),
            ..ProductUpdate::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.name, "X");
        assert_eq!(product.description, before.description);
        assert_eq!(product.category, before.category);
        assert_eq!(product.subcategory, before.subcategory);
        assert_eq!(product.image_url, before.image_url);
        assert_eq!(product.mrp, before.mrp);
        assert_eq!(product.discount, before.discount);
        assert_eq!(product.final_price, before.final_price);
        assert_eq!(product.id, before.id);
    }

    #[test]
    fn test_update_checks_merged_category_pair() {
        let existing = lamp().with_id(ProductId::new(1));

        let subcategory_only = ProductUpdate {
            subcategory: Some("sofas".to_string()),
            ..ProductUpdate::default()
        };
        assert_eq!(subcategory_only.validate_against(&existing), Ok(()));

        let category_only = ProductUpdate {
            category: Some(Category::Electronics),
            ..ProductUpdate::default()
        };
        assert!(category_only.validate_against(&existing).is_err());

        let both = ProductUpdate {
            category: Some(Category::Electronics),
            subcategory: Some("tablets".to_string()),
            ..ProductUpdate::default()
        };
        assert_eq!(both.validate_against(&existing), Ok(()));
    }

    #[test]
    fn test_update_deserializes_partial_camel_case() {
        let update: ProductUpdate =
            serde_json::from_str(r#"{"finalPrice": 70, "discount": 30}"#).unwrap();
        assert_eq!(update.final_price, Some(70));
        assert_eq!(update.discount, Some(30));
        assert!(update.name.is_none());
        assert!(!update.is_empty());
        assert!(ProductUpdate::default().is_empty());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(lamp().with_id(ProductId::new(9))).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["imageUrl"], "/uploads/lamp.png");
        assert_eq!(json["finalPrice"], 80);
        assert_eq!(json["category"], "furniture");
    }

    #[test]
    fn test_sort_options() {
        let mut products = vec![
            lamp().with_id(ProductId::new(1)),
            NewProduct {
                name: "bed".to_string(),
                final_price: 500,
                ..lamp()
            }
            .with_id(ProductId::new(2)),
            NewProduct {
                name: "Chair".to_string(),
                final_price: 20,
                ..lamp()
            }
            .with_id(ProductId::new(3)),
        ];

        ProductSort::PriceAsc.apply(&mut products);
        let ids: Vec<i32> = products.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        ProductSort::NameAsc.apply(&mut products);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["bed", "Chair", "Lamp"]);

        ProductSort::PriceDesc.apply(&mut products);
        assert_eq!(products.first().unwrap().final_price, 500);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("".parse::<ProductSort>(), Ok(ProductSort::Default));
        assert_eq!("name-desc".parse::<ProductSort>(), Ok(ProductSort::NameDesc));
        assert!("cheapest".parse::<ProductSort>().is_err());
    }
}
