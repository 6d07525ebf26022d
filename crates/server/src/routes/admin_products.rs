//! Admin catalog management route handlers.
//!
//! Every handler takes `RequireAdminAuth`, so unauthenticated calls are
//! rejected before the request body is read.

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection, rejection::JsonRejection},
};
use serde_json::{Value, json};
use tracing::{info, instrument};

use showroom_core::{Category, NewProduct, Product, ProductUpdate, ValidationError, final_price};

use super::products::parse_product_id;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::{ImageUpload, save_image, uploads::UPLOADS_URL_PREFIX};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Fields of the multipart product form, as received.
///
/// Numeric fields arrive as text and are parsed in [`ProductForm::into_new_product`].
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub mrp: Option<String>,
    pub discount: Option<String>,
    pub final_price: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Read every field of a multipart product form.
    ///
    /// Unknown fields are ignored. An `image` part with no content counts as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the multipart stream is malformed or too large.
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image" {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let slot = match name.as_str() {
                "name" => &mut form.name,
                "description" => &mut form.description,
                "category" => &mut form.category,
                "subcategory" => &mut form.subcategory,
                "mrp" => &mut form.mrp,
                "discount" => &mut form.discount,
                "finalPrice" => &mut form.final_price,
                "imageUrl" => &mut form.image_url,
                _ => continue,
            };
            *slot = Some(field.text().await?);
        }

        Ok(form)
    }

    /// Whether the form carries an image file or a usable image URL.
    fn has_image(&self) -> bool {
        self.image.is_some() || self.image_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }

    /// Parse and validate the text fields into a product.
    ///
    /// `finalPrice` is computed from `mrp` and `discount` when absent. When an
    /// image file is attached the returned product carries a placeholder
    /// image URL until the file is stored.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn into_new_product(self) -> std::result::Result<(NewProduct, Option<ImageUpload>), ValidationError> {
        if !self.has_image() {
            return Err(ValidationError::MissingField("image"));
        }

        let name = required("name", self.name)?;
        let category = required("category", self.category)?.parse::<Category>()?;
        let subcategory = required("subcategory", self.subcategory)?;
        let mrp = parse_number::<u32>("mrp", &required("mrp", self.mrp)?)?;
        let discount = parse_number::<u8>("discount", &required("discount", self.discount)?)?;
        let final_price = match self.final_price.filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_number::<u32>("finalPrice", &raw)?,
            None => final_price(mrp, discount),
        };

        let image_url = match (&self.image, self.image_url) {
            (Some(_), _) => format!("{UPLOADS_URL_PREFIX}/pending"),
            (None, url) => url.unwrap_or_default(),
        };

        let product = NewProduct {
            name,
            description: self.description.unwrap_or_default(),
            category,
            subcategory,
            image_url,
            mrp,
            discount,
            final_price,
        };
        product.validate()?;

        Ok((product, self.image))
    }
}

/// Validate `changes` against the current record and fill in `finalPrice`.
///
/// When `mrp` or `discount` changes without an explicit `finalPrice`, the
/// final price is recomputed from the merged values.
fn prepare_update(
    mut changes: ProductUpdate,
    existing: &Product,
) -> std::result::Result<ProductUpdate, ValidationError> {
    changes.validate_against(existing)?;

    if changes.final_price.is_none() && (changes.mrp.is_some() || changes.discount.is_some()) {
        changes.final_price = Some(final_price(
            changes.mrp.unwrap_or(existing.mrp),
            changes.discount.unwrap_or(existing.discount),
        ));
    }

    Ok(changes)
}

fn required(field: &'static str, value: Option<String>) -> std::result::Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> std::result::Result<T, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a product from a multipart form.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Product>> {
    let form = ProductForm::read(multipart?).await?;
    let (mut input, image) = form.into_new_product()?;

    if let Some(upload) = image {
        input.image_url = save_image(&state.config().uploads_dir, &upload).await?;
    }

    let product = state.products().create(input).await?;
    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(Json(product))
}

/// Apply a partial update to a product.
///
/// Validation runs under the store's write lock against the record being
/// merged into.
#[instrument(skip_all, fields(admin_id = %admin.id, product_id = %id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Product>> {
    let id = parse_product_id(&id)?;
    let Json(changes) = payload?;

    let product = state
        .products()
        .update_with(id, |existing| {
            prepare_update(changes, existing).map_err(AppError::from)
        })
        .await?;
    info!("Product updated");

    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip_all, fields(admin_id = %admin.id, product_id = %id))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_product_id(&id)?;
    state.products().delete(id).await?;
    info!("Product deleted");

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
