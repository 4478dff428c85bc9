//! Handlers for the `/v1/product` resource.
//!
//! Create and update take `multipart/form-data` (the image rides along with
//! the text fields). Binding failures (missing required fields, an
//! unparseable price or page) are rejected here with 400; everything past
//! the boundary is the service's business.

use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::service::product::{
    ImageUpload, NewProductInput, ProductPage, ProductView, SearchQuery, UpdateProductInput,
};
use crate::state::AppState;

/// Query parameters for the listing endpoint. `page` is bound as text so a
/// malformed value produces the standard envelope, not a rejection.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub barcode_id: Option<String>,
}

/// GET /v1/product?page=N
///
/// Paginated listing of the active catalog, 12 products per page.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let page: u64 = params
        .page
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter 'page'".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("'page' must be a non-negative integer".into()))?;

    let page_data = state.products.get_products(page).await?;
    Ok(ApiResponse::success("Success get all products", page_data))
}

/// GET /v1/product/search?title=&barcode_id=
///
/// Substring search on title and/or exact barcode match. At least one
/// non-empty filter is required.
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<ProductView>>>> {
    let query = SearchQuery {
        title: params.title.filter(|s| !s.is_empty()),
        barcode_id: params.barcode_id.filter(|s| !s.is_empty()),
    };
    if query.title.is_none() && query.barcode_id.is_none() {
        return Err(AppError::BadRequest(
            "Provide at least one of 'title' or 'barcode_id'".into(),
        ));
    }

    let products = state.products.search_products(&query).await?;
    Ok(ApiResponse::success("Success search products", products))
}

/// GET /v1/product/{barcode_id}
pub async fn get_product_detail(
    State(state): State<AppState>,
    Path(barcode_id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductView>>> {
    let product = state.products.get_product_detail(&barcode_id).await?;
    Ok(ApiResponse::success("Success get product detail", product))
}

/// POST /v1/product (multipart: barcode_id, image, title, price, description)
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let fields = ProductFields::collect(multipart).await?;

    let input = NewProductInput {
        barcode_id: fields.barcode_id.ok_or_else(|| missing("barcode_id"))?,
        image: fields.image.ok_or_else(|| missing("image"))?,
        title: fields.title.ok_or_else(|| missing("title"))?,
        price: fields.price.ok_or_else(|| missing("price"))?,
        description: fields.description.ok_or_else(|| missing("description"))?,
    };

    state.products.create_product(input).await?;
    Ok(ApiResponse::message_only("Success add product"))
}

/// PATCH /v1/product/{barcode_id} (multipart, all fields optional)
pub async fn update_product(
    State(state): State<AppState>,
    Path(barcode_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let fields = ProductFields::collect(multipart).await?;

    let input = UpdateProductInput {
        image: fields.image,
        title: fields.title,
        price: fields.price,
        description: fields.description,
    };

    state.products.update_product(&barcode_id, input).await?;
    Ok(ApiResponse::message_only("Success update product"))
}

/// DELETE /v1/product/{barcode_id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(barcode_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.products.delete_product(&barcode_id).await?;
    Ok(ApiResponse::message_only("Success delete product"))
}

// ── Multipart binding ────────────────────────────────────────────────────

/// The product form fields, as far as the request supplied them. Create
/// requires all of them; update takes any subset.
#[derive(Debug, Default)]
struct ProductFields {
    barcode_id: Option<String>,
    image: Option<ImageUpload>,
    title: Option<String>,
    price: Option<Decimal>,
    description: Option<String>,
}

impl ProductFields {
    /// Drain a multipart body into typed fields. Unknown fields are ignored.
    async fn collect(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "barcode_id" => fields.barcode_id = Some(text(field).await?),
                "title" => fields.title = Some(text(field).await?),
                "description" => fields.description = Some(text(field).await?),
                "price" => {
                    let raw = text(field).await?;
                    let price = Decimal::from_str(&raw).map_err(|_| {
                        AppError::BadRequest(format!("'price' is not a valid decimal: {raw}"))
                    })?;
                    fields.price = Some(price);
                }
                "image" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    fields.image = Some(ImageUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(fields)
    }
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn missing(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required field '{name}'"))
}
