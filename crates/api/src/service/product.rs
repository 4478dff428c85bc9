//! Product lifecycle service: every business rule for the catalog lives
//! here, independent of HTTP binding and storage mechanics.

use std::path::PathBuf;

use cashier_core::error::CoreError;
use cashier_core::files::FileStore;
use cashier_core::pagination::{PageWindow, PAGE_SIZE};
use cashier_core::upload;
use cashier_db::models::product::{NewProduct, Product, ProductChanges};
use cashier_db::repositories::ProductRepo;
use cashier_db::DbPool;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppResult;

/// A raw image upload: the client-supplied filename plus the file bytes.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Input for creating a product. All fields are required at the boundary.
#[derive(Debug)]
pub struct NewProductInput {
    pub barcode_id: String,
    pub image: ImageUpload,
    pub title: String,
    pub price: Decimal,
    pub description: String,
}

/// Input for a partial update. Every field is independently optional.
#[derive(Debug, Default)]
pub struct UpdateProductInput {
    pub image: Option<ImageUpload>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

/// Search filters. The handler guarantees at least one is non-empty.
#[derive(Debug)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub barcode_id: Option<String>,
}

/// Public projection of a product: no internal id, no timestamps.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub barcode_id: String,
    pub image: String,
    pub title: String,
    pub price: Decimal,
    pub description: String,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            barcode_id: p.barcode_id,
            image: p.image,
            title: p.title,
            price: p.price,
            description: p.description,
        }
    }
}

/// Pagination metadata returned alongside a listing page.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub prev_page: u64,
    pub next_page: u64,
    pub total_pages: u64,
}

impl From<PageWindow> for PageMeta {
    fn from(w: PageWindow) -> Self {
        Self {
            page: w.page,
            prev_page: w.prev_page,
            next_page: w.next_page,
            total_pages: w.total_pages,
        }
    }
}

/// One listing page plus its pagination metadata.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub page_meta_data: PageMeta,
}

/// Enforces the product lifecycle rules. Dependencies are injected once at
/// process start.
pub struct ProductService {
    pool: DbPool,
    files: FileStore,
    image_dir: PathBuf,
}

impl ProductService {
    pub fn new(pool: DbPool, files: FileStore, image_dir: PathBuf) -> Self {
        Self {
            pool,
            files,
            image_dir,
        }
    }

    /// One page of the active catalog.
    ///
    /// An empty catalog is a not-found condition. Out-of-range pages clamp:
    /// 0 behaves as 1, past-the-end behaves as the last page.
    pub async fn get_products(&self, page: u64) -> AppResult<ProductPage> {
        let total = ProductRepo::count_active(&self.pool).await?;
        if total == 0 {
            return Err(CoreError::NotFound.into());
        }

        let window = PageWindow::for_page(page, total as u64);
        let products = ProductRepo::list_active(
            &self.pool,
            PAGE_SIZE as i64,
            window.offset() as i64,
        )
        .await?;

        Ok(ProductPage {
            products: products.into_iter().map(ProductView::from).collect(),
            page_meta_data: window.into(),
        })
    }

    /// Look up a single active product by barcode.
    pub async fn get_product_detail(&self, barcode_id: &str) -> AppResult<ProductView> {
        let product = ProductRepo::find_active_by_barcode(&self.pool, barcode_id)
            .await?
            .ok_or(CoreError::NotFound)?;
        Ok(product.into())
    }

    /// Search active products. The handler has already rejected queries with
    /// neither filter; an empty result set is not-found.
    pub async fn search_products(&self, query: &SearchQuery) -> AppResult<Vec<ProductView>> {
        let products = ProductRepo::search_active(
            &self.pool,
            query.title.as_deref(),
            query.barcode_id.as_deref(),
        )
        .await?;

        if products.is_empty() {
            return Err(CoreError::NotFound.into());
        }
        Ok(products.into_iter().map(ProductView::from).collect())
    }

    /// Create a product, or restore a soft-deleted one with the same barcode.
    ///
    /// When a soft-deleted row holds this barcode the row is restored as it
    /// was and the request's image/title/price/description are discarded:
    /// an undelete shortcut, not a merge.
    pub async fn create_product(&self, input: NewProductInput) -> AppResult<()> {
        let ext = upload::validate_image(&input.image.filename, input.image.bytes.len() as u64)?;

        if ProductRepo::find_deleted_by_barcode(&self.pool, &input.barcode_id)
            .await?
            .is_some()
        {
            ProductRepo::restore(&self.pool, &input.barcode_id).await?;
            return Ok(());
        }

        if ProductRepo::find_active_by_barcode(&self.pool, &input.barcode_id)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(
                "Product with this barcode already exists".to_string(),
            )
            .into());
        }

        let stored_name = self.files.generate_name(&ext);
        self.files
            .save(&input.image.bytes, &stored_name, &self.image_dir)
            .await?;

        ProductRepo::insert(
            &self.pool,
            &NewProduct {
                barcode_id: input.barcode_id,
                image: stored_name,
                title: input.title,
                price: input.price,
                description: input.description,
            },
        )
        .await?;
        Ok(())
    }

    /// Partially update an active product.
    ///
    /// A new image replaces the stored file: the upload is validated and
    /// saved first, then the previous file is deleted. There is no rollback
    /// of the already-saved upload if that deletion fails; an orphaned file
    /// is accepted over losing the new upload.
    pub async fn update_product(
        &self,
        barcode_id: &str,
        input: UpdateProductInput,
    ) -> AppResult<()> {
        let existing = ProductRepo::find_active_by_barcode(&self.pool, barcode_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let mut changes = ProductChanges {
            title: input.title,
            price: input.price,
            description: input.description,
            image: None,
        };

        if let Some(image) = input.image {
            let ext = upload::validate_image(&image.filename, image.bytes.len() as u64)?;
            let stored_name = self.files.generate_name(&ext);
            self.files
                .save(&image.bytes, &stored_name, &self.image_dir)
                .await?;
            self.files
                .delete(&self.image_dir.join(&existing.image))
                .await?;
            changes.image = Some(stored_name);
        }

        if changes.is_empty() {
            return Err(CoreError::NoChanges.into());
        }

        ProductRepo::update_fields(&self.pool, barcode_id, &changes).await?;
        Ok(())
    }

    /// Soft-delete an active product. The image file stays on disk so a
    /// later create with the same barcode can restore the row intact.
    pub async fn delete_product(&self, barcode_id: &str) -> AppResult<()> {
        ProductRepo::find_active_by_barcode(&self.pool, barcode_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        ProductRepo::soft_delete(&self.pool, barcode_id).await?;
        Ok(())
    }
}
