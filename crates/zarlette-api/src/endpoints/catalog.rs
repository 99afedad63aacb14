//! # Catalog Endpoints
//!
//! Operations on `/categories` and `/products`.
//!
//! Product listing is filtered server-side: `category` is either a real
//! category id or the `ALL` sentinel, and `search` is a name substring. Both
//! are always sent, mirroring the collaborator's contract.

use serde::Serialize;

use zarlette_core::{Category, Product, ProductDraft};

use crate::client::HttpClient;
use crate::error::ClientResult;

// =============================================================================
// Categories
// =============================================================================

#[derive(Serialize)]
struct CategoryBody<'a> {
    name: &'a str,
}

/// `GET /categories`.
pub async fn list_categories(http: &HttpClient) -> ClientResult<Vec<Category>> {
    http.get("/categories").await
}

/// `POST /categories`.
pub async fn create_category(http: &HttpClient, name: &str) -> ClientResult<Category> {
    http.post("/categories", &CategoryBody { name }).await
}

/// `PUT /categories/{id}`.
pub async fn update_category(http: &HttpClient, id: &str, name: &str) -> ClientResult<Category> {
    http.put(&format!("/categories/{}", id), &CategoryBody { name })
        .await
}

/// `DELETE /categories/{id}`.
///
/// A 409 response means the category is still referenced by products and
/// surfaces as `ClientError::Conflict`.
pub async fn delete_category(http: &HttpClient, id: &str) -> ClientResult<()> {
    http.delete(&format!("/categories/{}", id)).await
}

// =============================================================================
// Products
// =============================================================================

/// `GET /products?category=&search=`.
pub async fn list_products(
    http: &HttpClient,
    category: &str,
    search: &str,
) -> ClientResult<Vec<Product>> {
    http.get_query("/products", &[("category", category), ("search", search)])
        .await
}

/// `GET /products/{id}`.
pub async fn get_product(http: &HttpClient, id: i64) -> ClientResult<Product> {
    http.get(&format!("/products/{}", id)).await
}

/// `POST /products`.
pub async fn create_product(http: &HttpClient, draft: &ProductDraft) -> ClientResult<Product> {
    http.post("/products", draft).await
}

/// `PUT /products/{id}`.
pub async fn update_product(
    http: &HttpClient,
    id: i64,
    draft: &ProductDraft,
) -> ClientResult<Product> {
    http.put(&format!("/products/{}", id), draft).await
}

/// `DELETE /products/{id}`.
pub async fn delete_product(http: &HttpClient, id: i64) -> ClientResult<()> {
    http.delete(&format!("/products/{}", id)).await
}
