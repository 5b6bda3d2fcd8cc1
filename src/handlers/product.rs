use axum::{
    extract::{FromRequestParts, Json, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::ProductStore,
    error::{AppError, Result},
    models::product::{NewProduct, Product, ProductPayload, ProductUpdate},
};

/// Integer product id taken from the path.
///
/// Anything that does not parse as an integer is treated like an unknown
/// route and answered with 404.
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(id): Path<i64> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        Ok(Self(id))
    }
}

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// List all products handler
pub async fn list_products(State(store): State<ProductStore>) -> Result<Json<Vec<Product>>> {
    let products = store.get_all_products().await?;
    Ok(Json(products))
}

/// Create product handler
pub async fn create_product(
    State(store): State<ProductStore>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    let new_product = NewProduct::try_from(payload)?;
    let product = store.insert_product(&new_product).await?;

    tracing::info!("Created product {} ({})", product.id, product.name);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace product handler.
///
/// Responds with `null` when the id does not exist.
pub async fn update_product(
    State(store): State<ProductStore>,
    ProductId(id): ProductId,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Option<Product>>> {
    let update = ProductUpdate::from(payload);
    let product = store.replace_product(id, &update).await?;

    if product.is_none() {
        tracing::debug!("Update of unknown product {}", id);
    }
    Ok(Json(product))
}

/// Delete product handler
pub async fn delete_product(
    State(store): State<ProductStore>,
    ProductId(id): ProductId,
) -> Result<Json<StatusResponse>> {
    store.delete_product(id).await?;

    tracing::info!("Deleted product {}", id);
    Ok(Json(StatusResponse {
        status: "deleted".to_string(),
    }))
}
