//! Product endpoints - list, get, create, update and delete.
//!
//! Handlers are thin: they validate the request body, call into [`crate::core::product`],
//! and shape the response. Failures are tagged with the operation name for the server log.

use crate::{
    api::{
        ApiState,
        response::{
            ApiError, MessageBody, NO_PRODUCTS, PRODUCT_CREATED, PRODUCT_DELETED,
            PRODUCT_NOT_FOUND, PRODUCT_UPDATED, message,
        },
    },
    config::ResponseStyle,
    core::{product, validation},
    errors::Error,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, instrument, warn};

const LIST_FAILED: &str = "Error in getting all products";
const GET_FAILED: &str = "Error in getting product";
const CREATE_FAILED: &str = "Error in creating product";
const UPDATE_FAILED: &str = "Error in updating product";
const DELETE_FAILED: &str = "Error in deleting product";

/// Body of create and update requests. Keys other than `data` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    /// The product fields; `None` when the key is absent, `Some(Value::Null)` for `null`
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
}

/// Keeps an explicit `null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Unwraps the JSON body, turning a malformed body into a 400 `{message}`.
fn request_data(
    body: Result<Json<ProductRequest>, JsonRejection>,
    operation: &'static str,
) -> Result<Option<Value>, ApiError> {
    match body {
        Ok(Json(request)) => Ok(request.data),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected request body");
            Err(ApiError::new(operation, Error::validation(rejection.body_text())))
        }
    }
}

/// `GET /products`
#[instrument(name = "handler::list_products", skip(state))]
pub async fn list_products(State(state): State<ApiState>) -> Result<Response, ApiError> {
    let products = product::get_all_products(&state.database)
        .await
        .map_err(ApiError::during(LIST_FAILED))?;

    info!("Fetched {} products.", products.len());

    if products.is_empty() && state.response_style == ResponseStyle::Legacy {
        return Ok(message(StatusCode::OK, NO_PRODUCTS));
    }

    Ok(Json(products).into_response())
}

/// `GET /products/:id`
#[instrument(name = "handler::get_product", skip(state))]
pub async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let found = product::get_product_by_id(&state.database, &id)
        .await
        .map_err(ApiError::during(GET_FAILED))?;

    match found {
        Some(product) => Ok(Json(product).into_response()),
        None => {
            warn!("Product {} not found.", id);
            let status = match state.response_style {
                ResponseStyle::Legacy => StatusCode::OK,
                ResponseStyle::Standard => StatusCode::NOT_FOUND,
            };
            Ok(message(status, PRODUCT_NOT_FOUND))
        }
    }
}

/// `POST /products/add`
#[instrument(name = "handler::create_product", skip(state, body))]
pub async fn create_product(
    State(state): State<ApiState>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let data = request_data(body, CREATE_FAILED)?;
    let payload =
        validation::validate_product(data.as_ref()).map_err(ApiError::during(CREATE_FAILED))?;

    let created = product::create_product(&state.database, payload)
        .await
        .map_err(ApiError::during(CREATE_FAILED))?;

    info!(product_id = %created.id, "Product created.");
    Ok(Json(MessageBody::new(PRODUCT_CREATED)))
}

/// `PUT /products/:id`; the payload is validated before the product is looked up.
#[instrument(name = "handler::update_product", skip(state, body))]
pub async fn update_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let data = request_data(body, UPDATE_FAILED)?;
    let payload =
        validation::validate_product(data.as_ref()).map_err(ApiError::during(UPDATE_FAILED))?;

    product::update_product(&state.database, &id, payload)
        .await
        .map_err(ApiError::during(UPDATE_FAILED))?;

    info!("Product {} updated.", id);
    Ok(Json(MessageBody::new(PRODUCT_UPDATED)))
}

/// `DELETE /products/:id`
#[instrument(name = "handler::delete_product", skip(state))]
pub async fn delete_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    product::delete_product(&state.database, &id)
        .await
        .map_err(ApiError::during(DELETE_FAILED))?;

    info!("Product {} deleted.", id);
    Ok(Json(MessageBody::new(PRODUCT_DELETED)))
}
