//! CRUD handlers shared by movies, directors and genres: list, create, read, update, delete.

use crate::error::AppError;
use crate::model::Resource;
use crate::service::RequestValidator;
use crate::sql::BindValue;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Equality filters from the query string. Only filterable columns are read;
/// other keys are ignored.
fn parse_filters<T: Resource>(
    params: &HashMap<String, String>,
) -> Result<Vec<(&'static str, BindValue)>, AppError> {
    T::ENTITY
        .filterable_columns()
        .filter_map(|c| params.get(c.name).map(|raw| (c.name, raw)))
        .map(|(name, raw)| {
            raw.trim()
                .parse::<i64>()
                .map(|n| (name, BindValue::Integer(n)))
                .map_err(|_| AppError::BadRequest(format!("{} must be an integer", name)))
        })
        .collect()
}

fn not_found<T: Resource>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", T::ENTITY.label, id))
}

pub async fn list<T: Resource>(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Vec<T>>, AppError> {
    let Query(params) = params?;
    let filters = parse_filters::<T>(&params)?;
    let rows = state.repo::<T>().list(&filters).await?;
    Ok(Json(rows))
}

pub async fn create<T: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let values = RequestValidator::for_create(T::ENTITY, &body)?;
    let row = state.repo::<T>().create(&values).await?;
    tracing::info!(entity = T::ENTITY.label, id = row.id(), "created");
    let location = format!("/{}/{}", T::ENTITY.path_segment, row.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(row)))
}

pub async fn read<T: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<T>, AppError> {
    let Path(id) = id?;
    let row = state
        .repo::<T>()
        .get(id)
        .await?
        .ok_or_else(|| not_found::<T>(id))?;
    Ok(Json(row))
}

pub async fn update<T: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let values = RequestValidator::for_update(T::ENTITY, &body)?;
    if !state.repo::<T>().update(id, &values).await? {
        return Err(not_found::<T>(id));
    }
    tracing::info!(entity = T::ENTITY.label, id, fields = values.len(), "updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete<T: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    if !state.repo::<T>().delete(id).await? {
        return Err(not_found::<T>(id));
    }
    tracing::info!(entity = T::ENTITY.label, id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}
