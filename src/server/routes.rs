use axum::{
    Json,
    Router,
    extract::State,
    routing::get,
};
use crate::resource::Resource;
use crate::storage::{Created, Store};
use super::error::ApiError;
use super::payload::Payload;

/// List and create routes for one resource at `path`
pub fn resource_routes<R: Resource>(path: &str, store: Store<R>) -> Router {
    Router::new()
        .route(path, get(list_rows::<R>).post(create_row::<R>))
        .with_state(store)
}

pub async fn list_rows<R: Resource>(
    State(store): State<Store<R>>,
) -> Result<Json<Vec<R>>, ApiError> {
    let rows = tokio::task::spawn_blocking(move || store.list()).await??;
    Ok(Json(rows))
}

pub async fn create_row<R: Resource>(
    State(store): State<Store<R>>,
    Payload(draft): Payload<R::Draft>,
) -> Result<Json<Created>, ApiError> {
    // Reject before handing off to the blocking pool
    R::validate(&draft)?;

    let created = tokio::task::spawn_blocking(move || store.create(&draft)).await??;
    tracing::info!("Created {} row {}", R::TABLE, created.id);
    Ok(Json(created))
}
