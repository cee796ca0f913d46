use axum::{
    extract::{Query, State},
    Json,
};
use fitstudio_core::{
    models::class::{ClassView, ListClassesQuery},
    time::canonical_now,
};
use fitstudio_db::store::Store;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, services::query, ApiState};

pub async fn list_classes<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Query(params): Query<ListClassesQuery>,
) -> Result<Json<Vec<ClassView>>, AppError> {
    let classes =
        query::list_classes(&state.store, params.timezone.as_deref(), canonical_now()).await?;

    Ok(Json(classes))
}
