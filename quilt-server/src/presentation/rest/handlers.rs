use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::{ListPatchesUseCase, ReflectUseCase};
use crate::presentation::rest::{ApiError, ReflectionFailure, dto::*};

use super::AppState;

/// GET /patches
pub async fn list_patches(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PatchResponse>>, ApiError> {
    let use_case = ListPatchesUseCase::new(Arc::clone(&state.patch_repo));

    let patches = use_case
        .execute()
        .await
        .map_err(|_| ApiError::storage_unavailable())?;

    Ok(Json(patches.iter().map(PatchResponse::from).collect()))
}

/// POST /reflection
///
/// Provider failures never reach here; they come back as the fallback line.
/// A 500 means the reflection task itself died.
pub async fn reflection(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReflectionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return ApiError::invalid_body(&rejection.body_text()).into_response(),
    };

    let use_case = ReflectUseCase::new(
        Arc::clone(&state.text_generator),
        state.reflection_timeout,
    );

    let text = request.text.unwrap_or_default();
    let task = tokio::spawn(async move { use_case.execute(&text).await });

    match task.await {
        Ok(line) => Json(ReflectionResponse { line }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Reflection task failed");
            ReflectionFailure.into_response()
        }
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let patches = state
        .patch_repo
        .count()
        .await
        .map_err(|_| ApiError::storage_unavailable())?;

    Ok(Json(HealthResponse {
        status: "ok",
        patches,
        clients: state.connections.len(),
    }))
}
