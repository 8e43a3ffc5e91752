use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::debug;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Movie, UpdateMovie},
};

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let Query(params) = query?;
    // a repeated `year` uses its first value
    let year = params.iter().find(|(key, _)| key == "year").map(|(_, value)| value.as_str());
    let year = match year {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|e| ApiError::BadRequest(e.to_string()))?),
    };

    Ok(Json(state.movies.list(year).await?))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> ApiResult<Json<Movie>> {
    Ok(Json(state.movies.get_by_id(&imdb_id).await?))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Movie>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let Json(movie) = body?;
    state.movies.create(&movie).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
    body: Result<Json<UpdateMovie>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let Json(update) = body?;
    if update.imdb_id.as_deref().is_some_and(|body_id| body_id != imdb_id) {
        debug!(path = %imdb_id, body = ?update.imdb_id, "ignoring imdbID in update body");
    }

    let rows = state.movies.update(&imdb_id, update.fields()).await?;
    debug!(imdb_id = %imdb_id, rows, "updated movie");
    Ok((StatusCode::CREATED, Json(update.into_movie(imdb_id))))
}
