use axum::{
    Form, Json,
    extract::{FromRequest, Path, Request, State, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_TYPE},
};
use std::sync::Arc;

use super::{AnimePayload, ApiError, AppState, CreatedResponse, MessageResponse};
use crate::api::validation::{validate_anime_id, validate_anime_payload};
use crate::constants::messages;
use crate::models::anime::{AnimeRecord, AnimeStats};

fn is_form_encoded(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Reads a create/update body as JSON or as a urlencoded form.
///
/// Any other content type is read as an empty object, so it fails the field
/// rules rather than the parser.
async fn read_payload(req: Request) -> Result<AnimePayload, ApiError> {
    if is_form_encoded(&req) {
        return match Form::<AnimePayload>::from_request(req, &()).await {
            Ok(Form(payload)) => Ok(payload),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        };
    }

    match Json::<AnimePayload>::from_request(req, &()).await {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(AnimePayload::default()),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

pub async fn list_anime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnimeRecord>>, ApiError> {
    let anime = state.anime_service().list_all().await?;
    Ok(Json(anime))
}

pub async fn get_anime_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnimeStats>, ApiError> {
    let stats = state.anime_service().get_stats().await?;
    Ok(Json(stats))
}

pub async fn list_anime_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<AnimeRecord>>, ApiError> {
    let anime = state.anime_service().get_by_status(&status).await?;
    Ok(Json(anime))
}

pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnimeRecord>, ApiError> {
    let id = validate_anime_id(&id)?;

    state
        .anime_service()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::anime_not_found)
}

pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let input = validate_anime_payload(read_payload(req).await?)?;

    let id = state.anime_service().create(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: messages::ANIME_CREATED,
        }),
    ))
}

pub async fn update_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    req: Request,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_anime_id(&id)?;
    let input = validate_anime_payload(read_payload(req).await?)?;

    if !state.anime_service().update(id, &input).await? {
        return Err(ApiError::anime_not_found());
    }

    Ok(Json(MessageResponse {
        message: messages::ANIME_UPDATED,
    }))
}

pub async fn delete_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_anime_id(&id)?;

    if !state.anime_service().delete(id).await? {
        return Err(ApiError::anime_not_found());
    }

    Ok(Json(MessageResponse {
        message: messages::ANIME_DELETED,
    }))
}
