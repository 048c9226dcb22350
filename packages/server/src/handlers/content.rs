use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::multipart::MultipartForm;
use crate::models::content::*;
use crate::models::shared::{DataResponse, Meta};
use crate::services::{self, ServiceError};
use crate::state::AppState;
use crate::utils::image::{
    ImageFolder, check_image, delete_images, discard_image, upload_images,
};

#[utoipa::path(
    get,
    path = "/",
    tag = "Content",
    operation_id = "listContent",
    summary = "List every landing-page entry",
    responses(
        (status = 200, description = "All entries", body = DataResponse<Vec<LandingPageEntry>>),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_content(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<LandingPageEntry>>>, AppError> {
    let data = services::content::list(&state.backend)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok("Success get all data", data)))
}

#[utoipa::path(
    get,
    path = "/{key}",
    tag = "Content",
    operation_id = "getContent",
    summary = "Get a landing-page entry by key",
    params(("key" = String, Path, description = "Content key, e.g. `hero_image`")),
    responses(
        (status = 200, description = "The entry", body = DataResponse<LandingPageEntry>),
        (status = 404, description = "No entry for this key", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DataResponse<LandingPageEntry>>, AppError> {
    let data = services::content::get_by_key(&state.backend, &key)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok(
        format!("Success get data for: {key}"),
        data,
    )))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Content",
    operation_id = "createContent",
    summary = "Create landing-page entries",
    description = "Multipart form whose `data` field is a JSON array of `{key, value}` items. \
        Files sent under a field named after an image key replace that item's value with the \
        JSON array of their public URLs. Every item is checked before anything is written; \
        a key that already has an entry rejects the whole batch.",
    request_body(content_type = "multipart/form-data", description = "`data` plus image files"),
    responses(
        (status = 201, description = "Entries created", body = ContentBatchResponse),
        (status = 400, description = "Invalid batch, unknown or existing key", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 500, description = "Image upload failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn create_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let items = parse_content_batch(&form)?;
    check_batch_files(&form, &items)?;

    for item in &items {
        if services::content::find_by_key(&state.backend, item.key.as_str())
            .await
            .map_err(ServiceError::on_read)?
            .is_some()
        {
            return Err(AppError::Validation(format!(
                "Key '{}' already exists",
                item.key
            )));
        }
    }

    let mut processed_data = Vec::with_capacity(items.len());
    for item in &items {
        let value = match uploaded_value(&state, &form, item.key).await? {
            Some(urls) => urls,
            None => item.value.clone(),
        };
        let entry = services::content::create(&state.backend, item.key.as_str(), &value).await?;
        processed_data.push(entry);
    }

    Ok((
        StatusCode::CREATED,
        Json(ContentBatchResponse {
            meta: Meta::new(StatusCode::CREATED, "Data berhasil ditambahkan"),
            processed_data,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Content",
    operation_id = "updateContent",
    summary = "Update landing-page entries",
    description = "Same body as create. Every key must already have an entry. For image keys \
        with new files, the previously stored images are deleted (failures are logged) before \
        the new files are uploaded.",
    request_body(content_type = "multipart/form-data", description = "`data` plus image files"),
    responses(
        (status = 200, description = "Entries updated", body = ContentBatchResponse),
        (status = 400, description = "Invalid batch or unknown key", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "A key has no entry yet", body = ErrorBody),
        (status = 500, description = "Image upload failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn update_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<Json<ContentBatchResponse>, AppError> {
    let items = parse_content_batch(&form)?;
    update_batch(&state, &form, items).await
}

#[utoipa::path(
    put,
    path = "/{key}",
    tag = "Content",
    operation_id = "updateContentByKey",
    summary = "Update the landing-page entry of one key",
    description = "Same body as the batch update; every item must carry the key of the path.",
    params(("key" = String, Path, description = "Content key, e.g. `about_us`")),
    request_body(content_type = "multipart/form-data", description = "`data` plus image files"),
    responses(
        (status = 200, description = "Entry updated", body = ContentBatchResponse),
        (status = 400, description = "Invalid batch or key mismatch", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No entry for this key", body = ErrorBody),
        (status = 500, description = "Image upload failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn update_content_by_key(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    form: MultipartForm,
) -> Result<Json<ContentBatchResponse>, AppError> {
    let path_key = ContentKey::parse(&key)
        .ok_or_else(|| AppError::Validation(format!("Key '{key}' tidak valid")))?;

    let items = parse_content_batch(&form)?;
    if let Some(other) = items.iter().find(|item| item.key != path_key) {
        return Err(AppError::Validation(format!(
            "Key '{}' tidak sesuai dengan parameter '{path_key}'",
            other.key
        )));
    }

    update_batch(&state, &form, items).await
}

#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Content",
    operation_id = "deleteContent",
    summary = "Delete a landing-page entry and its images",
    params(("key" = String, Path, description = "Content key")),
    responses(
        (status = 200, description = "Entry deleted", body = Meta),
        (status = 400, description = "Stored images could not be deleted", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No entry for this key", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_content(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Meta>, AppError> {
    let existing = services::content::get_by_key(&state.backend, &key)
        .await
        .map_err(ServiceError::on_read)?;

    if ContentKey::parse(&key).is_some_and(ContentKey::is_image) {
        let store = state.backend.storage();
        let (owned, foreign): (Vec<String>, Vec<String>) = stored_image_urls(&existing.value)
            .into_iter()
            .partition(|url| store.path_from_public_url(url).is_some());
        for url in &foreign {
            tracing::warn!(%key, %url, "Stored value is not an object in the store, leaving it");
        }
        delete_images(store, &owned)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }

    services::content::delete_by_key(&state.backend, &key).await?;

    Ok(Json(Meta::new(
        StatusCode::OK,
        format!("Data dengan key '{key}' berhasil dihapus"),
    )))
}

/// Check up front every file that the batch will upload, so a bad file
/// cannot fail the batch halfway through.
fn check_batch_files(form: &MultipartForm, items: &[ContentItem]) -> Result<(), AppError> {
    for item in items {
        for file in form.files(item.key.as_str()) {
            check_image(file)?;
        }
    }
    Ok(())
}

/// Upload the files sent for `key` and return the JSON array of their URLs,
/// or `None` when no file was sent for it.
async fn uploaded_value(
    state: &AppState,
    form: &MultipartForm,
    key: ContentKey,
) -> Result<Option<String>, AppError> {
    let files = form.files(key.as_str());
    if files.is_empty() {
        return Ok(None);
    }
    let urls = upload_images(state.backend.storage(), files, ImageFolder::LandingPage).await?;
    Ok(Some(Value::from(urls).to_string()))
}

async fn update_batch(
    state: &AppState,
    form: &MultipartForm,
    items: Vec<ContentItem>,
) -> Result<Json<ContentBatchResponse>, AppError> {
    check_batch_files(form, &items)?;

    let mut existing = Vec::with_capacity(items.len());
    for item in &items {
        let entry = services::content::get_by_key(&state.backend, item.key.as_str())
            .await
            .map_err(ServiceError::on_read)?;
        existing.push(entry);
    }

    let store = state.backend.storage();
    let mut processed_data = Vec::with_capacity(items.len());
    for (item, old) in items.iter().zip(&existing) {
        let has_files = !form.files(item.key.as_str()).is_empty();
        if has_files && item.key.is_image() {
            for url in stored_image_urls(&old.value) {
                if let Err(e) = discard_image(store, &url).await {
                    tracing::warn!(key = %item.key, %url, error = %e, "Failed to delete old image");
                }
            }
        }

        let value = match uploaded_value(state, form, item.key).await? {
            Some(urls) => urls,
            None => item.value.clone(),
        };
        let entry =
            services::content::update_by_key(&state.backend, item.key.as_str(), &value).await?;
        processed_data.push(entry);
    }

    Ok(Json(ContentBatchResponse {
        meta: Meta::new(StatusCode::OK, "Data berhasil diperbarui"),
        processed_data,
    }))
}
