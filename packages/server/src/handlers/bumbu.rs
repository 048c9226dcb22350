use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::multipart::MultipartForm;
use crate::models::bumbu::*;
use crate::models::shared::{DataResponse, Meta};
use crate::services::{self, ServiceError};
use crate::state::AppState;
use crate::utils::image::{ImageFolder, check_image, discard_image, upload_image};

#[utoipa::path(
    get,
    path = "/",
    tag = "Bumbu",
    operation_id = "listBumbu",
    summary = "List all bumbu",
    responses(
        (status = 200, description = "All bumbu rows", body = DataResponse<Vec<Bumbu>>),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_bumbu(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Bumbu>>>, AppError> {
    let data = services::bumbu::list(&state.backend)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok("Success get all bumbu", data)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Bumbu",
    operation_id = "getBumbu",
    summary = "Get a bumbu by ID",
    params(("id" = String, Path, description = "Bumbu ID")),
    responses(
        (status = 200, description = "Bumbu details", body = DataResponse<Bumbu>),
        (status = 404, description = "Bumbu not found", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_bumbu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Bumbu>>, AppError> {
    let data = services::bumbu::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok("Success get bumbu by ID", data)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Bumbu",
    operation_id = "createBumbu",
    summary = "Create a bumbu",
    description = "Multipart form with text fields `nama`, `deskripsi`, `harga` (digits only) \
        and the image file `gambar` (jpg, jpeg, png or webp). The image is uploaded first and \
        the row stores its public URL.",
    request_body(content_type = "multipart/form-data", description = "Bumbu fields and image"),
    responses(
        (status = 201, description = "Bumbu created", body = BumbuCreatedResponse),
        (status = 400, description = "Validation error or rejected insert", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 500, description = "Image upload failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn create_bumbu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let fields = validate_create_bumbu(&form)?;
    let file = form
        .file("gambar")
        .ok_or_else(|| AppError::Validation("Gambar wajib diunggah".into()))?;

    let gambar = upload_image(state.backend.storage(), file, ImageFolder::Bumbu).await?;
    let new_bumbu = services::bumbu::create(&state.backend, &fields.with_image(gambar)).await?;

    Ok((
        StatusCode::CREATED,
        Json(BumbuCreatedResponse {
            meta: Meta::new(StatusCode::CREATED, "Bumbu berhasil ditambahkan"),
            new_bumbu,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Bumbu",
    operation_id = "updateBumbu",
    summary = "Update a bumbu",
    description = "Every field is optional; omitted fields keep their stored value. When a new \
        `gambar` is sent the old image is deleted from storage before the new one is uploaded.",
    params(("id" = String, Path, description = "Bumbu ID")),
    request_body(content_type = "multipart/form-data", description = "Fields to change"),
    responses(
        (status = 200, description = "Bumbu updated", body = BumbuUpdatedResponse),
        (status = 400, description = "Validation error or rejected update", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Bumbu not found", body = ErrorBody),
        (status = 500, description = "Image replacement failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn update_bumbu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: MultipartForm,
) -> Result<Json<BumbuUpdatedResponse>, AppError> {
    let existing = services::bumbu::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;
    let mut changes = validate_update_bumbu(&form)?;

    if let Some(file) = form.file("gambar") {
        check_image(file)?;
        let store = state.backend.storage();
        discard_image(store, &existing.gambar).await?;
        changes.gambar = Some(upload_image(store, file, ImageFolder::Bumbu).await?);
    }

    let update_bumbu = services::bumbu::update(&state.backend, &id, &changes).await?;

    Ok(Json(BumbuUpdatedResponse {
        meta: Meta::new(StatusCode::OK, "Success update bumbu"),
        update_bumbu,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Bumbu",
    operation_id = "deleteBumbu",
    summary = "Delete a bumbu and its image",
    params(("id" = String, Path, description = "Bumbu ID")),
    responses(
        (status = 200, description = "Bumbu deleted", body = Meta),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Bumbu not found", body = ErrorBody),
        (status = 500, description = "Image deletion failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_bumbu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meta>, AppError> {
    let existing = services::bumbu::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;

    discard_image(state.backend.storage(), &existing.gambar).await?;
    services::bumbu::delete(&state.backend, &id).await?;

    Ok(Json(Meta::new(StatusCode::OK, "Bumbu berhasil dihapus")))
}
