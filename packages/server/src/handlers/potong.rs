use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::multipart::MultipartForm;
use crate::models::potong::*;
use crate::models::shared::{DataResponse, Meta};
use crate::services::{self, ServiceError};
use crate::state::AppState;
use crate::utils::image::{ImageFolder, check_image, discard_image, upload_image};

#[utoipa::path(
    get,
    path = "/",
    tag = "Potong",
    operation_id = "listPotong",
    summary = "List all potong",
    responses(
        (status = 200, description = "All potong rows", body = DataResponse<Vec<Potong>>),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_potong(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Potong>>>, AppError> {
    let data = services::potong::list(&state.backend)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok("Success get all potong", data)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Potong",
    operation_id = "getPotong",
    summary = "Get a potong by ID",
    params(("id" = String, Path, description = "Potong ID")),
    responses(
        (status = 200, description = "Potong details", body = DataResponse<Potong>),
        (status = 404, description = "Potong not found", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_potong(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Potong>>, AppError> {
    let data = services::potong::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;
    Ok(Json(DataResponse::ok("Success get potong by ID", data)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Potong",
    operation_id = "createPotong",
    summary = "Create a potong",
    description = "Multipart form with text fields `nama` and `berat` and \
        the image file `gambar` (jpg, jpeg, png or webp).",
    request_body(content_type = "multipart/form-data", description = "Potong fields and image"),
    responses(
        (status = 201, description = "Potong created", body = PotongCreatedResponse),
        (status = 400, description = "Validation error or rejected insert", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 500, description = "Image upload failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn create_potong(
    auth_user: AuthUser,
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let (nama, berat) = validate_create_potong(&form)?;
    let file = form
        .file("gambar")
        .ok_or_else(|| AppError::Validation("Gambar wajib diunggah".into()))?;

    let gambar = upload_image(state.backend.storage(), file, ImageFolder::Potong).await?;
    let new_potong = services::potong::create(
        &state.backend,
        &NewPotong {
            nama,
            berat,
            gambar,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PotongCreatedResponse {
            meta: Meta::new(StatusCode::CREATED, "Potong berhasil ditambahkan"),
            new_potong,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Potong",
    operation_id = "updatePotong",
    summary = "Update a potong",
    description = "Every field is optional; omitted fields keep their stored value. When a new \
        `gambar` is sent the old image is deleted from storage before the new one is uploaded.",
    params(("id" = String, Path, description = "Potong ID")),
    request_body(content_type = "multipart/form-data", description = "Fields to change"),
    responses(
        (status = 200, description = "Potong updated", body = PotongUpdatedResponse),
        (status = 400, description = "Validation error or rejected update", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Potong not found", body = ErrorBody),
        (status = 500, description = "Image replacement failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user, form), fields(user_id = %auth_user.user_id))]
pub async fn update_potong(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: MultipartForm,
) -> Result<Json<PotongUpdatedResponse>, AppError> {
    let existing = services::potong::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;
    let mut changes = validate_update_potong(&form)?;

    if let Some(file) = form.file("gambar") {
        check_image(file)?;
        let store = state.backend.storage();
        discard_image(store, &existing.gambar).await?;
        changes.gambar = Some(upload_image(store, file, ImageFolder::Potong).await?);
    }

    let update_potong = services::potong::update(&state.backend, &id, &changes).await?;

    Ok(Json(PotongUpdatedResponse {
        meta: Meta::new(StatusCode::OK, "Success update potong"),
        update_potong,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Potong",
    operation_id = "deletePotong",
    summary = "Delete a potong and its image",
    params(("id" = String, Path, description = "Potong ID")),
    responses(
        (status = 200, description = "Potong deleted", body = Meta),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Potong not found", body = ErrorBody),
        (status = 500, description = "Image deletion failed", body = ErrorBody),
    ),
    security(("bearer" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_potong(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meta>, AppError> {
    let existing = services::potong::get(&state.backend, &id)
        .await
        .map_err(ServiceError::on_read)?;

    discard_image(state.backend.storage(), &existing.gambar).await?;
    services::potong::delete(&state.backend, &id).await?;

    Ok(Json(Meta::new(StatusCode::OK, "Potong berhasil dihapus")))
}
