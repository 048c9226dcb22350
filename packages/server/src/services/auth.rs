use backend::{Backend, BackendError};

use crate::models::auth::{AuthMessage, SignInResult};

pub async fn sign_up(
    backend: &Backend,
    email: &str,
    password: &str,
) -> Result<AuthMessage, BackendError> {
    let identity = backend.identity().sign_up(email, password).await?;
    tracing::info!(user_id = %identity.id, "Account registered");
    Ok(AuthMessage {
        message: "Registrasi berhasil, silakan cek email untuk verifikasi.".into(),
    })
}

pub async fn sign_in(
    backend: &Backend,
    email: &str,
    password: &str,
) -> Result<SignInResult, BackendError> {
    let session = backend.identity().sign_in(email, password).await?;
    Ok(SignInResult {
        message: "Login Berhasil".into(),
        token: session.access_token,
        email: session.identity.email,
    })
}

pub async fn sign_out(backend: &Backend, access_token: &str) -> Result<AuthMessage, BackendError> {
    backend.identity().sign_out(access_token).await?;
    Ok(AuthMessage {
        message: "Logout Berhasil".into(),
    })
}
