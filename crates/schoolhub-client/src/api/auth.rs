use schoolhub_auth::Session;
use schoolhub_core::Envelope;
use schoolhub_models::{ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, User};
use tracing::{info, instrument};

use crate::{ApiClient, ApiError};

pub struct AuthApi;

impl AuthApi {
    /// `POST /auth/login`. On success the returned session is persisted and
    /// becomes current.
    #[instrument(skip(client, request), fields(email = %request.email))]
    pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<Session, ApiError> {
        let response: LoginResponse = client.post("/auth/login", request).await?;
        let session = Session::new(response.token, response.user);

        client.cache().clear().await;
        client.sessions().establish(session.clone())?;
        info!(user_id = %session.user.id, "Logged in");

        Ok(session)
    }

    /// Signs out locally. The backend keeps no server-side session.
    #[instrument(skip(client))]
    pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
        client.sessions().clear()?;
        client.cache().clear().await;
        info!("Logged out");
        Ok(())
    }

    /// `GET /auth/me`. Refreshes the stored profile.
    #[instrument(skip(client))]
    pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
        let user: Envelope<User> = client.get("/auth/me", &[]).await?;
        let user = user.into_inner();
        client.sessions().update_user(user.clone())?;
        Ok(user)
    }

    /// `PUT /auth/change-password`.
    #[instrument(skip(client, request))]
    pub async fn change_password(
        client: &ApiClient,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        client.put("/auth/change-password", request).await
    }
}
