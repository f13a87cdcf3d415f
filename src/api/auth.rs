//! Authentication endpoints

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, User};

/// Exchange credentials for a token
pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
    client.post_json("/auth/login", credentials).await
}

/// Create an account, returning a token for the new user
pub async fn register(
    client: &ApiClient,
    profile: &RegisterRequest,
) -> Result<AuthResponse, ApiError> {
    client.post_json("/auth/register", profile).await
}

/// Fetch the user record for the session's token
pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    client.get_json("/auth/me").await
}
