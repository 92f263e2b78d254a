use serde::{Deserialize, Serialize};

use crate::api::client::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct SignUpRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String,
}

// /signin 和 /signup 共用的响应外壳，失败也是 200 + success=false
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<TokenData>,
}

pub async fn signin(api: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let request = SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    api.post_json("/signin", &request).await
}

pub async fn signup(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let request = SignUpRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    api.post_json("/signup", &request).await
}
