use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt;

// 自定义错误类型
#[derive(Debug)]
pub enum ApiError {
    RequestFailed(reqwest::Error),
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed(err) => write!(f, "Request failed: {}", err),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(format!("Failed to parse JSON: {}", err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::RequestFailed(err)
    }
}

// 后端 API 客户端，所有请求共用一套请求头
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        ApiClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    // 没有令牌时静默省略 Authorization 头
    fn headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(token) = &self.token {
            let auth = format!("Bearer {}", token);
            if let Ok(value) = header::HeaderValue::from_str(auth.as_str()) {
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        headers
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .headers(self.headers())
            .send()
            .await
            .map_err(ApiError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "Request failed with status: {}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(ApiError::RequestFailed)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(ApiError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "Request failed with status: {}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(ApiError::RequestFailed)
    }
}
