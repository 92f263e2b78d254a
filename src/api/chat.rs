use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{ApiClient, ApiError};

// 会话：后端拥有生命周期，客户端只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

// 一条持久化的交换：一个用户回合 + 配对的助手回合，存成一行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: i64,
    pub message: String,
    pub response: String,
    #[serde(default = "default_response_type")]
    pub response_type: String,
    pub timestamp: DateTime<Utc>,
}

fn default_response_type() -> String {
    "text".to_string()
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest {
    topic: Option<String>,
}

#[derive(Debug, Serialize)]
struct SaveExchangeRequest {
    session_id: i64,
    message: String,
    response: String,
    response_type: String,
}

pub async fn list_sessions(api: &ApiClient) -> Result<Vec<ChatSession>, ApiError> {
    api.get_json("/chat/sessions").await
}

pub async fn create_session(api: &ApiClient, topic: Option<&str>) -> Result<ChatSession, ApiError> {
    let request = CreateSessionRequest {
        topic: topic.map(|t| t.to_string()),
    };
    api.post_json("/chat/sessions", &request).await
}

pub async fn get_session(api: &ApiClient, session_id: i64) -> Result<ChatSession, ApiError> {
    api.get_json(&format!("/chat/sessions/{}", session_id)).await
}

pub async fn get_history(api: &ApiClient, session_id: i64) -> Result<Vec<ChatMessage>, ApiError> {
    api.get_json(&format!("/chat/history/{}", session_id)).await
}

// 返回值是后端的 ack，内容不关心
pub async fn save_exchange(
    api: &ApiClient,
    session_id: i64,
    message: &str,
    response: &str,
    response_type: &str,
) -> Result<Value, ApiError> {
    let request = SaveExchangeRequest {
        session_id,
        message: message.to_string(),
        response: response.to_string(),
        response_type: response_type.to_string(),
    };
    api.post_json("/chat/history", &request).await
}
