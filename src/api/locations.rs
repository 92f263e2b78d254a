use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct InterpretRequest {
    input_string: String,
}

// /locations 的响应外壳：content 可能是一段文本，也可能是地点数组，
// type 为 "error" 时 content 是后端的报错信息
#[derive(Debug, Deserialize)]
pub struct InterpretReply {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Value,
}

pub async fn interpret(api: &ApiClient, input: &str) -> Result<InterpretReply, ApiError> {
    let request = InterpretRequest {
        input_string: input.to_string(),
    };
    api.post_json("/locations", &request).await
}
