use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::chat::ChatMessage;
use crate::session::exchange::{classify, Reply, LOCATIONS_SUMMARY};

// 渲染层消息：由一条持久化交换拆出来的单个回合，随下次渲染丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    pub timestamp: DateTime<Utc>,
}

// 展示用的地点条目，place_id 用来去重；后端多余的字段（rank、score）直接忽略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub place_id: String,
}

impl Message {
    pub fn assistant(content: &str) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            role: "assistant".to_string(),
            content: content.to_string(),
            locations: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_locations(content: &str, locations: Vec<Location>) -> Self {
        Message {
            locations: Some(locations),
            ..Message::assistant(content)
        }
    }
}

// 按 place_id 去重，保留首次出现的顺序
pub fn dedup_locations(locations: Vec<Location>) -> Vec<Location> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::with_capacity(locations.len());
    for location in locations {
        if seen.contains(&location.place_id) {
            continue;
        }
        seen.push(location.place_id.clone());
        result.push(location);
    }
    result
}

// 历史展开：每条交换固定拆成 [user回合, assistant回合]，顺序不变、配对不断。
// 响应类型是 json 的行在这里重新解析出地点列表
pub fn unfold_history(history: &[ChatMessage]) -> Vec<Message> {
    let mut turns = Vec::with_capacity(history.len() * 2);

    for record in history {
        turns.push(Message {
            id: record.id.to_string(),
            role: "user".to_string(),
            content: record.message.clone(),
            locations: None,
            timestamp: record.timestamp,
        });

        let (content, locations) = if record.response_type == "json" {
            match classify(&serde_json::Value::String(record.response.clone())) {
                Reply::Locations(locations) => (LOCATIONS_SUMMARY.to_string(), Some(locations)),
                Reply::Text(_) => (record.response.clone(), None),
            }
        } else {
            (record.response.clone(), None)
        };

        turns.push(Message {
            id: format!("{}-response", record.id),
            role: "assistant".to_string(),
            content,
            locations,
            timestamp: record.timestamp,
        });
    }

    turns
}
