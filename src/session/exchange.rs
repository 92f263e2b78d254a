use serde_json::Value;

use crate::api::chat::{self, ChatMessage};
use crate::api::client::{ApiClient, ApiError};
use crate::api::locations;
use crate::session::message::{dedup_locations, Location, Message};

pub const LOCATIONS_SUMMARY: &str = "为你找到这些推荐地点：";
pub const EXCHANGE_ERROR_NOTICE: &str = "抱歉，获取地点数据时出了问题，请稍后再试。";

// 分类结果：后端内容要么当纯文本，要么当结构化地点列表
#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Locations(Vec<Location>),
}

// 尽力而为的启发式：内容能解析成 JSON、结果是首元素带 place_id 字段的数组，
// 才按结构化地点处理；其余一律回退成纯文本
pub fn classify(content: &Value) -> Reply {
    let parsed: Value = match content {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(_) => return Reply::Text(text.clone()),
        },
        other => other.clone(),
    };

    let looks_like_locations = parsed
        .as_array()
        .and_then(|items| items.first())
        .map(|first| first.get("place_id").is_some())
        .unwrap_or(false);

    if looks_like_locations {
        if let Ok(parsed_locations) = serde_json::from_value::<Vec<Location>>(parsed) {
            return Reply::Locations(dedup_locations(parsed_locations));
        }
    }

    Reply::Text(render_text(content))
}

fn render_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// 一次提交：idle → sending → (成功 → 刷新历史 → idle) | (失败 → 显示错误 → idle)。
// 不管走哪条路，loading 都会被清掉，append 恰好调用一次。
// 成功返回重新拉取的完整历史；失败（或空输入）返回 None
pub async fn send_message<L, A>(
    api: &ApiClient,
    session_id: i64,
    input: &str,
    mut set_loading: L,
    mut append: A,
) -> Option<Vec<ChatMessage>>
where
    L: FnMut(bool),
    A: FnMut(Message),
{
    if input.trim().is_empty() {
        return None;
    }

    set_loading(true);
    let outcome = exchange(api, session_id, input).await;
    set_loading(false);

    match outcome {
        Ok((turn, history)) => {
            append(turn);
            Some(history)
        }
        Err(err) => {
            eprintln!("调用地点接口失败: {}", err);
            append(Message::assistant(EXCHANGE_ERROR_NOTICE));
            None
        }
    }
}

// 解释 → 分类 → 持久化 → 重拉历史。出错的提交不会留下任何持久化记录
async fn exchange(
    api: &ApiClient,
    session_id: i64,
    input: &str,
) -> Result<(Message, Vec<ChatMessage>), ApiError> {
    let reply = locations::interpret(api, input).await?;
    if reply.kind == "error" {
        return Err(ApiError::InvalidResponse(render_text(&reply.content)));
    }

    let turn = match classify(&reply.content) {
        Reply::Locations(found) => {
            // 持久化的是序列化后的结构化内容，不是概要句
            let payload = serde_json::to_string(&found)?;
            chat::save_exchange(api, session_id, input, &payload, "json").await?;
            Message::with_locations(LOCATIONS_SUMMARY, found)
        }
        Reply::Text(text) => {
            chat::save_exchange(api, session_id, input, &text, "text").await?;
            Message::assistant(&text)
        }
    };

    let history = chat::get_history(api, session_id).await?;
    Ok((turn, history))
}
