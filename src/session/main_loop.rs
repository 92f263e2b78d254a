use std::error::Error;
use std::io::{self, Write};

use crate::api::chat::{self, ChatMessage, ChatSession};
use crate::api::client::ApiClient;
use crate::cli::locus::handle_command;
use crate::session::config::Config;
use crate::session::exchange::send_message;
use crate::session::message::{unfold_history, Message};
use crate::session::store::LocalStore;

// 打开空会话时给用户的示例描述
const SUGGESTED_ACTIONS: [&str; 2] = [
    "一个能看日落的安静海边位置，有长椅、海风，人不多，适合带杯咖啡坐一晚上",
    "一家灯光温暖、桌子够大、氛围放松的户外餐厅，适合全家聚餐",
];

pub async fn main_loop(
    api: &ApiClient,
    store: &mut LocalStore,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut session_id = store.selected_session().ok_or("没有选中的会话")?;

    let session = chat::get_session(api, session_id).await?;
    print_banner(&session);
    println!("输入 /help 查看可用命令");

    let mut history = load_history(api, session_id).await?;
    render_history(&history);
    maybe_print_suggestions(&history, config);

    loop {
        print!("\n>: ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        // 空输入直接忽略，不发起提交
        if input.is_empty() {
            continue;
        }

        if input.starts_with('/') {
            if handle_command(&input[1..], api, store, config).await? {
                break;
            }

            // 切换会话是一次完整的状态迁移：重拉元数据和历史再继续
            if let Some(selected) = store.selected_session() {
                if selected != session_id {
                    session_id = selected;
                    let session = chat::get_session(api, session_id).await?;
                    print_banner(&session);
                    history = load_history(api, session_id).await?;
                    render_history(&history);
                    maybe_print_suggestions(&history, config);
                }
            }
            continue;
        }

        let refreshed = send_message(
            api,
            session_id,
            input,
            |loading| {
                if loading {
                    println!("正在思考...");
                }
            },
            |turn| render_turn(&turn),
        )
        .await;

        // 成功的提交用全量重拉的历史整体替换本地状态
        if let Some(new_history) = refreshed {
            history = new_history;
        }
    }

    Ok(())
}

// 只显示属于当前会话的记录
async fn load_history(api: &ApiClient, session_id: i64) -> Result<Vec<ChatMessage>, Box<dyn Error>> {
    let mut history = chat::get_history(api, session_id).await?;
    history.retain(|record| record.session_id == session_id);
    Ok(history)
}

fn print_banner(session: &ChatSession) {
    println!(
        "会话: {} [ID: {}]",
        session.topic.as_deref().unwrap_or("未命名"),
        session.id
    );
}

fn maybe_print_suggestions(history: &[ChatMessage], config: &Config) {
    if !history.is_empty() || !config.show_suggestions {
        return;
    }
    println!("\n可以试着这样描述你想去的地方:");
    for action in SUGGESTED_ACTIONS {
        println!("  - {}", action);
    }
}

pub fn render_history(history: &[ChatMessage]) {
    for turn in unfold_history(history) {
        render_turn(&turn);
    }
}

pub fn render_turn(turn: &Message) {
    if turn.role == "user" {
        println!("\n你: {}", turn.content);
        return;
    }

    println!("\n助手: {}", turn.content);
    if let Some(locations) = &turn.locations {
        for (i, location) in locations.iter().enumerate() {
            println!("  {}. {} [{}]", i + 1, location.title, location.place_id);
        }
    }
}
