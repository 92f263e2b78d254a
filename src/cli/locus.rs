use clap::Parser;
use inquire::{Password, Text};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::api::auth;
use crate::api::chat;
use crate::api::client::ApiClient;
use crate::cli::actions::{Commands, ConfigSubcommand};
use crate::session::config::Config;
use crate::session::main_loop::{main_loop, render_history};
use crate::session::store::LocalStore;

#[derive(Parser)]
#[command(name = "locus")]
#[command(version = "1.0")]
#[command(about = "位置推荐助手的聊天客户端", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

pub struct Locus;

impl Locus {
    pub fn new() -> Self {
        Locus
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("locus");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("config.json");
        let store_path = config_dir.join("store.json");

        let mut config = Config::load_or_init(&config_path)?;
        let mut store = LocalStore::load(store_path)?;

        let cli = Cli::parse();

        match cli.command {
            Commands::Signin { email } => {
                let email = match email {
                    Some(email) => email,
                    None => Text::new("邮箱:").prompt()?,
                };
                let password = Password::new("密码:").without_confirmation().prompt()?;

                let api = ApiClient::new(&config.api_url, None);
                match auth::signin(&api, &email, &password).await {
                    Ok(reply) => {
                        if let Some(data) = reply.data {
                            store.set_token(&data.access_token)?;
                            println!("登录成功: {}", reply.message);
                        } else {
                            println!("登录失败: {}", reply.message);
                        }
                    }
                    Err(e) => eprintln!("错误: {}", e),
                }
            }

            Commands::Signup => {
                let username = Text::new("用户名:").prompt()?;
                let email = Text::new("邮箱:").prompt()?;
                let password = Password::new("密码:").prompt()?;

                let api = ApiClient::new(&config.api_url, None);
                match auth::signup(&api, &username, &email, &password).await {
                    Ok(reply) => println!("{}", reply.message),
                    Err(e) => eprintln!("错误: {}", e),
                }
            }

            Commands::Logout => {
                store.clear_token()?;
                println!("已退出登录");
            }

            Commands::Start { session, topic } => {
                let api = client_for(&config, &store);

                if let Some(id) = session {
                    let session = chat::get_session(&api, id).await?;
                    store.select_session(session.id)?;
                } else if store.selected_session().is_none() {
                    let created = chat::create_session(&api, topic.as_deref()).await?;
                    println!("已创建新会话: {}", created.id);
                    store.select_session(created.id)?;
                }

                main_loop(&api, &mut store, &config).await?;
            }

            Commands::Resume => {
                let api = client_for(&config, &store);

                if let Some(session_id) = store.selected_session() {
                    println!("正在恢复上一次会话: {}", session_id);
                } else {
                    println!("没有可恢复的会话，正在创建新会话...");
                    let created = chat::create_session(&api, None).await?;
                    store.select_session(created.id)?;
                }

                main_loop(&api, &mut store, &config).await?;
            }

            Commands::List { detail } => {
                let api = client_for(&config, &store);
                let sessions = chat::list_sessions(&api).await?;

                if sessions.is_empty() {
                    println!("没有可用的会话");
                    return Ok(());
                }

                for (i, session) in sessions.iter().enumerate() {
                    let current_indicator = if store.selected_session() == Some(session.id) {
                        " (当前)"
                    } else {
                        ""
                    };

                    println!(
                        "{}. {} [ID: {}]{}",
                        i + 1,
                        session.topic.as_deref().unwrap_or("未命名"),
                        session.id,
                        current_indicator
                    );

                    if detail {
                        println!(
                            "  创建时间: {}",
                            session.created_at.format("%Y-%m-%d %H:%M:%S")
                        );
                        println!(
                            "  最后更新: {}",
                            session.last_updated.format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
            }

            Commands::New { topic } => {
                let api = client_for(&config, &store);
                let created = chat::create_session(&api, topic.as_deref()).await?;
                store.select_session(created.id)?;
                println!(
                    "已创建新会话: {} [ID: {}]",
                    created.topic.as_deref().unwrap_or("未命名"),
                    created.id
                );
            }

            Commands::Switch { session_id } => {
                let api = client_for(&config, &store);
                match chat::get_session(&api, session_id).await {
                    Ok(session) => {
                        store.select_session(session.id)?;
                        println!("已切换到会话: {}", session.id);
                    }
                    Err(e) => eprintln!("错误: {}", e),
                }
            }

            Commands::Config { subcommand } => match subcommand {
                ConfigSubcommand::Show => {
                    println!("当前配置:");
                    println!("  接口地址: {}", config.api_url);
                    println!("  示例提示: {}", config.show_suggestions);
                }

                ConfigSubcommand::SetApiUrl { url } => {
                    config.api_url = url;
                    config.save(&config_path)?;
                    println!("接口地址已设置为: {}", config.api_url);
                }

                ConfigSubcommand::ToggleSuggestions => {
                    config.show_suggestions = !config.show_suggestions;
                    config.save(&config_path)?;
                    println!(
                        "示例提示已{}",
                        if config.show_suggestions {
                            "启用"
                        } else {
                            "禁用"
                        }
                    );
                }
            },
        }

        Ok(())
    }
}

// 会话和历史请求带令牌；没有令牌时只提示一句，请求本身照发
fn client_for(config: &Config, store: &LocalStore) -> ApiClient {
    if store.token().is_none() {
        println!("尚未登录，请先运行 locus signin（请求将不携带令牌）");
    }
    ApiClient::new(&config.api_url, store.token().map(|t| t.to_string()))
}

pub async fn handle_command(
    command: &str,
    api: &ApiClient,
    store: &mut LocalStore,
    config: &Config,
) -> Result<bool, Box<dyn Error>> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(false);
    }

    match parts[0] {
        "exit" => {
            println!("已退出");
            return Ok(true);
        }

        "list" => match chat::list_sessions(api).await {
            Ok(sessions) => {
                println!("\n--- 会话列表 ---");
                for (i, session) in sessions.iter().enumerate() {
                    let current_indicator = if store.selected_session() == Some(session.id) {
                        " (当前)"
                    } else {
                        ""
                    };
                    println!(
                        "{}. {} [ID: {}]{}",
                        i + 1,
                        session.topic.as_deref().unwrap_or("未命名"),
                        session.id,
                        current_indicator
                    );
                }
            }
            Err(e) => println!("错误: {}", e),
        },

        "switch" if parts.len() > 1 => match parts[1].parse::<i64>() {
            Ok(session_id) => match chat::get_session(api, session_id).await {
                Ok(session) => {
                    store.select_session(session.id)?;
                    println!("已切换到会话: {}", session.id);
                }
                Err(e) => println!("错误: {}", e),
            },
            Err(_) => println!("无效的会话ID: {}", parts[1]),
        },

        "new" => {
            let topic = if parts.len() > 1 {
                Some(parts[1..].join(" "))
            } else {
                None
            };
            match chat::create_session(api, topic.as_deref()).await {
                Ok(created) => {
                    store.select_session(created.id)?;
                    println!("已创建新会话: {}", created.id);
                }
                Err(e) => println!("错误: {}", e),
            }
        }

        "history" => {
            if let Some(session_id) = store.selected_session() {
                match chat::get_history(api, session_id).await {
                    Ok(history) => render_history(&history),
                    Err(e) => println!("错误: {}", e),
                }
            }
        }

        "config" => {
            println!("当前配置:");
            println!("  接口地址: {}", config.api_url);
            println!("  示例提示: {}", config.show_suggestions);
        }

        "help" => {
            print_help();
        }

        _ => {
            println!("未知命令: {}", command);
            print_help();
        }
    }

    Ok(false)
}

fn print_help() {
    println!("\n可用命令:");
    println!("  /exit             - 退出");
    println!("  /list             - 列出所有会话");
    println!("  /switch <ID>      - 切换到指定会话");
    println!("  /new [主题]       - 创建新会话");
    println!("  /history          - 重新拉取并显示当前会话历史");
    println!("  /config           - 显示当前配置");
    println!("  /help             - 显示帮助");
}
