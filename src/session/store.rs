use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self};
use std::path::PathBuf;

// 自定义错误类型
#[derive(Debug)]
pub enum StoreError {
    IoError(io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "IO错误: {}", e),
            StoreError::JsonError(e) => write!(f, "JSON错误: {}", e),
        }
    }
}

impl Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> StoreError {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> StoreError {
        StoreError::JsonError(err)
    }
}

// 本地持久状态：访问令牌 + 当前选中的会话。没有过期时间
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalState {
    token: Option<String>,
    selected_session_id: Option<i64>,
}

// 唯一的读写入口，令牌和会话指针都只从这里过
pub struct LocalStore {
    state: LocalState,
    path: PathBuf,
}

impl LocalStore {
    pub fn load(path: PathBuf) -> Result<Self, StoreError> {
        let state: LocalState = if path.exists() {
            let file = File::open(&path)?;
            serde_json::from_reader(file)?
        } else {
            LocalState::default()
        };

        Ok(LocalStore { state, path })
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn set_token(&mut self, token: &str) -> Result<(), StoreError> {
        self.state.token = Some(token.to_string());
        self.save()
    }

    pub fn clear_token(&mut self) -> Result<(), StoreError> {
        self.state.token = None;
        self.save()
    }

    pub fn selected_session(&self) -> Option<i64> {
        self.state.selected_session_id
    }

    pub fn select_session(&mut self, session_id: i64) -> Result<(), StoreError> {
        self.state.selected_session_id = Some(session_id);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &self.state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_roundtrip() {
        let path = std::env::temp_dir().join(format!("locus-store-{}.json", uuid::Uuid::new_v4()));

        let mut store = LocalStore::load(path.clone()).unwrap();
        assert!(store.token().is_none());
        assert!(store.selected_session().is_none());

        store.set_token("tok-123").unwrap();
        store.select_session(7).unwrap();

        let reloaded = LocalStore::load(path.clone()).unwrap();
        assert_eq!(reloaded.token(), Some("tok-123"));
        assert_eq!(reloaded.selected_session(), Some(7));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn clear_token_keeps_selected_session() {
        let path = std::env::temp_dir().join(format!("locus-store-{}.json", uuid::Uuid::new_v4()));

        let mut store = LocalStore::load(path.clone()).unwrap();
        store.set_token("tok").unwrap();
        store.select_session(3).unwrap();
        store.clear_token().unwrap();

        let reloaded = LocalStore::load(path.clone()).unwrap();
        assert!(reloaded.token().is_none());
        assert_eq!(reloaded.selected_session(), Some(3));

        let _ = std::fs::remove_file(path);
    }
}
