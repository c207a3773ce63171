use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{AppState, Comment};

/// 键值存储边界，值为原始字节，解码由调用方负责
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// 文件存储：每个键对应目录下的一个 `<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// 内存存储
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// 从存储加载状态
///
/// 记录缺失、不是合法UTF-8/JSON或字段类型错误时均回退到默认值，只有IO错误会返回。
pub fn load_state(store: &dyn KeyValueStore, key: &str) -> Result<AppState> {
    let Some(content) = store.get(key)? else {
        debug!(key, "no saved state, starting fresh");
        return Ok(AppState::default());
    };

    match serde_json::from_slice::<Value>(&content) {
        Ok(value) => Ok(state_from_value(&value)),
        Err(e) => {
            warn!(key, error = %e, "saved state is not valid JSON, using defaults");
            Ok(AppState::default())
        }
    }
}

/// 保存状态到存储
pub fn save_state(store: &mut dyn KeyValueStore, key: &str, state: &AppState) -> Result<()> {
    let content = serde_json::to_vec(state)?;
    store.set(key, &content)?;
    debug!(key, bytes = content.len(), "state saved");
    Ok(())
}

fn state_from_value(value: &Value) -> AppState {
    let Some(object) = value.as_object() else {
        warn!("saved state is not an object, using defaults");
        return AppState::default();
    };

    let counter = |name: &str| object.get(name).and_then(Value::as_u64).unwrap_or(0);

    let comments = object
        .get("comments")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match serde_json::from_value::<Comment>(entry.clone()) {
                    Ok(comment) => Some(comment),
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable comment");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    AppState {
        like_count: counter("likeCount"),
        news_votes: counter("newsVotes"),
        blog_votes: counter("blogVotes"),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "blogAppData";

    fn sample_state() -> AppState {
        let mut state = AppState {
            like_count: 7,
            news_votes: 3,
            blog_votes: 5,
            comments: Vec::new(),
        };
        state.push_comment(Comment::new("older".to_string()));
        state.push_comment(Comment::new("newer".to_string()));
        state
    }

    #[test]
    fn test_missing_key_is_default() {
        let store = MemoryStore::new();
        assert_eq!(load_state(&store, KEY).unwrap(), AppState::default());
    }

    #[test]
    fn test_round_trip_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let state = sample_state();

        save_state(&mut store, KEY, &state).unwrap();
        assert!(store.path_for(KEY).exists());

        let reopened = FileStore::new(dir.path());
        let loaded = load_state(&reopened, KEY).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.comments[0].text, "newer");
    }

    #[test]
    fn test_missing_fields_default() {
        let mut store = MemoryStore::new();
        store.set(KEY, br#"{"likeCount": 4}"#).unwrap();

        let state = load_state(&store, KEY).unwrap();
        assert_eq!(state.like_count, 4);
        assert_eq!(state.news_votes, 0);
        assert_eq!(state.blog_votes, 0);
        assert!(state.comments.is_empty());
    }

    #[test]
    fn test_invalid_fields_default() {
        let mut store = MemoryStore::new();
        store
            .set(
                KEY,
                br#"{"likeCount": "many", "newsVotes": -2, "blogVotes": 1,
                    "comments": [{"id": 1, "text": "ok", "timestamp": "t"}, {"text": 5}]}"#,
            )
            .unwrap();

        let state = load_state(&store, KEY).unwrap();
        assert_eq!(state.like_count, 0);
        assert_eq!(state.news_votes, 0);
        assert_eq!(state.blog_votes, 1);
        assert_eq!(state.comments.len(), 1);
        assert_eq!(state.comments[0].text, "ok");
    }

    #[test]
    fn test_corrupt_record_is_default() {
        let mut store = MemoryStore::new();
        store.set(KEY, b"{not json").unwrap();
        assert_eq!(load_state(&store, KEY).unwrap(), AppState::default());

        store.set(KEY, b"[1, 2, 3]").unwrap();
        assert_eq!(load_state(&store, KEY).unwrap(), AppState::default());
    }

    #[test]
    fn test_non_utf8_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(KEY), [0xff, 0xfe, b'{', b'}']).unwrap();

        assert_eq!(load_state(&store, KEY).unwrap(), AppState::default());
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        // 键路径是目录时读取失败，属于真正的IO错误
        fs::create_dir(store.path_for(KEY)).unwrap();

        assert!(load_state(&store, KEY).is_err());
    }

    #[test]
    fn test_saved_layout() {
        let mut store = MemoryStore::new();
        save_state(&mut store, KEY, &sample_state()).unwrap();

        let raw = store.get(KEY).unwrap().unwrap();
        let value: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["likeCount"], 7);
        assert_eq!(value["newsVotes"], 3);
        assert_eq!(value["blogVotes"], 5);
        assert_eq!(value["comments"][0]["text"], "newer");
        assert!(value["comments"][0]["id"].is_i64());
        assert!(value["comments"][0]["timestamp"].is_string());
    }
}
