//! 本地持久化层
//!
//! 所有持久化都走一个极简的键值槽位抽象 (`KvStore`)：一个 key 对应一份
//! 完整的字符串值。生产实现 `FileStore` 把每个 key 映射为
//! `<目录>/<key>.json` 文件；测试用 `MemoryStore` 在内存中模拟同样的语义，
//! 让核心逻辑可以脱离真实文件系统验证。

pub mod config;

use std::path::PathBuf;

use crate::error::Result;

/// 获取 ~/.tick/ 目录路径
pub fn tick_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot find home directory")
        .join(".tick")
}

/// 键值槽位抽象
///
/// - `get` 永不报错：槽位不存在（或读不出来）一律返回 `None`。
/// - `set` 整体覆盖写入，失败时返回错误由调用方上报。
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// 文件后端：每个 key 存为 `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// key 对应的文件路径
    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                // 文件存在但读不出来（权限等）：按不存在处理，留下日志
                tracing::warn!("failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::KvStore;
    use crate::error::Result;

    /// 内存后端（仅测试）
    ///
    /// 内部状态通过 `Rc` 共享：clone 出的句柄观察同一份数据，
    /// 测试可以在把 store 交给被测对象之后继续断言写入次数。
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        writes: Rc<Cell<usize>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// 累计 `set` 调用次数
        pub fn writes(&self) -> usize {
            self.writes.get()
        }
    }

    impl KvStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("tasks-list", r#"[{"id":"1","text":"Buy milk"}]"#).unwrap();
        assert_eq!(
            store.get("tasks-list").as_deref(),
            Some(r#"[{"id":"1","text":"Buy milk"}]"#)
        );
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("tasks-list"), None);
    }

    #[test]
    fn test_file_store_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("tasks-list", "[]").unwrap();
        // 目录按需创建，文件名为 <key>.json
        assert!(dir.path().join("nested").join("tasks-list.json").exists());
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("tasks-list", "[]").unwrap();
        store.set("tasks-list", r#"[{"id":"a","text":"x"}]"#).unwrap();
        assert_eq!(
            store.get("tasks-list").as_deref(),
            Some(r#"[{"id":"a","text":"x"}]"#)
        );
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryStore::new();
        let mut handle = store.clone();

        assert_eq!(store.writes(), 0);
        handle.set("k", "v1").unwrap();
        handle.set("k", "v2").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }
}
