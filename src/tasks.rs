//! 任务数据与任务列表管理器
//!
//! 这是整个应用的核心：内存中维护一个有序任务序列，响应新增 / 编辑 /
//! 删除三种命令，并在每次变更后立即把完整快照写回注入的键值槽位，
//! 保证落盘副本与内存状态至多相差一次命令。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TickError};
use crate::storage::KvStore;

/// 任务快照在键值存储中的槽位 key
pub const SNAPSHOT_KEY: &str = "tasks-list";

/// 单条任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID（UUID v4 文本形式，创建后不再变化，唯一查找键）
    pub id: String,
    /// 任务文本（非空）
    pub text: String,
}

impl Task {
    /// 创建新任务（分配新 ID）
    fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
        }
    }
}

/// 任务列表管理器
///
/// `edit_target` 记录当前编辑目标的任务 ID；`None` 表示新增模式。
/// 不变量：目标一旦设置，必然指向序列中存在的任务
/// （删除目标任务时会同步清除）。
pub struct TaskList<S: KvStore> {
    tasks: Vec<Task>,
    edit_target: Option<String>,
    store: S,
}

impl<S: KvStore> TaskList<S> {
    pub fn new(store: S) -> Self {
        Self {
            tasks: Vec::new(),
            edit_target: None,
            store,
        }
    }

    // ========== 快照 ==========

    /// 从槽位加载快照并替换内存序列，返回加载的任务数
    ///
    /// 槽位不存在视为首次运行，得到空列表。内容无法解析时同样以
    /// 空列表继续，但返回错误交由调用方提示用户；损坏的槽位文件
    /// 保持原样，只会被下一次成功变更覆盖。
    pub fn load_snapshot(&mut self) -> Result<usize> {
        let Some(raw) = self.store.get(SNAPSHOT_KEY) else {
            self.tasks.clear();
            return Ok(0);
        };
        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                let count = tasks.len();
                self.tasks = tasks;
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("task snapshot is unreadable, starting empty: {}", e);
                self.tasks.clear();
                Err(TickError::Json(e))
            }
        }
    }

    /// 把当前序列整体序列化为 JSON 数组写回槽位
    pub fn persist_snapshot(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.tasks)?;
        self.store.set(SNAPSHOT_KEY, &json)
    }

    // ========== 命令 ==========

    /// 进入新增模式（清除编辑目标）
    pub fn begin_add(&mut self) {
        self.edit_target = None;
    }

    /// 进入编辑模式，返回目标任务用于表单预填
    ///
    /// ID 不存在时不改变任何状态并返回 `None`。
    pub fn begin_edit(&mut self, id: &str) -> Option<&Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        self.edit_target = Some(self.tasks[index].id.clone());
        Some(&self.tasks[index])
    }

    /// 确认表单输入
    ///
    /// 文本先做 trim；空文本直接报错，不产生任何变更。编辑模式下
    /// 原位替换目标任务的文本（ID 和位置都不变），新增模式下在
    /// 末尾追加新任务。两种情况都会清除编辑目标并立即持久化。
    pub fn submit(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            // 表单层已拦截空输入，这里兜底再查一次
            return Err(TickError::invalid_data("task name is empty"));
        }

        match self.edit_target.take() {
            Some(id) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.text = text.to_string();
                }
            }
            None => self.tasks.push(Task::new(text)),
        }
        self.persist_snapshot()
    }

    /// 按 ID 删除任务；ID 不存在则列表不变（幂等）
    ///
    /// 无论是否命中都重写一次快照，维持"每条命令后同步"的纪律。
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.retain(|t| t.id != id);
        if self.edit_target.as_deref() == Some(id) {
            self.edit_target = None;
        }
        self.persist_snapshot()
    }

    // ========== 查询 ==========

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 当前编辑目标指向的任务
    pub fn edit_target(&self) -> Option<&Task> {
        let id = self.edit_target.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }
}
