//! 全局应用状态与各类交互命令

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::storage::config::{load_config, save_config};
use crate::storage::{tick_dir, FileStore, KvStore};
use crate::tasks::TaskList;
use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};
use crate::ui::components::task_dialog::{EMPTY_TASK_MESSAGE, TaskDialogData};

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 全局应用状态
pub struct App<S: KvStore = FileStore> {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务列表
    pub tasks: TaskList<S>,
    /// 列表选择状态
    pub list_state: ListState,
    /// 任务弹窗（新建 / 编辑），None 表示关闭
    pub task_dialog: Option<TaskDialogData>,
    /// 是否显示帮助面板
    pub show_help: bool,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
}

impl App {
    pub fn new() -> Self {
        let config = load_config();
        let theme = Theme::from_name(&config.theme.name);
        Self::with_store(FileStore::new(tick_dir()), theme)
    }
}

impl<S: KvStore> App<S> {
    /// 以指定存储与主题构建应用状态，并加载已保存的任务
    pub fn with_store(store: S, theme: Theme) -> Self {
        let last_system_dark = detect_system_theme();
        let colors = get_theme_colors(theme);

        let mut tasks = TaskList::new(store);
        let load_failed = tasks.load_snapshot().is_err();

        let mut list_state = ListState::default();
        if !tasks.is_empty() {
            list_state.select(Some(0));
        }

        let mut app = Self {
            should_quit: false,
            tasks,
            list_state,
            task_dialog: None,
            show_help: false,
            toast: None,
            theme,
            colors,
            last_system_dark,
        };

        if load_failed {
            // 留长一点，启动时用户需要时间注意到
            app.toast = Some(Toast::new(
                "Stored tasks could not be read, starting empty",
                Duration::from_secs(5),
            ));
        }

        app
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let list_len = self.tasks.len();
        if list_len == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let next = (current + 1) % list_len;
        self.list_state.select(Some(next));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let list_len = self.tasks.len();
        if list_len == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let prev = if current == 0 {
            list_len - 1
        } else {
            current - 1
        };
        self.list_state.select(Some(prev));
    }

    /// 确保选中项落在列表范围内
    pub fn ensure_selection(&mut self) {
        let list_len = self.tasks.len();

        if list_len == 0 {
            self.list_state.select(None);
            return;
        }

        match self.list_state.selected() {
            Some(index) if index >= list_len => self.list_state.select(Some(list_len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    // ========== Task Dialog ==========

    /// 打开新建任务弹窗
    pub fn open_add_dialog(&mut self) {
        self.tasks.begin_add();
        self.task_dialog = Some(TaskDialogData::new());
    }

    /// 打开编辑弹窗（编辑当前选中任务，输入框预填原文本）
    pub fn open_edit_dialog(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(id) = self.tasks.tasks().get(index).map(|t| t.id.clone()) else {
            return;
        };

        if let Some(task) = self.tasks.begin_edit(&id) {
            self.task_dialog = Some(TaskDialogData::with_text(task.text.clone()));
        }
    }

    /// 关闭任务弹窗（不保存，编辑目标一并清除）
    pub fn close_task_dialog(&mut self) {
        self.task_dialog = None;
        self.tasks.begin_add();
    }

    /// 任务弹窗输入字符
    pub fn task_dialog_input_char(&mut self, c: char) {
        if let Some(ref mut data) = self.task_dialog {
            data.input_char(c);
        }
    }

    /// 任务弹窗删除字符
    pub fn task_dialog_delete_char(&mut self) {
        if let Some(ref mut data) = self.task_dialog {
            data.delete_char();
        }
    }

    /// 提交任务弹窗（新建追加，编辑原位替换）
    pub fn submit_task_dialog(&mut self) {
        let Some(ref mut dialog) = self.task_dialog else {
            return;
        };

        // 1. 空输入只在表单里报错，弹窗保持打开
        let text = dialog.input.trim().to_string();
        if text.is_empty() {
            dialog.error = Some(EMPTY_TASK_MESSAGE);
            return;
        }

        // 2. 提交到任务列表（持久化在内部完成）
        let editing = self.tasks.is_editing();
        let result = self.tasks.submit(&text);
        self.task_dialog = None;

        // 3. 新增时选中刚加入的末尾项
        if !editing {
            let len = self.tasks.len();
            if len > 0 {
                self.list_state.select(Some(len - 1));
            }
        }

        match result {
            Ok(()) if editing => self.show_toast(format!("Saved: {}", text)),
            Ok(()) => self.show_toast(format!("Added: {}", text)),
            Err(e) => {
                tracing::error!("failed to save task: {}", e);
                self.show_toast(format!("Save failed: {}", e));
            }
        }
    }

    /// 删除当前选中的任务
    pub fn delete_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some((id, text)) = self
            .tasks
            .tasks()
            .get(index)
            .map(|t| (t.id.clone(), t.text.clone()))
        else {
            return;
        };

        match self.tasks.delete(&id) {
            Ok(()) => self.show_toast(format!("Deleted: {}", text)),
            Err(e) => {
                tracing::error!("failed to delete task: {}", e);
                self.show_toast(format!("Delete failed: {}", e));
            }
        }

        self.ensure_selection();
    }

    // ========== 主题 ==========

    /// 切换到下一个主题并写回配置
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);
        self.show_toast(format!("Theme: {}", self.theme.label()));

        let mut config = load_config();
        config.theme.name = self.theme.label().to_string();
        if let Err(e) = save_config(&config) {
            tracing::warn!("failed to save config: {}", e);
        }
    }

    /// 检查系统主题变化（用于 Auto 模式）
    pub fn check_system_theme(&mut self) {
        // 只在 Auto 模式下检查
        if self.theme != Theme::Auto {
            return;
        }

        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }

    // ========== 其他 ==========

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Duration::from_secs(2)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::tasks::SNAPSHOT_KEY;

    fn make_app() -> (MemoryStore, App<MemoryStore>) {
        let store = MemoryStore::new();
        let app = App::with_store(store.clone(), Theme::Dark);
        (store, app)
    }

    fn submit_text<S: KvStore>(app: &mut App<S>, text: &str) {
        for c in text.chars() {
            app.task_dialog_input_char(c);
        }
        app.submit_task_dialog();
    }

    #[test]
    fn test_add_flow_appends_and_selects_new_task() {
        let (_, mut app) = make_app();

        app.open_add_dialog();
        assert!(app.task_dialog.is_some());

        submit_text(&mut app, "Buy milk");

        assert!(app.task_dialog.is_none());
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "Buy milk");
        assert_eq!(app.list_state.selected(), Some(0));

        app.open_add_dialog();
        submit_text(&mut app, "Walk dog");
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_empty_submit_shows_inline_error_and_keeps_dialog() {
        let (store, mut app) = make_app();

        app.open_add_dialog();
        submit_text(&mut app, "   ");

        let dialog = app.task_dialog.as_ref().unwrap();
        assert_eq!(dialog.error, Some(EMPTY_TASK_MESSAGE));
        assert!(app.tasks.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_typing_clears_inline_error() {
        let (_, mut app) = make_app();

        app.open_add_dialog();
        app.submit_task_dialog();
        assert!(app.task_dialog.as_ref().unwrap().error.is_some());

        app.task_dialog_input_char('a');
        assert!(app.task_dialog.as_ref().unwrap().error.is_none());
    }

    #[test]
    fn test_edit_flow_prefills_and_saves() {
        let (_, mut app) = make_app();

        app.open_add_dialog();
        submit_text(&mut app, "Buy milk");
        let id = app.tasks.tasks()[0].id.clone();

        app.open_edit_dialog();
        let dialog = app.task_dialog.as_ref().unwrap();
        assert_eq!(dialog.input, "Buy milk");
        assert!(app.tasks.is_editing());

        app.task_dialog_delete_char();
        app.task_dialog_delete_char();
        app.task_dialog_delete_char();
        app.task_dialog_delete_char();
        for c in "oat milk".chars() {
            app.task_dialog_input_char(c);
        }
        app.submit_task_dialog();

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].text, "Buy oat milk");
        assert_eq!(app.tasks.tasks()[0].id, id);
    }

    #[test]
    fn test_cancel_edit_restores_add_mode() {
        let (_, mut app) = make_app();

        app.open_add_dialog();
        submit_text(&mut app, "Buy milk");

        app.open_edit_dialog();
        assert!(app.tasks.is_editing());

        app.close_task_dialog();
        assert!(app.task_dialog.is_none());
        assert!(!app.tasks.is_editing());
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let (_, mut app) = make_app();

        for text in ["one", "two", "three"] {
            app.open_add_dialog();
            submit_text(&mut app, text);
        }
        assert_eq!(app.list_state.selected(), Some(2));

        // 删除末尾项，选中回退到新的末尾
        app.delete_selected();
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.list_state.selected(), Some(1));

        app.delete_selected();
        app.delete_selected();
        assert!(app.tasks.is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_select_wraps_around() {
        let (_, mut app) = make_app();

        for text in ["one", "two"] {
            app.open_add_dialog();
            submit_text(&mut app, text);
        }

        app.list_state.select(Some(1));
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));

        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_state_survives_restart() {
        let (store, mut app) = make_app();

        app.open_add_dialog();
        submit_text(&mut app, "Buy milk");
        app.open_add_dialog();
        submit_text(&mut app, "Walk dog");

        let reopened = App::with_store(store, Theme::Dark);
        assert_eq!(reopened.tasks.len(), 2);
        assert_eq!(reopened.tasks.tasks()[0].text, "Buy milk");
        assert_eq!(reopened.tasks.tasks()[1].text, "Walk dog");
        assert_eq!(reopened.list_state.selected(), Some(0));
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty_with_notice() {
        let mut store = MemoryStore::new();
        store.set(SNAPSHOT_KEY, "{broken").unwrap();

        let app = App::with_store(store, Theme::Dark);
        assert!(app.tasks.is_empty());
        assert!(app.toast.is_some());
        assert_eq!(app.list_state.selected(), None);
    }
}
