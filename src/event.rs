use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::storage::KvStore;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 检查系统主题变化（用于 Auto 模式）
    app.check_system_theme();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

fn handle_key<S: KvStore>(app: &mut App<S>, key: KeyEvent) {
    // 优先处理弹窗事件

    // 帮助面板
    if app.show_help {
        handle_help_key(app, key);
        return;
    }

    // 任务弹窗
    if app.task_dialog.is_some() {
        handle_task_dialog_key(app, key);
        return;
    }

    handle_list_key(app, key);
}

/// 处理任务列表的键盘事件
fn handle_list_key<S: KvStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航 - 下移
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
        }

        // 导航 - 上移
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
        }

        // 功能按键 - 新建任务
        KeyCode::Char('a') => {
            app.open_add_dialog();
        }

        // 功能按键 - 编辑选中任务
        KeyCode::Char('e') | KeyCode::Enter => {
            app.open_edit_dialog();
        }

        // 功能按键 - 删除选中任务
        KeyCode::Char('x') => {
            app.delete_selected();
        }

        // 功能按键 - 切换主题
        KeyCode::Char('T') | KeyCode::Char('t') => {
            app.cycle_theme();
        }

        // 功能按键 - 帮助
        KeyCode::Char('?') => {
            app.show_help = true;
        }

        _ => {}
    }
}

/// 处理任务弹窗的键盘事件
fn handle_task_dialog_key<S: KvStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        // 确认提交
        KeyCode::Enter => {
            app.submit_task_dialog();
        }

        // 取消
        KeyCode::Esc => {
            app.close_task_dialog();
        }

        // 删除字符
        KeyCode::Backspace => {
            app.task_dialog_delete_char();
        }

        // 输入字符
        KeyCode::Char(c) => {
            app.task_dialog_input_char(c);
        }

        _ => {}
    }
}

/// 处理帮助面板的键盘事件
fn handle_help_key<S: KvStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        // 关闭帮助面板
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            app.show_help = false;
        }
        _ => {}
    }
}
