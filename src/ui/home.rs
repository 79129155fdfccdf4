//! 主页面渲染（任务列表 + 各类浮层）

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::app::App;

use super::components::{
    empty_state, footer, header, help_panel, task_dialog, task_list, toast,
};

/// 渲染主页面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    // 布局
    let [header_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    // 渲染 Header（Logo + 任务数）
    header::render(frame, header_area, app.tasks.len(), colors);

    // 渲染内容（任务列表或空状态）
    render_content(frame, content_area, app);

    // 渲染 Footer
    footer::render(frame, footer_area, !app.tasks.is_empty(), colors);

    // 渲染 Toast
    if let Some(ref t) = app.toast {
        if !t.is_expired() {
            toast::render(frame, &t.message, colors);
        }
    }

    // 渲染帮助面板
    if app.show_help {
        help_panel::render(frame, colors);
    }

    // 渲染任务弹窗（最顶层）
    if let Some(ref data) = app.task_dialog {
        task_dialog::render(frame, data, app.tasks.edit_target(), colors);
    }
}

/// 渲染中间内容区
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;

    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.tasks.is_empty() {
        empty_state::render(frame, inner, colors);
    } else {
        let selected = app.list_state.selected();
        task_list::render(frame, inner, app.tasks.tasks(), selected, colors);
    }
}
