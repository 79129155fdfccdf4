//! 任务弹窗组件（新建 / 编辑共用一套表单）

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tasks::Task;
use crate::theme::ThemeColors;

use super::truncate;

/// 空输入提交时显示的错误文案
pub const EMPTY_TASK_MESSAGE: &str = "Task name cannot be empty";

/// 任务弹窗的表单状态
#[derive(Debug, Default)]
pub struct TaskDialogData {
    /// 当前输入内容
    pub input: String,
    /// 行内错误提示（提交空内容时出现）
    pub error: Option<&'static str>,
}

impl TaskDialogData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有文本初始化（编辑场景预填）
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            input: text.into(),
            error: None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
        self.error = None;
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
        self.error = None;
    }
}

/// 渲染任务弹窗，`edit_target` 为 Some 时标题与提示切换为编辑样式
pub fn render(
    frame: &mut Frame,
    data: &TaskDialogData,
    edit_target: Option<&Task>,
    colors: &ThemeColors,
) {
    let area = frame.area();

    let dialog_width = 60.min(area.width.saturating_sub(4));
    let dialog_height = 9;

    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height.min(area.height),
    };

    // 清除弹窗底下的内容
    frame.render_widget(Clear, dialog_area);

    let title = if edit_target.is_some() {
        " Edit Task "
    } else {
        " New Task "
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let [_, input_area, _, message_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_input(frame, input_area, data, colors);
    render_message(frame, message_area, data, edit_target, colors);
    render_hint(frame, hint_area, edit_target.is_some(), colors);
}

fn render_input(frame: &mut Frame, area: Rect, data: &TaskDialogData, colors: &ThemeColors) {
    let input_line = Line::from(vec![
        Span::styled("  Task: ", Style::default().fg(colors.muted)),
        Span::styled(data.input.as_str(), Style::default().fg(colors.text)),
        Span::styled("█", Style::default().fg(colors.highlight)),
    ]);

    frame.render_widget(Paragraph::new(input_line), area);
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    data: &TaskDialogData,
    edit_target: Option<&Task>,
    colors: &ThemeColors,
) {
    let line = if let Some(error) = data.error {
        Line::from(Span::styled(
            format!("  ✗ {}", error),
            Style::default().fg(colors.error),
        ))
    } else if let Some(task) = edit_target {
        let shown = truncate(&task.text, area.width.saturating_sub(10) as usize);
        Line::from(Span::styled(
            format!("  was: {}", shown),
            Style::default().fg(colors.muted),
        ))
    } else if data.input.is_empty() {
        Line::from(Span::styled(
            "  (enter task name)",
            Style::default().fg(colors.muted),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_hint(frame: &mut Frame, area: Rect, editing: bool, colors: &ThemeColors) {
    // 确认键的说明随模式切换
    let confirm = if editing { " save  " } else { " add  " };

    let hint_line = Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(confirm, Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]);

    frame.render_widget(
        Paragraph::new(hint_line).alignment(Alignment::Center),
        area,
    );
}
