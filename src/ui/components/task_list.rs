//! 任务列表

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::tasks::Task;
use crate::theme::ThemeColors;

use super::truncate;

/// 渲染任务列表
///
/// 选中行跟随 `TableState`，超出可视区域时表格自动滚动。
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected_index: Option<usize>,
    colors: &ThemeColors,
) {
    let max_text = (area.width as usize).saturating_sub(4);

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };

            let text_style = if is_selected {
                Style::default()
                    .fg(colors.text)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(truncate(&task.text, max_text)).style(text_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2), // 选择器
        Constraint::Fill(1),   // 任务文本
    ];

    let table = Table::new(rows, widths).row_highlight_style(
        Style::default()
            .bg(colors.bg_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
