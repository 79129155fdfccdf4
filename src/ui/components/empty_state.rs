//! 空列表状态组件

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染空状态提示（列表没有任何任务时）
pub fn render(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "No tasks yet",
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(colors.text)),
            Span::styled(
                " a ",
                Style::default()
                    .fg(colors.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("to add your first task", Style::default().fg(colors.text)),
        ]),
    ];

    let text_height = lines.len() as u16;
    let hint_widget = Paragraph::new(lines).alignment(Alignment::Center);

    if area.height <= text_height {
        frame.render_widget(hint_widget, area);
        return;
    }

    // 垂直居中布局
    let vertical_padding = (area.height - text_height) / 2;
    let [_, text_area, _] = Layout::vertical([
        Constraint::Length(vertical_padding),
        Constraint::Length(text_height),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(hint_widget, text_area);
}
