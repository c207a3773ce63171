//! 通用 UI 组件
//!
//! 计数面板、输入框、通知等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::notify::{Notification, NotificationKind};

/// [组件] 带标题的计数面板
pub fn render_counter(frame: &mut Frame, area: Rect, title: &str, value: &str, style: Style) {
    let counter = Paragraph::new(value)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(counter, area);
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 单条通知
pub fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    frame.render_widget(Clear, area);

    let color = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
    };

    let widget = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(widget, area);
}
