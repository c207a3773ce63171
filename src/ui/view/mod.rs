//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::state::{App, AppMode, DisplayModel, FieldId};
use components::{render_counter, render_input_widget, render_notification};
use layouts::notification_rect;

const NOTIFICATION_WIDTH: u16 = 44;
const NOTIFICATION_HEIGHT: u16 = 3;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let display = app.display();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(8), // 点赞/投票 + 登录/注册
            Constraint::Length(3), // 评论输入
            Constraint::Min(5),    // 评论列表
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_engagement(frame, app, &display, columns[0]);
    render_auth(frame, app, columns[1]);

    render_field(frame, app, FieldId::Comment, chunks[2]);
    render_comments(frame, &display, chunks[3]);
    render_help(frame, app, chunks[4]);

    render_notifications(frame, app);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("📝 Blog Board")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// 点赞计数与投票结果
fn render_engagement(frame: &mut Frame, app: &App, display: &DisplayModel, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let like_style = if app.is_pulsing() {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Magenta)
    };
    render_counter(frame, rows[0], "❤ Likes", &display.like_count, like_style);

    let polls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let vote_style = Style::default().fg(Color::Blue);
    render_counter(frame, polls[0], "News app", &display.news_votes, vote_style);
    render_counter(frame, polls[1], "Blog app", &display.blog_votes, vote_style);
}

fn render_auth(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let heading = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new("Login").style(heading), rows[0]);
    frame.render_widget(Paragraph::new("Sign up").style(heading), rows[2]);

    let pair = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let login = pair(rows[1]);
    let signup = pair(rows[3]);

    render_field(frame, app, FieldId::LoginUsername, login[0]);
    render_field(frame, app, FieldId::LoginPassword, login[1]);
    render_field(frame, app, FieldId::SignupUsername, signup[0]);
    render_field(frame, app, FieldId::SignupPassword, signup[1]);
}

/// 渲染单个输入框，密码框显示为掩码
fn render_field(frame: &mut Frame, app: &App, field: FieldId, area: Rect) {
    let raw = app.inputs.get(field);
    let masked;
    let value = if field.is_password() {
        masked = "•".repeat(raw.chars().count());
        masked.as_str()
    } else {
        raw
    };

    render_input_widget(
        frame,
        area,
        field.label(),
        value,
        app.focused_field() == Some(field),
        Color::Yellow,
    );
}

fn render_comments(frame: &mut Frame, display: &DisplayModel, area: Rect) {
    let items: Vec<ListItem> = display
        .comment_list
        .iter()
        .map(|line| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    line.text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    line.time.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            ])
        })
        .collect();

    let title = format!("Comments ({})", display.comment_list.len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Browsing => {
            "[l] Like  [n] Vote news  [b] Vote blog  [c] Comment  [u] Login  [s] Sign up  [q] Quit"
        }
        AppMode::Editing(_) => "[Enter] Submit  [Tab] Next field  [Esc] Done",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// 右上角堆叠显示通知
fn render_notifications(frame: &mut Frame, app: &App) {
    let area = frame.area();
    for (slot, notification) in app.notifications.visible().iter().enumerate() {
        let Ok(slot) = u16::try_from(slot) else {
            break;
        };
        let Some(rect) = notification_rect(slot, NOTIFICATION_WIDTH, NOTIFICATION_HEIGHT, area)
        else {
            break;
        };
        render_notification(frame, rect, notification);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::config::Config;
    use crate::models::AppState;
    use crate::storage::MemoryStore;

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sample_app() -> App {
        let mut app = App::new(
            AppState::default(),
            Box::new(MemoryStore::new()),
            Config::default(),
        );
        app.like_post();
        app.vote("news");
        app.add_comment("hello there");
        app
    }

    #[test]
    fn test_render_idempotent() {
        let app = sample_app();
        assert_eq!(app.display(), app.display());
        assert_eq!(draw(&app), draw(&app));
    }

    #[test]
    fn test_render_shows_state() {
        let app = sample_app();
        let text = buffer_text(&draw(&app));
        assert!(text.contains("hello there"));
        assert!(text.contains("Comments (1)"));
        assert!(text.contains("Likes"));
    }

    #[test]
    fn test_password_masked() {
        let mut app = sample_app();
        // 先让通知过期，避免遮挡注册表单
        app.tick(Instant::now() + Duration::from_secs(10));
        app.inputs.set(FieldId::SignupPassword, "hunter22");
        let text = buffer_text(&draw(&app));
        assert!(!text.contains("hunter22"));
        assert!(text.contains("••••••••"));
    }
}
