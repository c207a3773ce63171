//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode, FieldId};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Browsing => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::LikePost),
            KeyCode::Char('n') => Some(Action::Vote("news".to_string())),
            KeyCode::Char('b') => Some(Action::Vote("blog".to_string())),
            KeyCode::Char('c') => Some(Action::Focus(FieldId::Comment)),
            KeyCode::Char('u') => Some(Action::Focus(FieldId::LoginUsername)),
            KeyCode::Char('s') => Some(Action::Focus(FieldId::SignupUsername)),
            KeyCode::Tab => Some(Action::Focus(FieldId::Comment)),
            _ => None,
        },
        AppMode::Editing(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browsing_keys() {
        let mode = AppMode::Browsing;
        assert_eq!(get_action(&mode, KeyCode::Char('l')), Some(Action::LikePost));
        assert_eq!(
            get_action(&mode, KeyCode::Char('b')),
            Some(Action::Vote("blog".to_string()))
        );
        assert_eq!(
            get_action(&mode, KeyCode::Char('s')),
            Some(Action::Focus(FieldId::SignupUsername))
        );
        assert_eq!(get_action(&mode, KeyCode::Enter), None);
    }

    #[test]
    fn test_editing_keys_type_text() {
        let mode = AppMode::Editing(FieldId::Comment);
        // 编辑时 'q' 和 'l' 只是普通字符
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Input('q')));
        assert_eq!(get_action(&mode, KeyCode::Char('l')), Some(Action::Input('l')));
        assert_eq!(get_action(&mode, KeyCode::Enter), Some(Action::Submit));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
    }
}
