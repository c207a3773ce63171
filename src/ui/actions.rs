//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use super::state::FieldId;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    LikePost,
    Vote(String),

    // 焦点
    Focus(FieldId),
    FocusNext,
    FocusPrev,

    // 表单/通用交互
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
