//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use std::time::Instant;

use tracing::{debug, error, info};

use super::actions::Action;
use super::notify::NotificationKind;
use super::state::{App, AppMode, FieldId, Form};
use crate::error::ValidationError;
use crate::models::{Choice, Comment};
use crate::storage::save_state;

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,

            Action::LikePost => self.like_post(),
            Action::Vote(choice) => self.vote(&choice),

            Action::Focus(field) => self.mode = AppMode::Editing(field),
            Action::FocusNext => {
                if let AppMode::Editing(field) = self.mode {
                    self.mode = AppMode::Editing(field.next());
                }
            }
            Action::FocusPrev => {
                if let AppMode::Editing(field) = self.mode {
                    self.mode = AppMode::Editing(field.prev());
                }
            }

            Action::Cancel => self.mode = AppMode::Browsing,
            Action::Submit => {
                if let AppMode::Editing(field) = self.mode {
                    self.submit(field.form());
                }
            }

            Action::Input(c) => {
                if let AppMode::Editing(field) = self.mode {
                    if !c.is_control() {
                        self.inputs.get_mut(field).push(c);
                    }
                }
            }
            Action::DeleteChar => {
                if let AppMode::Editing(field) = self.mode {
                    self.inputs.get_mut(field).pop();
                }
            }
        }
        false
    }

    /// 推进计时：过期通知和点赞高亮
    pub fn tick(&mut self, now: Instant) {
        self.notifications.prune(now);
        if self.pulse_until.is_some_and(|until| now >= until) {
            self.pulse_until = None;
        }
    }

    // ============ 点赞 ============

    pub fn like_post(&mut self) {
        let count = self.state.like();
        self.pulse_until = Some(Instant::now() + self.config.pulse());
        debug!(count, "post liked");
        self.persist();
        self.notify("Post liked! 👍");
    }

    // ============ 投票 ============

    /// 为 "news" 或 "blog" 投票，其他值被忽略
    pub fn vote(&mut self, choice: &str) {
        let Ok(choice) = choice.parse::<Choice>() else {
            debug!(choice, "ignoring unknown vote choice");
            return;
        };
        let tally = self.state.record_vote(choice);
        debug!(%choice, tally, "vote recorded");
        self.persist();
        self.notify(format!("Voted for {choice} app! 🗳️"));
    }

    // ============ 评论 ============

    pub fn add_comment(&mut self, raw_text: &str) {
        let text = match validate_comment(raw_text) {
            Ok(text) => text.to_string(),
            Err(e) => return self.warn(e),
        };

        self.state.push_comment(Comment::new(text));
        info!(total = self.state.comments.len(), "comment added");
        self.persist();
        self.inputs.clear(FieldId::Comment);
        self.notify("Comment added! 💬");
    }

    // ============ 登录/注册（仅校验输入） ============

    pub fn login(&mut self, username: &str, password: &str) {
        if let Err(e) = validate_credentials(username, password, None) {
            return self.warn(e);
        }

        info!(username, "login form accepted");
        self.notify(format!("Welcome back, {username}! 👋"));
        self.inputs.clear(FieldId::LoginUsername);
        self.inputs.clear(FieldId::LoginPassword);
    }

    pub fn signup(&mut self, username: &str, password: &str) {
        let min_len = self.config.min_password_len;
        if let Err(e) = validate_credentials(username, password, Some(min_len)) {
            return self.warn(e);
        }

        info!(username, "signup form accepted");
        self.notify(format!("Account created for {username}! 🎉"));
        self.inputs.clear(FieldId::SignupUsername);
        self.inputs.clear(FieldId::SignupPassword);
    }

    /// 提交当前表单（Enter）
    pub fn submit(&mut self, form: Form) {
        match form {
            Form::Comment => {
                let text = self.inputs.get(FieldId::Comment).to_string();
                self.add_comment(&text);
            }
            Form::Login => {
                let username = self.inputs.get(FieldId::LoginUsername).to_string();
                let password = self.inputs.get(FieldId::LoginPassword).to_string();
                self.login(&username, &password);
            }
            Form::Signup => {
                let username = self.inputs.get(FieldId::SignupUsername).to_string();
                let password = self.inputs.get(FieldId::SignupPassword).to_string();
                self.signup(&username, &password);
            }
        }
    }

    // ============ 通用操作 ============

    /// 保存状态，失败时只记录日志并提示，内存状态不变
    fn persist(&mut self) {
        if let Err(e) = save_state(&mut *self.store, &self.config.storage_key, &self.state) {
            error!(error = %e, "failed to save state");
            self.notifications
                .push("Could not save data ⚠️", NotificationKind::Warning);
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(message, NotificationKind::Success);
    }

    fn warn(&mut self, e: ValidationError) {
        debug!(error = %e, "input rejected");
        self.notifications.push(e.to_string(), NotificationKind::Warning);
    }
}

/// 评论去除首尾空白后不能为空
pub fn validate_comment(raw_text: &str) -> Result<&str, ValidationError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(text)
}

/// 用户名和密码都不能为空；给定 `min_len` 时密码长度不得小于它
pub fn validate_credentials(
    username: &str,
    password: &str,
    min_len: Option<usize>,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if let Some(min_len) = min_len {
        if password.chars().count() < min_len {
            return Err(ValidationError::PasswordTooShort { min_len });
        }
    }
    Ok(())
}
