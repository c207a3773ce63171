//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::models::AppState;
use crate::storage::{KeyValueStore, load_state};

use super::notify::Notifications;

/// 应用状态
pub struct App {
    pub state: AppState,
    pub store: Box<dyn KeyValueStore>,
    pub config: Config,
    pub mode: AppMode,
    pub inputs: FormInputs,
    pub notifications: Notifications,
    pub pulse_until: Option<Instant>, // 点赞计数高亮截止时间
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browsing,
    Editing(FieldId),
}

/// 输入框标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Comment,
    LoginUsername,
    LoginPassword,
    SignupUsername,
    SignupPassword,
}

/// 输入框所属的表单
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Comment,
    Login,
    Signup,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Comment,
        FieldId::LoginUsername,
        FieldId::LoginPassword,
        FieldId::SignupUsername,
        FieldId::SignupPassword,
    ];

    fn index(self) -> usize {
        match self {
            FieldId::Comment => 0,
            FieldId::LoginUsername => 1,
            FieldId::LoginPassword => 2,
            FieldId::SignupUsername => 3,
            FieldId::SignupPassword => 4,
        }
    }

    pub fn next(self) -> FieldId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FieldId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn form(self) -> Form {
        match self {
            FieldId::Comment => Form::Comment,
            FieldId::LoginUsername | FieldId::LoginPassword => Form::Login,
            FieldId::SignupUsername | FieldId::SignupPassword => Form::Signup,
        }
    }

    pub fn is_password(self) -> bool {
        matches!(self, FieldId::LoginPassword | FieldId::SignupPassword)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Comment => "Comment",
            FieldId::LoginUsername => "Username",
            FieldId::LoginPassword => "Password",
            FieldId::SignupUsername => "New Username",
            FieldId::SignupPassword => "New Password",
        }
    }
}

/// 各输入框的当前值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    values: [String; 5],
}

impl FormInputs {
    pub fn get(&self, field: FieldId) -> &str {
        &self.values[field.index()]
    }

    pub fn get_mut(&mut self, field: FieldId) -> &mut String {
        &mut self.values[field.index()]
    }

    #[allow(dead_code)]
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn clear(&mut self, field: FieldId) {
        self.values[field.index()].clear();
    }
}

/// 页面各元素的文本内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub like_count: String,
    pub news_votes: String,
    pub blog_votes: String,
    pub comment_list: Vec<CommentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    pub text: String,
    pub time: String,
}

impl App {
    /// 创建新的应用实例
    pub fn new(state: AppState, store: Box<dyn KeyValueStore>, config: Config) -> Self {
        let notifications = Notifications::new(config.notification_ttl());
        Self {
            state,
            store,
            config,
            mode: AppMode::Browsing,
            inputs: FormInputs::default(),
            notifications,
            pulse_until: None,
        }
    }

    /// 从存储恢复状态并创建应用实例
    pub fn open(store: Box<dyn KeyValueStore>, config: Config) -> Result<Self> {
        let state = load_state(&*store, &config.storage_key)?;
        tracing::info!(
            likes = state.like_count,
            news = state.news_votes,
            blog = state.blog_votes,
            comments = state.comments.len(),
            "state restored"
        );
        Ok(Self::new(state, store, config))
    }

    /// 当前聚焦的输入框
    pub fn focused_field(&self) -> Option<FieldId> {
        match self.mode {
            AppMode::Browsing => None,
            AppMode::Editing(field) => Some(field),
        }
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_until.is_some()
    }

    /// 由状态生成显示内容
    pub fn display(&self) -> DisplayModel {
        DisplayModel {
            like_count: self.state.like_count.to_string(),
            news_votes: self.state.news_votes.to_string(),
            blog_votes: self.state.blog_votes.to_string(),
            comment_list: self
                .state
                .comments
                .iter()
                .map(|c| CommentLine {
                    text: c.text.clone(),
                    time: c.timestamp.clone(),
                })
                .collect(),
        }
    }
}
