use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 用户评论，创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// 创建时间戳（毫秒），不保证唯一
    pub id: i64,
    pub text: String,
    pub timestamp: String,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self::created_at(text, Local::now())
    }

    pub fn created_at(text: String, at: DateTime<Local>) -> Self {
        Self {
            id: at.timestamp_millis(),
            text,
            timestamp: at.format("%Y/%m/%d %H:%M:%S").to_string(),
        }
    }
}

/// 投票选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    News,
    Blog,
}

impl Choice {
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::News => "news",
            Choice::Blog => "blog",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(Choice::News),
            "blog" => Ok(Choice::Blog),
            _ => Err(()),
        }
    }
}

/// 持久化的应用状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub like_count: u64,
    pub news_votes: u64,
    pub blog_votes: u64,
    pub comments: Vec<Comment>, // 最新的在前
}

impl AppState {
    /// 计数只增不减，到达上限后保持不变
    pub fn like(&mut self) -> u64 {
        self.like_count = self.like_count.saturating_add(1);
        self.like_count
    }

    pub fn record_vote(&mut self, choice: Choice) -> u64 {
        let tally = match choice {
            Choice::News => &mut self.news_votes,
            Choice::Blog => &mut self.blog_votes,
        };
        *tally = tally.saturating_add(1);
        *tally
    }

    /// 在列表头部插入评论
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }
}
