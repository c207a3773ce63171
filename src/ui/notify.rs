//! 通知 (Notification)
//!
//! 短暂显示的提示消息，超时后自动消失，不影响应用状态

use std::time::{Duration, Instant};

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

/// 当前可见的通知队列，允许多条同时显示
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.push_at(message, kind, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.items.push(Notification {
            message: message.into(),
            kind,
            created_at: now,
        });
    }

    /// 移除已过期的通知
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn visible(&self) -> &[Notification] {
        &self.items
    }

    #[allow(dead_code)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_ttl() {
        let start = Instant::now();
        let mut notes = Notifications::new(Duration::from_millis(3000));
        notes.push_at("first", NotificationKind::Success, start);
        notes.push_at(
            "second",
            NotificationKind::Warning,
            start + Duration::from_millis(2000),
        );

        notes.prune(start + Duration::from_millis(2999));
        assert_eq!(notes.visible().len(), 2);

        notes.prune(start + Duration::from_millis(3000));
        assert_eq!(notes.visible().len(), 1);
        assert_eq!(notes.latest().unwrap().message, "second");

        notes.prune(start + Duration::from_millis(5000));
        assert!(notes.is_empty());
    }
}
