use crate::store::{Persistence, StoreError};

pub const NOTIFICATION_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notification-success",
            NoticeKind::Info => "notification-info",
            NoticeKind::Warning => "notification-warning",
            NoticeKind::Error => "notification-error",
        }
    }
}

// `id` lets the dismiss timer skip notices that were already replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct NoticeCounter(u32);

impl NoticeCounter {
    pub fn next(&mut self, kind: NoticeKind, message: impl Into<String>) -> Notice {
        self.0 = self.0.wrapping_add(1);
        Notice {
            id: self.0,
            kind,
            message: message.into(),
        }
    }
}

pub fn mutation_notice(
    result: &Result<Persistence, StoreError>,
    success: &str,
) -> (NoticeKind, String) {
    match result {
        Ok(Persistence::Saved) => (NoticeKind::Success, success.to_owned()),
        Ok(Persistence::Failed(reason)) => (
            NoticeKind::Warning,
            format!("{} (not saved: {})", success, reason),
        ),
        Err(err) => (NoticeKind::Error, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let mut counter = NoticeCounter::default();
        let first = counter.next(NoticeKind::Info, "one");
        let second = counter.next(NoticeKind::Info, "two");
        assert!(second.id > first.id);
    }

    #[test]
    fn failed_save_is_a_warning_not_an_error() {
        let (kind, message) =
            mutation_notice(&Ok(Persistence::Failed("quota".to_string())), "Hades → Tier S");
        assert_eq!(kind, NoticeKind::Warning);
        assert!(message.contains("quota"));

        let (kind, message) = mutation_notice(
            &Err(StoreError::DuplicateName("Hades".to_string())),
            "Game added",
        );
        assert_eq!(kind, NoticeKind::Error);
        assert_eq!(message, "A game named 'Hades' already exists");
    }
}
