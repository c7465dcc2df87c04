//! NoticeState - User-Facing Notices with Ring Buffer

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::constants::NOTICE_LOG_CAPACITY;

/// Notice level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warn,
    Error,
}

impl NoticeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "OK",
            NoticeLevel::Info => "INFO",
            NoticeLevel::Warn => "WARN",
            NoticeLevel::Error => "ERROR",
        }
    }
}

/// A single notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Notices shown to the user, oldest dropped first
#[derive(Debug)]
pub struct NoticeState {
    entries: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
}

impl NoticeState {
    /// Create a new notice state with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Push a new notice
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        let notice = Notice {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(notice);
    }

    /// Push a notice with current timestamp
    pub fn push_now(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    pub fn entries(&self) -> &VecDeque<Notice> {
        &self.entries
    }

    /// Notices pushed after the one with id `id`
    pub fn after(&self, id: u64) -> impl Iterator<Item = &Notice> {
        self.entries.iter().filter(move |n| n.id > id)
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    /// Id of the most recent notice, 0 when none was ever pushed
    pub fn last_id(&self) -> u64 {
        self.next_id - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new(NOTICE_LOG_CAPACITY)
    }
}
