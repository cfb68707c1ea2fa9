//! Transient success/error notices shown by the admin surface.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
    pub posted_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= NOTICE_TTL
    }
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    current: Option<Notice>,
}

/// Board holding the latest notice; posting replaces whatever was shown.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    board: Arc<Mutex<Board>>,
}

impl Notices {
    /// Show `text`, returning the id used to dismiss it.
    pub fn post(&self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        let mut board = self.board.lock();
        board.next_id += 1;
        let id = board.next_id;
        let notice = Notice {
            id,
            kind,
            text: text.into(),
            posted_at: Instant::now(),
        };
        match kind {
            NoticeKind::Error => tracing::warn!("{}", notice.text),
            NoticeKind::Success | NoticeKind::Info => tracing::info!("{}", notice.text),
        }
        board.current = Some(notice);
        id
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeKind::Success, text)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeKind::Error, text)
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeKind::Info, text)
    }

    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.board.lock().current.clone()
    }

    /// Dismiss notice `id` if it is still the one shown.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut board = self.board.lock();
        if board.current.as_ref().is_some_and(|notice| notice.id == id) {
            board.current = None;
            true
        } else {
            false
        }
    }

    /// Drop the current notice once its time is up.
    pub fn expire(&self, now: Instant) -> bool {
        let mut board = self.board.lock();
        if board
            .current
            .as_ref()
            .is_some_and(|notice| notice.is_expired(now))
        {
            board.current = None;
            true
        } else {
            false
        }
    }

    /// Wait out the display time of notice `id`, then dismiss it.
    pub async fn dismiss_after_ttl(&self, id: u64) -> bool {
        tokio::time::sleep(NOTICE_TTL).await;
        self.dismiss(id)
    }

    pub fn clear(&self) {
        self.board.lock().current = None;
    }
}
