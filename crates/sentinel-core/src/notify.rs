// ── Transient notifications ──
//
// A stack of banners, newest last. Each carries its own lifetime; expired
// entries are removed by the controller's expiry task or by an explicit
// `prune_expired` from a front-end.

use std::time::Duration;

use tokio::time::Instant;

/// Severity of a notification. Decides its on-screen lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// How long a notification of this kind stays visible.
    pub fn lifetime(self) -> Duration {
        match self {
            Self::Success => Duration::from_secs(3),
            Self::Warning | Self::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.created_at + self.kind.lifetime()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Independent, individually dismissable notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    /// Append a notification and return its id.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Remove one notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop everything whose lifetime has elapsed. Returns how many went.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        before - self.items.len()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.items.iter().filter(|n| n.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
