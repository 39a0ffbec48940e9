//! Typed publish/subscribe registry for record change notifications.
//!
//! An [`EventBus`] is an ordinary value: clone it to share it, drop every
//! clone to tear it down. Listeners are registered per [`EventKind`] (or for
//! all kinds) and stay registered for as long as the returned
//! [`Subscription`] lives.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::types::{
    Project, ProjectId, Prompt, PromptId, RunResult, Setting, Version, VersionId, VersionUpdate,
};

/// The closed set of notifications the record layer publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProjectCreated,
    ProjectDeleted,
    PromptCreated,
    PromptDeleted,
    VersionCreated,
    VersionUpdated,
    VersionDeleted,
    ResultCreated,
    SettingUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::ProjectCreated,
        EventKind::ProjectDeleted,
        EventKind::PromptCreated,
        EventKind::PromptDeleted,
        EventKind::VersionCreated,
        EventKind::VersionUpdated,
        EventKind::VersionDeleted,
        EventKind::ResultCreated,
        EventKind::SettingUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project:created",
            Self::ProjectDeleted => "project:deleted",
            Self::PromptCreated => "prompt:created",
            Self::PromptDeleted => "prompt:deleted",
            Self::VersionCreated => "version:created",
            Self::VersionUpdated => "version:updated",
            Self::VersionDeleted => "version:deleted",
            Self::ResultCreated => "result:created",
            Self::SettingUpdated => "setting:updated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ProjectCreated(Project),
    ProjectDeleted(ProjectId),
    PromptCreated(Prompt),
    PromptDeleted(PromptId),
    VersionCreated(Version),
    VersionUpdated { id: VersionId, update: VersionUpdate },
    VersionDeleted(VersionId),
    ResultCreated(RunResult),
    SettingUpdated(Setting),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ProjectCreated(_) => EventKind::ProjectCreated,
            Self::ProjectDeleted(_) => EventKind::ProjectDeleted,
            Self::PromptCreated(_) => EventKind::PromptCreated,
            Self::PromptDeleted(_) => EventKind::PromptDeleted,
            Self::VersionCreated(_) => EventKind::VersionCreated,
            Self::VersionUpdated { .. } => EventKind::VersionUpdated,
            Self::VersionDeleted(_) => EventKind::VersionDeleted,
            Self::ResultCreated(_) => EventKind::ResultCreated,
            Self::SettingUpdated(_) => EventKind::SettingUpdated,
        }
    }
}

type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

struct Entry {
    id: u64,
    /// `None` subscribes to every kind.
    kind: Option<EventKind>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Publish/subscribe registry keyed by [`EventKind`].
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.register(Some(kind), Arc::new(listener))
    }

    /// Registers `listener` for every event kind.
    pub fn subscribe_all<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(listener))
    }

    fn register(&self, kind: Option<EventKind>, listener: Listener) -> Subscription {
        let mut registry = lock(&self.inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry { id, kind, listener });
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to its listeners in subscription order.
    ///
    /// Listeners run after the registry lock is released, so they may
    /// subscribe, unsubscribe or emit further events.
    pub fn emit(&self, event: &Event) {
        let kind = event.kind();
        let listeners: Vec<Listener> = lock(&self.inner)
            .entries
            .iter()
            .filter(|e| e.kind.map_or(true, |k| k == kind))
            .map(|e| Arc::clone(&e.listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of listeners that would receive an event of `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        lock(&self.inner)
            .entries
            .iter()
            .filter(|e| e.kind.map_or(true, |k| k == kind))
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = lock(&self.inner);
        f.debug_struct("EventBus")
            .field("listeners", &registry.entries.len())
            .finish()
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Keeps the listener registered for the lifetime of the bus.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).entries.retain(|e| e.id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Logs every event on `bus` at debug level.
pub fn trace_all(bus: &EventBus) -> Subscription {
    bus.subscribe_all(|event| {
        tracing::debug!(kind = %event.kind(), ?event, "event");
    })
}
