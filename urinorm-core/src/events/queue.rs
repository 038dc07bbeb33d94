use crate::events::types::EventKind;
use ahash::AHashMap;
use std::any::Any;
use tracing::trace;

/// A logged event: how many times its kind fired this session, plus any
/// opaque payload attached by the first sighting.
pub struct Event {
    count: u32,
    data: Option<Box<dyn Any>>,
}

impl Event {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn data(&self) -> Option<&(dyn Any)> {
        self.data.as_deref()
    }
}

/// Per-session deduplicating event queue.
///
/// Kinds are kept in first-seen order; logging an already-present kind only
/// increments its count. Dedup would be trivially abusable otherwise: a URI
/// stuffed with a thousand `%2e%2e/` segments must not produce a thousand
/// alerts.
pub struct EventQueue<K: EventKind> {
    order: Vec<K>,
    entries: AHashMap<K, Event>,
}

impl<K: EventKind> Default for EventQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKind> EventQueue<K> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: AHashMap::new(),
        }
    }

    /// Append-or-increment. The payload of the first sighting wins; later
    /// sightings drop theirs.
    pub fn log(&mut self, kind: K, data: Option<Box<dyn Any>>) {
        if let Some(event) = self.entries.get_mut(&kind) {
            event.count += 1;
            return;
        }

        trace!(event = kind.description(), "session event");
        self.entries.insert(kind, Event { count: 1, data });
        self.order.push(kind);
    }

    pub fn contains(&self, kind: K) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Occurrence count for a kind, 0 if it never fired.
    pub fn count(&self, kind: K) -> u32 {
        self.entries.get(&kind).map_or(0, |e| e.count)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Events in the order their kinds were first logged.
    pub fn iter(&self) -> impl Iterator<Item = (K, &Event)> {
        self.order.iter().map(|k| (*k, &self.entries[k]))
    }
}
