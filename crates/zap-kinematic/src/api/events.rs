use crate::api::types::{EventRecord, MotionEvent};

/// Receiver of motion events pushed by the resolver.
///
/// Publishing is fire-and-forget. The resolver takes an optional publisher,
/// so a body without listeners simply publishes nowhere.
pub trait MotionPublisher {
    fn publish(&mut self, event: MotionEvent);
}

impl MotionPublisher for Vec<MotionEvent> {
    fn publish(&mut self, event: MotionEvent) {
        self.push(event);
    }
}

impl<P: MotionPublisher + ?Sized> MotionPublisher for &mut P {
    fn publish(&mut self, event: MotionEvent) {
        (**self).publish(event);
    }
}

/// Handle returned by [`MotionBroker::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

type Listener = Box<dyn FnMut(&MotionEvent)>;

/// One-to-many motion event channel.
///
/// Listeners (state machine, animation) subscribe independently and are
/// notified in subscription order. Every published event is also kept in a
/// frame log that the owner drains once per frame. The log holds at most
/// `max_events` entries; listeners still see events past the cap.
pub struct MotionBroker {
    listeners: Vec<(SubscriptionId, Listener)>,
    log: Vec<MotionEvent>,
    max_events: usize,
    dropped: usize,
    next_id: u32,
}

impl MotionBroker {
    /// Default log capacity (default: 32).
    pub const DEFAULT_MAX_EVENTS: usize = 32;

    pub fn new() -> Self {
        Self::with_max_events(Self::DEFAULT_MAX_EVENTS)
    }

    /// Broker whose frame log keeps at most `max_events` entries.
    pub fn with_max_events(max_events: usize) -> Self {
        Self {
            listeners: Vec::new(),
            log: Vec::with_capacity(max_events.min(Self::DEFAULT_MAX_EVENTS)),
            max_events,
            dropped: 0,
            next_id: 1,
        }
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /// Events left out of the log since the last drain.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Register a listener. Returns a handle for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, listener: impl FnMut(&MotionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.listeners.iter().position(|(sid, _)| *sid == id) {
            Some(idx) => {
                self.listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drain the frame log. Returns the events and clears it.
    pub fn drain(&mut self) -> Vec<MotionEvent> {
        self.dropped = 0;
        std::mem::take(&mut self.log)
    }

    /// Iterate over logged events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &MotionEvent> {
        self.log.iter()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Logged events as flat records.
    pub fn records(&self) -> Vec<EventRecord> {
        self.log.iter().map(MotionEvent::to_record).collect()
    }

    /// Logged events as raw bytes, ready to copy into a shared buffer.
    pub fn as_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.records()).to_vec()
    }
}

impl MotionPublisher for MotionBroker {
    fn publish(&mut self, event: MotionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        if self.log.len() < self.max_events {
            self.log.push(event);
            return;
        }
        if self.dropped == 0 {
            log::warn!(
                "motion event log full ({} events); dropping until drained",
                self.max_events
            );
        }
        self.dropped += 1;
    }
}

impl Default for MotionBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MotionBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionBroker")
            .field("listeners", &self.listeners.len())
            .field("log", &self.log)
            .field("max_events", &self.max_events)
            .field("dropped", &self.dropped)
            .finish()
    }
}
