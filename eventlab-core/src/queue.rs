//! Strict FIFO event queue.
//!
//! Single producer, single consumer, never shared across threads. Handlers
//! push while the engine drains; the engine keeps popping until the queue is
//! truly empty before advancing simulated time.

use crate::event::Event;
use std::collections::VecDeque;

/// FIFO queue of simulation events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the back of the queue.
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return the next event, or `None` when the queue is empty.
    /// Never suspends.
    pub fn pop_nonblocking(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MarketUpdate;
    use chrono::{TimeZone, Utc};

    fn market(hour: u32) -> Event {
        Event::Market(MarketUpdate {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap(),
        })
    }

    #[test]
    fn fifo_ordering() {
        let mut queue = EventQueue::new();
        queue.push(market(9));
        queue.push(market(10));
        queue.push(market(11));

        let mut hours = Vec::new();
        while let Some(Event::Market(update)) = queue.pop_nonblocking() {
            hours.push(update.timestamp.format("%H").to_string());
        }
        assert_eq!(hours, vec!["09", "10", "11"]);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue = EventQueue::new();
        assert!(queue.pop_nonblocking().is_none());
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
