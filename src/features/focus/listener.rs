//! Output side of the focus timer.

/// Receiver for everything the timer asks the presentation layer to do.
///
/// All calls are fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait FocusListener {
    /// The displayed text or tooltip may have changed.
    fn refresh(&mut self);

    /// Show a short, dismissible notification.
    fn alert(&mut self, message: &str);

    /// Play the phase-finished sound.
    fn play_finish_sound(&mut self);
}

/// A single request emitted by the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    /// Redraw.
    Refresh,
    /// Show this message.
    Alert(String),
    /// Play the finish sound.
    FinishSound,
}

/// Listener that buffers events for the host to drain on its own schedule.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<FocusEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events in emission order.
    pub fn drain(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FocusListener for EventQueue {
    fn refresh(&mut self) {
        // Consecutive refreshes collapse into one.
        if self.events.last() != Some(&FocusEvent::Refresh) {
            self.events.push(FocusEvent::Refresh);
        }
    }

    fn alert(&mut self, message: &str) {
        self.events.push(FocusEvent::Alert(message.to_string()));
    }

    fn play_finish_sound(&mut self) {
        self.events.push(FocusEvent::FinishSound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = EventQueue::new();
        queue.play_finish_sound();
        queue.alert("done");
        queue.refresh();

        assert_eq!(
            queue.drain(),
            vec![
                FocusEvent::FinishSound,
                FocusEvent::Alert("done".to_string()),
                FocusEvent::Refresh,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_collapses_refresh() {
        let mut queue = EventQueue::new();
        queue.refresh();
        queue.refresh();
        queue.refresh();

        assert_eq!(queue.len(), 1);
    }
}
