use tokio::sync::broadcast;

use crate::events::Event;

/// Broadcast fan-out of engine events to host subscribers.
///
/// Publishing with no subscribers is not an error; the event still lands in
/// the engine's append-only log.
#[derive(Clone)]
pub struct Bus {
    sender: broadcast::Sender<Event>,
}

impl Bus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publish an event. Returns the number of receivers it reached; zero
    /// receivers is reported as `Ok` by callers since the log is canonical.
    pub fn publish(&self, event: Event) -> Result<usize, broadcast::error::SendError<Event>> {
        self.sender.send(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn publish_and_receive_event() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        let _ = bus.publish(Event::navigation_requested("/intro"));

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert!(matches!(received, Event::NavigationRequested { ref href, .. } if href == "/intro"));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = Bus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let _ = bus.publish(Event::palette_opened("s1"));

        let event1 = rx1.recv().await.expect("recv1");
        let event2 = rx2.recv().await.expect("recv2");

        assert!(matches!(event1, Event::PaletteOpened { ref session_id, .. } if session_id == "s1"));
        assert!(matches!(event2, Event::PaletteOpened { ref session_id, .. } if session_id == "s1"));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_tolerated() {
        let bus = Bus::new(8);
        assert!(bus.publish(Event::palette_opened("s1")).is_err());
        // A late subscriber sees only what comes after it.
        let mut rx = bus.subscribe();
        let _ = bus.publish(Event::palette_closed("s1", crate::palette::CloseReason::Escape));
        let received = rx.recv().await.expect("recv");
        assert!(matches!(received, Event::PaletteClosed { .. }));
    }
}
