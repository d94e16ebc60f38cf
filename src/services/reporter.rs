// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::status::StatusSnapshot;
use crate::gdebug;

pub type SubscriberId = u64;

/// Handed to a new subscriber: the current snapshot answers the attach-time
/// query; everything published afterwards arrives on `rx`.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub initial: StatusSnapshot,
    pub rx: mpsc::UnboundedReceiver<StatusSnapshot>,
}

/// Fan-out of status snapshots to any number of independent observers.
///
/// Every live subscriber receives every published snapshot in publish
/// order; detaching one never affects the others. Channels are unbounded so
/// a slow reader cannot drop or reorder deliveries.
#[derive(Debug, Default)]
pub struct StatusReporter {
    next_id: SubscriberId,
    subscribers: Vec<Subscriber>,
}

#[derive(Debug)]
struct Subscriber {
    id: SubscriberId,
    tx: mpsc::UnboundedSender<StatusSnapshot>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, initial: StatusSnapshot) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(Subscriber { id, tx });

        gdebug!("Reporter", "subscriber {id} attached");
        Subscription { id, initial, rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|s| s.id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `snapshot` to every subscriber, pruning the ones whose
    /// receiving end is gone.
    pub fn publish(&mut self, snapshot: &StatusSnapshot) {
        self.subscribers.retain(|s| s.tx.send(snapshot.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(session_duration: u64) -> StatusSnapshot {
        StatusSnapshot {
            is_active: true,
            start_time: Some(0),
            last_toggle: Some(0),
            session_duration,
            next_toggle_in: 300,
        }
    }

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let mut reporter = StatusReporter::new();
        let mut sub = reporter.subscribe(StatusSnapshot::inactive(300));

        reporter.publish(&snap(1));
        reporter.publish(&snap(2));
        reporter.publish(&snap(3));

        assert_eq!(sub.rx.recv().await.unwrap().session_duration, 1);
        assert_eq!(sub.rx.recv().await.unwrap().session_duration, 2);
        assert_eq!(sub.rx.recv().await.unwrap().session_duration, 3);
    }

    #[tokio::test]
    async fn unsubscribe_leaves_others_attached() {
        let mut reporter = StatusReporter::new();
        let mut a = reporter.subscribe(StatusSnapshot::inactive(300));
        let b = reporter.subscribe(StatusSnapshot::inactive(300));

        reporter.unsubscribe(b.id);
        assert_eq!(reporter.subscriber_count(), 1);

        reporter.publish(&snap(7));
        assert_eq!(a.rx.recv().await.unwrap().session_duration, 7);
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned_on_publish() {
        let mut reporter = StatusReporter::new();
        let sub = reporter.subscribe(StatusSnapshot::inactive(300));
        drop(sub);

        reporter.publish(&snap(1));
        assert_eq!(reporter.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn silent_until_something_publishes() {
        let mut reporter = StatusReporter::new();
        let mut sub = reporter.subscribe(StatusSnapshot::inactive(300));

        // No session ever started, nothing published: nothing delivered.
        assert!(sub.rx.try_recv().is_err());
    }
}
