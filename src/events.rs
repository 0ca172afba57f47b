use tokio::sync::broadcast;
use tracing::trace;

use crate::types::NetworkEvent;

/// Where the simulation reports what happens inside the network.
///
/// Publishing never blocks the round pipeline and never fails it: a notification with
/// no listener is simply lost.
pub trait NetworkEventBus: Clone + Send + Sync + 'static {
    type Receiver;

    fn subscribe(&self) -> Self::Receiver;

    /// Hand `event` to every current subscriber and return how many received it.
    fn publish(&self, event: NetworkEvent) -> usize;
}

/// Bus backed by a bounded `tokio` broadcast channel. Slow subscribers lag and lose the
/// oldest notifications once `capacity` is exceeded.
#[derive(Clone)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<NetworkEvent>,
}

impl BroadcastEventBus {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl NetworkEventBus for BroadcastEventBus {
    type Receiver = broadcast::Receiver<NetworkEvent>;

    fn subscribe(&self) -> Self::Receiver {
        self.sender.subscribe()
    }

    fn publish(&self, event: NetworkEvent) -> usize {
        match self.sender.send(event) {
            Ok(delivered) => delivered,
            Err(broadcast::error::SendError(event)) => {
                trace!(?event, "no subscribers, notification dropped");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(hash: &str) -> NetworkEvent {
        NetworkEvent::EventCreated {
            creator: 1,
            hash: hash.to_string(),
        }
    }

    #[test]
    fn publish_without_subscribers_drops_event() {
        let bus = BroadcastEventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(created("aa")), 0);
    }

    #[test]
    fn publish_reaches_every_subscriber() {
        let bus = BroadcastEventBus::new(4);
        let mut first = bus.subscribe();
        let mut second = bus.clone().subscribe();

        assert_eq!(bus.publish(created("bb")), 2);
        assert_eq!(first.try_recv().expect("first receives"), created("bb"));
        assert_eq!(second.try_recv().expect("second receives"), created("bb"));
    }

    #[test]
    fn lagging_subscriber_loses_oldest_events() {
        let bus = BroadcastEventBus::new(2);
        let mut receiver = bus.subscribe();
        for hash in ["c1", "c2", "c3"] {
            bus.publish(created(hash));
        }

        assert!(matches!(
            receiver.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(receiver.try_recv().expect("second kept"), created("c2"));
        assert_eq!(receiver.try_recv().expect("third kept"), created("c3"));
    }
}
