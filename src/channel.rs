use std::cell::Cell;

use log::trace;

use crate::error::OracleError;
use crate::oracle_obj::OracleObj;
use crate::transaction::Transaction;

/// Anything that can be handed a transaction by a channel.
pub trait Subscriber {
    fn write(&self, t: Transaction);
    fn name(&self) -> String;
}

/// Synchronous broadcast channel.
///
/// `publish` hands every subscriber its own clone of the transaction, in
/// connection order, before returning. Nothing is ever buffered or dropped.
#[derive(Clone)]
pub struct Channel(OracleObj<ChannelInner>);

struct ChannelInner {
    name: String,
    subscribers: Vec<Box<dyn Subscriber>>,
    published: Cell<u64>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self(OracleObj::new(ChannelInner {
            name: name.to_string(),
            subscribers: Vec::new(),
            published: Cell::new(0),
        }))
    }

    pub fn name(&self) -> String {
        self.0.get().name.clone()
    }

    // Wiring is done once at setup. A channel connected (directly or not) to
    // itself recurses forever.
    pub fn connect(&self, sub: impl Subscriber + 'static) -> Result<(), OracleError> {
        match self.0.try_get_mut() {
            Some(mut c) => {
                c.subscribers.push(Box::new(sub));
                Ok(())
            }
            None => Err(OracleError::ChannelBusy(self.name())),
        }
    }

    pub fn publish(&self, t: &Transaction) {
        let inner = self.0.get();
        inner.published.set(inner.published.get() + 1);
        for sub in inner.subscribers.iter() {
            trace!("{} -> {}: {}", inner.name, sub.name(), t);
            sub.write(t.clone());
        }
    }

    pub fn subscriber_names(&self) -> Vec<String> {
        self.0.get().subscribers.iter().map(|s| s.name()).collect()
    }

    pub fn published(&self) -> u64 {
        self.0.get().published.get()
    }
}

// Lets a port be connected to another channel, which forwards everything on.
impl Subscriber for Channel {
    fn write(&self, t: Transaction) {
        self.publish(&t);
    }
    fn name(&self) -> String {
        Channel::name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Recorder {
        name: String,
        seen: OracleObj<Vec<Transaction>>,
    }

    impl Recorder {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                seen: OracleObj::new(Vec::new()),
            }
        }
        fn values(&self) -> Vec<u64> {
            self.seen.get().iter().map(|t| t.value()).collect()
        }
    }

    impl Subscriber for Recorder {
        fn write(&self, t: Transaction) {
            self.seen.get_mut().push(t);
        }
        fn name(&self) -> String {
            self.name.clone()
        }
    }

    #[test]
    fn fan_out_delivers_independent_copies() {
        let ch = Channel::new("mon.ap");
        let a = Recorder::new("a");
        let b = Recorder::new("b");
        ch.connect(a.clone()).unwrap();
        ch.connect(b.clone()).unwrap();

        ch.publish(&Transaction::write(5).with_addr(1));

        // replace a's copy with a modified one; b must not see it
        a.seen.with_mut(|v| {
            let t = v.remove(0);
            v.push(t.with_value(99));
        });
        assert_eq!(a.values(), vec![99]);
        assert_eq!(b.values(), vec![5]);
        assert_eq!(b.seen.get()[0].addr(), Some(1));
        assert_eq!(ch.published(), 1);
    }

    #[test]
    fn delivers_in_publish_order() {
        let ch = Channel::new("ch");
        let r = Recorder::new("r");
        ch.connect(r.clone()).unwrap();
        for v in [3, 1, 2] {
            ch.publish(&Transaction::read(v));
        }
        assert_eq!(r.values(), vec![3, 1, 2]);
    }

    #[test]
    fn forwards_through_connected_channel() {
        let port = Channel::new("mon.ap");
        let export = Channel::new("sb.export");
        let r = Recorder::new("r");
        export.connect(r.clone()).unwrap();
        port.connect(export.clone()).unwrap();

        port.publish(&Transaction::write(7));
        assert_eq!(r.values(), vec![7]);
        assert_eq!(port.subscriber_names(), vec!["sb.export".to_string()]);
        assert_eq!(export.published(), 1);
    }

    // Tries to add a subscriber to the channel that is delivering to it.
    struct Rewirer {
        ch: Channel,
        outcome: OracleObj<Option<Result<(), OracleError>>>,
    }

    impl Subscriber for Rewirer {
        fn write(&self, _t: Transaction) {
            let res = self.ch.connect(Recorder::new("late"));
            *self.outcome.get_mut() = Some(res);
        }
        fn name(&self) -> String {
            "rewirer".to_string()
        }
    }

    #[test]
    fn connect_during_delivery_is_refused() {
        let ch = Channel::new("mon.ap");
        let outcome = OracleObj::new(None);
        ch.connect(Rewirer {
            ch: ch.clone(),
            outcome: outcome.clone(),
        })
        .unwrap();

        ch.publish(&Transaction::write(1));
        assert!(matches!(
            *outcome.get(),
            Some(Err(OracleError::ChannelBusy(ref name))) if name == "mon.ap"
        ));
        assert_eq!(ch.subscriber_names(), vec!["rewirer".to_string()]);

        // outside a delivery the same call goes through
        ch.connect(Recorder::new("late")).unwrap();
        assert_eq!(ch.subscriber_names().len(), 2);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let ch = Channel::new("lonely");
        ch.publish(&Transaction::write(1));
        assert_eq!(ch.published(), 1);
        assert!(ch.subscriber_names().is_empty());
    }
}
