//! Thread-safe front door to an [`Environment`].
//!
//! The environment is single threaded. Monitors running on other threads post
//! into an unbounded queue, and the thread owning the environment drains it.
//! The queue is the only writer the predictor ever sees, so its storage needs
//! no lock.
//!
//! Delivery follows post order. Posters must keep it causal: a read response
//! is posted after the write that produced its word. Posting while holding the
//! lock on a shared design model is enough.

use futures::executor::block_on;
use futures::StreamExt;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use log::debug;

use crate::env::Environment;
use crate::error::OracleError;
use crate::transaction::{Side, Transaction};

#[derive(Clone)]
pub struct MailboxSender(UnboundedSender<(Side, Transaction)>);

pub struct MailboxReceiver(UnboundedReceiver<(Side, Transaction)>);

pub fn mailbox() -> (MailboxSender, MailboxReceiver) {
    let (tx, rx) = unbounded();
    (MailboxSender(tx), MailboxReceiver(rx))
}

impl MailboxSender {
    pub fn post(&self, side: Side, t: Transaction) -> Result<(), OracleError> {
        self.0
            .unbounded_send((side, t))
            .map_err(|_| OracleError::MailboxClosed)
    }
}

impl MailboxReceiver {
    /// Delivers everything posted until the last sender is dropped. Returns the
    /// number of transactions delivered.
    pub fn drain_into(self, env: &Environment) -> u64 {
        let mut delivered = 0u64;
        block_on(self.0.for_each(|(side, t)| {
            env.observe(side, t);
            delivered += 1;
            futures::future::ready(())
        }));
        debug!("mailbox: delivered {} transactions", delivered);
        delivered
    }
}
