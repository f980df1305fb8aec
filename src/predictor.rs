//! Untimed golden model of the FIFO under test.
//!
//! Every write the design admits is stored, every read that finds data pops the
//! oldest word. Accepted writes are echoed on `expected_write`, served reads are
//! published on `expected_read` carrying the read's own bus metadata.

use std::collections::VecDeque;

use log::debug;

use crate::channel::{Channel, Subscriber};
use crate::error::OracleError;
use crate::oracle_obj::OracleObj;
use crate::transaction::{Side, Transaction};

pub const DEFAULT_DEPTH: usize = 127;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PredictorStats {
    /// Writes stored and echoed.
    pub accepted: u64,
    /// Writes seen while full.
    pub dropped: u64,
    /// Reads that popped a word.
    pub served: u64,
    /// Reads seen while empty.
    pub empty_reads: u64,
}

#[derive(Clone)]
pub struct Predictor {
    name: String,
    state: OracleObj<PredictorState>,
    expected_write: Channel,
    expected_read: Channel,
}

struct PredictorState {
    depth: usize,
    fifo: VecDeque<u64>,
    stats: PredictorStats,
}

impl Predictor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: OracleObj::new(PredictorState {
                depth: DEFAULT_DEPTH,
                fifo: VecDeque::with_capacity(DEFAULT_DEPTH),
                stats: PredictorStats::default(),
            }),
            expected_write: Channel::new(&format!("{}.in_to_sb_ap", name)),
            expected_read: Channel::new(&format!("{}.out_to_sb_ap", name)),
        }
    }

    pub fn with_depth(name: &str, depth: usize) -> Result<Self, OracleError> {
        let prd = Self::new(name);
        prd.configure(depth)?;
        Ok(prd)
    }

    pub fn configure(&self, depth: usize) -> Result<(), OracleError> {
        if depth == 0 {
            return Err(OracleError::InvalidDepth(depth));
        }
        self.state.with_mut(|s| {
            if s.fifo.len() > depth {
                return Err(OracleError::DepthBelowOccupancy {
                    depth,
                    occupancy: s.fifo.len(),
                });
            }
            s.depth = depth;
            Ok(())
        })
    }

    pub fn on_write_observed(&self, t: Transaction) {
        let accepted = self.state.with_mut(|s| {
            if s.fifo.len() < s.depth {
                s.fifo.push_back(t.value());
                s.stats.accepted += 1;
                true
            } else {
                s.stats.dropped += 1;
                false
            }
        });
        match accepted {
            true => {
                debug!("{}: accepted {}", self.name, t);
                self.expected_write.publish(&t);
            }
            false => debug!("{}: full, dropped {}", self.name, t),
        }
    }

    pub fn on_read_observed(&self, meta: Transaction) {
        let head = self.state.with_mut(|s| {
            let head = s.fifo.pop_front();
            match head {
                Some(_) => s.stats.served += 1,
                None => s.stats.empty_reads += 1,
            }
            head
        });
        match head {
            Some(value) => {
                let expected = meta.with_value(value);
                debug!("{}: expecting {}", self.name, expected);
                self.expected_read.publish(&expected);
            }
            None => debug!("{}: empty, ignoring {}", self.name, meta),
        }
    }

    pub fn expected(&self, side: Side) -> &Channel {
        match side {
            Side::Write => &self.expected_write,
            Side::Read => &self.expected_read,
        }
    }

    /// Subscriber feeding one side of the model.
    pub fn export(&self, side: Side) -> PredictorExport {
        PredictorExport {
            prd: self.clone(),
            side,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn depth(&self) -> usize {
        self.state.get().depth
    }
    pub fn occupancy(&self) -> usize {
        self.state.get().fifo.len()
    }
    /// Pending words, oldest first.
    pub fn contents(&self) -> Vec<u64> {
        self.state.get().fifo.iter().copied().collect()
    }
    pub fn stats(&self) -> PredictorStats {
        self.state.get().stats
    }
}

pub struct PredictorExport {
    prd: Predictor,
    side: Side,
}

impl Subscriber for PredictorExport {
    fn write(&self, t: Transaction) {
        match self.side {
            Side::Write => self.prd.on_write_observed(t),
            Side::Read => self.prd.on_read_observed(t),
        }
    }
    fn name(&self) -> String {
        match self.side {
            Side::Write => format!("{}.in_ap", self.prd.name),
            Side::Read => format!("{}.out_ap", self.prd.name),
        }
    }
}
