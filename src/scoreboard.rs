use std::collections::VecDeque;

use log::error;

use crate::channel::Subscriber;
use crate::config::ResiduePolicy;
use crate::oracle_obj::OracleObj;
use crate::transaction::Transaction;
use crate::OracleResult;

/// In-order comparator for one side of the FIFO.
///
/// The n-th observed transaction is checked against the n-th expected one, as
/// soon as both have arrived. A mismatch is counted and both entries are thrown
/// away; the streams are never realigned.
#[derive(Clone)]
pub struct Scoreboard(OracleObj<ScoreboardInner>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Position of the pair in both streams, from zero.
    pub index: u64,
    pub expected: Transaction,
    pub actual: Transaction,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreboardStats {
    pub expected: u64,
    pub received: u64,
    pub matched: u64,
    pub errors: u64,
    pub exp_residue: usize,
    pub recv_residue: usize,
}

impl ScoreboardStats {
    pub fn residue(&self) -> usize {
        self.exp_residue + self.recv_residue
    }
}

struct ScoreboardInner {
    name: String,
    exp_q: VecDeque<Transaction>,
    recv_q: VecDeque<Transaction>,
    errors: u64,
    expected: u64,
    received: u64,
    matched: u64,
    mismatches: Vec<Mismatch>,
}

impl Scoreboard {
    pub fn new(name: &str) -> Self {
        Self(OracleObj::new(ScoreboardInner {
            name: name.to_string(),
            exp_q: VecDeque::new(),
            recv_q: VecDeque::new(),
            errors: 0,
            expected: 0,
            received: 0,
            matched: 0,
            mismatches: Vec::new(),
        }))
    }
    pub fn observe_expected(&self, t: Transaction) {
        self.0.with_mut(|s| {
            s.exp_q.push_back(t);
            s.expected += 1;
        });
        self.compare();
    }
    pub fn observe_actual(&self, t: Transaction) {
        self.0.with_mut(|s| {
            s.recv_q.push_back(t);
            s.received += 1;
        });
        self.compare();
    }
    fn compare(&self) {
        self.0.with_mut(|s| {
            while let (Some(exp), Some(recv)) = (s.exp_q.front(), s.recv_q.front()) {
                match exp.matches(recv) {
                    true => s.matched += 1,
                    false => {
                        let index = s.matched + s.errors;
                        error!("{}: mismatch #{}: expected {}, got {}", s.name, index, exp, recv);
                        let mismatch = Mismatch {
                            index,
                            expected: exp.clone(),
                            actual: recv.clone(),
                        };
                        s.mismatches.push(mismatch);
                        s.errors += 1;
                    }
                }
                s.exp_q.pop_front();
                s.recv_q.pop_front();
            }
        });
    }

    pub fn name(&self) -> String {
        self.0.get().name.clone()
    }
    pub fn error(&self) -> bool {
        self.0.get().errors > 0
    }
    pub fn errors(&self) -> u64 {
        self.0.get().errors
    }
    pub fn mismatches(&self) -> Vec<Mismatch> {
        self.0.get().mismatches.clone()
    }
    pub fn stats(&self) -> ScoreboardStats {
        let inner = self.0.get();
        ScoreboardStats {
            expected: inner.expected,
            received: inner.received,
            matched: inner.matched,
            errors: inner.errors,
            exp_residue: inner.exp_q.len(),
            recv_residue: inner.recv_q.len(),
        }
    }
    pub fn residue(&self) -> usize {
        self.stats().residue()
    }

    pub fn passed(&self, policy: ResiduePolicy) -> bool {
        let stats = self.stats();
        match policy {
            ResiduePolicy::Lenient => stats.errors == 0,
            ResiduePolicy::Strict => stats.errors == 0 && stats.residue() == 0,
        }
    }
    pub fn result(&self, policy: ResiduePolicy) -> OracleResult {
        match self.passed(policy) {
            true => Ok(self.result_str()),
            false => Err(self.result_str()),
        }
    }
    pub fn result_str(&self) -> String {
        let inner = self.0.get();
        format!(
            "{}: expected={}, received={}, matched={}, errors={}, expQ: {}, recvQ: {}",
            inner.name,
            inner.expected,
            inner.received,
            inner.matched,
            inner.errors,
            inner.exp_q.len(),
            inner.recv_q.len()
        )
    }

    pub fn expected_export(&self) -> ScoreboardExport {
        ScoreboardExport {
            sb: self.clone(),
            stream: Stream::Expected,
        }
    }
    pub fn observed_export(&self) -> ScoreboardExport {
        ScoreboardExport {
            sb: self.clone(),
            stream: Stream::Observed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stream {
    Expected,
    Observed,
}

pub struct ScoreboardExport {
    sb: Scoreboard,
    stream: Stream,
}

impl Subscriber for ScoreboardExport {
    fn write(&self, t: Transaction) {
        match self.stream {
            Stream::Expected => self.sb.observe_expected(t),
            Stream::Observed => self.sb.observe_actual(t),
        }
    }
    fn name(&self) -> String {
        match self.stream {
            Stream::Expected => format!("{}.expected_ap", self.sb.name()),
            Stream::Observed => format!("{}.observed_ap", self.sb.name()),
        }
    }
}
