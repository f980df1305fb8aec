#![allow(dead_code)]

use std::collections::VecDeque;

use fifo_oracle::prelude::*;
use rand::Rng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn env_with(depth: usize, residue: ResiduePolicy) -> Environment {
    let cfg = OracleConfig::default()
        .with_depth(depth)
        .with_residue(residue);
    Environment::new(cfg).unwrap()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// The n-th read returns its word with bit 0 flipped.
    Corrupt(usize),
    /// The n-th accepted write is acknowledged but never stored.
    Drop(usize),
    /// The n-th read returns the head word without popping it.
    Duplicate(usize),
}

/// Behavioral stand-in for the FIFO RTL, with optional fault injection.
pub struct DutModel {
    depth: usize,
    mem: VecDeque<u64>,
    writes: usize,
    reads: usize,
    fault: Option<Fault>,
}

impl DutModel {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            mem: VecDeque::new(),
            writes: 0,
            reads: 0,
            fault: None,
        }
    }

    pub fn with_fault(self, fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..self
        }
    }

    /// Returns whether the write was acknowledged.
    pub fn write(&mut self, value: u64) -> bool {
        if self.mem.len() >= self.depth {
            return false;
        }
        let n = self.writes;
        self.writes += 1;
        if self.fault != Some(Fault::Drop(n)) {
            self.mem.push_back(value);
        }
        true
    }

    /// `None` when empty; the bus cycle completes without data.
    pub fn read(&mut self) -> Option<u64> {
        if self.mem.is_empty() {
            return None;
        }
        let n = self.reads;
        self.reads += 1;
        match self.fault {
            Some(Fault::Duplicate(k)) if k == n => self.mem.front().copied(),
            Some(Fault::Corrupt(k)) if k == n => self.mem.pop_front().map(|v| v ^ 1),
            _ => self.mem.pop_front(),
        }
    }
}

/// Write monitor: reports only acknowledged writes.
pub fn write_tx(env: &Environment, dut: &mut DutModel, req: &Transaction) {
    if dut.write(req.value()) {
        env.observe(Side::Write, req.clone());
    }
}

/// Read monitor: reports only reads that returned data.
pub fn read_tx(env: &Environment, dut: &mut DutModel, req: &Transaction) {
    if let Some(value) = dut.read() {
        env.observe(Side::Read, req.clone().with_value(value));
    }
}

pub fn drive<R: Rng>(env: &Environment, dut: &mut DutModel, scenario: &Scenario, rng: &mut R) {
    for step in scenario.steps.iter() {
        match step {
            Step::Write(t) => write_tx(env, dut, t),
            Step::Read(t) => read_tx(env, dut, t),
            Step::Settle => {}
            Step::Concurrent { writes, reads } => {
                for t in utils::interleave(writes, reads, rng) {
                    match t.side() {
                        Side::Write => write_tx(env, dut, &t),
                        Side::Read => read_tx(env, dut, &t),
                    }
                }
            }
        }
    }
}

/// Collects whatever a channel delivers.
#[derive(Clone)]
pub struct Recorder(OracleObj<Vec<Transaction>>);

impl Recorder {
    pub fn attach(ch: &Channel) -> Self {
        let r = Recorder(OracleObj::new(Vec::new()));
        ch.connect(r.clone()).unwrap();
        r
    }
    pub fn values(&self) -> Vec<u64> {
        self.0.get().iter().map(|t| t.value()).collect()
    }
}

impl Subscriber for Recorder {
    fn write(&self, t: Transaction) {
        self.0.get_mut().push(t);
    }
    fn name(&self) -> String {
        "recorder".to_string()
    }
}
