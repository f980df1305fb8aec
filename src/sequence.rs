//! Stimulus scenarios for Wishbone FIFO runs.
//!
//! These are plain data. A harness replays them against the design and feeds
//! what its monitors capture into an [`Environment`](crate::env::Environment).

use rand::Rng;

use crate::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Write request on the write side.
    Write(Transaction),
    /// Read request on the read side. The word is a placeholder until the design answers.
    Read(Transaction),
    /// Let both sides go quiet before the next step.
    Settle,
    /// Two streams issued by independent threads, with no ordering between them.
    Concurrent {
        writes: Vec<Transaction>,
        reads: Vec<Transaction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn write_count(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Write(_) => 1,
                Step::Concurrent { writes, .. } => writes.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn read_count(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Read(_) => 1,
                Step::Concurrent { reads, .. } => reads.len(),
                _ => 0,
            })
            .sum()
    }

    fn fill(mut self, n: u64, delay: u32) -> Self {
        for iter in 0..n {
            let req = Transaction::write(iter).with_timing(delay, 0);
            self.steps.push(Step::Write(req));
        }
        self
    }

    fn drain(mut self, n: u64) -> Self {
        for iter in 0..n {
            self.steps.push(Step::Read(read_req(iter, 16, 8)));
        }
        self
    }

    fn settle(mut self) -> Self {
        self.steps.push(Step::Settle);
        self
    }
}

fn read_req(addr: u64, delay: u32, rsp_clks: u32) -> Transaction {
    Transaction::read(0)
        .with_addr(addr)
        .with_timing(delay, rsp_clks)
}

/// Fill past the default depth and drain, twice, with a short burst between.
pub fn fifo_default() -> Scenario {
    Scenario::new("test_fifo_default")
        .fill(128, 16)
        .settle()
        .drain(128)
        .settle()
        .fill(8, 0)
        .settle()
        .drain(8)
        .settle()
        .fill(128, 16)
        .settle()
        .drain(128)
}

pub fn one_write_read() -> Scenario {
    let mut s = Scenario::new("test_fifo_one_wr_rd");
    s.steps.push(Step::Write(Transaction::write(14).with_timing(16, 0)));
    s.steps.push(Step::Settle);
    s.steps.push(Step::Read(read_req(0, 16, 8)));
    s
}

/// A read racing the first write into an empty FIFO.
pub fn read_empty() -> Scenario {
    let mut s = Scenario::new("test_fifo_rd_empty");
    s.steps.push(Step::Concurrent {
        writes: vec![Transaction::write(8).with_timing(0, 0)],
        reads: vec![read_req(0, 0, 8)],
    });
    s.steps.push(Step::Settle);
    s
}

pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Scenario {
    let writes = (0..n)
        .map(|_| {
            let delay = rng.gen_range(0..8);
            Transaction::write(rng.gen_range(0..255)).with_timing(delay, 8)
        })
        .collect();
    let reads = (0..n)
        .map(|_| read_req(0, rng.gen_range(0..8), 16))
        .collect();
    let mut s = Scenario::new("test_fifo_random");
    s.steps.push(Step::Concurrent { writes, reads });
    s.steps.push(Step::Settle);
    s
}
