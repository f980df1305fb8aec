use std::fmt;
use std::time::Instant;

use log::{info, warn};
use once_cell::unsync::OnceCell;

use crate::channel::{Channel, Subscriber};
use crate::config::{OracleConfig, ResiduePolicy};
use crate::error::OracleError;
use crate::predictor::Predictor;
use crate::report::RunRecord;
use crate::scoreboard::Scoreboard;
use crate::transaction::{Side, Transaction};
use crate::OracleResult;

/// One edge of the wiring graph, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub from: String,
    pub to: String,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Predictor plus one scoreboard per side, wired to a monitor channel per side.
///
/// Monitors publish on `monitor(side)`. The wiring is built once in `new` and
/// never changes.
pub struct Environment {
    cfg: OracleConfig,
    wr_mon: Channel,
    rd_mon: Channel,
    prd: Predictor,
    in_sb: Scoreboard,
    out_sb: Scoreboard,
    bindings: Vec<Binding>,
    started: OnceCell<Instant>,
}

impl Environment {
    pub fn new(cfg: OracleConfig) -> Result<Self, OracleError> {
        cfg.validate()?;
        let mut env = Self {
            wr_mon: Channel::new("wb4_mst_in_agent.mon.ap"),
            rd_mon: Channel::new("wb4_mst_out_agent.mon.ap"),
            prd: Predictor::with_depth("prd", cfg.depth)?,
            in_sb: Scoreboard::new("in_sb"),
            out_sb: Scoreboard::new("out_sb"),
            bindings: Vec::new(),
            started: OnceCell::new(),
            cfg,
        };
        env.connect()?;
        info!(
            "env: depth={}, residue={:?}, topology:\n{}",
            env.cfg.depth,
            env.cfg.residue,
            env.topology()
        );
        Ok(env)
    }

    fn connect(&mut self) -> Result<(), OracleError> {
        // predictor
        bind(&mut self.bindings, &self.wr_mon, self.prd.export(Side::Write))?;
        bind(&mut self.bindings, &self.rd_mon, self.prd.export(Side::Read))?;

        // in scoreboard
        bind(&mut self.bindings, &self.wr_mon, self.in_sb.observed_export())?;
        bind(
            &mut self.bindings,
            self.prd.expected(Side::Write),
            self.in_sb.expected_export(),
        )?;

        // out scoreboard
        bind(&mut self.bindings, &self.rd_mon, self.out_sb.observed_export())?;
        bind(
            &mut self.bindings,
            self.prd.expected(Side::Read),
            self.out_sb.expected_export(),
        )
    }

    /// Hands a monitored transaction to the oracle.
    pub fn observe(&self, side: Side, t: Transaction) {
        self.started.get_or_init(Instant::now);
        self.monitor(side).publish(&t);
    }

    pub fn monitor(&self, side: Side) -> &Channel {
        match side {
            Side::Write => &self.wr_mon,
            Side::Read => &self.rd_mon,
        }
    }
    pub fn predictor(&self) -> &Predictor {
        &self.prd
    }
    pub fn scoreboard(&self, side: Side) -> &Scoreboard {
        match side {
            Side::Write => &self.in_sb,
            Side::Read => &self.out_sb,
        }
    }
    pub fn config(&self) -> &OracleConfig {
        &self.cfg
    }
    pub fn residue_policy(&self) -> ResiduePolicy {
        self.cfg.residue
    }
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
    pub fn topology(&self) -> String {
        self.bindings
            .iter()
            .map(|b| format!("  {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn error(&self) -> bool {
        self.in_sb.error() || self.out_sb.error()
    }
    pub fn passed(&self) -> bool {
        let policy = self.cfg.residue;
        self.in_sb.passed(policy) && self.out_sb.passed(policy)
    }

    /// End of run judgement over both scoreboards.
    pub fn verdict(&self) -> OracleResult {
        let policy = self.cfg.residue;
        for sb in [&self.in_sb, &self.out_sb] {
            let residue = sb.residue();
            if residue > 0 {
                warn!("{}: {} unmatched entries at end of run", sb.name(), residue);
            }
        }
        let result = crate::combine([self.in_sb.result(policy), self.out_sb.result(policy)]);
        match result {
            Ok(_) => info!("***** TEST SCORE: PASSED *****"),
            Err(_) => info!("***** TEST SCORE: FAILED *****"),
        }
        result
    }

    /// Seconds since the first observation, zero if nothing was observed.
    pub fn elapsed_secs(&self) -> f64 {
        self.started
            .get()
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn record(&self, name: &str) -> RunRecord {
        RunRecord {
            name: name.to_string(),
            result: self.verdict(),
            time_secs: self.elapsed_secs(),
        }
    }
}

fn bind(
    bindings: &mut Vec<Binding>,
    from: &Channel,
    to: impl Subscriber + 'static,
) -> Result<(), OracleError> {
    let binding = Binding {
        from: from.name(),
        to: to.name(),
    };
    from.connect(to)?;
    bindings.push(binding);
    Ok(())
}
