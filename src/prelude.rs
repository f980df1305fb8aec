pub use crate::channel::{Channel, Subscriber};
pub use crate::config::{OracleConfig, ResiduePolicy};
pub use crate::env::{Binding, Environment};
pub use crate::mailbox::{mailbox, MailboxReceiver, MailboxSender};
pub use crate::predictor::{Predictor, PredictorStats, DEFAULT_DEPTH};
pub use crate::report::{log_summary, summary_table, write_junit, write_junit_file, RunRecord};
pub use crate::scoreboard::{Mismatch, Scoreboard, ScoreboardStats};
pub use crate::sequence::{Scenario, Step};
pub use crate::transaction::{Role, Side, Timing, Transaction};
pub use crate::{combine, utils, OracleError, OracleObj, OracleResult};
