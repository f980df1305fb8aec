use std::fmt;

use serde::{Deserialize, Serialize};

/// Which bus event a transaction was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    WriteRequest,
    ReadResponse,
}

impl Role {
    pub fn side(self) -> Side {
        match self {
            Role::WriteRequest => Side::Write,
            Role::ReadResponse => Side::Read,
        }
    }
}

/// One of the two independent interfaces of the FIFO under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Write,
    Read,
}

impl Side {
    pub fn role(self) -> Role {
        match self {
            Side::Write => Role::WriteRequest,
            Side::Read => Role::ReadResponse,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Write => write!(f, "write"),
            Side::Read => write!(f, "read"),
        }
    }
}

/// Bus timing recorded alongside a transaction. Carried for reporting only, the
/// oracle is untimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Timing {
    /// Idle clocks before the request was issued.
    pub delay: u32,
    /// Clocks the responder took to acknowledge.
    pub rsp_clks: u32,
}

/// One observed bus event.
///
/// Fields are private and the builders consume `self`, so a transaction cannot
/// change once it is captured. Every channel hands its subscribers a fresh clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    value: u64,
    role: Role,
    addr: Option<u64>,
    timing: Option<Timing>,
}

impl Transaction {
    pub fn new(value: u64, role: Role) -> Self {
        Self {
            value,
            role,
            addr: None,
            timing: None,
        }
    }
    pub fn write(value: u64) -> Self {
        Self::new(value, Role::WriteRequest)
    }
    pub fn read(value: u64) -> Self {
        Self::new(value, Role::ReadResponse)
    }
    pub fn with_addr(self, addr: u64) -> Self {
        Self {
            addr: Some(addr),
            ..self
        }
    }
    pub fn with_timing(self, delay: u32, rsp_clks: u32) -> Self {
        Self {
            timing: Some(Timing { delay, rsp_clks }),
            ..self
        }
    }
    /// Same metadata, different word.
    pub fn with_value(self, value: u64) -> Self {
        Self { value, ..self }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn side(&self) -> Side {
        self.role.side()
    }
    pub fn addr(&self) -> Option<u64> {
        self.addr
    }
    pub fn timing(&self) -> Option<Timing> {
        self.timing
    }

    /// Scoreboard equality. Address and timing are metadata of the bus cycle
    /// and do not take part.
    pub fn matches(&self, other: &Transaction) -> bool {
        self.value == other.value && self.role == other.role
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.role {
            Role::WriteRequest => "WR",
            Role::ReadResponse => "RD",
        };
        write!(f, "{} 0x{:x}", tag, self.value)?;
        if let Some(addr) = self.addr {
            write!(f, " @0x{:x}", addr)?;
        }
        Ok(())
    }
}
