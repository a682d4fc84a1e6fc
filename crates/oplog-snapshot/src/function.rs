//! Function and address-range snapshots.

use oplog_types::Ea;
use serde::{Deserialize, Serialize};

use crate::host::{HostFunction, HostRange};

/// An immutable copy of a host function or function tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSnapshot {
    pub start_ea: Ea,
    pub end_ea: Ea,
    pub flags: u64,
    pub frame: u64,
    pub frsize: u64,
    pub frregs: u16,
    pub argsize: u64,
    pub fpd: u64,
    pub color: u32,
    pub pntqty: u32,
    pub regvarqty: i32,
    pub regargqty: i32,
    pub tailqty: i32,
    pub owner: Ea,
    pub refqty: i32,
    /// `None` when the host could not resolve a name.
    pub name: Option<String>,
}

impl FunctionSnapshot {
    pub fn from_host<F: HostFunction + ?Sized>(func: &F) -> Self {
        Self {
            start_ea: func.start_ea(),
            end_ea: func.end_ea(),
            flags: func.flags(),
            frame: func.frame(),
            frsize: func.frsize(),
            frregs: func.frregs(),
            argsize: func.argsize(),
            fpd: func.fpd(),
            color: func.color(),
            pntqty: func.pntqty(),
            regvarqty: func.regvarqty(),
            regargqty: func.regargqty(),
            tailqty: func.tailqty(),
            owner: func.owner(),
            refqty: func.refqty(),
            name: func.name(),
        }
    }

    /// Returns `true` if `ea` lies inside `[start_ea, end_ea)`.
    pub fn contains(&self, ea: Ea) -> bool {
        self.start_ea <= ea && ea < self.end_ea
    }
}

/// An immutable half-open address interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeSnapshot {
    pub start_ea: Ea,
    pub end_ea: Ea,
}

impl RangeSnapshot {
    pub fn from_host<R: HostRange + ?Sized>(range: &R) -> Self {
        Self {
            start_ea: range.start_ea(),
            end_ea: range.end_ea(),
        }
    }

    pub fn len(&self) -> u64 {
        self.end_ea.saturating_sub(self.start_ea)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
