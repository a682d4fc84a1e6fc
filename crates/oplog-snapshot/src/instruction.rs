//! Instruction and operand snapshots.
//!
//! The host decodes every instruction into a fixed table of eight operand
//! slots. A snapshot always carries all eight: slots the instruction does not
//! use hold a void operand whose `n` still equals the slot index.

use oplog_types::Ea;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::host::{HostInstruction, HostOperand};
use crate::validation::{check_len, OPERAND_SLOTS};

/// Operand type code for an unused slot.
pub const O_VOID: u8 = 0;

/// An immutable copy of one instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandSnapshot {
    /// Slot index within the parent instruction.
    pub n: u8,
    #[serde(rename = "type")]
    pub op_type: u8,
    pub offb: u8,
    pub offo: u8,
    pub flags: u8,
    pub dtype: u8,
    pub reg: u16,
    pub phrase: u16,
    pub value: u64,
    pub addr: Ea,
    pub specval: u64,
    pub specflag1: u8,
    pub specflag2: u8,
    pub specflag3: u8,
    pub specflag4: u8,
}

impl OperandSnapshot {
    pub fn from_host<O: HostOperand + ?Sized>(op: &O) -> Self {
        Self {
            n: op.n(),
            op_type: op.op_type(),
            offb: op.offb(),
            offo: op.offo(),
            flags: op.flags(),
            dtype: op.dtype(),
            reg: op.reg(),
            phrase: op.phrase(),
            value: op.value(),
            addr: op.addr(),
            specval: op.specval(),
            specflag1: op.specflag1(),
            specflag2: op.specflag2(),
            specflag3: op.specflag3(),
            specflag4: op.specflag4(),
        }
    }

    /// An unused operand sitting in `slot`.
    pub fn void(slot: u8) -> Self {
        Self {
            n: slot,
            op_type: O_VOID,
            offb: 0,
            offo: 0,
            flags: 0,
            dtype: 0,
            reg: 0,
            phrase: 0,
            value: 0,
            addr: 0,
            specval: 0,
            specflag1: 0,
            specflag2: 0,
            specflag3: 0,
            specflag4: 0,
        }
    }

    pub fn is_void(&self) -> bool {
        self.op_type == O_VOID
    }
}

/// Unvalidated instruction record, as read from the host or from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionFields {
    pub cs: Ea,
    pub ip: Ea,
    pub ea: Ea,
    pub itype: u16,
    pub size: u16,
    pub auxpref: u32,
    pub auxpref_u16: [u16; 2],
    pub auxpref_u8: [u8; 4],
    pub segpref: u8,
    pub insnpref: u8,
    pub flags: u16,
    pub ops: Vec<OperandSnapshot>,
}

/// An immutable copy of a decoded instruction with all eight operand slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstructionFields")]
pub struct InstructionSnapshot {
    cs: Ea,
    ip: Ea,
    ea: Ea,
    itype: u16,
    size: u16,
    auxpref: u32,
    auxpref_u16: [u16; 2],
    auxpref_u8: [u8; 4],
    segpref: u8,
    insnpref: u8,
    flags: u16,
    ops: [OperandSnapshot; OPERAND_SLOTS],
}

impl InstructionSnapshot {
    /// Copies a live host instruction.
    ///
    /// Operand slots the binding does not expose are filled with void
    /// operands, so the result always has eight.
    pub fn from_host<I: HostInstruction + ?Sized>(insn: &I) -> Result<Self, SnapshotError> {
        let ops = (0..OPERAND_SLOTS)
            .map(|slot| match insn.operand(slot) {
                Some(op) => OperandSnapshot::from_host(op),
                None => {
                    tracing::trace!(ea = insn.ea(), slot, "operand slot not exposed, filling void");
                    OperandSnapshot::void(slot as u8)
                }
            })
            .collect();

        Self::try_from(InstructionFields {
            cs: insn.cs(),
            ip: insn.ip(),
            ea: insn.ea(),
            itype: insn.itype(),
            size: insn.size(),
            auxpref: insn.auxpref(),
            auxpref_u16: insn.auxpref_u16(),
            auxpref_u8: insn.auxpref_u8(),
            segpref: insn.segpref(),
            insnpref: insn.insnpref(),
            flags: insn.flags(),
            ops,
        })
    }

    pub fn cs(&self) -> Ea {
        self.cs
    }

    pub fn ip(&self) -> Ea {
        self.ip
    }

    pub fn ea(&self) -> Ea {
        self.ea
    }

    pub fn itype(&self) -> u16 {
        self.itype
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn auxpref(&self) -> u32 {
        self.auxpref
    }

    pub fn auxpref_u16(&self) -> [u16; 2] {
        self.auxpref_u16
    }

    pub fn auxpref_u8(&self) -> [u8; 4] {
        self.auxpref_u8
    }

    pub fn segpref(&self) -> u8 {
        self.segpref
    }

    pub fn insnpref(&self) -> u8 {
        self.insnpref
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn ops(&self) -> &[OperandSnapshot; OPERAND_SLOTS] {
        &self.ops
    }

    /// Operands that are not void, in slot order.
    pub fn used_ops(&self) -> impl Iterator<Item = &OperandSnapshot> {
        self.ops.iter().filter(|op| !op.is_void())
    }
}

impl TryFrom<InstructionFields> for InstructionSnapshot {
    type Error = SnapshotError;

    fn try_from(fields: InstructionFields) -> Result<Self, Self::Error> {
        check_len("ops", &fields.ops, OPERAND_SLOTS)?;
        for (slot, op) in fields.ops.iter().enumerate() {
            if usize::from(op.n) != slot {
                return Err(SnapshotError::OperandIndexMismatch { slot, index: op.n });
            }
        }

        let actual = fields.ops.len();
        let ops: [OperandSnapshot; OPERAND_SLOTS] =
            fields.ops.try_into().map_err(|_| SnapshotError::WrongLength {
                field: "ops",
                expected: OPERAND_SLOTS,
                actual,
            })?;

        Ok(Self {
            cs: fields.cs,
            ip: fields.ip,
            ea: fields.ea,
            itype: fields.itype,
            size: fields.size,
            auxpref: fields.auxpref,
            auxpref_u16: fields.auxpref_u16,
            auxpref_u8: fields.auxpref_u8,
            segpref: fields.segpref,
            insnpref: fields.insnpref,
            flags: fields.flags,
            ops,
        })
    }
}

impl From<InstructionSnapshot> for InstructionFields {
    fn from(s: InstructionSnapshot) -> Self {
        Self {
            cs: s.cs,
            ip: s.ip,
            ea: s.ea,
            itype: s.itype,
            size: s.size,
            auxpref: s.auxpref,
            auxpref_u16: s.auxpref_u16,
            auxpref_u8: s.auxpref_u8,
            segpref: s.segpref,
            insnpref: s.insnpref,
            flags: s.flags,
            ops: s.ops.into(),
        }
    }
}
