//! Read-only views of host structures.
//!
//! The host analysis engine owns its functions, instructions, segments and
//! type members, and hands them to notification callbacks as references that
//! are only valid for the duration of the callback. A binding layer
//! implements these traits over those references; the converters in this
//! crate read through them once and never keep them.
//!
//! Accessors mirror the host's field widths. Fields that the host stores in
//! narrow integers but which a binding may surface wider (segment
//! attributes) are returned as `i64` so that out-of-domain values reach the
//! validation layer instead of being truncated on the way in.

use oplog_types::{Ea, HostReadError, Tid};

/// A function or function tail (`func_t`).
pub trait HostFunction {
    /// First address of the chunk.
    fn start_ea(&self) -> Ea;
    /// One past the last address of the chunk.
    fn end_ea(&self) -> Ea;
    /// Function flags (`FUNC_*`).
    fn flags(&self) -> u64;
    /// Netnode id of the stack frame.
    fn frame(&self) -> u64;
    /// Size of local variables in bytes.
    fn frsize(&self) -> u64;
    /// Size of saved registers in bytes.
    fn frregs(&self) -> u16;
    /// Bytes purged from the stack on return.
    fn argsize(&self) -> u64;
    /// Frame pointer delta.
    fn fpd(&self) -> u64;
    /// User-assigned color.
    fn color(&self) -> u32;
    /// Number of stack change points.
    fn pntqty(&self) -> u32;
    /// Number of register variables, `-1` if not loaded.
    fn regvarqty(&self) -> i32;
    /// Number of register arguments.
    fn regargqty(&self) -> i32;
    /// Number of tails, for an entry chunk.
    fn tailqty(&self) -> i32;
    /// Owning function, for a tail chunk.
    fn owner(&self) -> Ea;
    /// Number of referers, for a tail chunk.
    fn refqty(&self) -> i32;

    /// The function's resolved display name, if the host has one.
    fn name(&self) -> Option<String>;
}

/// One instruction operand (`op_t`).
pub trait HostOperand {
    /// Operand slot number.
    fn n(&self) -> u8;
    /// Operand type (`o_void`, `o_reg`, ...).
    fn op_type(&self) -> u8;
    /// Offset of the operand value from the instruction start.
    fn offb(&self) -> u8;
    /// Offset of the outer displacement.
    fn offo(&self) -> u8;
    /// Operand flags (`OF_*`).
    fn flags(&self) -> u8;
    /// Operand data type.
    fn dtype(&self) -> u8;
    /// Register number.
    fn reg(&self) -> u16;
    /// Register phrase number.
    fn phrase(&self) -> u16;
    /// Immediate value.
    fn value(&self) -> u64;
    /// Memory or displacement address.
    fn addr(&self) -> Ea;
    /// Processor-specific value.
    fn specval(&self) -> u64;
    /// Processor-specific flag.
    fn specflag1(&self) -> u8;
    /// Processor-specific flag.
    fn specflag2(&self) -> u8;
    /// Processor-specific flag.
    fn specflag3(&self) -> u8;
    /// Processor-specific flag.
    fn specflag4(&self) -> u8;
}

/// A decoded instruction (`insn_t`).
pub trait HostInstruction {
    /// Code segment base.
    fn cs(&self) -> Ea;
    /// Offset within the code segment.
    fn ip(&self) -> Ea;
    /// Linear address of the instruction.
    fn ea(&self) -> Ea;
    /// Processor-specific instruction code.
    fn itype(&self) -> u16;
    /// Instruction length in bytes.
    fn size(&self) -> u16;
    /// Auxiliary prefix bits as one 32-bit value.
    fn auxpref(&self) -> u32;

    /// `auxpref` viewed as two 16-bit halves.
    ///
    /// The host stores all three prefix views in one union, so the default
    /// reinterprets `auxpref` in native byte order.
    fn auxpref_u16(&self) -> [u16; 2] {
        let b = self.auxpref().to_ne_bytes();
        [u16::from_ne_bytes([b[0], b[1]]), u16::from_ne_bytes([b[2], b[3]])]
    }

    /// `auxpref` viewed as four bytes, in native byte order.
    fn auxpref_u8(&self) -> [u8; 4] {
        self.auxpref().to_ne_bytes()
    }

    /// Segment prefix.
    fn segpref(&self) -> u8;
    /// Instruction prefix.
    fn insnpref(&self) -> u8;
    /// Instruction flags (`INSN_*`).
    fn flags(&self) -> u16;

    /// Operand slot `n` (0-7), or `None` when the binding does not expose it.
    fn operand(&self, n: usize) -> Option<&dyn HostOperand>;
}

/// An address-space segment (`segment_t`).
pub trait HostSegment {
    /// First address of the segment.
    fn start_ea(&self) -> Ea;
    /// One past the last address of the segment.
    fn end_ea(&self) -> Ea;
    /// Internal id of the segment name.
    fn name_id(&self) -> u64;
    /// Internal id of the segment class.
    fn class_id(&self) -> u64;
    /// Original base address.
    fn orgbase(&self) -> u64;
    /// Alignment code.
    fn align(&self) -> i64;
    /// Combination code.
    fn comb(&self) -> i64;
    /// Access permissions (`SEGPERM_*`).
    fn perm(&self) -> i64;
    /// `0`, `1` or `2` for 16, 32 or 64 bits.
    fn bitness(&self) -> i64;
    /// Segment flags (`SFL_*`).
    fn flags(&self) -> i64;
    /// Segment selector.
    fn sel(&self) -> u64;
    /// Default segment register values; the host keeps 16 slots.
    fn defsr(&self) -> &[u64];
    /// Segment type (`SEG_*`).
    fn seg_type(&self) -> i64;
    /// User-assigned color.
    fn color(&self) -> u32;
    /// Resolved segment name, if any.
    fn segment_name(&self) -> Option<String>;
    /// Resolved segment class, if any.
    fn segment_class(&self) -> Option<String>;
}

/// A plain address interval (`range_t`).
pub trait HostRange {
    /// First address of the range.
    fn start_ea(&self) -> Ea;
    /// One past the last address of the range.
    fn end_ea(&self) -> Ea;
}

/// A struct/union member or frame variable (`udm_t`).
pub trait HostTypeMember {
    /// Offset in bits.
    fn offset(&self) -> u64;
    /// Size in bits.
    fn size(&self) -> u64;
    /// Member name.
    fn name(&self) -> &str;
    /// Member comment.
    fn cmt(&self) -> &str;
    /// Resolves the member's type to a type id.
    fn type_tid(&self) -> Result<Tid, HostReadError>;
    /// The member's value representation, as rendered by the host.
    fn repr(&self) -> String;
    /// Effective alignment in bytes.
    fn effalign(&self) -> i32;
    /// Type attribute bits.
    fn tafld_bits(&self) -> u32;
    /// Field alignment shift.
    fn fda(&self) -> u8;
}

/// An enumeration member (`edm_t`).
pub trait HostEnumMember {
    /// Member name.
    fn name(&self) -> &str;
    /// Member comment.
    fn cmt(&self) -> &str;
    /// Member value.
    fn value(&self) -> u64;
    /// Resolves the member to a type id.
    fn tid(&self) -> Result<Tid, HostReadError>;
}

/// A bookmarked location (`lochist_entry_t`).
pub trait HostLocation {
    /// Maps the location's place back to an address. Not every place kind
    /// has one.
    fn ea(&self) -> Result<Ea, HostReadError>;
}
