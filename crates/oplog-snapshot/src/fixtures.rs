//! In-memory host fakes for tests.
//!
//! Each fake is a plain struct with public fields implementing the matching
//! accessor trait, plus a `sample` constructor with realistic values.

use oplog_types::{Ea, HostReadError, Tid};

use crate::host::{
    HostEnumMember, HostFunction, HostInstruction, HostLocation, HostOperand, HostRange,
    HostSegment, HostTypeMember,
};
use crate::validation::DEFSR_SLOTS;

#[derive(Debug, Clone)]
pub struct FakeFunction {
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
    pub name: Option<String>,
}

impl FakeFunction {
    pub fn sample(start_ea: Ea, name: &str) -> Self {
        Self {
            start_ea,
            end_ea: start_ea + 0x40,
            flags: 0x5400,
            frame: 0xff00_0000_0000_0012,
            frsize: 0x18,
            frregs: 8,
            argsize: 0,
            fpd: 0,
            color: 0xffff_ffff,
            pntqty: 3,
            regvarqty: 0,
            regargqty: 0,
            tailqty: 0,
            owner: start_ea,
            refqty: 0,
            name: Some(name.to_string()),
        }
    }
}

impl HostFunction for FakeFunction {
    fn start_ea(&self) -> Ea {
        self.start_ea
    }
    fn end_ea(&self) -> Ea {
        self.end_ea
    }
    fn flags(&self) -> u64 {
        self.flags
    }
    fn frame(&self) -> u64 {
        self.frame
    }
    fn frsize(&self) -> u64 {
        self.frsize
    }
    fn frregs(&self) -> u16 {
        self.frregs
    }
    fn argsize(&self) -> u64 {
        self.argsize
    }
    fn fpd(&self) -> u64 {
        self.fpd
    }
    fn color(&self) -> u32 {
        self.color
    }
    fn pntqty(&self) -> u32 {
        self.pntqty
    }
    fn regvarqty(&self) -> i32 {
        self.regvarqty
    }
    fn regargqty(&self) -> i32 {
        self.regargqty
    }
    fn tailqty(&self) -> i32 {
        self.tailqty
    }
    fn owner(&self) -> Ea {
        self.owner
    }
    fn refqty(&self) -> i32 {
        self.refqty
    }
    fn name(&self) -> Option<String> {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeOperand {
    pub n: u8,
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
    pub specflags: [u8; 4],
}

impl FakeOperand {
    /// A general register operand (`o_reg`).
    pub fn reg(n: u8, reg: u16) -> Self {
        Self {
            n,
            op_type: 1,
            flags: 0x08,
            dtype: 2,
            reg,
            ..Self::default()
        }
    }

    /// An immediate operand (`o_imm`).
    pub fn imm(n: u8, value: u64) -> Self {
        Self {
            n,
            op_type: 5,
            offb: 1,
            flags: 0x08,
            dtype: 2,
            value,
            ..Self::default()
        }
    }
}

impl HostOperand for FakeOperand {
    fn n(&self) -> u8 {
        self.n
    }
    fn op_type(&self) -> u8 {
        self.op_type
    }
    fn offb(&self) -> u8 {
        self.offb
    }
    fn offo(&self) -> u8 {
        self.offo
    }
    fn flags(&self) -> u8 {
        self.flags
    }
    fn dtype(&self) -> u8 {
        self.dtype
    }
    fn reg(&self) -> u16 {
        self.reg
    }
    fn phrase(&self) -> u16 {
        self.phrase
    }
    fn value(&self) -> u64 {
        self.value
    }
    fn addr(&self) -> Ea {
        self.addr
    }
    fn specval(&self) -> u64 {
        self.specval
    }
    fn specflag1(&self) -> u8 {
        self.specflags[0]
    }
    fn specflag2(&self) -> u8 {
        self.specflags[1]
    }
    fn specflag3(&self) -> u8 {
        self.specflags[2]
    }
    fn specflag4(&self) -> u8 {
        self.specflags[3]
    }
}

/// An instruction whose binding exposes only the operands in `ops`.
#[derive(Debug, Clone)]
pub struct FakeInstruction {
    pub ea: Ea,
    pub itype: u16,
    pub size: u16,
    pub auxpref: u32,
    pub segpref: u8,
    pub insnpref: u8,
    pub flags: u16,
    pub ops: Vec<FakeOperand>,
}

impl FakeInstruction {
    /// `mov eax, 1` at `ea`.
    pub fn mov_imm(ea: Ea) -> Self {
        Self {
            ea,
            itype: 122,
            size: 5,
            auxpref: 0x0000_1808,
            segpref: 0,
            insnpref: 0,
            flags: 0,
            ops: vec![FakeOperand::reg(0, 0), FakeOperand::imm(1, 1)],
        }
    }
}

impl HostInstruction for FakeInstruction {
    fn cs(&self) -> Ea {
        0
    }
    fn ip(&self) -> Ea {
        self.ea
    }
    fn ea(&self) -> Ea {
        self.ea
    }
    fn itype(&self) -> u16 {
        self.itype
    }
    fn size(&self) -> u16 {
        self.size
    }
    fn auxpref(&self) -> u32 {
        self.auxpref
    }
    fn segpref(&self) -> u8 {
        self.segpref
    }
    fn insnpref(&self) -> u8 {
        self.insnpref
    }
    fn flags(&self) -> u16 {
        self.flags
    }
    fn operand(&self, n: usize) -> Option<&dyn HostOperand> {
        self.ops.get(n).map(|op| op as &dyn HostOperand)
    }
}

#[derive(Debug, Clone)]
pub struct FakeSegment {
    pub start_ea: Ea,
    pub end_ea: Ea,
    pub name_id: u64,
    pub class_id: u64,
    pub orgbase: u64,
    pub align: i64,
    pub comb: i64,
    pub perm: i64,
    pub bitness: i64,
    pub flags: i64,
    pub sel: u64,
    pub defsr: Vec<u64>,
    pub seg_type: i64,
    pub color: u32,
    pub segment_name: Option<String>,
    pub segment_class: Option<String>,
}

impl FakeSegment {
    /// A 64-bit `.text` segment with every attribute in domain.
    pub fn text() -> Self {
        Self {
            start_ea: 0x401000,
            end_ea: 0x402000,
            name_id: 0xff00_0000_0000_0031,
            class_id: 0xff00_0000_0000_0032,
            orgbase: 0,
            align: 16,
            comb: 1,
            perm: 7,
            bitness: 2,
            flags: 8,
            sel: 1,
            defsr: vec![0; DEFSR_SLOTS],
            seg_type: 2,
            color: 0xffff_ffff,
            segment_name: Some(".text".to_string()),
            segment_class: Some("CODE".to_string()),
        }
    }
}

impl HostSegment for FakeSegment {
    fn start_ea(&self) -> Ea {
        self.start_ea
    }
    fn end_ea(&self) -> Ea {
        self.end_ea
    }
    fn name_id(&self) -> u64 {
        self.name_id
    }
    fn class_id(&self) -> u64 {
        self.class_id
    }
    fn orgbase(&self) -> u64 {
        self.orgbase
    }
    fn align(&self) -> i64 {
        self.align
    }
    fn comb(&self) -> i64 {
        self.comb
    }
    fn perm(&self) -> i64 {
        self.perm
    }
    fn bitness(&self) -> i64 {
        self.bitness
    }
    fn flags(&self) -> i64 {
        self.flags
    }
    fn sel(&self) -> u64 {
        self.sel
    }
    fn defsr(&self) -> &[u64] {
        &self.defsr
    }
    fn seg_type(&self) -> i64 {
        self.seg_type
    }
    fn color(&self) -> u32 {
        self.color
    }
    fn segment_name(&self) -> Option<String> {
        self.segment_name.clone()
    }
    fn segment_class(&self) -> Option<String> {
        self.segment_class.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakeRange {
    pub start_ea: Ea,
    pub end_ea: Ea,
}

impl HostRange for FakeRange {
    fn start_ea(&self) -> Ea {
        self.start_ea
    }
    fn end_ea(&self) -> Ea {
        self.end_ea
    }
}

/// A struct member. `tid: None` makes `type_tid()` fail.
#[derive(Debug, Clone)]
pub struct FakeUdm {
    pub offset: u64,
    pub size: u64,
    pub name: String,
    pub cmt: String,
    pub tid: Option<Tid>,
    pub repr: String,
    pub effalign: i32,
    pub tafld_bits: u32,
    pub fda: u8,
}

impl FakeUdm {
    pub fn sample(name: &str, offset: u64) -> Self {
        Self {
            offset,
            size: 32,
            name: name.to_string(),
            cmt: String::new(),
            tid: Some(0xff00_0000_0000_0101),
            repr: String::new(),
            effalign: 4,
            tafld_bits: 0,
            fda: 0,
        }
    }
}

impl HostTypeMember for FakeUdm {
    fn offset(&self) -> u64 {
        self.offset
    }
    fn size(&self) -> u64 {
        self.size
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn cmt(&self) -> &str {
        &self.cmt
    }
    fn type_tid(&self) -> Result<Tid, HostReadError> {
        self.tid
            .ok_or_else(|| HostReadError::new("tid", "member type is not resolvable"))
    }
    fn repr(&self) -> String {
        self.repr.clone()
    }
    fn effalign(&self) -> i32 {
        self.effalign
    }
    fn tafld_bits(&self) -> u32 {
        self.tafld_bits
    }
    fn fda(&self) -> u8 {
        self.fda
    }
}

/// An enum member. `tid: None` makes `tid()` fail.
#[derive(Debug, Clone)]
pub struct FakeEdm {
    pub name: String,
    pub cmt: String,
    pub value: u64,
    pub tid: Option<Tid>,
}

impl FakeEdm {
    pub fn sample(name: &str, value: u64) -> Self {
        Self {
            name: name.to_string(),
            cmt: String::new(),
            value,
            tid: Some(0xff00_0000_0000_0201),
        }
    }
}

impl HostEnumMember for FakeEdm {
    fn name(&self) -> &str {
        &self.name
    }
    fn cmt(&self) -> &str {
        &self.cmt
    }
    fn value(&self) -> u64 {
        self.value
    }
    fn tid(&self) -> Result<Tid, HostReadError> {
        self.tid
            .ok_or_else(|| HostReadError::new("tid", "enum member has no type id"))
    }
}

/// A bookmark place. `None` means the place has no address.
#[derive(Debug, Clone, Copy)]
pub struct FakeLocation(pub Option<Ea>);

impl HostLocation for FakeLocation {
    fn ea(&self) -> Result<Ea, HostReadError> {
        self.0
            .ok_or_else(|| HostReadError::new("ea", "place does not map to an address"))
    }
}
