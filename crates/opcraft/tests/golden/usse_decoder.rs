// Generated by opcraft. Do not edit.

/// `00111xxxxxx???????????????????????????xxxxxx????????????????????`
pub const VMOV_MASK: u64 = 0b1111100000000000000000000000000000000000000000000000000000000000;
pub const VMOV_MATCH: u64 = 0b0011100000000000000000000000000000000000000000000000000000000000;

/// `000000xxxxxxxxxxxxxxxxxxxxxxxxxxx???????????????????????????????`
pub const VMADSI_MASK: u64 = 0b1111110000000000000000000000000000000000000000000000000000000000;
pub const VMADSI_MATCH: u64 = 0b0000000000000000000000000000000000000000000000000000000000000000;

/// `000001xxxxxxxxxxxxx?????????????????????????????????????????????`
pub const VMAD4_MASK: u64 = 0b1111110000000000000000000000000000000000000000000000000000000000;
pub const VMAD4_MATCH: u64 = 0b0000010000000000000000000000000000000000000000000000000000000000;

/// `11111???????????0xxxxxxxxxxxx???????????????????????????????????`
pub const PHAS_MASK: u64 = 0b1111100000000000100000000000000000000000000000000000000000000000;
pub const PHAS_MATCH: u64 = 0b1111100000000000000000000000000000000000000000000000000000000000;

/// `11111???????????xxxx????????????????????????????????????????????`
pub const SPEC_MASK: u64 = 0b1111100000000000000000000000000000000000000000000000000000000000;
pub const SPEC_MATCH: u64 = 0b1111100000000000000000000000000000000000000000000000000000000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct VmovInstruction(pub u64);

impl VmovInstruction {
    /// Bits 59..64, always `0b00111`.
    pub const fn op1(self) -> u64 {
        (self.0 >> 59) & 0x1f
    }

    /// Bits 53..59 (`Imm6`).
    pub const fn dest(self) -> u64 {
        (self.0 >> 53) & 0x3f
    }

    /// Bits 20..26 (`Imm6`).
    pub const fn src(self) -> u64 {
        (self.0 >> 20) & 0x3f
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct VmadsiInstruction(pub u64);

impl VmadsiInstruction {
    /// Bits 59..64, always `0b00000`.
    pub const fn op1(self) -> u64 {
        (self.0 >> 59) & 0x1f
    }

    /// Bits 58..59, always `0b0`.
    pub const fn mode(self) -> u64 {
        (self.0 >> 58) & 0x1
    }

    /// Bits 52..58 (`Imm6`).
    pub const fn dest(self) -> u64 {
        (self.0 >> 52) & 0x3f
    }

    /// Bits 45..52 (`Imm7`).
    pub const fn src0(self) -> u64 {
        (self.0 >> 45) & 0x7f
    }

    /// Bits 38..45 (`Imm7`).
    pub const fn src1(self) -> u64 {
        (self.0 >> 38) & 0x7f
    }

    /// Bits 31..38 (`Imm7`).
    pub const fn src2(self) -> u64 {
        (self.0 >> 31) & 0x7f
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Vmad4Instruction(pub u64);

impl Vmad4Instruction {
    /// Bits 59..64, always `0b00000`.
    pub const fn op1(self) -> u64 {
        (self.0 >> 59) & 0x1f
    }

    /// Bits 58..59, always `0b1`.
    pub const fn mode(self) -> u64 {
        (self.0 >> 58) & 0x1
    }

    /// Bits 52..58 (`DestReg`).
    pub const fn dest(self) -> u64 {
        (self.0 >> 52) & 0x3f
    }

    /// Bits 45..52 (`Imm7`).
    pub const fn src0(self) -> u64 {
        (self.0 >> 45) & 0x7f
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PhasInstruction(pub u64);

impl PhasInstruction {
    /// Bits 59..64, always `0b11111`.
    pub const fn op1(self) -> u64 {
        (self.0 >> 59) & 0x1f
    }

    /// Bits 47..48, always `0b0`.
    pub const fn marker(self) -> u64 {
        (self.0 >> 47) & 0x1
    }

    /// Bits 35..47 (`Imm12`).
    pub const fn nexti(self) -> u64 {
        (self.0 >> 35) & 0xfff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SpecInstruction(pub u64);

impl SpecInstruction {
    /// Bits 59..64, always `0b11111`.
    pub const fn op1(self) -> u64 {
        (self.0 >> 59) & 0x1f
    }

    /// Bits 47..48 (`Imm1`).
    pub const fn special(self) -> u64 {
        (self.0 >> 47) & 0x1
    }

    /// Bits 44..47 (`Imm3`).
    pub const fn category(self) -> u64 {
        (self.0 >> 44) & 0x7
    }
}

pub trait Handlers {
    type Output;

    fn vmov_decode(&mut self, op: VmovInstruction) -> Self::Output;

    fn vmadsi_decode(&mut self, op: VmadsiInstruction) -> Self::Output;

    fn vmad4_decode(&mut self, op: Vmad4Instruction) -> Self::Output;

    fn phas_decode(&mut self, op: PhasInstruction) -> Self::Output;

    fn spec_decode(&mut self, op: SpecInstruction) -> Self::Output;
}

/// Calls the handler of the first instruction whose encoding accepts `instr`.
pub fn decode_instruction<H: Handlers + ?Sized>(handlers: &mut H, instr: u64) -> Option<H::Output> {
    if instr & VMOV_MASK == VMOV_MATCH {
        return Some(handlers.vmov_decode(VmovInstruction(instr)));
    }
    if instr & VMADSI_MASK == VMADSI_MATCH {
        return Some(handlers.vmadsi_decode(VmadsiInstruction(instr)));
    }
    if instr & VMAD4_MASK == VMAD4_MATCH {
        return Some(handlers.vmad4_decode(Vmad4Instruction(instr)));
    }
    if instr & PHAS_MASK == PHAS_MATCH {
        return Some(handlers.phas_decode(PhasInstruction(instr)));
    }
    if instr & SPEC_MASK == SPEC_MATCH {
        return Some(handlers.spec_decode(SpecInstruction(instr)));
    }
    None
}
