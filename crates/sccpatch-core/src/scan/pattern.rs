// crates/sccpatch-core/src/scan/pattern.rs
//
// Instruction patterns as data. A pattern is a short run of byte tests
// anchored at an offset plus the position/width of the operand it locates.
// Only the handful of Z80 encodings the patch passes need are described.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternId {
    /// `ld ix,nn` with nn in the channel state page.
    IndexedLoad,
    /// `ld rr,nn` / `ld (nn),a` / `ld a,(nn)` / `ld (nn),hl` / `ld hl,(nn)`
    /// with nn in the channel state page.
    ImmediateLoad,
    /// `ld (x000h),a` writing a Konami4 bank register.
    MapperSelect,
    /// `call 0093h` (BIOS WRTPSG).
    CallRedirect,
}

impl PatternId {
    pub fn name(self) -> &'static str {
        match self {
            PatternId::IndexedLoad => "indexed-load",
            PatternId::ImmediateLoad => "immediate-load",
            PatternId::MapperSelect => "mapper-select",
            PatternId::CallRedirect => "call-redirect",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteTest {
    Any,
    Eq(u8),
    Masked { mask: u8, value: u8 },
    OneOf(&'static [u8]),
}

impl ByteTest {
    #[inline]
    pub fn test(self, b: u8) -> bool {
        match self {
            ByteTest::Any => true,
            ByteTest::Eq(v) => b == v,
            ByteTest::Masked { mask, value } => (b & mask) == value,
            ByteTest::OneOf(set) => set.contains(&b),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Little-endian 16-bit address at this offset from the match.
    Addr16(usize),
    /// Single immediate byte at this offset from the match.
    Byte(usize),
}

impl Operand {
    pub fn offset(self) -> usize {
        match self {
            Operand::Addr16(o) | Operand::Byte(o) => o,
        }
    }

    pub fn width(self) -> usize {
        match self {
            Operand::Addr16(_) => 2,
            Operand::Byte(_) => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub id: PatternId,
    pub bytes: &'static [ByteTest],
    pub operand: Operand,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Test the pattern at `offset`. False when it would run off the end.
    pub fn matches_at(&self, buf: &[u8], offset: usize) -> bool {
        match buf.get(offset..offset.saturating_add(self.bytes.len())) {
            Some(window) if window.len() == self.bytes.len() => self
                .bytes
                .iter()
                .zip(window)
                .all(|(t, &b)| t.test(b)),
            _ => false,
        }
    }
}

/// Channel state lives in 0E000h-0E3FFh before relocation.
const CHANNEL_PAGE: ByteTest = ByteTest::Masked { mask: 0xFC, value: 0xE0 };

const IMMEDIATE_LOAD_OPCODES: &[u8] = &[0x01, 0x11, 0x21, 0x32, 0x3A, 0x22, 0x2A];

/// Konami4 bank registers 6000h/8000h/A000h.
const KONAMI4_BANK_HI: &[u8] = &[0x60, 0x80, 0xA0];

pub const INDEXED_LOAD: Pattern = Pattern {
    id: PatternId::IndexedLoad,
    bytes: &[ByteTest::Eq(0xDD), ByteTest::Eq(0x21), ByteTest::Any, CHANNEL_PAGE],
    operand: Operand::Addr16(2),
};

pub const IMMEDIATE_LOAD: Pattern = Pattern {
    id: PatternId::ImmediateLoad,
    bytes: &[ByteTest::OneOf(IMMEDIATE_LOAD_OPCODES), ByteTest::Any, CHANNEL_PAGE],
    operand: Operand::Addr16(1),
};

pub const MAPPER_SELECT: Pattern = Pattern {
    id: PatternId::MapperSelect,
    bytes: &[ByteTest::Eq(0x32), ByteTest::Eq(0x00), ByteTest::OneOf(KONAMI4_BANK_HI)],
    operand: Operand::Byte(2),
};

pub const CALL_REDIRECT: Pattern = Pattern {
    id: PatternId::CallRedirect,
    bytes: &[ByteTest::Eq(0xCD), ByteTest::Eq(0x93), ByteTest::Eq(0x00)],
    operand: Operand::Addr16(1),
};

/// Tested in this order at every offset.
pub const CHANNEL_PATTERNS: &[Pattern] = &[INDEXED_LOAD, IMMEDIATE_LOAD];
pub const MAPPER_PATTERNS: &[Pattern] = &[MAPPER_SELECT];
pub const CALL_PATTERNS: &[Pattern] = &[CALL_REDIRECT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_load_needs_channel_page_high_byte() {
        assert!(INDEXED_LOAD.matches_at(&[0xDD, 0x21, 0x00, 0xE3], 0));
        assert!(!INDEXED_LOAD.matches_at(&[0xDD, 0x21, 0x00, 0xE4], 0));
        assert!(!INDEXED_LOAD.matches_at(&[0xFD, 0x21, 0x00, 0xE0], 0));
    }

    #[test]
    fn immediate_load_covers_every_opcode() {
        for &op in IMMEDIATE_LOAD_OPCODES {
            assert!(IMMEDIATE_LOAD.matches_at(&[op, 0x10, 0xE1], 0), "op {op:02x}");
        }
        assert!(!IMMEDIATE_LOAD.matches_at(&[0x31, 0x10, 0xE1], 0));
    }

    #[test]
    fn mapper_select_banks() {
        for hi in [0x60, 0x80, 0xA0] {
            assert!(MAPPER_SELECT.matches_at(&[0x32, 0x00, hi], 0));
        }
        assert!(!MAPPER_SELECT.matches_at(&[0x32, 0x00, 0x50], 0));
        assert!(!MAPPER_SELECT.matches_at(&[0x32, 0x00, 0x70], 0));
    }

    #[test]
    fn truncated_window_never_matches() {
        assert!(!CALL_REDIRECT.matches_at(&[0xCD, 0x93], 0));
        assert!(!CALL_REDIRECT.matches_at(&[0xCD, 0x93, 0x00], 1));
    }
}
