//! Types shared by the [`extractor`][crate::extractor] and the
//! [`generator`][crate::generator].

use std::collections::BTreeMap;
use std::fmt;

/// Rows in one opcode grid, which is also the number of opcode columns per
/// row. Every grid describes exactly `GRID_DIM * GRID_DIM = 256` slots.
pub const GRID_DIM: usize = 16;

/// Which of the gameboy's two opcode spaces a grid describes.
///
/// Each space is an independent namespace of 256 single-byte opcodes. The
/// prefixed space is reached through the `0xCB` escape byte in the primary
/// space.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OpcodeSpace {
    /// The unprefixed opcode space. First grid on the page.
    Primary,
    /// The opcode space behind the `0xCB` prefix. Second grid on the page.
    Prefixed,
}

impl OpcodeSpace {
    /// Name of the Go variable this space's mnemonic map is emitted under.
    ///
    /// These identifiers are fixed: the emulator's `cpu` package refers to
    /// them by name.
    pub fn var_name(self) -> &'static str {
        match self {
            OpcodeSpace::Primary => "mnemonics",
            OpcodeSpace::Prefixed => "prefixMnemonics",
        }
    }
}

impl fmt::Display for OpcodeSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpcodeSpace::Primary => f.write_str("primary"),
            OpcodeSpace::Prefixed => f.write_str("CB-prefixed"),
        }
    }
}

/// Mnemonics keyed by opcode.
///
/// Only defined slots have entries, so the map is usually partial. `BTreeMap`
/// iterates keys in ascending order, which is the order the generator relies
/// on.
pub type MnemonicMap = BTreeMap<u8, String>;

/// The pair of mnemonic maps extracted from one saved page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OpcodeTables {
    /// Mnemonics of the primary opcode space.
    pub primary: MnemonicMap,
    /// Mnemonics of the CB-prefixed opcode space.
    pub prefixed: MnemonicMap,
}
