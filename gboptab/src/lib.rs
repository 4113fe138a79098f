//! Turns the pastraiser gameboy opcode matrix into Go mnemonic tables.
//!
//! The pastraiser page lays out each of the gameboy's two opcode spaces (the
//! primary space and the space behind the `0xCB` prefix byte) as a 16x16 HTML
//! grid, one cell per opcode. This library walks those grids and produces the
//! `map[byte]string` declarations the emulator's `cpu` package uses to name
//! instructions in debug output.
//!
//! The [`extractor`] module converts a parsed document into per-space
//! [`MnemonicMap`][defs::MnemonicMap]s. The [`generator`] module renders those
//! maps as deterministic Go source. Shared types live in [`defs`].

pub mod defs;
pub mod extractor;
pub mod generator;
