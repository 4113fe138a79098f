//! Renders mnemonic maps as Go source.
//!
//! The output is the body of the emulator's generated `cpu/mnemonics.go`:
//! the package clause and provenance comment, then one `map[byte]string`
//! literal per opcode space. The byte stream is fully determined by the
//! extracted maps, so regenerating from the same page is diff-free.

use crate::defs::{MnemonicMap, OpcodeSpace, OpcodeTables};

/// Header of the generated file: package clause plus the provenance comment
/// naming where the grids were scraped from.
pub const HEADER: &str = "\
package cpu

// Generated from: http://www.pastraiser.com/cpu/gameboy/gameboy_opcodes.html";

/// Renders the complete generated file.
///
/// Header first, then the primary map as `mnemonics` and the CB-prefixed map
/// as `prefixMnemonics`, with a single blank line between the two
/// declarations.
pub fn generate_source(tables: &OpcodeTables) -> String {
    format!(
        "{HEADER}\n{}\n{}",
        generate_table(OpcodeSpace::Primary.var_name(), &tables.primary),
        generate_table(OpcodeSpace::Prefixed.var_name(), &tables.prefixed),
    )
}

/// Renders one mnemonic map as a Go `map[byte]string` declaration.
///
/// One entry line per opcode in ascending order, keyed by the two-digit
/// lowercase hex form of the byte. An empty map renders as an empty literal.
/// The returned text ends with a newline.
pub fn generate_table(name: &str, mnemonics: &MnemonicMap) -> String {
    let mut out = format!("var {name} = map[byte]string{{\n");
    for (opcode, mnemonic) in mnemonics {
        out.push_str(&format!("\t{opcode:#04x}: \"{}\",\n", escape(mnemonic)));
    }
    out.push_str("}\n");
    out
}

/// Escapes a mnemonic for use inside a double-quoted Go string literal.
///
/// Backslashes and quotes get their usual escapes, and so do line breaks,
/// which would otherwise split the literal across source lines. Pastraiser
/// mnemonics contain none of these, so for real input this is the identity.
fn escape(mnemonic: &str) -> String {
    let mut out = String::with_capacity(mnemonic.len());
    for c in mnemonic.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
