//! Walks the opcode grids of a saved pastraiser page.
//!
//! The page holds one `<table>` per opcode space: a header row of column
//! labels above 16 opcode rows, each of which starts with a row label cell
//! followed by 16 slot cells. A slot cell for a real instruction carries the
//! mnemonic text plus annotation markup (byte length, cycle count, flag
//! effects, separated by `<br>`); an illegal or unused opcode is a cell with
//! at most a placeholder text node. Only the mnemonic text is extracted here,
//! the annotations just mark the slot as defined.

// Grid reference: http://www.pastraiser.com/cpu/gameboy/gameboy_opcodes.html

use log::{debug, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::defs::{MnemonicMap, OpcodeSpace, OpcodeTables, GRID_DIM};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Errors produced while locating or walking the opcode grids.
///
/// All of these are fatal: a wrong mnemonic table is worse than no table, so
/// nothing is emitted once the document turns out to be misshapen.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ExtractError {
    /// The document held fewer than the two opcode tables.
    #[error("expected 2 opcode tables in the document, found {0}")]
    MissingTables(usize),
    /// A table did not resolve to a header row plus 16 opcode rows.
    #[error("{space} table: expected 17 rows including the column header, found {found}")]
    RowCount {
        /// Space of the offending table.
        space: OpcodeSpace,
        /// Rows actually present.
        found: usize,
    },
    /// An opcode row did not resolve to a label cell plus 16 slot cells.
    #[error("{space} table, row {row}: expected 17 cells including the row label, found {found}")]
    CellCount {
        /// Space of the offending table.
        space: OpcodeSpace,
        /// Zero-based opcode row within the grid.
        row: usize,
        /// Cells actually present, label included.
        found: usize,
    },
}

/// Extracts both mnemonic maps from a parsed page.
///
/// The first table in document order describes the primary opcode space and
/// the second the CB-prefixed space. Any further tables (the page closes with
/// a color legend) are ignored.
pub fn extract_document(doc: &Html) -> Result<OpcodeTables, ExtractError> {
    let tables: Vec<ElementRef> = doc.select(&TABLE).collect();
    debug!("document holds {} tables", tables.len());
    if tables.len() < 2 {
        return Err(ExtractError::MissingTables(tables.len()));
    }

    Ok(OpcodeTables {
        primary: extract_table(tables[0], OpcodeSpace::Primary)?,
        prefixed: extract_table(tables[1], OpcodeSpace::Prefixed)?,
    })
}

/// Extracts the mnemonic map of a single opcode grid.
///
/// The grid must hold exactly 16 opcode rows of exactly 16 slot cells beyond
/// the labels; anything else fails with a diagnostic naming the offending
/// table and row. The header row and the label cells are dropped without
/// inspection. An opcode's value is its grid position alone, so undefined
/// slots leave a gap in the map rather than shifting later entries.
pub fn extract_table(
    table: ElementRef<'_>,
    space: OpcodeSpace,
) -> Result<MnemonicMap, ExtractError> {
    let rows: Vec<ElementRef> = table.select(&TR).collect();
    if rows.len() != GRID_DIM + 1 {
        return Err(ExtractError::RowCount {
            space,
            found: rows.len(),
        });
    }

    let mut mnemonics = MnemonicMap::new();
    // rows[0] is the column header (x0..xF).
    for (row, tr) in rows[1..].iter().enumerate() {
        let cells: Vec<ElementRef> = tr.select(&TD).collect();
        if cells.len() != GRID_DIM + 1 {
            return Err(ExtractError::CellCount {
                space,
                row,
                found: cells.len(),
            });
        }

        // cells[0] is the row label (0x..Fx).
        for (col, &cell) in cells[1..].iter().enumerate() {
            if !is_defined_slot(cell) {
                continue;
            }
            let opcode = opcode_index(row, col);
            match first_text(cell) {
                Some(mnemonic) => {
                    mnemonics.insert(opcode, mnemonic);
                }
                None => warn!(
                    "{space} table: slot {opcode:#04x} leads with a non-text node, \
                     treating it as undefined"
                ),
            }
        }
    }

    debug!("{space} table: {} of 256 slots defined", mnemonics.len());
    Ok(mnemonics)
}

/// Whether a slot cell describes a real instruction.
///
/// A defined slot holds the mnemonic text plus at least one annotation node,
/// so it has more than one child content node. Empty cells and cells holding
/// a lone placeholder text node are undefined. The rule cannot tell an
/// intentionally illegal opcode from broken markup; both stay out of the map.
pub fn is_defined_slot(cell: ElementRef<'_>) -> bool {
    cell.children().count() > 1
}

/// Opcode described by the slot at a grid position.
///
/// Grids are row-major: `row * 16 + col`, with both indices counted from the
/// top-left slot after the labels. Independent of how many slots before this
/// one were defined.
pub fn opcode_index(row: usize, col: usize) -> u8 {
    debug_assert!(row < GRID_DIM && col < GRID_DIM);
    (row * GRID_DIM + col) as u8
}

/// The verbatim text of the cell's first content node, if it is a text node.
///
/// No trimming or other normalization; the generator quotes whatever the page
/// says. Character references are already decoded by the document parser.
fn first_text(cell: ElementRef<'_>) -> Option<String> {
    cell.children()
        .next()
        .and_then(|node| node.value().as_text())
        .map(|text| text.to_string())
}
