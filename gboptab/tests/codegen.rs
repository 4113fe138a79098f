//! End-to-end runs over synthetic pages: parse, extract both spaces, render.

use std::collections::BTreeMap;

use scraper::Html;

use gboptab::defs::GRID_DIM;
use gboptab::extractor::extract_document;
use gboptab::generator::generate_source;

/// Builds one pastraiser-style grid with the given slots defined.
///
/// Markup mimics the real page: header row of column labels, row label cells,
/// bgcolor attributes, `&nbsp;` placeholders in unused slots and `<br>`
/// separated length/cycle/flag annotations in defined ones.
fn grid(defined: &[(usize, usize, &str)]) -> String {
    let mut html = String::from("<table align=\"center\" border=\"1\"><tr><td>&nbsp;</td>");
    for col in 0..GRID_DIM {
        html.push_str(&format!("<td bgcolor=\"#9494ff\">x{col:X}</td>"));
    }
    html.push_str("</tr>");
    for row in 0..GRID_DIM {
        html.push_str(&format!("<tr><td bgcolor=\"#9494ff\">{row:X}x</td>"));
        for col in 0..GRID_DIM {
            match defined.iter().find(|(r, c, _)| (*r, *c) == (row, col)) {
                Some((_, _, mnemonic)) => html.push_str(&format!(
                    "<td bgcolor=\"#ccccff\">{mnemonic}<br>1&nbsp;&nbsp;4<br>Z N H C</td>"
                )),
                None => html.push_str("<td>&nbsp;</td>"),
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Wraps grids in a page shaped like the saved document.
fn page(grids: &[&str]) -> Html {
    let mut html = String::from(
        "<html><head><title>Gameboy CPU (LR35902) instruction set</title></head><body>",
    );
    for grid in grids {
        html.push_str(grid);
        html.push_str("<br>");
    }
    html.push_str("</body></html>");
    Html::parse_document(&html)
}

fn every_slot(mnemonic: &str) -> Vec<(usize, usize, &str)> {
    (0..GRID_DIM)
        .flat_map(|row| (0..GRID_DIM).map(move |col| (row, col, mnemonic)))
        .collect()
}

#[test]
fn corner_slots_round_trip() {
    let primary = grid(&[(0, 0, "NOP"), (15, 15, "RST 38H")]);
    let prefixed = grid(&[]);
    let doc = page(&[&primary, &prefixed]);

    let tables = extract_document(&doc).unwrap();
    assert_eq!(
        tables.primary,
        BTreeMap::from([(0x00u8, "NOP".to_string()), (0xffu8, "RST 38H".to_string())])
    );
    assert!(tables.prefixed.is_empty());

    let source = generate_source(&tables);
    let entries: Vec<&str> = source
        .lines()
        .filter(|line| line.starts_with('\t'))
        .collect();
    assert_eq!(entries, ["\t0x00: \"NOP\",", "\t0xff: \"RST 38H\","]);
}

#[test]
fn fully_defined_primary_with_empty_prefixed() {
    let all = every_slot("X");
    let primary = grid(&all);
    let prefixed = grid(&[]);
    let doc = page(&[&primary, &prefixed]);

    let tables = extract_document(&doc).unwrap();
    let keys: Vec<u8> = tables.primary.keys().copied().collect();
    assert_eq!(keys, (0u8..=0xff).collect::<Vec<u8>>());

    let source = generate_source(&tables);
    let entry_count = source.lines().filter(|line| line.starts_with('\t')).count();
    assert_eq!(entry_count, 256);
    // The prefixed block is empty and sits exactly one blank line below the
    // primary block.
    assert!(source.ends_with("}\n\nvar prefixMnemonics = map[byte]string{\n}\n"));
    assert!(!source.contains("\n\n\n"));
}

#[test]
fn fully_undefined_grids_extract_nothing() {
    let empty = grid(&[]);
    let doc = page(&[&empty, &empty]);

    let tables = extract_document(&doc).unwrap();
    assert!(tables.primary.is_empty());
    assert!(tables.prefixed.is_empty());
}

#[test]
fn spaces_are_independent_namespaces() {
    let primary = grid(&[(0, 0, "NOP"), (7, 6, "HALT")]);
    let prefixed = grid(&[(0, 0, "RLC B"), (7, 6, "BIT 6,(HL)")]);
    let doc = page(&[&primary, &prefixed]);

    let tables = extract_document(&doc).unwrap();
    assert_eq!(tables.primary[&0x00], "NOP");
    assert_eq!(tables.primary[&0x76], "HALT");
    assert_eq!(tables.prefixed[&0x00], "RLC B");
    assert_eq!(tables.prefixed[&0x76], "BIT 6,(HL)");
}

#[test]
fn regeneration_is_byte_identical() {
    let primary = grid(&[(0, 0, "NOP"), (0, 1, "LD BC,d16"), (12, 3, "JP a16")]);
    let prefixed = grid(&[(3, 8, "SRL B")]);
    let html_one = page(&[&primary, &prefixed]);
    let html_two = page(&[&primary, &prefixed]);

    let first = generate_source(&extract_document(&html_one).unwrap());
    let second = generate_source(&extract_document(&html_two).unwrap());
    assert_eq!(first, second);
}

#[test]
fn generated_file_matches_expected_bytes() {
    let primary = grid(&[(0, 0, "NOP"), (0, 1, "LD BC,d16")]);
    let prefixed = grid(&[(0, 0, "RLC B")]);
    // The page closes with a color-legend table the extractor must ignore.
    let legend = "<table><tr><td>Misc/control instructions</td></tr></table>";
    let doc = page(&[&primary, &prefixed, legend]);

    let source = generate_source(&extract_document(&doc).unwrap());
    assert_eq!(
        source,
        "package cpu\n\
         \n\
         // Generated from: http://www.pastraiser.com/cpu/gameboy/gameboy_opcodes.html\n\
         var mnemonics = map[byte]string{\n\
         \t0x00: \"NOP\",\n\
         \t0x01: \"LD BC,d16\",\n\
         }\n\
         \n\
         var prefixMnemonics = map[byte]string{\n\
         \t0x00: \"RLC B\",\n\
         }\n"
    );
}

#[test]
fn multiline_cell_text_stays_on_one_entry_line() {
    // A line break inside the mnemonic text survives extraction verbatim but
    // must not split the emitted entry.
    let primary = grid(&[(0, 0, "NOP\nX")]);
    let prefixed = grid(&[]);
    let doc = page(&[&primary, &prefixed]);

    let tables = extract_document(&doc).unwrap();
    assert_eq!(tables.primary[&0x00], "NOP\nX");

    let source = generate_source(&tables);
    let entries: Vec<&str> = source
        .lines()
        .filter(|line| line.starts_with('\t'))
        .collect();
    assert_eq!(entries, ["\t0x00: \"NOP\\nX\","]);
}
