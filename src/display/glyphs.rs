//! Block letters for flash-card mode.
//!
//! Each glyph is five rows of five cells, `#` for ink. [`render`] draws a
//! cell two characters wide so the letter looks square in a terminal.

pub const ROWS: usize = 5;
pub const COLUMNS: usize = 5;

type Glyph = [&'static str; ROWS];

/// The bitmap for `ch`, or `None` for characters that are never sent.
pub fn glyph(ch: char) -> Option<Glyph> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["#####", "  #  ", "  #  ", "  #  ", "#####"],
        'J' => ["#####", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '0' => [" ### ", "#  ##", "# # #", "##  #", " ### "],
        '1' => ["  #  ", " ##  ", "  #  ", "  #  ", " ### "],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => ["#### ", "    #", " ### ", "    #", "#### "],
        '4' => ["#   #", "#   #", "#####", "    #", "    #"],
        '5' => ["#####", "#    ", "#### ", "    #", "#### "],
        '6' => [" ### ", "#    ", "#### ", "#   #", " ### "],
        '7' => ["#####", "    #", "   # ", "  #  ", "  #  "],
        '8' => [" ### ", "#   #", " ### ", "#   #", " ### "],
        '9' => [" ### ", "#   #", " ####", "    #", " ### "],
        '.' => ["     ", "     ", "     ", "     ", "  #  "],
        ',' => ["     ", "     ", "     ", "  #  ", " #   "],
        '?' => [" ### ", "#   #", "  ## ", "     ", "  #  "],
        '/' => ["    #", "   # ", "  #  ", " #   ", "#    "],
        _ => return None,
    };
    Some(rows)
}

/// Draw `ch` as five lines of block characters, trailing blanks trimmed.
pub fn render(ch: char) -> Option<String> {
    let rows = glyph(ch)?;
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let wide: String = row.chars().map(|c| if c == '#' { "██" } else { "  " }).collect();
            wide.trim_end().to_string()
        })
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::ALPHABET;

    #[test]
    fn test_every_sendable_character_has_a_glyph() {
        for ch in ALPHABET.chars() {
            let rows = glyph(ch).unwrap_or_else(|| panic!("no glyph for {:?}", ch));
            for row in rows {
                assert_eq!(row.chars().count(), COLUMNS, "{:?} row {:?}", ch, row);
                assert!(row.chars().all(|c| c == '#' || c == ' '), "{:?} row {:?}", ch, row);
            }
            assert!(rows.iter().any(|row| row.contains('#')), "{:?} is blank", ch);
        }
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let all: Vec<_> = ALPHABET.chars().filter_map(glyph).collect();
        for (i, a) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_lowercase_and_unknown() {
        assert_eq!(glyph('k'), glyph('K'));
        assert_eq!(glyph('#'), None);
        assert_eq!(render(' '), None);
    }

    #[test]
    fn test_render_doubles_cells() {
        assert_eq!(render('T').unwrap(), "██████████\n    ██\n    ██\n    ██\n    ██");
        assert_eq!(render('.').unwrap(), "\n\n\n\n    ██");
    }
}
