use std::fmt::{self, Write};

use sweeper_core::{Board, Glyph};

/// Renders the board as a grid with row and column indices.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    write_grid(&mut out, board).expect("writing to a String cannot fail");
    out
}

fn write_grid(out: &mut impl Write, board: &Board) -> fmt::Result {
    let (rows, cols) = board.size();

    let mut header = String::from("   ");
    for col in 0..cols {
        write!(header, "{:>3} ", col)?;
    }
    writeln!(out, "{}", header.trim_end())?;

    for row in 0..rows {
        write_separator(out, cols)?;
        write!(out, "{:>2} ", row)?;
        for col in 0..cols {
            write!(out, "|{}", cell_text(board[(row, col)].glyph()))?;
        }
        writeln!(out, "|")?;
    }
    write_separator(out, cols)
}

fn write_separator(out: &mut impl Write, cols: u8) -> fmt::Result {
    write!(out, "   ")?;
    for _ in 0..cols {
        write!(out, "+---")?;
    }
    writeln!(out, "+")
}

fn cell_text(glyph: Glyph) -> String {
    match glyph {
        Glyph::Flag => "_F_".to_string(),
        Glyph::Hidden => "XXX".to_string(),
        other => format!(" {} ", other.as_char()),
    }
}
