use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds, independent of what the player has seen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    /// Revealed digit given by the loader, checked against the real count.
    Number(u8),
    Blank,
}

/// Presentation code handed to display layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Mine,
    Blank,
    Number(u8),
    Flag,
    Hidden,
}

impl Glyph {
    pub const fn as_char(self) -> char {
        match self {
            Self::Mine => 'M',
            Self::Blank => ' ',
            Self::Number(count) => (b'0' + count) as char,
            Self::Flag => 'F',
            Self::Hidden => 'X',
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn is_mine_hit(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    revealed: bool,
    flagged: bool,
    neighbor_mines: u8,
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            revealed: false,
            flagged: false,
            neighbor_mines: 0,
        }
    }

    pub const fn mine() -> Self {
        Self::new(CellKind::Mine)
    }

    pub const fn blank() -> Self {
        Self::new(CellKind::Blank)
    }

    /// Parses one character of the board vocabulary, ignoring case.
    pub const fn from_code(code: char) -> Result<Self> {
        let (kind, revealed, flagged) = match code.to_ascii_uppercase() {
            'M' => (CellKind::Mine, false, false),
            'F' => (CellKind::Mine, false, true),
            'X' => (CellKind::Blank, false, false),
            'W' => (CellKind::Blank, false, true),
            '.' => (CellKind::Blank, true, false),
            digit @ '0'..='8' => (CellKind::Number(digit as u8 - b'0'), true, false),
            _ => return Err(GameError::InvalidCellCode(code)),
        };
        Ok(Self {
            kind,
            revealed,
            flagged,
            neighbor_mines: 0,
        })
    }

    /// Inverse of [`Cell::from_code`].
    ///
    /// Revealed digits given at load time are written back as given, other
    /// revealed cells use the derived count. Revealed mines lose their
    /// revealed state.
    pub const fn code(self) -> char {
        match (self.kind, self.revealed, self.flagged) {
            (CellKind::Mine, _, true) => 'F',
            (CellKind::Mine, _, false) => 'M',
            (CellKind::Number(digit), true, _) => (b'0' + digit) as char,
            (_, true, _) if self.neighbor_mines == 0 => '.',
            (_, true, _) => (b'0' + self.neighbor_mines) as char,
            (_, false, true) => 'W',
            (_, false, false) => 'X',
        }
    }

    pub const fn kind(self) -> CellKind {
        self.kind
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn neighbor_mines(self) -> u8 {
        self.neighbor_mines
    }

    /// Number shown once revealed, mines always count as zero.
    pub const fn number(self) -> u8 {
        if self.is_mine() {
            0
        } else {
            self.neighbor_mines
        }
    }

    pub const fn glyph(self) -> Glyph {
        if self.revealed {
            match (self.is_mine(), self.neighbor_mines) {
                (true, _) => Glyph::Mine,
                (false, 0) => Glyph::Blank,
                (false, count) => Glyph::Number(count),
            }
        } else if self.flagged {
            Glyph::Flag
        } else {
            Glyph::Hidden
        }
    }

    /// Reveals this cell alone, refusing revealed or flagged cells.
    pub fn reveal(&mut self) -> Result<RevealOutcome> {
        if self.revealed {
            return Err(GameError::AlreadyRevealed);
        }
        if self.flagged {
            return Err(GameError::Flagged);
        }

        self.revealed = true;
        Ok(if self.is_mine() {
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Reveals regardless of a flag, used by cascades.
    pub(crate) fn force_reveal(&mut self) {
        self.flagged = false;
        self.revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) -> Result<bool> {
        if self.revealed {
            return Err(GameError::AlreadyRevealed);
        }
        self.flagged = !self.flagged;
        Ok(self.flagged)
    }

    pub(crate) fn set_neighbor_mines(&mut self, count: u8) {
        self.neighbor_mines = count;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl TryFrom<char> for Cell {
    type Error = GameError;

    fn try_from(code: char) -> Result<Self> {
        Self::from_code(code)
    }
}
