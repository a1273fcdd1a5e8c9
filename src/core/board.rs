//! The 8x8 board and its cascade physics.
//!
//! `Board` is a `Copy` value: every operation returns a new board and the
//! receiver is never modified, so simulated branches can hold their own
//! snapshot without sharing.
//!
//! ## One execution pass
//!
//! ```text
//! swap -> (spell changes) -> match -> (spell destructions) -> destroy -> fall -> (fill)
//! ```
//!
//! Chain reactions are not part of a pass. Callers repeat
//! [`Board::execute_once`] without a swap until nothing is destroyed.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::position::{Position, SwapPair};
use super::rng::SimRng;
use super::tile::Tile;
use crate::error::{Result, SimError};

/// Width and height of the board.
pub const SIZE: usize = 8;

/// Positions forming one matched line. A line never exceeds the board width.
pub type PositionGroup = SmallVec<[Position; SIZE]>;

/// Tiles removed together by one group.
pub type TileGroup = SmallVec<[Tile; SIZE]>;

/// A direct board manipulation applied in place of, or alongside, a swap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Tiles overwritten before matching.
    pub changes: Vec<(Position, Tile)>,
    /// Positions destroyed outright, each as its own group.
    pub destructions: Vec<Position>,
}

impl Spell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `position` with `tile`.
    #[must_use]
    pub fn change(mut self, position: impl Into<Position>, tile: Tile) -> Self {
        self.changes.push((position.into(), tile));
        self
    }

    /// Destroy whatever is at `position`.
    #[must_use]
    pub fn destroy(mut self, position: impl Into<Position>) -> Self {
        self.destructions.push(position.into());
        self
    }

    fn validate(&self) -> Result<()> {
        let positions = self.changes.iter().map(|(p, _)| p).chain(&self.destructions);
        for p in positions {
            Position::checked(p.row, p.col)?;
        }
        Ok(())
    }
}

/// Fixed 8x8 grid of tiles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Tile; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board of blanks.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[Tile::Blank; SIZE]; SIZE],
        }
    }

    /// Build a board from rows, top row first.
    #[must_use]
    pub const fn from_rows(cells: [[Tile; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// A full random board with no pending matches.
    pub fn random_start(rng: &mut SimRng) -> Self {
        let mut board = Self::empty().random_fill(rng);
        loop {
            let (next, destroyed) = board.resolve(None, None, Some(&mut *rng));
            if destroyed.is_empty() {
                return board;
            }
            board = next;
        }
    }

    /// Rows of tiles, top row first.
    #[must_use]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.cells
    }

    /// Tile at `position`, `None` outside the board.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
    }

    /// Tile at `(row, col)`, failing outside the board.
    pub fn try_get(&self, row: usize, col: usize) -> Result<Tile> {
        self.get(Position::new(row, col))
            .ok_or(SimError::OutOfBounds { row, col })
    }

    /// Every position with its tile, row-major.
    pub fn positions_with_tile(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        Position::all().map(move |p| (p, self[p]))
    }

    /// Number of non-blank cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|t| !t.is_blank()).count()
    }

    /// Whether every cell is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|t| t.is_blank())
    }

    /// Exchange two orthogonally adjacent tiles.
    pub fn swap(&self, pair: SwapPair) -> Result<Self> {
        let pair = pair.validate()?;
        Ok(self.swapped(pair))
    }

    fn swapped(&self, pair: SwapPair) -> Self {
        let mut board = *self;
        board[pair.first] = self[pair.second];
        board[pair.second] = self[pair.first];
        board
    }

    /// Overwrite each listed position with its tile.
    pub fn change(&self, changes: &[(Position, Tile)]) -> Result<Self> {
        let mut board = *self;
        for &(position, tile) in changes {
            let position = Position::checked(position.row, position.col)?;
            board[position] = tile;
        }
        Ok(board)
    }

    /// Every run of three or more matching tiles, rows first then columns.
    ///
    /// A run's type is its first non-wildcard tile. Wildcards may extend a
    /// run on either side, but a run made only of wildcards is dropped.
    /// A cell on both a row run and a column run appears in both groups.
    #[must_use]
    pub fn find_matches(&self) -> Vec<PositionGroup> {
        let mut groups = Vec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (start, end) in line_runs(line) {
                groups.push((start..end).map(|col| Position::new(row, col)).collect());
            }
        }
        for (col, line) in self.transpose().cells.iter().enumerate() {
            for (start, end) in line_runs(line) {
                groups.push((start..end).map(|row| Position::new(row, col)).collect());
            }
        }
        groups
    }

    /// Clear every tile named by `groups`, detonating skullbombs.
    ///
    /// Each group reports its non-blank tiles, so a cell shared by two
    /// groups is reported twice but cleared once. A destroyed skullbomb adds
    /// every still-standing tile of its 3x3 block as a one-tile group, which
    /// in turn may be another skullbomb. Positions outside the board are
    /// ignored.
    #[must_use]
    pub fn destroy(&self, groups: &[PositionGroup]) -> (Self, Vec<TileGroup>) {
        let mut claimed = [[false; SIZE]; SIZE];
        let mut destroyed = Vec::with_capacity(groups.len());
        let mut bombs = Vec::new();

        for group in groups {
            let mut tiles = TileGroup::new();
            for &position in group {
                let Some(tile) = self.get(position) else {
                    continue;
                };
                if tile.is_blank() {
                    continue;
                }
                tiles.push(tile);
                let seen = &mut claimed[position.row][position.col];
                if !*seen {
                    *seen = true;
                    if tile.is_skullbomb() {
                        bombs.push(position);
                    }
                }
            }
            if !tiles.is_empty() {
                destroyed.push(tiles);
            }
        }

        while !bombs.is_empty() {
            let mut next = Vec::new();
            for bomb in bombs {
                for position in bomb.surrounding() {
                    let tile = self[position];
                    let seen = &mut claimed[position.row][position.col];
                    if tile.is_blank() || *seen {
                        continue;
                    }
                    *seen = true;
                    destroyed.push(smallvec![tile]);
                    if tile.is_skullbomb() {
                        next.push(position);
                    }
                }
            }
            bombs = next;
        }

        let mut board = *self;
        for position in Position::all() {
            if claimed[position.row][position.col] {
                board[position] = Tile::Blank;
            }
        }
        (board, destroyed)
    }

    /// Drop tiles to the bottom of each column, keeping their order.
    #[must_use]
    pub fn fall(&self) -> Self {
        let mut board = Self::empty();
        for col in 0..SIZE {
            let mut landing = SIZE;
            for row in (0..SIZE).rev() {
                let tile = self.cells[row][col];
                if !tile.is_blank() {
                    landing -= 1;
                    board.cells[landing][col] = tile;
                }
            }
        }
        board
    }

    /// Replace every blank with a random refill tile.
    #[must_use]
    pub fn random_fill(&self, rng: &mut SimRng) -> Self {
        let mut board = *self;
        for tile in board.cells.iter_mut().flatten() {
            if tile.is_blank() {
                *tile = Tile::random(rng);
            }
        }
        board
    }

    /// One pass of swap, match, destroy, fall and optional refill.
    ///
    /// Passing `fill` refills blanks from that generator. Chain reactions
    /// are left to the caller.
    pub fn execute_once(
        &self,
        swap: Option<SwapPair>,
        fill: Option<&mut SimRng>,
    ) -> Result<(Self, Vec<TileGroup>)> {
        let swap = swap.map(SwapPair::validate).transpose()?;
        Ok(self.resolve(swap, None, fill))
    }

    /// One pass driven by a spell instead of a swap.
    ///
    /// Spell destructions are reported after the matched groups.
    pub fn execute_spell(
        &self,
        spell: &Spell,
        fill: Option<&mut SimRng>,
    ) -> Result<(Self, Vec<TileGroup>)> {
        spell.validate()?;
        Ok(self.resolve(None, Some(spell), fill))
    }

    /// Execution pass for already validated inputs.
    pub(crate) fn resolve(
        &self,
        swap: Option<SwapPair>,
        spell: Option<&Spell>,
        fill: Option<&mut SimRng>,
    ) -> (Self, Vec<TileGroup>) {
        let mut board = match swap {
            Some(pair) => self.swapped(pair),
            None => *self,
        };
        if let Some(spell) = spell {
            for &(position, tile) in &spell.changes {
                board[position] = tile;
            }
        }
        let mut groups = board.find_matches();
        if let Some(spell) = spell {
            groups.extend(spell.destructions.iter().map(|&p| -> PositionGroup { smallvec![p] }));
        }
        let (board, destroyed) = board.destroy(&groups);
        let mut board = board.fall();
        if let Some(rng) = fill {
            board = board.random_fill(rng);
        }
        (board, destroyed)
    }

    /// Adjacent pairs worth simulating.
    ///
    /// Over-approximates the productive swaps. A pair is left out only when
    /// the tiles are identical, when they already match each other with no
    /// wildcard involved, or when neither tile would touch a matching tile
    /// at its new position.
    #[must_use]
    pub fn potential_swaps(&self) -> Vec<SwapPair> {
        let mut swaps = Vec::new();
        for first in Position::all() {
            let right = Position::new(first.row, first.col + 1);
            let down = Position::new(first.row + 1, first.col);
            for second in [right, down] {
                if !second.in_bounds() {
                    continue;
                }
                let (a, b) = (self[first], self[second]);
                if a == b {
                    continue;
                }
                if a.matches(b) && !a.is_wildcard() && !b.is_wildcard() {
                    continue;
                }
                if !self.lands_beside_match(b, first, second)
                    && !self.lands_beside_match(a, second, first)
                {
                    continue;
                }
                swaps.push(SwapPair { first, second });
            }
        }
        swaps
    }

    /// Whether `tile` moved to `at` would touch a tile it matches,
    /// ignoring the cell it came from.
    fn lands_beside_match(&self, tile: Tile, at: Position, from: Position) -> bool {
        at.neighbors()
            .filter(|&n| n != from)
            .any(|n| tile.matches(self[n]))
    }

    fn transpose(&self) -> Self {
        let mut board = Self::empty();
        for position in Position::all() {
            board[position.transposed()] = self[position];
        }
        board
    }
}

/// Matching runs within one line as half-open index ranges.
fn line_runs(line: &[Tile; SIZE]) -> SmallVec<[(usize, usize); 3]> {
    let mut runs = SmallVec::new();
    let mut start = 0;
    while start < SIZE {
        let first = line[start];
        if first.is_blank() {
            start += 1;
            continue;
        }
        let mut anchor = (!first.is_wildcard()).then_some(first);
        let mut end = start + 1;
        while end < SIZE {
            let tile = line[end];
            let extends = match anchor {
                Some(real) => real.matches(tile),
                None if tile.is_wildcard() => true,
                None if tile.is_color() => {
                    anchor = Some(tile);
                    true
                }
                None => false,
            };
            if !extends {
                break;
            }
            end += 1;
        }
        if end - start >= 3 && anchor.is_some() {
            runs.push((start, end));
        }
        // Trailing wildcards may also open the next run.
        let mut restart = end;
        while restart > start + 1 && line[restart - 1].is_wildcard() {
            restart -= 1;
        }
        start = if restart < end { restart } else { end };
    }
    runs
}

impl Index<Position> for Board {
    type Output = Tile;

    /// # Panics
    ///
    /// Panics if `position` is outside the board.
    fn index(&self, position: Position) -> &Tile {
        &self.cells[position.row][position.col]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, position: Position) -> &mut Tile {
        &mut self.cells[position.row][position.col]
    }
}

impl FromStr for Board {
    type Err = SimError;

    /// Parse 8 lines of 8 type codes. Indentation and blank lines are ignored.
    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != SIZE {
            return Err(SimError::BoardShape { rows: lines.len() });
        }
        let mut board = Self::empty();
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != SIZE {
                return Err(SimError::RowLength { row, len });
            }
            for (col, code) in line.chars().enumerate() {
                board.cells[row][col] = Tile::from_char(code)?;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{tile}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect();
        f.debug_tuple("Board").field(&rows).finish()
    }
}
