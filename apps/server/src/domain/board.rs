use rand::seq::IndexedRandom;

use crate::domain::PlayerId;

/// Forward-only cell lifecycle: Hidden → Locked → Revealed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CellState {
    Hidden,
    Locked,
    Revealed,
}

#[derive(Debug, Clone)]
struct Cell {
    payout: i32,
    state: CellState,
    owner: Option<PlayerId>,
}

/// Payout pool sampled per cell: ~30% bombs, positive tiers otherwise.
const PAYOUT_POOL: [i32; 10] = [-1, -1, -1, 1, 1, 1, 1, 2, 2, 3];

impl Cell {
    fn new() -> Self {
        let payout = PAYOUT_POOL.choose(&mut rand::rng()).copied().unwrap_or(1);
        Self {
            payout,
            state: CellState::Hidden,
            owner: None,
        }
    }
}

/// The shared grid. Callers serialize access through the room's exclusive
/// region; the board itself only enforces the per-cell state machine.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Cell>>,
    revealed: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        let cells = (0..size)
            .map(|_| (0..size).map(|_| Cell::new()).collect())
            .collect();
        Self {
            size,
            cells,
            revealed: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Claim a hidden cell for `player`. Exactly one claim per cell can ever
    /// succeed; anything else (already claimed, out of bounds) is `false`
    /// with no mutation.
    pub fn lock_cell(&mut self, row: usize, col: usize, player: PlayerId) -> bool {
        let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return false;
        };
        if cell.state != CellState::Hidden {
            return false;
        }
        cell.state = CellState::Locked;
        cell.owner = Some(player);
        true
    }

    /// Resolve a cell previously locked by `player`. Pays out exactly once;
    /// a stale, duplicate or mismatched reveal is `None` with no mutation.
    pub fn reveal_cell(&mut self, row: usize, col: usize, player: PlayerId) -> Option<i32> {
        let cell = self.cells.get_mut(row).and_then(|r| r.get_mut(col))?;
        if cell.state != CellState::Locked || cell.owner != Some(player) {
            return None;
        }
        cell.state = CellState::Revealed;
        self.revealed += 1;
        Some(cell.payout)
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.size * self.size
    }

    /// Full payout matrix, disclosed to every client during the preview.
    pub fn layout(&self) -> Vec<Vec<i32>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.payout).collect())
            .collect()
    }
}
