use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy placing mines uniformly at random, corners excluded.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, &mut rng)
    }
}

/// Places `config.mines` mines by rejection sampling with `rng`, redrawing
/// on corners and on cells that already hold a mine, then validates.
pub fn generate_board<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Board> {
    let config = config.validate()?;
    let (rows, cols) = config.size;

    let mut board = RawBoard::new(config.size);
    let mut mines_placed: CellCount = 0;
    let mut redraws: usize = 0;

    while mines_placed < config.mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));

        if is_corner(coords, config.size) || board.cell_at(coords).is_some_and(Cell::is_mine) {
            redraws += 1;
            continue;
        }

        board.set(coords, Cell::mine())?;
        mines_placed += 1;
    }

    log::debug!(
        "Placed {} mines on {}x{} board after {} redraws",
        mines_placed,
        rows,
        cols,
        redraws
    );
    board.postprocess()
}
