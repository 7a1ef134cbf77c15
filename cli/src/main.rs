use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sweeper_core::{
    Board, BoardGenerator, CellCount, Coord, Coord2, GameConfig, RandomBoardGenerator,
    RevealOutcome,
};

mod view;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random board and print it in loader format
    Generate {
        #[command(flatten)]
        size: SizeArgs,

        /// Number of mines to place
        #[arg(short, long)]
        mines: CellCount,

        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Read a board from stdin, apply moves and print the result
    Play {
        #[command(flatten)]
        size: SizeArgs,

        /// Print only the grid, without the status lines
        #[arg(long)]
        board_only: bool,

        /// Moves to apply in order, `ROW,COL` reveals and `f:ROW,COL` toggles a flag
        #[arg(value_parser = parse_move)]
        moves: Vec<Move>,
    },
}

#[derive(Args, Debug)]
struct SizeArgs {
    #[arg(short, long)]
    rows: Coord,

    #[arg(short, long)]
    cols: Coord,
}

impl SizeArgs {
    fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

fn parse_coords(text: &str) -> Result<Coord2, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {text:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<Coord>()
            .map_err(|err| format!("invalid coordinate {part:?}: {err}"))
    };
    Ok((parse(row)?, parse(col)?))
}

fn parse_move(text: &str) -> Result<Move, String> {
    match text.strip_prefix("f:") {
        Some(coords) => parse_coords(coords).map(Move::Flag),
        None => parse_coords(text).map(Move::Reveal),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Status {
    InProgress,
    Won,
    Lost,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

/// Applies moves until the board is won or a mine is hit. Rejected moves are
/// logged and skipped.
fn apply_moves(board: &mut Board, moves: &[Move]) -> Status {
    for &next in moves {
        let result = match next {
            Move::Reveal(coords) => board.reveal_cell(coords).map(Some),
            Move::Flag(coords) => board.flag_cell(coords).map(|left| {
                log::info!("{} mines left", left);
                None
            }),
        };

        match result {
            Ok(Some(RevealOutcome::HitMine)) => return Status::Lost,
            Ok(Some(RevealOutcome::Won)) => return Status::Won,
            Ok(_) => {}
            Err(err) => log::warn!("Skipping {:?}: {}", next, err),
        }
    }

    if board.is_lost() {
        Status::Lost
    } else if board.is_solved() {
        Status::Won
    } else {
        Status::InProgress
    }
}

fn generate(size: Coord2, mines: CellCount, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);

    let config = GameConfig::new(size, mines).context("invalid board parameters")?;
    let board = RandomBoardGenerator::new(seed)
        .generate(config)
        .context("could not generate board")?;
    print!("{}", board);
    Ok(())
}

fn play(size: Coord2, board_only: bool, moves: &[Move]) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("could not read board from stdin")?;

    let mut board = Board::load_str(size, &input).context("could not load board")?;
    log::debug!("Loaded board with {} mines", board.mine_count());

    let status = apply_moves(&mut board, moves);
    print!("{}", view::render(&board));
    if !board_only {
        println!("{}", status.label());
        println!("mines left: {}", board.mines_left());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Command::Generate { size, mines, seed } => generate(size.size(), mines, seed),
        Command::Play {
            size,
            board_only,
            moves,
        } => play(size.size(), board_only, &moves),
    }
}
