use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use chess_engine::{Color, GameState, Move, Square};
use clap::{Parser, Subcommand, ValueEnum};
use pigeon_chess::game::local::format_move_list;
use pigeon_chess::{GameMode, LocalGame, SimpleAi};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pigeon-chess", version, about = "Two-player chess in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Two humans sharing one terminal
    Play,
    /// Play against the built-in AI
    Versus {
        /// Color you play
        #[arg(long, value_enum, default_value_t = Side::White)]
        color: Side,
        /// Seed for the AI's tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the AI play both sides and print the game
    Selfplay {
        #[arg(long, default_value_t = 300)]
        max_plies: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replay long algebraic moves (`e2e4 e7e5 ...`) and print the result
    Replay {
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn ai_from_seed(seed: Option<u64>) -> SimpleAi {
    seed.map_or_else(SimpleAi::new, SimpleAi::seeded)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play => interactive(LocalGame::new(GameMode::VsHuman, SimpleAi::new())),
        Command::Versus { color, seed } => {
            let human: Color = color.into();
            let mode = GameMode::VsAi {
                ai_color: human.opposite(),
            };
            interactive(LocalGame::new(mode, ai_from_seed(seed)))
        }
        Command::Selfplay { max_plies, seed } => selfplay(max_plies, seed),
        Command::Replay { moves } => replay(&moves),
    }
}

fn interactive(mut game: LocalGame) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        while let Some(played) = game.ai_turn()? {
            println!("{} plays {}", played.color, played.san);
        }

        println!("\n{}\n", game.state().board());
        if let Some(outcome) = game.outcome() {
            println!("{}", outcome.message());
            println!("{}", game.move_list());
            return Ok(());
        }
        if game.state().is_check() {
            println!("{} is in check", game.turn());
        }

        print!("{} to move (e2e4, 'hints e2', 'quit'): ", game.turn());
        io::stdout().flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read stdin")?;
        let input = line.trim();

        if input == "quit" {
            return Ok(());
        }
        if let Some(square) = input.strip_prefix("hints ") {
            match square.trim().parse::<Square>() {
                Ok(from) => {
                    let targets: Vec<String> = game
                        .state()
                        .legal_moves(from)
                        .iter()
                        .map(Square::to_string)
                        .collect();
                    println!("{}: {}", from, targets.join(" "));
                }
                Err(e) => println!("{e}"),
            }
            continue;
        }

        match game.submit_text(input) {
            Ok(played) => println!("{} plays {}", played.color, played.san),
            Err(e) => println!("{e}"),
        }
    }
}

fn selfplay(max_plies: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let mut game = LocalGame::new(GameMode::SelfPlay, ai_from_seed(seed));
    while game.state().ply() < max_plies {
        if game.ai_turn()?.is_none() {
            break;
        }
    }

    println!("{}", game.move_list());
    println!("\n{}\n", game.state().board());
    match game.outcome() {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("Stopped after {} plies", game.state().ply()),
    }
    Ok(())
}

fn replay(texts: &[String]) -> anyhow::Result<()> {
    let mut moves = Vec::with_capacity(texts.len());
    for text in texts {
        match text.parse::<Move>() {
            Ok(mv) => moves.push(mv),
            Err(e) => bail!("{e}"),
        }
    }

    let game = GameState::replay(moves).context("Replay failed")?;
    println!(
        "{}",
        format_move_list(game.history().iter().map(|p| p.san.as_str()))
    );
    println!("\n{}\n", game.board());
    match game.outcome() {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("{} to move", game.turn()),
    }
    Ok(())
}
