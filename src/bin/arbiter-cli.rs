use std::io::{self, BufRead, Write};

use clap::arg;
use clap::command;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use arbiter::rules::fen::INITIAL_POSITION;
use arbiter::rules::{Color, GameState, Move, MoveOutcome, Piece, PieceKind};

fn main() {
    let matches = command!()
        .propagate_version(true)
        .subcommand(Command::new("play").about("Play a two-player game in the terminal"))
        .subcommand(
            Command::new("show")
                .about("Render a position")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("show", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            show(fen);
        }
        Some(("play", _)) | None => {
            play();
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn show(fen: &str) {
    match GameState::from_fen(fen) {
        Ok(state) => {
            println!("{}", state.render_to_string());
            println!("{} to move.", state.current_side());
            if let Some(square) = state.king_in_check(state.current_side()) {
                println!("Check on {}.", square.as_algebraic());
            }
        }
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    number: usize,
    white: String,
    black: String,
}

fn play() {
    let stdin = io::stdin();
    let mut game = GameState::new_game();
    let mut history: Vec<HistoryRow> = Vec::new();

    println!("{}", game.render_to_string());
    println!("Enter moves like e2e4 (castle with e1g1). Commands: history, new, quit.");

    loop {
        print!("{} to move> ", game.current_side());
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => break,
            "new" => {
                game = GameState::new_game();
                history.clear();
                println!("{}", game.render_to_string());
                continue;
            }
            "history" => {
                print_history(&history);
                continue;
            }
            _ => {}
        }

        let mv = match Move::from_algebraic(input) {
            Ok(mv) => mv,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        // The engine only reports move metadata; the mover, its side and the
        // capture target are read off the board before the move for rendering.
        let mover = game.piece_at(mv.from);
        let side = game.current_side();
        let target = game.piece_at(mv.to);
        let outcome = game.attempt_move(mv.from, mv.to);
        if !outcome.accepted {
            println!("Illegal move: {}", input);
            continue;
        }

        let notation = notation_for(mover.expect("accepted move has a mover"), mv, &outcome);
        record(&mut history, side, &notation);
        println!("{}", game.render_to_string());

        if outcome.capture {
            // En-passant captures a pawn even though the target square is empty.
            let victim = target.unwrap_or(Piece {
                color: side.opposite(),
                kind: PieceKind::Pawn,
            });
            println!("{} captured.", victim.glyph());
        }
        if outcome.checkmate {
            println!("Checkmate! {} wins.", side);
            print_history(&history);
            break;
        } else if let Some(square) = outcome.check {
            println!("Check on {}.", square.as_algebraic());
        }
    }
}

/// SAN-style rendering of an accepted move from its pre-move piece and the
/// engine-reported metadata.
fn notation_for(piece: Piece, mv: Move, outcome: &MoveOutcome) -> String {
    if outcome.castling {
        return if mv.to.col == 6 { "O-O" } else { "O-O-O" }.to_string();
    }

    let suffix = if outcome.checkmate {
        "#"
    } else if outcome.check.is_some() {
        "+"
    } else {
        ""
    };
    let destination = mv.to.as_algebraic();

    if piece.kind == PieceKind::Pawn {
        if outcome.capture {
            let file = (b'a' + mv.from.col) as char;
            format!("{}x{}{}", file, destination, suffix)
        } else {
            format!("{}{}", destination, suffix)
        }
    } else if outcome.capture {
        format!("{}x{}{}", piece.kind, destination, suffix)
    } else {
        format!("{}{}{}", piece.kind, destination, suffix)
    }
}

fn record(history: &mut Vec<HistoryRow>, mover: Color, notation: &str) {
    match mover {
        Color::White => history.push(HistoryRow {
            number: history.len() + 1,
            white: notation.to_string(),
            black: String::new(),
        }),
        Color::Black => {
            if let Some(row) = history.last_mut() {
                row.black = notation.to_string();
            } else {
                history.push(HistoryRow {
                    number: 1,
                    white: String::new(),
                    black: notation.to_string(),
                });
            }
        }
    }
}

fn print_history(history: &[HistoryRow]) {
    if history.is_empty() {
        println!("No moves yet.");
        return;
    }
    println!("{}", Table::new(history).with(Style::modern()));
}
