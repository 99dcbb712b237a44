use anyhow::Result;
use indicatif::ProgressBar;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::{
    board::{Board, GameState, Side},
    search::Searcher,
    DEFAULT_DEPTH, WIDTH,
};

mod display;

fn prompt(stdin: &Stdin, message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_lowercase())
}

fn main() -> Result<()> {
    let mut board = Board::new();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // choose search depth
    let depth = loop {
        let answer = prompt(
            &stdin,
            &format!("Search depth in plies (default {}): ", DEFAULT_DEPTH),
        )?;
        if answer.is_empty() {
            break DEFAULT_DEPTH;
        }
        match answer.parse::<usize>() {
            Ok(depth) if depth > 0 => break depth,
            _ => println!("Invalid depth: {}", answer),
        }
    };

    // choose who plays first, the first player always places 'X'
    let human = loop {
        match prompt(&stdin, "Do you want to move first? y/n: ")?.chars().next() {
            Some('y') => break Side::PlayerOne,
            Some('n') => break Side::PlayerTwo,
            _ => println!("Unknown answer given"),
        }
    };
    let computer = human.opponent();
    let mut to_move = Side::PlayerOne;

    // game loop
    loop {
        display::draw(&board).expect("Failed to draw board!");

        match board.state() {
            GameState::Playing => {
                let next_move = if to_move == computer {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("Computer is thinking...");
                    spinner.enable_steady_tick(100);

                    let mut searcher = Searcher::new(computer);
                    let (score, best_move) = searcher.choose_move_parallel(&board, depth)?;
                    spinner.finish_and_clear();

                    println!(
                        "Computer chose column {} (score {}, {} positions searched)",
                        best_move, score, searcher.node_count
                    );
                    best_move
                } else {
                    let input = prompt(&stdin, &format!("Enter column (0-{}) > ", WIDTH - 1))?;
                    match input.parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input);
                            continue;
                        }
                        Ok(column) => column,
                    }
                };

                if let Err(err) = board.place(next_move, to_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                to_move = to_move.opponent();
            }

            // end states
            GameState::PlayerOneWin | GameState::PlayerTwoWin => {
                if board.winner() == Some(human) {
                    println!("You win!");
                } else {
                    println!("Computer wins!");
                }
                break;
            }
            GameState::Draw => {
                println!("It's a tie!");
                break;
            }
        }
    }
    Ok(())
}
