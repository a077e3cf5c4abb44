//! Simple text mode
//!
//! Whole words are typed at a prompt and fed through the same session state
//! machine the TUI uses, one key at a time.

use crate::game::{
    GameSessionController, Key, KeyInput, MAX_COLS, Outcome, Rejection, Session, StepOutcome,
};
use crate::output::{print_keyboard, print_result, print_row};
use crate::source::WordSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewGame,
    Reload,
    Guess(String),
    Invalid,
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "new" | "n" => Self::NewGame,
            "reload" => Self::Reload,
            _ if line.chars().count() == MAX_COLS && line.chars().all(|c| c.is_ascii_alphabetic()) => {
                Self::Guess(line.to_ascii_uppercase())
            }
            _ => Self::Invalid,
        }
    }
}

/// Type `word` into the current row and press enter
pub fn submit_word(session: &mut Session, word: &str) -> Outcome {
    clear_row(session);
    for c in word.chars() {
        if let Some(key) = Key::from_char(c) {
            session.handle_key(KeyInput::plain(key));
        }
    }
    session.handle_key(Key::Enter.into())
}

/// Empty the current row and return the cursor to its first column
fn clear_row(session: &mut Session) {
    // Backspace clears the focused cell, or steps left when it is already empty
    for _ in 0..2 * MAX_COLS {
        session.handle_key(Key::Backspace.into());
    }
}

/// Play one guess; returns the terminal outcome if the game ended
async fn play_guess(session: &mut Session, word: &str) -> Option<StepOutcome> {
    match submit_word(session, word) {
        Outcome::Submitted(reveal) => {
            let row = reveal.row();
            let outcome = reveal.run(session).await;
            print_row(session, row);
            outcome.filter(|outcome| matches!(outcome, StepOutcome::Ended(_)))
        }
        Outcome::Rejected(Rejection::NotInWordList { guess, .. }) => {
            println!("{}", format!("❌ {guess} is not in the word list").red());
            clear_row(session);
            None
        }
        Outcome::Rejected(Rejection::Incomplete { .. }) => {
            println!("{}", "❌ Enter exactly five letters".red());
            None
        }
        Outcome::Passthrough | Outcome::Ignored | Outcome::Updated => None,
    }
}

/// Run the simple text mode
///
/// # Errors
///
/// Returns an error if a game cannot be started or stdin/stdout fail.
pub async fn run_simple<S: WordSource>(
    controller: &mut GameSessionController<S>,
    boards: usize,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Termox - Text Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Guess the five-letter word. Colours after each guess:");
    println!("  {} right letter, right spot", " A ".black().on_green().bold());
    println!("  {} in the word, wrong spot", " A ".black().on_yellow().bold());
    println!("  {} not in the word\n", " A ".white().on_bright_black());
    println!("Commands: 'new' for a new game, 'reload' to fetch the word list again, 'quit' to exit\n");

    let mut session = controller.start(boards).await.context("failed to start a game")?;

    loop {
        let prompt = format!(
            "Guess {}/{}",
            session.cursor().row + 1,
            session.max_rows()
        );

        match Command::parse(&get_user_input(&prompt)?) {
            Command::Quit => break,
            Command::NewGame => {
                println!("\n🔄 New game started!\n");
                session = controller.restart().await.context("failed to start a game")?;
            }
            Command::Reload => {
                if controller.refresh_word_list().await {
                    println!(
                        "🔄 Word list reloaded ({} words), used from the next game",
                        controller.validator().len()
                    );
                } else {
                    println!("{}", "❌ Word list reload failed, keeping the previous one".red());
                }
                session = controller.session_mut().context("no game in progress")?;
            }
            Command::Invalid => println!("{}", "❌ Enter exactly five letters".red()),
            Command::Guess(word) => {
                if let Some(StepOutcome::Ended(result)) = play_guess(session, &word).await {
                    print_result(session, &result);
                    if !get_user_input("Play again? (yes/no)")?
                        .to_lowercase()
                        .starts_with('y')
                    {
                        break;
                    }
                    println!("\n🔄 New game started!\n");
                    session = controller.restart().await.context("failed to start a game")?;
                } else {
                    print_keyboard(session);
                }
            }
        }
    }

    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        // End of input behaves like quit
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
