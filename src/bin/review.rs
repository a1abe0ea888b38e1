use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::*;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use dotenv::dotenv;
use tracing::{error, info, warn};

use footage_tools::{
    config, player, scanner, utils, AppConfig, CommitOutcome, Error, ReviewStatus, Session,
};

#[derive(Debug, Parser)]
#[command(name = "footage-review")]
#[command(
    about = "Quickly check the (converted) footage and remove bad clips",
    long_about = None
)]
struct Cli {
    /// Directory with raw recordings, or a _s/_c converter output directory
    dir: PathBuf,
}

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = footage_tools::logging::init_logger();

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    if let Err(err) = run(&config, &args) {
        error!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}

fn run(config: &AppConfig, args: &Cli) -> Result<(), Error> {
    let (raw_dir, converted_dir) = scanner::derive_directories(&args.dir);
    utils::ensure_directory(&raw_dir)?;
    utils::ensure_in_path(&config.player_command)?;

    let raw_files = scanner::find_files_with_extension(&raw_dir, &config.raw_extension);
    let converted_files = match &converted_dir {
        Some(dir) => scanner::find_files_with_extension(dir, &config.converted_extension),
        None => Vec::new(),
    };

    let clips = scanner::pair_clips(&raw_files, &converted_files);
    if clips.is_empty() {
        info!("Could not find any clips under '{}'", raw_dir.display());
        return Ok(());
    }
    info!("{} clips loaded for review", clips.len());

    let mut session = Session::new(clips);
    review_loop(config, &mut session)?;

    if session.is_empty() {
        info!("All clips deleted, nothing left to review.");
    } else {
        info!("Review finished, {} clips remain.", session.len());
    }
    Ok(())
}

/// Restores the terminal on every exit path, including errors. Playback
/// suspends raw mode so the player owns the terminal while it runs.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard { active: true })
    }

    fn suspend(&mut self) -> io::Result<()> {
        if self.active {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            terminal::disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        if !self.active {
            terminal::enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.active = true;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.suspend();
    }
}

fn review_loop(config: &AppConfig, session: &mut Session) -> Result<(), Error> {
    let mut term = TerminalGuard::enter()?;
    let mut message: Option<String> = None;

    loop {
        render(session, &message)?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => session.move_previous(),
            KeyCode::Down | KeyCode::Char('j') => session.move_next(),
            KeyCode::Char('d') => session.mark_current_for_deletion(),
            KeyCode::Char('u') => session.keep_current(),
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(clip) = session.current() {
                    let path = clip.playback_path().clone();
                    term.suspend()?;
                    match player::play(config, &path) {
                        Ok(()) => message = None,
                        Err(err) => {
                            // Interrupted playback is fine; the session is untouched.
                            warn!("Playback failed: {}", err);
                            message = Some(format!("Playback failed: {}", err));
                        }
                    }
                    term.resume()?;
                }
            }
            KeyCode::Char('c') => {
                let marked = session.marked_count();
                if marked == 0 {
                    message = Some("No clips marked for deletion.".to_string());
                    continue;
                }
                if confirm_commit(marked)? {
                    let outcome = session.commit_deletions();
                    message = Some(describe_outcome(&outcome));
                    if session.is_empty() {
                        break;
                    }
                } else {
                    message = Some("Commit cancelled.".to_string());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => break,
            _ => {}
        }
    }

    term.suspend()?;
    Ok(())
}

fn render(session: &Session, message: &Option<String>) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    write!(
        out,
        "{}  {} clips, {} marked\r\n\r\n",
        "footage-review".bold(),
        session.len(),
        session.marked_count()
    )?;

    for (index, clip) in session.clips().iter().enumerate() {
        let marker = if index == session.cursor() { ">" } else { " " };
        let status = match clip.status {
            ReviewStatus::MarkedForDeletion => "delete".red().bold(),
            ReviewStatus::Kept => "keep  ".green(),
            ReviewStatus::Unreviewed => "      ".normal(),
        };
        let converted = if clip.converted_path.is_some() {
            "[c]"
        } else {
            "[ ]"
        };
        write!(out, "{} {} {} {}\r\n", marker, status, converted, clip.id)?;
    }

    write!(
        out,
        "\r\n{}\r\n",
        "up/down move, d mark, u keep, enter play, c commit, q quit".dimmed()
    )?;
    if let Some(message) = message {
        write!(out, "{}\r\n", message)?;
    }
    out.flush()
}

/// Single-keystroke confirmation; anything but `y` cancels.
fn confirm_commit(marked: usize) -> io::Result<bool> {
    let mut out = stdout();
    write!(
        out,
        "\r\nDelete the files of {} marked clip(s)? (y/N) ",
        marked
    )?;
    out.flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return Ok(matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')));
        }
    }
}

fn describe_outcome(outcome: &CommitOutcome) -> String {
    let mut text = format!(
        "Removed {} clip(s), deleted {} file(s)",
        outcome.clips_removed, outcome.files_deleted
    );
    if outcome.files_missing > 0 {
        text.push_str(&format!(", {} already gone", outcome.files_missing));
    }
    if !outcome.failures.is_empty() {
        text.push_str(&format!(", {} failed:", outcome.failures.len()));
        for (path, reason) in &outcome.failures {
            text.push_str(&format!(" '{}' ({})", path.display(), reason));
        }
    }
    text
}
