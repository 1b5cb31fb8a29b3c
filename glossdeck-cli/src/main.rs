//! glossdeck - terminal editor for annotated vocabulary slideshows

mod io;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::prelude::*;
use simplelog::{Config, WriteLogger};

use glossdeck_core::model::Paragraph;
use glossdeck_core::{export, App, Focus, InputTarget, Mode, Snapshot, SnapshotStorage, STORAGE_KEY};

use crate::io::FileStorage;

#[derive(Parser)]
#[command(name = "glossdeck", about = "Annotate paragraphs with vocabulary explanations and export a slideshow")]
struct Cli {
    /// Text file used to seed paragraphs (blank-line separated) when no
    /// saved presentation exists
    file: Option<PathBuf>,

    /// Write the presentation HTML to PATH and exit without opening the editor
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Directory for saved state and logs (defaults to ~/.glossdeck)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };
    let mut storage = FileStorage::open(data_dir)?;
    init_logging(storage.dir())?;

    let saved = storage.get(STORAGE_KEY)?;
    let mut snapshot = match &saved {
        Some(json) => Snapshot::from_json(json),
        None => Snapshot::default(),
    };

    // Headless export: build the artifact from saved state and exit.
    if let Some(out) = cli.export {
        let html = export::presentation_html(&snapshot);
        io::write_export(&out, &html)?;
        println!(
            "Exported {} paragraph slide(s) to {}",
            snapshot.paragraphs.len(),
            out.display()
        );
        return Ok(());
    }

    // Seed from a text file only when there is nothing saved yet.
    let mut seed_status = None;
    if saved.is_none() {
        if let Some(path) = &cli.file {
            let blocks = io::read_seed_paragraphs(path)?;
            snapshot.paragraphs = blocks.into_iter().map(Paragraph::new).collect();
            seed_status = Some(format!(
                "Loaded {} paragraph(s) from {}",
                snapshot.paragraphs.len(),
                path.display()
            ));
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::from_snapshot(snapshot);
    match seed_status {
        Some(msg) => app.set_status(&msg),
        None => app.set_status("Welcome to glossdeck! Press '?' for help"),
    }

    let res = run_app(&mut terminal, &mut app, &mut storage);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn init_logging(dir: &Path) -> Result<()> {
    let log_path = dir.join("glossdeck.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create {}", log_path.display()))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), file)?;
    info!("glossdeck started, data dir {}", dir.display());
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    storage: &mut FileStorage,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Clear status on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, storage, key.code, key.modifiers)?,
                Mode::Visual => handle_visual_mode(app, key.code),
                Mode::Input => handle_input_mode(app, key.code, key.modifiers),
                Mode::Confirm => handle_confirm_mode(app, key.code),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }

            if app.take_storage_reset() {
                storage.remove(STORAGE_KEY)?;
            }
            if app.take_dirty() {
                persist(app, storage)?;
            }
        }
    }
    Ok(())
}

/// Serialize the whole snapshot and overwrite the stored copy.
fn persist(app: &App, storage: &mut FileStorage) -> Result<()> {
    let json = app.store.snapshot().to_json()?;
    storage.set(STORAGE_KEY, &json)?;
    Ok(())
}

fn handle_normal_mode(
    app: &mut App,
    storage: &mut FileStorage,
    code: KeyCode,
    _modifiers: KeyModifiers,
) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,

        KeyCode::Tab => app.toggle_focus(),

        // Navigation within the focused pane
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Paragraphs => app.cursor.move_down(),
            Focus::Explanations => app.next_explanation(),
            Focus::Meta => app.next_meta_field(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Paragraphs => app.cursor.move_up(),
            Focus::Explanations => app.prev_explanation(),
            Focus::Meta => app.prev_meta_field(),
        },
        KeyCode::Char('h') | KeyCode::Left => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_left();
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_right();
            }
        }
        KeyCode::Char('w') => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_word_forward();
            }
        }
        KeyCode::Char('b') => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_word_back();
            }
        }
        KeyCode::Char('g') => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_to_top();
            }
        }
        KeyCode::Char('G') => {
            if app.focus == Focus::Paragraphs {
                app.cursor.move_to_bottom();
            }
        }

        // Paragraph switching
        KeyCode::Char(']') => app.next_paragraph(),
        KeyCode::Char('[') => app.prev_paragraph(),

        // Editing
        KeyCode::Char('a') => app.begin_add_paragraph(),
        KeyCode::Char('e') | KeyCode::Enter => match app.focus {
            Focus::Paragraphs => app.begin_edit_paragraph(),
            Focus::Explanations => app.begin_edit_explanation(),
            Focus::Meta => app.begin_edit_meta_field(),
        },
        KeyCode::Char('v') => {
            if app.focus == Focus::Paragraphs {
                app.enter_visual_mode();
            }
        }
        KeyCode::Char('m') => app.begin_manual_explanation(),

        // Destructive actions (all behind confirmation)
        KeyCode::Char('d') => {
            if app.focus == Focus::Explanations {
                app.request_remove_explanation();
            }
        }
        KeyCode::Char('D') => app.request_remove_paragraph(),
        KeyCode::Char('C') => app.request_clear_all(),

        // File operations
        KeyCode::Char('s') => {
            persist(app, storage)?;
            app.take_dirty();
            app.set_status(&format!("Saved at {}", Local::now().format("%H:%M:%S")));
        }
        KeyCode::Char('E') => {
            let snapshot = app.store.snapshot();
            let name = export::file_name(&snapshot.meta.title);
            let html = export::presentation_html(&snapshot);
            match io::write_export(Path::new(&name), &html) {
                Ok(()) => {
                    info!("exported presentation to {name}");
                    app.set_status(&format!("Exported to {name}"));
                }
                Err(e) => app.set_status(&format!("Export failed: {e}")),
            }
        }

        _ => {}
    }
    Ok(())
}

fn handle_visual_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_visual_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.cursor.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.cursor.move_right(),
        KeyCode::Char('w') => app.cursor.move_word_forward(),
        KeyCode::Char('b') => app.cursor.move_word_back(),
        KeyCode::Char('0') => app.cursor.move_to_start(),
        KeyCode::Char('$') => app.cursor.move_to_end(),
        KeyCode::Char('a') | KeyCode::Enter => app.start_annotation(),
        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let multiline = app.input_target == InputTarget::ParagraphText;
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Char('s') if multiline && modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_input();
        }
        KeyCode::Enter => {
            if multiline {
                app.input_buffer.push('\n');
            } else {
                app.submit_input();
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_pending(false),
        _ => {}
    }
}
