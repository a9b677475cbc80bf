//! Terminal mahjong runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! The game is saved on quit while it is still in progress; `--continue`
//! resumes it.

use std::fs;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_mahjong::core::{persist, GameSession, GameStatus, SelectOutcome, SimpleRng};
use tui_mahjong::input::{handle_key_event, should_quit};
use tui_mahjong::journal::{Journal, JournalRecord};
use tui_mahjong::settings::Settings;
use tui_mahjong::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_mahjong::types::GameAction;

struct App {
    settings: Settings,
    journal: Journal,
    rng: SimpleRng,
    session: GameSession,
    notice: Option<String>,
}

impl App {
    fn start(settings: Settings) -> Result<Self> {
        let mut journal = Journal::open(settings.log_path.as_deref());
        let seed = settings.seed_or_clock();
        let mut rng = SimpleRng::new(seed);

        let mut notice = None;
        let resumed = if settings.resume {
            match load_saved(&settings) {
                Ok(session) => {
                    journal.record(&JournalRecord::Load {
                        path: settings.save_path.display().to_string(),
                        map: session.map_name().to_string(),
                        tiles_left: session.tiles_left(),
                    });
                    Some(session)
                }
                Err(err) => {
                    eprintln!("[Save] {err:#}; starting a new game");
                    notice = Some("save unreadable, new game".to_string());
                    None
                }
            }
        } else {
            None
        };

        let session = match resumed {
            Some(session) => session,
            None => deal(&settings, &settings.map, &mut rng, &mut journal)?,
        };

        Ok(Self {
            settings,
            journal,
            rng,
            session,
            notice,
        })
    }

    fn apply(&mut self, action: GameAction) {
        self.notice = None;
        match action {
            GameAction::CaretLeft => self.session.caret_prev(),
            GameAction::CaretRight => self.session.caret_next(),
            GameAction::CaretUp => self.session.caret_up(),
            GameAction::CaretDown => self.session.caret_down(),
            GameAction::Select => {
                if let SelectOutcome::Matched { first, second } = self.session.select_caret() {
                    self.journal.record(&JournalRecord::Match {
                        first: first.into(),
                        second: second.into(),
                        tiles_left: self.session.tiles_left(),
                        moves_left: self.session.moves_left(),
                    });
                    if self.session.status() != GameStatus::Playing {
                        self.journal.record(&JournalRecord::finish(
                            self.session.status(),
                            self.session.tiles_left(),
                        ));
                    }
                }
            }
            GameAction::Hint => match self.session.hint() {
                Some((i, j)) => {
                    let selectable = self.session.selectable();
                    if let (Some(&first), Some(&second)) = (selectable.get(i), selectable.get(j)) {
                        self.journal.record(&JournalRecord::Hint {
                            first: first.into(),
                            second: second.into(),
                        });
                    }
                }
                None => self.notice = Some("no moves left".to_string()),
            },
            GameAction::Undo => {
                if self.session.undo().is_some() {
                    self.journal.record(&JournalRecord::Undo {
                        tiles_left: self.session.tiles_left(),
                    });
                } else {
                    self.notice = Some("nothing to undo".to_string());
                }
            }
            GameAction::NewGame => {
                let name = self.session.map_name().to_string();
                self.redeal(&name);
            }
            GameAction::NextMap => {
                let name = self.settings.next_map_name(self.session.map_name());
                self.redeal(&name);
            }
        }
    }

    /// Replace the current game; on failure the old one stays.
    fn redeal(&mut self, name: &str) {
        match deal(&self.settings, name, &mut self.rng, &mut self.journal) {
            Ok(session) => self.session = session,
            Err(err) => self.notice = Some(format!("[Map] {err:#}")),
        }
    }

    /// Save an unfinished game, or drop a stale save once the game is over.
    fn save_on_quit(&mut self) -> Result<()> {
        let path = &self.settings.save_path;
        if self.session.status() != GameStatus::Playing {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("cannot remove {}", path.display()))?;
            }
            return Ok(());
        }

        let text = persist::encode(self.session.board(), self.session.undo_stack());
        fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;
        self.journal.record(&JournalRecord::Save {
            path: path.display().to_string(),
            tiles_left: self.session.tiles_left(),
        });
        Ok(())
    }
}

fn deal(
    settings: &Settings,
    name: &str,
    rng: &mut SimpleRng,
    journal: &mut Journal,
) -> Result<GameSession> {
    let map = settings.load_map(name)?;
    let seed = rng.state();
    let session = GameSession::new_game(&map, rng, settings.limits())
        .with_context(|| format!("cannot deal map {name:?}"))?;
    journal.record(&JournalRecord::Deal {
        map: name.to_string(),
        seed,
        tiles: session.tiles_left(),
    });
    Ok(session)
}

fn load_saved(settings: &Settings) -> Result<GameSession> {
    let path = &settings.save_path;
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let saved = persist::decode(&text)?;
    Ok(GameSession::from_saved(&settings.map, saved))
}

fn main() -> Result<()> {
    let settings = Settings::from_env().with_args(std::env::args().skip(1))?;
    let mut app = App::start(settings)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Err(err) = app.save_on_quit() {
        eprintln!("[Save] {err:#}");
    } else if app.session.status() == GameStatus::Playing {
        println!("[Save] game saved to {}", app.settings.save_path.display());
    }
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_notice(
            &app.session,
            app.notice.as_deref(),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    app.apply(action);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
