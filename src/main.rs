mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use wave_shooter::{GameConfig, GameState, GameStatus, InputSnapshot, UpdateUiFunctions};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest delta fed to the simulation; a stalled terminal must not teleport
/// bullets through opponents.
const MAX_ELAPSED_MS: f32 = 100.0;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a press or repeat keeps a key held when the terminal never reports
/// the release.  Key repeat runs at 15 Hz or faster, so 4 frames (≈133 ms)
/// always get refreshed in time.
const HOLD_WINDOW: u64 = 4;

/// Frame number of the last press/repeat for every key currently down.
#[derive(Debug, Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn touch(&mut self, key: KeyCode, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    fn release(&mut self, key: KeyCode) {
        self.last_seen.remove(&key);
    }

    fn any(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.last_seen
                .get(key)
                .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
        })
    }

    /// Movement and fire flags for this frame; the escape edge is set by the
    /// event drain and left untouched.
    fn fill(&self, input: &mut InputSnapshot, frame: u64) {
        input.left = self.any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        input.right = self.any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        input.fire = self.any(&[KeyCode::Char(' ')], frame);
    }
}

// ── UI collaborator ───────────────────────────────────────────────────────────

/// Score display and pause modal state driven by the core's effects.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    pub score: u32,
    pub modal_open: bool,
}

impl UpdateUiFunctions for ScoreBoard {
    fn toggle_modal(&mut self) {
        self.modal_open = !self.modal_open;
    }

    fn increment_score(&mut self, amount: u32) {
        self.score += amount;
    }

    fn player_death(&mut self) {
        log::debug!("player hit at score {}", self.score);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuChoice {
    Play,
    Quit,
}

fn print_centered<W: Write>(out: &mut W, row: u16, text: &str, color: Color) -> io::Result<()> {
    let (width, _) = terminal::size()?;
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    last_score: Option<u32>,
) -> io::Result<MenuChoice> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (_, height) = terminal::size()?;
    let mid = height / 2;

    print_centered(out, mid.saturating_sub(4), "★  WAVE  SHOOTER  ★", Color::Cyan)?;
    if let Some(score) = last_score {
        print_centered(out, mid.saturating_sub(3), &format!("Last Score: {score}"), Color::Yellow)?;
    }
    let summary = format!(
        "{} waves · {} lives",
        config.waves.table.len(),
        config.player.lives
    );
    print_centered(out, mid.saturating_sub(1), &summary, Color::DarkGrey)?;
    print_centered(out, mid + 1, "[SPACE] Start   [Q] Quit", Color::White)?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let Ok(event) = rx.recv() else {
            // Event thread gone: nothing more can be read.
            return Ok(MenuChoice::Quit);
        };
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            match code {
                KeyCode::Char(' ') | KeyCode::Enter => return Ok(MenuChoice::Play),
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(MenuChoice::Quit),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
}

/// Runs one game until the player quits or asks for the menu after game over.
///
/// Each frame drains pending key events, turns the held keys into an
/// `InputSnapshot`, feeds the measured delta (capped at `MAX_ELAPSED_MS`)
/// into the core and renders.  While the pause modal is open the core only
/// watches for Escape.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    board: &mut ScoreBoard,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<LoopExit> {
    let mut rng = thread_rng();
    let mut held = HeldKeys::default();
    let mut input = InputSnapshot::default();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let started = Instant::now();
        frame += 1;

        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match (kind, code) {
                (KeyEventKind::Release, _) => held.release(code),
                (KeyEventKind::Repeat, _) => held.touch(code, frame),
                (KeyEventKind::Press, KeyCode::Char('q') | KeyCode::Char('Q')) => {
                    return Ok(LoopExit::Quit);
                }
                (KeyEventKind::Press, KeyCode::Char('c')) if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(LoopExit::Quit);
                }
                (KeyEventKind::Press, KeyCode::Char('r') | KeyCode::Char('R'))
                    if state.status() == GameStatus::GameOver =>
                {
                    return Ok(LoopExit::Menu);
                }
                (KeyEventKind::Press, KeyCode::Esc) => input.escape = true,
                (KeyEventKind::Press, _) => held.touch(code, frame),
            }
        }
        held.fill(&mut input, frame);

        let now = Instant::now();
        let elapsed_ms = (now.duration_since(last_tick).as_secs_f32() * 1000.0).min(MAX_ELAPSED_MS);
        last_tick = now;

        let paused = board.modal_open;
        state.update(elapsed_ms, &mut input, paused, &mut rng, board);
        display::render(out, state, board)?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode, alternate screen and key-release reporting for the lifetime of
/// the value; dropping it puts the terminal back.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // Not every terminal supports release events; HeldKeys covers those.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(TerminalGuard { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    env_logger::init();

    // Config errors are reported before the terminal switches to raw mode.
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        None => GameConfig::default(),
    };
    log::info!("loaded {} waves", config.waves.table.len());

    let mut out = BufWriter::new(stdout());
    let _guard = TerminalGuard::enter(&mut out)?;

    // Blocking reads live on their own thread; the frame loop polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    run(&mut out, &rx, &config)
}

/// Menu, game, menu... until the player quits.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> io::Result<()> {
    let mut last_score = None;
    while let MenuChoice::Play = show_menu(out, rx, config, last_score)? {
        let mut state = GameState::new(config);
        let mut board = ScoreBoard::default();
        let exit = game_loop(out, &mut state, &mut board, rx)?;
        last_score = Some(board.score);
        log::info!("game ended with score {}", board.score);
        if let LoopExit::Quit = exit {
            break;
        }
    }
    Ok(())
}
