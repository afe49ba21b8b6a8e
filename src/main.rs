//! Pack Shooter entry point
//!
//! Terminal front end: owns the screen, turns key and mouse events into
//! game input, and runs the fixed-rate loop.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::panic;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{ExecutableCommand, cursor, execute, terminal};

use pack_shooter::renderer::terminal::cell_center;
use pack_shooter::renderer::{Surface, TerminalSurface, render};
use pack_shooter::sim::{Directions, Viewport};
use pack_shooter::{AssetLibrary, DirectoryAssets, Game, InputEvent, Settings, TickInput, tick};

/// A key counts as held if it was last seen within this many frames.
/// Covers terminals that never report key releases: OS key repeat refreshes
/// the entry well inside the window.
const HOLD_WINDOW: u64 = 8;

/// Frames before another confirm is accepted; held Space auto-repeats
const CONFIRM_COOLDOWN: u32 = 10;

fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    })
}

fn held_directions(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Directions {
    let held = |keys: &[KeyCode]| is_held(key_frame, keys, frame);
    Directions {
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
    }
}

/// Send logs to the configured file; the terminal belongs to the game
fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or("info");
    match File::create(&settings.log_file) {
        Ok(file) => {
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!(
            "Cannot open log file {}: {}, logging disabled",
            settings.log_file.display(),
            e
        ),
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
fn restore_terminal(out: &mut impl Write, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = execute!(out, DisableMouseCapture, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();
}

/// Restore the terminal before the default hook prints the panic message
fn install_panic_hook(keyboard_enhanced: bool) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal(&mut io::stdout(), keyboard_enhanced);
        match info.location() {
            Some(l) => log::error!("Panic at {}:{}:{}", l.file(), l.line(), l.column()),
            None => log::error!("Panic at unknown location"),
        }
        previous(info);
    }));
}

fn main() -> io::Result<()> {
    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);
    init_logging(&settings);
    log::info!("Pack Shooter starting, settings from {}", settings_path.display());

    let provider = DirectoryAssets::new(settings.card_dir.clone(), settings.pack_dir.clone())
        .with_card_back(settings.card_back.clone());
    let assets = AssetLibrary::new(Box::new(provider));

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

    // Key release events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    install_panic_hook(keyboard_enhanced);

    // Blocking reads live on their own thread so the loop never waits on input
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(settings, assets, &rx);

    restore_terminal(&mut out, keyboard_enhanced);

    if let Err(e) = &result {
        log::error!("Exited with error: {}", e);
    }
    log::info!("Pack Shooter stopped");
    result
}

fn run(settings: Settings, assets: AssetLibrary, rx: &mpsc::Receiver<Event>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(BufWriter::new(io::stdout()), cols, rows);
    let size = surface.size();
    let mut game = Game::new(settings, assets, Viewport::new(size.x, size.y));

    let dt = game.ctx.settings.frame_dt();
    let frame_time = Duration::from_secs_f32(dt);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut confirm_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = TickInput::default();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') | KeyCode::Enter if confirm_cooldown == 0 => {
                                input.events.push(InputEvent::Confirm);
                                confirm_cooldown = CONFIRM_COOLDOWN;
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                input.events.push(InputEvent::Restart);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let p = cell_center(column, row);
                    input.events.push(InputEvent::Click { x: p.x, y: p.y });
                }
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    let size = surface.size();
                    input.events.push(InputEvent::Resize {
                        width: size.x,
                        height: size.y,
                    });
                }
                _ => {}
            }
        }

        input.held = held_directions(&key_frame, frame);
        confirm_cooldown = confirm_cooldown.saturating_sub(1);

        tick(&mut game, &input, dt);
        render(&game, &mut surface);
        surface.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
