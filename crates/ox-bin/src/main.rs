//! `oxmodal`: demo host for the modal input layer.
//!
//! Draws the bordered input box inline, feeds terminal events through
//! `ModalEditor`, and prints the final text on exit. Ctrl-C exits at any
//! time; Escape in Normal mode with nothing pending is forwarded by the
//! interpreter, and the host treats that as "submit".

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::ModalEditor;
use core_config::{Config, ConfigContext, load_from};
use core_events::InputEvent;
use core_model::TextArea;
use core_state::Mode;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalCapabilities};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxmodal", version, about = "Modal (vim-style) input box")]
struct Args {
    /// Optional UTF-8 file whose contents seed the input box.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `oxmodal.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Terminal rows used to size the scroll window instead of the real height.
    #[arg(long = "rows")]
    pub rows: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    CtrlC,
    Submit,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::Submit => "submit",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the host loop does with one terminal event.
#[derive(Debug, PartialEq)]
enum LoopInput {
    Quit,
    Focus(bool),
    Resize { columns: u16, rows: u16 },
    Modal(InputEvent),
    Ignore,
}

fn classify(event: &Event) -> LoopInput {
    match event {
        Event::Key(key)
            if key.kind != KeyEventKind::Release
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            LoopInput::Quit
        }
        Event::FocusGained => LoopInput::Focus(true),
        Event::FocusLost => LoopInput::Focus(false),
        Event::Resize(columns, rows) => LoopInput::Resize {
            columns: *columns,
            rows: *rows,
        },
        other => match core_input::map_event(other) {
            Some(input) => LoopInput::Modal(input),
            None => LoopInput::Ignore,
        },
    }
}

/// Escape forwarded from Normal mode ends the session.
fn is_submit(input: &InputEvent, forwarded: bool, mode: Mode) -> bool {
    forwarded && mode == Mode::Normal && matches!(input, InputEvent::Key(k) if k.is_escape())
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("oxmodal.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "oxmodal.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = crossterm::terminal::disable_raw_mode();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn initial_text(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let text = content.replace("\r\n", "\n");
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

struct Session {
    editor: ModalEditor<TextArea>,
    config: Config,
    columns: u16,
    rows_override: Option<u16>,
}

impl Session {
    fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        if let Some(padding) = self
            .config
            .recompute_with_context(ConfigContext::new(columns, rows))
        {
            self.editor.set_padding_x(usize::from(padding));
        }
        if self.rows_override.is_none() {
            self.editor.set_terminal_rows(usize::from(rows));
        }
    }

    fn run(&mut self, backend: &mut CrosstermBackend) -> Result<ShutdownReason> {
        loop {
            let frame = self.editor.render(usize::from(self.columns));
            backend.draw(&frame)?;
            match classify(&event::read()?) {
                LoopInput::Quit => return Ok(ShutdownReason::CtrlC),
                LoopInput::Focus(focused) => self.editor.editor_mut().set_focused(focused),
                LoopInput::Resize { columns, rows } => self.resize(columns, rows),
                LoopInput::Modal(input) => {
                    let result = self.editor.handle_event(&input);
                    if is_submit(&input, result.forwarded, self.editor.mode()) {
                        return Ok(ShutdownReason::Submit);
                    }
                }
                LoopInput::Ignore => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let text = initial_text(args.path.as_deref())?;
    let mut config = load_from(args.config.clone())?;
    let (columns, term_rows) = crossterm::terminal::size().unwrap_or_else(|e| {
        warn!(target: "runtime", error = %e, "terminal_size_unavailable");
        (80, 24)
    });
    config.apply_context(ConfigContext::new(columns, term_rows));

    let mut editor = ModalEditor::new(TextArea::new(&text), &config);
    editor.set_terminal_rows(usize::from(args.rows.unwrap_or(term_rows)));
    info!(
        target: "runtime",
        config_override = args.config.is_some(),
        seeded_lines = editor.lines().len(),
        mode = %editor.mode(),
        padding_x = config.effective_padding_x,
        "bootstrap_complete"
    );

    let mut session = Session {
        editor,
        config,
        columns,
        rows_override: args.rows,
    };
    let mut backend = CrosstermBackend::new(TerminalCapabilities::detect());
    let reason = {
        let mut guard = backend.enter_guard()?;
        session.run(guard.backend())?
    };
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        keypresses = core_events::KEYPRESS_TOTAL.load(std::sync::atomic::Ordering::Relaxed),
        "shutdown"
    );
    println!("{}", session.editor.text());
    Ok(())
}
