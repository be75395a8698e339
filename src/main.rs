use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use directories::ProjectDirs;
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use typtea::{
    app::{App, Control},
    config::{Config, ConfigStore, FileConfigStore},
    keymap::KeyMap,
    language::{list_languages, Vocabulary},
    mode::{Mode, ModeKind},
    runtime::{FixedTicker, Runner, TerminalEvents},
    session::Session,
};

/// minimal terminal typing test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing speed test for the terminal. Type the words on screen, \
                  against the clock or up to a word count, and get your WPM and accuracy."
)]
pub struct Cli {
    /// test mode: end after a duration or after a number of words
    #[clap(short = 'm', long, value_enum)]
    mode: Option<ModeKind>,

    /// test duration in seconds (10-300) for time mode
    #[clap(short = 'd', long)]
    duration: Option<u64>,

    /// number of words (10-500) for word mode
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// language to pull words from
    #[clap(short = 'l', long = "lang")]
    language: Option<String>,

    /// list all available languages and exit
    #[clap(long)]
    list_langs: bool,

    /// write debug logs to a file in the state directory
    #[clap(short = 'v', long)]
    verbose: bool,

    /// read preferences from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

/// Everything needed to build the app, flags merged over the config file
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    mode: Mode,
    language: String,
    keymap: KeyMap,
}

impl Cli {
    fn resolve(&self, cfg: &Config) -> typtea::Result<Settings> {
        let kind = match self.mode {
            Some(kind) => kind,
            None => cfg.mode.parse()?,
        };
        let mode = Mode::from_kind(
            kind,
            self.duration.unwrap_or(cfg.duration),
            self.words.unwrap_or(cfg.words),
        );
        mode.validate()?;

        Ok(Settings {
            mode,
            language: self
                .language
                .clone()
                .unwrap_or_else(|| cfg.language.clone()),
            keymap: KeyMap::from_config(&cfg.keybindings)?,
        })
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn log_path() -> PathBuf {
    ProjectDirs::from("", "", "typtea")
        .map(|pd| {
            pd.state_dir()
                .unwrap_or_else(|| pd.data_local_dir())
                .join("typtea.log")
        })
        .unwrap_or_else(|| PathBuf::from("typtea.log"))
}

/// Logs go to a file, the terminal belongs to the UI
fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    let from_env = std::env::var("RUST_LOG").is_ok();
    if !verbose && !from_env {
        return Ok(());
    }

    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let filter = if from_env {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("debug")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(fs::File::create(&path)?)
        .with_ansi(false)
        .init();
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if cli.list_langs {
        println!("Available languages:");
        for lang in list_languages() {
            println!("  {lang}");
        }
        return Ok(());
    }

    let settings = match cli.resolve(&cli.config_store().load()) {
        Ok(settings) => settings,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };

    let vocabulary = match Vocabulary::load(&settings.language) {
        Ok(vocabulary) => vocabulary,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Available languages: {}", list_languages().iter().join(", "));
            std::process::exit(1);
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let session = Session::new(settings.mode, vocabulary)?;
    let mut app = App::new(session, settings.keymap, settings.language);
    info!(mode = ?settings.mode, language = %app.language, "starting typing test");

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = restore_terminal();
        default_hook(panic);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run(&mut terminal, &mut app);

    restore_terminal()?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(TerminalEvents::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        if app.on_event(&runner.step())? == Control::Quit {
            return Ok(());
        }
    }
}
