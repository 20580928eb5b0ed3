//! blockfall - falling blocks in the terminal

use anyhow::{Context, Result};
use blockfall::{
    game::Game,
    game_loop::{Event as GameEvent, GameLoop},
    headless,
    input::{Input, KeyBindings},
    selector::{PieceSelector, RandomSelector},
    settings::Settings,
    ui,
};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Poll interval once no tick is pending (after game over)
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Seed for the piece sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the platform config dir
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Gravity interval in milliseconds
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Read commands from stdin and write JSON frames to stdout
    #[arg(long)]
    headless: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Log to a per-session file. The guard must outlive the program
fn init_logging() -> Result<WorkerGuard> {
    let session_id: u32 = rand::random();
    let dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("blockfall=debug"))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );
    Ok(guard)
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(tick_ms) = cli.tick_ms {
        settings.game.tick_ms = tick_ms;
    }
    settings.game.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let settings = load_settings(&cli).context("loading settings")?;
    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let selector = match cli.seed {
        Some(seed) => RandomSelector::with_seed(seed),
        None => RandomSelector::new(),
    };
    tracing::info!(
        seed = selector.seed(),
        width = settings.game.width,
        height = settings.game.height,
        tick_ms = settings.game.tick_ms,
        headless = cli.headless,
        "new game"
    );

    let game = Game::new(&settings.game, selector);
    let mut game_loop = GameLoop::new(game, settings.game.tick_interval(), Instant::now());

    if cli.headless {
        return headless::run(&mut game_loop, io::stdin().lock(), io::stdout().lock());
    }

    let keys = KeyBindings::from_settings(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game_loop, &keys);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    result?;

    let view = game_loop.view();
    println!("Final Score: {} | Lines: {}", view.score, view.lines);
    tracing::info!(score = view.score, lines = view.lines, "session finished");
    Ok(())
}

fn run_app<S: PieceSelector>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game_loop: &mut GameLoop<S>,
    keys: &KeyBindings,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render_game(frame, game_loop.view()))?;

        let timeout = game_loop.timeout(Instant::now()).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match keys.lookup(key) {
                        Some(Input::Quit) => return Ok(()),
                        Some(Input::Game(action)) => {
                            game_loop.handle(GameEvent::Action(action));
                        }
                        None => {}
                    }
                }
            }
        }

        game_loop.poll_tick(Instant::now());
    }
}
