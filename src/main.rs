use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use omega::app::LogicThread;
use omega::config::{Config, ViewMode};
use omega::render::RenderState;
use omega::{olog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Omega - a command-line crypto terminal
#[derive(Parser, Debug)]
#[command(name = "omega")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    OMEGA_DEBUG=1   Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.omega/omega.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Start in the basic (plain terminal) view
    #[arg(short = 'b', long)]
    pub basic: bool,

    /// Override the chain RPC endpoint
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Override the relayer endpoint
    #[arg(long)]
    pub relayer_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    omega::log::init_with_debug(cli.debug);
    olog!("Omega starting");

    let mut config = Config::load()?;
    if cli.basic {
        config.view_mode = ViewMode::Basic;
    }
    if cli.rpc_url.is_some() {
        config.rpc_url = cli.rpc_url;
    }
    if cli.relayer_url.is_some() {
        config.relayer_url = cli.relayer_url;
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle = thread::spawn(move || LogicThread::run(config, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let _ = logic_handle.join();
    restore_terminal(&mut terminal)?;
    olog!("Omega stopped");
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &Arc<AtomicBool>,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut drawn_version = u64::MAX;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(next) => state = next,
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if state.version != drawn_version {
            terminal.draw(|frame| ui::draw(frame, &state))?;
            drawn_version = state.version;
        }

        thread::sleep(FRAME_DURATION);
    }

    Ok(())
}
