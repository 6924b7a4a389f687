//! speechcards main entry point
//!
//! The main loop waits on stdin with a timeout set by the next pending
//! speech cue, so keypresses and scheduled utterances are handled on the
//! same thread.

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use speechcards::input::{dispatch, DefaultKeyHandler};
use speechcards::state::config::Config;
use speechcards::state::{RouteKind, State};
use speechcards::terminal::{get_terminal_size, RawModeGuard};
use speechcards::{view, Result};
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::AsRawFd;
use std::process;
use std::time::{Duration, Instant};

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Upper bound on one poll so the screen width is picked up after a resize
const MAX_POLL: Duration = Duration::from_millis(100);

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");
    let start = if args.iter().any(|arg| arg == "admin" || arg == "/admin") {
        RouteKind::Admin
    } else {
        RouteKind::Learner
    };

    // Initialize logger
    if debug_mode {
        // Debug mode: write to speechcards.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("speechcards.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open speechcards.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "speechcards version {} starting (debug mode, logging to speechcards.log)",
            speechcards::VERSION
        );
    } else {
        // Normal mode: errors only, RUST_LOG can raise it
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(start) {
        error!("Fatal error: {}", e);
        eprintln!("speechcards: {}", e);
        process::exit(1);
    }
}

fn run(start: RouteKind) -> Result<()> {
    if !io::stdin().is_terminal() {
        eprintln!("Error: speechcards requires an interactive terminal (stdin is not a TTY)");
        process::exit(1);
    }

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let mut state = State::new(&config, start);
    let mut default_handler = DefaultKeyHandler::default();

    let _guard = RawModeGuard::new()?;

    let stdin_fd = io::stdin().as_raw_fd();
    let mut poll = Poll::new()?;
    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;
    let mut events = Events::with_capacity(16);

    info!("Entering event loop on route {}", state.route_kind().path());
    let mut width = get_terminal_size(&io::stdin()).0;
    draw(&state, width)?;

    while state.running {
        let timeout = state
            .time_until_next_scheduled(Instant::now())
            .map_or(MAX_POLL, |d| d.min(MAX_POLL));

        if let Err(e) = poll.poll(&mut events, Some(timeout)) {
            if e.kind() == io::ErrorKind::Interrupted {
                debug!("poll interrupted by signal");
                continue;
            }
            return Err(e.into());
        }

        let mut dirty = false;
        for event in events.iter() {
            if event.token() == STDIN {
                handle_stdin(&mut state, &mut default_handler)?;
                dirty = true;
            }
        }

        if state.run_scheduled(Instant::now()) > 0 {
            debug!("Fired scheduled speech");
        }

        let new_width = get_terminal_size(&io::stdin()).0;
        if new_width != width {
            width = new_width;
            dirty = true;
        }
        if dirty && state.running {
            draw(&state, width)?;
        }
    }

    state.shutdown();
    print!("\r\n");
    io::stdout().flush()?;
    Ok(())
}

/// Read one chunk of keyboard input and route it
fn handle_stdin(state: &mut State, default_handler: &mut DefaultKeyHandler) -> Result<()> {
    let mut buf = [0u8; 1024];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        info!("stdin closed");
        state.shutdown();
        return Ok(());
    }

    let action = dispatch(&buf[..n], state, default_handler, Instant::now())?;
    debug!("Input {:?} -> {:?}", &buf[..n], action);
    Ok(())
}

fn draw(state: &State, width: u16) -> Result<()> {
    let mut out = io::stdout();
    out.write_all(view::render(state, width).as_bytes())?;
    out.flush()?;
    Ok(())
}
