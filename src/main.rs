use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use nocturne::app::cli::Args;
use nocturne::app::config::{AppConfig, UserConfig};
use nocturne::app::events::AppEvent;
use nocturne::app::input_handler::handle_key;
use nocturne::app::lyrics::ActiveLineTracker;
use nocturne::app::{AppState, Intent, Store, ViewState};
use nocturne::player::clock::{PlaybackTimer, Ticker};
use nocturne::player::demo::demo_tracks;
use nocturne::ui;
use nocturne::ui::terminal::{self, Tui};

const FRAME_PERIOD: Duration = Duration::from_millis(100);
const EVENT_CAPACITY: usize = 64;

fn init_tracing(level: &str, headless: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env("NOCTURNE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    }

    // The TUI owns stdout, so logs go to a file.
    let dir = AppConfig::get_log_dir();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "nocturne.log"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    human_panic::setup_panic!();

    // Config decides the log level, so report its errors once tracing is up.
    let (config, config_err) = match AppConfig::try_load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (UserConfig::default(), Some(e)),
    };
    let _guard = init_tracing(&config.log_level, args.headless.is_some())?;
    if let Some(e) = config_err {
        warn!("ignoring config: {e}");
    }

    let period = Duration::from_millis(args.tick_ms.unwrap_or(config.tick_ms).max(1));
    let mut state = AppState::new(demo_tracks())?
        .with_volume(config.volume)
        .with_lyrics_visible(config.show_lyrics);
    if let Some(id) = &args.track {
        state = state.with_current_track(id);
    }
    info!(track = %state.player.current_track_id, ?period, "starting");
    let store = Store::new(state);

    match args.headless {
        Some(ticks) => run_headless(store, ticks, period).await,
        None => run_tui(store, ViewState::new(config.keys), period).await,
    }
}

/// Play for `ticks` clock ticks, logging track and lyric changes, then print
/// the final snapshot.
async fn run_headless(mut store: Store, ticks: u32, period: Duration) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(EVENT_CAPACITY);
    let mut states = store.subscribe();
    let mut tracker = ActiveLineTracker::new();
    let mut track_id = store.state().player.current_track_id.clone();

    store.dispatch(Intent::PlayPause)?;
    let ticker = Ticker::spawn(period, tx, ());

    for _ in 0..ticks {
        if rx.recv().await.is_none() {
            break;
        }
        store.dispatch(Intent::Tick)?;

        if !states.has_changed()? {
            continue;
        }
        let state = states.borrow_and_update().clone();
        if state.player.current_track_id != track_id {
            track_id = state.player.current_track_id.clone();
            tracker.reset();
        }
        if let Some(Some(index)) = tracker.observe(state.active_lyric()) {
            let track = state.current_track()?;
            info!(track = %track.id, time = state.player.current_time, "{}", track.lyrics[index].text);
        }
    }
    drop(ticker);

    println!("{}", serde_json::to_string_pretty(&store.snapshot()?)?);
    Ok(())
}

async fn run_tui(store: Store, view: ViewState, period: Duration) -> Result<()> {
    let mut terminal = terminal::init().context("setting up terminal")?;
    terminal::install_panic_hook();

    let result = event_loop(&mut terminal, store, view, period).await;

    terminal::restore()?;
    result
}

async fn event_loop(terminal: &mut Tui, mut store: Store, mut view: ViewState, period: Duration) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(EVENT_CAPACITY);

    let input_tx = tx.clone();
    let input = tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if input_tx.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });
    let _frames = Ticker::spawn(FRAME_PERIOD, tx.clone(), AppEvent::Frame);
    let mut clock = PlaybackTimer::new();
    let mut notices = store.notices();
    view.sync(store.state());

    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::ui(f, store.state(), &view)) {
            break Err(e.into());
        }
        let Some(event) = rx.recv().await else {
            break Ok(());
        };

        let intents = match event {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_key(&mut view, store.state(), key)
            }
            AppEvent::Input(_) => Vec::new(),
            AppEvent::Tick(generation) if clock.accepts(generation) => vec![Intent::Tick],
            AppEvent::Tick(generation) => {
                debug!(generation, "dropping tick from a stopped clock");
                Vec::new()
            }
            AppEvent::Frame => {
                view.on_tick(Instant::now());
                Vec::new()
            }
        };

        for intent in intents {
            if let Err(e) = store.dispatch(intent) {
                view.show_toast(&e.to_string());
            }
        }
        while let Ok(notice) = notices.try_recv() {
            view.show_toast(&notice.to_string());
        }
        if view.sync(store.state()) {
            debug!(anchor = ?view.lyrics_anchor, "active lyric changed");
        }
        clock.sync(store.state().player.playing, period, &tx, AppEvent::Tick);

        if !view.is_running {
            break Ok(());
        }
    };

    drop(clock);
    input.abort();
    result
}
