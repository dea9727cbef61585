mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{
    AppSettings, ENV_API_URL, ENV_INIT_DATA, ENV_LOG_LEVEL, ENV_TIMEOUT_SECS,
};
use crate::state::host::TerminalHost;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use lume_api::client::KazinoApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(settings) = handle_cli_args(AppSettings::load()) else {
        return Ok(());
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let client = KazinoApi::new(settings.api_url.clone()).with_timeout(settings.timeout);
    let app = Arc::new(Mutex::new(App::new(settings, Box::new(TerminalHost))));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Trigger the profile load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

/// Applies command-line overrides. Returns `None` when the process should
/// exit after printing (help, version).
fn handle_cli_args(mut settings: AppSettings) -> Option<AppSettings> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("lume-kazino {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--api-url" => settings.api_url = expect_value(&arg, args.next()),
            "--init-data" => settings.init_data = Some(expect_value(&arg, args.next())),
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        }
    }
    Some(settings)
}

fn expect_value(flag: &str, value: Option<String>) -> String {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => v,
        None => {
            eprintln!("{flag} requires a value\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> String {
    format!(
        "lume-kazino - VapeLume Kazino terminal client

Usage:
  lume-kazino [--api-url URL] [--init-data INIT_DATA]
  lume-kazino --help
  lume-kazino --version

Environment:
  {ENV_API_URL}       Backend base URL (default http://127.0.0.1:5000/api)
  {ENV_INIT_DATA}     Telegram WebApp initData identifying the player
  {ENV_LOG_LEVEL}     error | warn | info | debug | trace
  {ENV_TIMEOUT_SECS}  Request timeout in seconds (default: none)"
    )
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &network_requests, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let request = app.lock().await.startup_request();
            if let Some(request) = request {
                let _ = network_requests.send(request).await;
            }
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) {
    if let NetworkResponse::LoadingStateChanged { loading_state } = response {
        *loading = loading_state;
        return;
    }

    let follow_up = app.lock().await.on_network_response(response);
    if let Some(request) = follow_up
        && network_requests.send(request).await.is_err()
    {
        error!("network worker stopped; profile resync dropped");
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = match tokio::task::spawn_blocking(crossterm_event::read).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                error!("terminal input failed: {e}");
                continue;
            }
            Err(_) => break,
        };

        let ui_event = match event {
            Event::Key(key_event) if key_event.kind == crossterm_event::KeyEventKind::Press => {
                Some(UiEvent::KeyPressed(key_event))
            }
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
