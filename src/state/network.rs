use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use lume_api::client::{ApiResult, KazinoApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Request bookkeeping shared by the worker, request tasks and the spinner.
/// At most one spinner task runs at a time.
#[derive(Debug, Default)]
struct Activity {
    in_flight: AtomicUsize,
    animating: AtomicBool,
    last_ok: AtomicBool,
}

impl Activity {
    /// Registers a request. True when no spinner is running and one must start.
    fn begin(&self) -> bool {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        !self.animating.swap(true, Ordering::SeqCst)
    }

    fn finish(&self, ok: bool) {
        self.last_ok.store(ok, Ordering::SeqCst);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Called by the spinner once idle. True when a request arrived in the
    /// meantime and the same spinner must keep running.
    fn release(&self) -> bool {
        self.animating.store(false, Ordering::SeqCst);
        self.busy() && !self.animating.swap(true, Ordering::SeqCst)
    }
}

/// Runs every request as its own task. Nothing is cancelled or sequenced:
/// responses reach the UI loop in whatever order they complete.
pub struct NetworkWorker {
    client: KazinoApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    activity: Arc<Activity>,
}

impl NetworkWorker {
    pub fn new(
        client: KazinoApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { client, requests, responses, activity: Arc::new(Activity::default()) }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if self.activity.begin() {
                start_loading_animation(self.responses.clone(), self.activity.clone()).await;
            }

            let client = self.client.clone();
            let responses = self.responses.clone();
            let activity = self.activity.clone();

            tokio::spawn(async move {
                let action = request.action();
                debug!("sending {action:?} request");
                let result = execute(&client, request).await;
                let is_ok = result.is_ok();
                let response = result.unwrap_or_else(|error| NetworkResponse::Failed { action, error });

                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
                activity.finish(is_ok);
            });
        }
    }
}

async fn execute(client: &KazinoApi, request: NetworkRequest) -> ApiResult<NetworkResponse> {
    match request {
        NetworkRequest::LoadUser { init_data } => {
            let profile = client.fetch_user(&init_data).await?;
            Ok(NetworkResponse::UserLoaded { profile })
        }
        NetworkRequest::PlayGame { init_data, kind, bet } => {
            let outcome = client.play_game(&init_data, &kind, bet).await?;
            Ok(NetworkResponse::GamePlayed { outcome })
        }
        NetworkRequest::BuyTitle { init_data, title, kind } => {
            let confirmation = client.buy_title(&init_data, &title, kind).await?;
            if let Some(message) = confirmation {
                debug!("title purchase confirmed: {message}");
            }
            Ok(NetworkResponse::TitleBought { title, kind })
        }
        NetworkRequest::OpenCase { init_data } => {
            let reward = client.open_case(&init_data).await?;
            Ok(NetworkResponse::CaseOpened { reward })
        }
        NetworkRequest::Burn { init_data, amount } => {
            let outcome = client.burn(&init_data, amount).await?;
            Ok(NetworkResponse::CoinsBurned { amount, outcome })
        }
    }
}

async fn start_loading_animation(responses: mpsc::Sender<NetworkResponse>, activity: Arc<Activity>) {
    let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state })
        .await;

    tokio::spawn(async move {
        let mut spinner_index = 1;
        let mut interval = tokio::time::interval(Duration::from_millis(80));
        loop {
            interval.tick().await;
            if activity.busy() {
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
                continue;
            }

            // Sent before the flag is released: a later spinner always reports after this.
            let spinner_char = if activity.last_ok.load(Ordering::SeqCst) { ' ' } else { ERROR_CHAR };
            let _ = responses
                .send(NetworkResponse::LoadingStateChanged {
                    loading_state: LoadingState { is_loading: false, spinner_char },
                })
                .await;
            if !activity.release() {
                break;
            }
        }
    });
}
