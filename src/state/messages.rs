use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use lume_api::client::ApiError;
use lume_api::{BurnOutcome, GameKind, GameOutcome, Profile, TitleKind};

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkRequest {
    LoadUser { init_data: String },
    PlayGame { init_data: String, kind: GameKind, bet: u64 },
    BuyTitle { init_data: String, title: String, kind: TitleKind },
    OpenCase { init_data: String },
    Burn { init_data: String, amount: u64 },
}

impl NetworkRequest {
    pub fn action(&self) -> Action {
        match self {
            NetworkRequest::LoadUser { .. } => Action::LoadUser,
            NetworkRequest::PlayGame { .. } => Action::PlayGame,
            NetworkRequest::BuyTitle { .. } => Action::BuyTitle,
            NetworkRequest::OpenCase { .. } => Action::OpenCase,
            NetworkRequest::Burn { .. } => Action::Burn,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    LoadUser,
    PlayGame,
    BuyTitle,
    OpenCase,
    Burn,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    UserLoaded { profile: Profile },
    GamePlayed { outcome: GameOutcome },
    TitleBought { title: String, kind: TitleKind },
    CaseOpened { reward: String },
    CoinsBurned { amount: u64, outcome: BurnOutcome },
    Failed { action: Action, error: ApiError },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
