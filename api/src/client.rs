use crate::wire::{
    AuthRequest, BetRequest, BurnRequest, BurnResponse, CaseResponse, GameResponse, Status,
    TitleRequest, TitleResponse, UserResponse,
};
use crate::{Achievement, BurnOutcome, GameKind, GameOutcome, Profile, TitleKind, format_amount};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Client for the Kazino backend. Every call is a JSON `POST` carrying the
/// player's `initData`; the backend validates it.
#[derive(Debug, Clone)]
pub struct KazinoApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for KazinoApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The backend answered `success: false`.
    Rejected { message: Option<String> },
    Other(String),
}

impl ApiError {
    /// Backend-provided message, if this is a logical rejection that carried one.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Rejected { message: Some(msg) } => write!(f, "Rejected: {msg}"),
            ApiError::Rejected { message: None } => write!(f, "Rejected without message"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl KazinoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("lume-kazino/0.1 (terminal client)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout. Without one the transport default applies.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /user`: balance, level, xp, achievements and referral info.
    pub async fn fetch_user(&self, init_data: &str) -> ApiResult<Profile> {
        let raw: UserResponse = self.post("/user", &AuthRequest { init_data }).await?;
        check(raw.status)?;
        let data = raw
            .data
            .ok_or_else(|| ApiError::Other("user response without data".into()))?;

        Ok(Profile {
            balance: data.balance,
            level: data.level,
            rank: data.rank,
            xp: data.xp,
            xp_needed: data.xp_needed,
            achievements: data
                .achievements
                .into_iter()
                .map(|a| Achievement {
                    name: a.name,
                    icon: a.icon.filter(|icon| !icon.is_empty()),
                })
                .collect(),
            referral_link: data.referral_link,
            referral_count: data.referral_count,
        })
    }

    /// `POST /game/{kind}`: place a bet. The backend owns every game rule.
    pub async fn play_game(
        &self,
        init_data: &str,
        kind: &GameKind,
        bet: u64,
    ) -> ApiResult<GameOutcome> {
        let path = format!("/game/{}", kind.tag());
        let raw: GameResponse = self.post(&path, &BetRequest { init_data, bet }).await?;
        check(raw.status)?;
        Ok(GameOutcome { winnings: raw.winnings, new_balance: raw.new_balance })
    }

    /// `POST /title/buy`: returns the backend's confirmation message, if any.
    pub async fn buy_title(
        &self,
        init_data: &str,
        title: &str,
        kind: TitleKind,
    ) -> ApiResult<Option<String>> {
        let body = TitleRequest { init_data, title, kind: kind.tag() };
        let raw: TitleResponse = self.post("/title/buy", &body).await?;
        let message = raw.status.message.clone();
        check(raw.status)?;
        Ok(message)
    }

    /// `POST /case/open`: returns the reward as display text.
    pub async fn open_case(&self, init_data: &str) -> ApiResult<String> {
        let raw: CaseResponse = self.post("/case/open", &AuthRequest { init_data }).await?;
        check(raw.status)?;
        Ok(reward_text(&raw.reward))
    }

    /// `POST /burn`: convert coins into xp at the backend's rate.
    pub async fn burn(&self, init_data: &str, amount: u64) -> ApiResult<BurnOutcome> {
        let raw: BurnResponse = self.post("/burn", &BurnRequest { init_data, amount }).await?;
        check(raw.status)?;
        Ok(BurnOutcome { xp_gained: raw.xp_gained })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.post(&url).json(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        match response.error_for_status_ref().err() {
            None => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url)),
            Some(e) => {
                // The backend reports validation failures as 400/401 with the
                // usual envelope; surface those as rejections.
                let text = response.text().await.unwrap_or_default();
                match serde_json::from_str::<Status>(&text) {
                    Ok(status) if !status.success => Err(ApiError::Rejected { message: status.message }),
                    _ => Err(ApiError::Api(e, url)),
                }
            }
        }
    }
}

fn check(status: Status) -> ApiResult<()> {
    if status.success {
        Ok(())
    } else {
        Err(ApiError::Rejected { message: status.message })
    }
}

fn reward_text(reward: &Value) -> String {
    match reward {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_amount).unwrap_or_else(|| n.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
