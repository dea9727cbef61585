use crate::state::identity::Identity;
use crate::state::navigation::Screen;
use chrono::Local;
use lume_api::{GameKind, Profile, TITLE_CATALOG, Title, format_amount};

pub const DEFAULT_ACHIEVEMENT_ICON: &str = "🏆";
const MAX_INPUT_DIGITS: usize = 12;

// ---------------------------------------------------------------------------
// Amount inputs (bet, burn)
// ---------------------------------------------------------------------------

/// Parse the leading integer of `input`: optional whitespace, optional sign,
/// then digits. Anything without leading digits is absent.
pub fn parse_amount(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Only a strictly positive amount may be sent to the backend.
pub fn positive_amount(input: &str) -> Option<u64> {
    parse_amount(input).filter(|v| *v > 0).map(|v| v as u64)
}

#[derive(Debug, Default, Clone)]
pub struct AmountInput {
    pub value: String,
}

impl AmountInput {
    pub fn push(&mut self, ch: char) {
        if ch.is_ascii_digit() && self.value.len() < MAX_INPUT_DIGITS {
            self.value.push(ch);
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn positive(&self) -> Option<u64> {
        positive_amount(&self.value)
    }
}

// ---------------------------------------------------------------------------
// Profile display fields
// ---------------------------------------------------------------------------

/// Share of the current level completed, clamped to `[0, 100]`.
pub fn xp_progress_percent(xp: f64, xp_needed: f64) -> f64 {
    if xp_needed <= 0.0 || !xp_needed.is_finite() || !xp.is_finite() {
        return 0.0;
    }
    (xp / xp_needed * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AchievementBadge {
    pub icon: String,
    pub name: String,
}

/// Everything the screens show about the player. Each field is only ever
/// written from a complete backend response.
#[derive(Debug, Default)]
pub struct ProfileView {
    /// Balance on the main screen; also updated by game results.
    pub main_balance: String,
    /// Balance on the profile screen.
    pub profile_balance: String,
    pub user_name: String,
    pub level: String,
    pub rank: String,
    pub xp: String,
    pub xp_needed: String,
    pub xp_progress: f64,
    pub achievements: Vec<AchievementBadge>,
    pub referral_link: String,
    pub referral_count: String,
    pub synced_at: Option<String>,
}

impl ProfileView {
    pub fn apply(&mut self, profile: &Profile, user_name: &str) {
        let balance = format_amount(profile.balance);
        self.main_balance = balance.clone();
        self.profile_balance = balance;
        self.user_name = user_name.to_string();
        self.level = profile.level.to_string();
        self.rank = profile.rank.clone();
        self.xp = format_amount(profile.xp);
        self.xp_needed = format_amount(profile.xp_needed);
        self.xp_progress = xp_progress_percent(profile.xp, profile.xp_needed);
        self.achievements = profile
            .achievements
            .iter()
            .map(|a| AchievementBadge {
                icon: a.icon.clone().unwrap_or_else(|| DEFAULT_ACHIEVEMENT_ICON.to_string()),
                name: a.name.clone(),
            })
            .collect();
        self.referral_link = profile.referral_link.clone();
        self.referral_count = profile.referral_count.to_string();
        self.synced_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn progress_label(&self) -> String {
        format!("{:.0}%", self.xp_progress)
    }
}

// ---------------------------------------------------------------------------
// Play / game screens
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlayMenuState {
    pub selected: usize,
}

impl PlayMenuState {
    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(GameKind::ALL.len() - 1);
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_game(&self) -> GameKind {
        GameKind::ALL[self.selected.min(GameKind::ALL.len() - 1)].clone()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultTone {
    Win,
    Loss,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameResultView {
    pub text: String,
    pub tone: ResultTone,
}

#[derive(Debug, Default)]
pub struct GameView {
    pub kind: Option<GameKind>,
    pub title: String,
    pub bet: AmountInput,
    pub result: Option<GameResultView>,
}

impl GameView {
    pub fn open(&mut self, kind: GameKind) {
        self.title = kind.label().to_string();
        self.kind = Some(kind);
        self.result = None;
    }
}

// ---------------------------------------------------------------------------
// Titles / bonuses
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TitlesState {
    pub selected: usize,
}

impl TitlesState {
    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(TITLE_CATALOG.len().saturating_sub(1));
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_title(&self) -> Option<&'static Title> {
        TITLE_CATALOG.get(self.selected)
    }
}

#[derive(Debug, Default)]
pub struct BonusesState {
    pub burn: AmountInput,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    /// Acquired once at startup and never replaced.
    pub identity: Option<Identity>,
    pub profile: ProfileView,
    pub play: PlayMenuState,
    pub game: GameView,
    pub titles: TitlesState,
    pub bonuses: BonusesState,
    /// Modal message; dismissed before any other input is handled.
    pub alert: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity, ..Self::default() }
    }
}
