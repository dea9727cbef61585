pub mod client;
pub mod wire;

use std::fmt;

// ---------------------------------------------------------------------------
// Domain types, independent of the backend wire format
// ---------------------------------------------------------------------------

/// Everything the `/user` endpoint knows about the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub balance: f64,
    pub level: u32,
    pub rank: String,
    pub xp: f64,
    pub xp_needed: f64,
    pub achievements: Vec<Achievement>,
    pub referral_link: String,
    pub referral_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Achievement {
    pub name: String,
    pub icon: Option<String>, // None renders as the default trophy
}

/// Outcome of a single bet as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameOutcome {
    /// Negative when the game takes coins beyond the stake (jewish roulette).
    pub winnings: f64,
    pub new_balance: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurnOutcome {
    pub xp_gained: f64,
}

/// Game selector, sent verbatim as the `/game/{type}` path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameKind {
    Roulette,
    Play,
    Russian,
    Jewish,
    Dice,
    Slots,
    Other(String),
}

impl GameKind {
    /// Games offered on the selection screen, in display order.
    pub const ALL: [GameKind; 6] = [
        GameKind::Roulette,
        GameKind::Play,
        GameKind::Russian,
        GameKind::Jewish,
        GameKind::Dice,
        GameKind::Slots,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "roulette" => GameKind::Roulette,
            "play" => GameKind::Play,
            "russian" => GameKind::Russian,
            "jewish" => GameKind::Jewish,
            "dice" => GameKind::Dice,
            "slots" => GameKind::Slots,
            other => GameKind::Other(other.to_owned()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            GameKind::Roulette => "roulette",
            GameKind::Play => "play",
            GameKind::Russian => "russian",
            GameKind::Jewish => "jewish",
            GameKind::Dice => "dice",
            GameKind::Slots => "slots",
            GameKind::Other(tag) => tag,
        }
    }

    /// Screen title for the game. Unknown tags get the generic label.
    pub fn label(&self) -> &'static str {
        match self {
            GameKind::Roulette => "Рулетка",
            GameKind::Play => "Кости",
            GameKind::Russian => "Русская рулетка",
            GameKind::Jewish => "Еврейская рулетка",
            GameKind::Dice => "Кубик",
            GameKind::Slots => "Слоты",
            GameKind::Other(_) => "Игра",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether a title is bought for good or rented for a number of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleKind {
    #[default]
    Permanent,
    Temporary,
}

impl TitleKind {
    /// Anything other than `permanent` is a rental.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "permanent" {
            TitleKind::Permanent
        } else {
            TitleKind::Temporary
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            TitleKind::Permanent => "permanent",
            TitleKind::Temporary => "temporary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Title {
    pub name: &'static str,
    pub price: u64,
    pub kind: TitleKind,
    pub duration_days: Option<u32>,
}

const fn permanent(name: &'static str, price: u64) -> Title {
    Title { name, price, kind: TitleKind::Permanent, duration_days: None }
}

const fn rental(name: &'static str, price: u64, days: u32) -> Title {
    Title { name, price, kind: TitleKind::Temporary, duration_days: Some(days) }
}

/// Titles the backend accepts on `/title/buy`. Names must match its tables exactly.
pub const TITLE_CATALOG: &[Title] = &[
    permanent("Босс", 50_000),
    permanent("Король", 25_000),
    permanent("Президент", 15_000),
    permanent("Мэр", 10_000),
    permanent("Бургомистр", 5_000),
    permanent("Владыка лудомани", 30_000),
    rental("Титул на 1 день", 1_000, 1),
    rental("Титул на 3 дня", 2_500, 3),
    rental("Титул на 7 дней", 5_000, 7),
    rental("Титул на 30 дней", 15_000, 30),
];

/// Render a backend amount the way the web client did: integral values
/// without a fractional part, everything else as-is.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
