/// Wire types for the VapeLume Kazino backend.
/// Every endpoint answers with a JSON object carrying `success` and, on
/// failure, an optional human-readable `message`.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Default, Debug)]
pub struct Status {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Serialize, Debug)]
pub struct AuthRequest<'a> {
    #[serde(rename = "initData")]
    pub init_data: &'a str,
}

#[derive(Serialize, Debug)]
pub struct BetRequest<'a> {
    #[serde(rename = "initData")]
    pub init_data: &'a str,
    pub bet: u64,
}

#[derive(Serialize, Debug)]
pub struct TitleRequest<'a> {
    #[serde(rename = "initData")]
    pub init_data: &'a str,
    pub title: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

#[derive(Serialize, Debug)]
pub struct BurnRequest<'a> {
    #[serde(rename = "initData")]
    pub init_data: &'a str,
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct UserResponse {
    #[serde(flatten)]
    pub status: Status,
    /// Absent on failure.
    pub data: Option<WireProfile>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireProfile {
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub xp: f64,
    #[serde(default)]
    pub xp_needed: f64,
    #[serde(default)]
    pub achievements: Vec<WireAchievement>,
    #[serde(default)]
    pub referral_link: String,
    #[serde(default)]
    pub referral_count: u32,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireAchievement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct GameResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub winnings: f64,
    pub new_balance: Option<f64>,
}

#[derive(Deserialize, Default, Debug)]
pub struct TitleResponse {
    #[serde(flatten)]
    pub status: Status,
}

#[derive(Deserialize, Default, Debug)]
pub struct CaseResponse {
    #[serde(flatten)]
    pub status: Status,
    /// A string like "120 LumeCoin" from the reference backend, but numbers are accepted.
    #[serde(default)]
    pub reward: Value,
}

#[derive(Deserialize, Default, Debug)]
pub struct BurnResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub xp_gained: f64,
}
