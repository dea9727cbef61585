use serde::Deserialize;
use url::form_urlencoded;

/// Display record embedded in the `user` field of Telegram's `initData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TelegramUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Host-supplied identity. The token is opaque to the client and forwarded
/// verbatim; the backend is the only party that validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub init_data: String,
    pub user: Option<TelegramUser>,
}

impl Identity {
    /// Returns `None` for an empty token.
    pub fn from_init_data(init_data: &str) -> Option<Self> {
        let init_data = init_data.trim();
        if init_data.is_empty() {
            return None;
        }

        let user = form_urlencoded::parse(init_data.as_bytes())
            .find(|(key, _)| key == "user")
            .and_then(|(_, value)| match serde_json::from_str::<TelegramUser>(&value) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("initData user record is malformed: {e}");
                    None
                }
            });

        Some(Self { init_data: init_data.to_owned(), user })
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.first_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Игрок")
    }
}
