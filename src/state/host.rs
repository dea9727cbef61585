use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::io;

pub const SHARE_TITLE: &str = "VapeLume Kazino";
pub const SHARE_TEXT: &str = "Присоединяйся к VapeLume Kazino!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn referral(url: &str) -> Self {
        Self { title: SHARE_TITLE.to_string(), text: SHARE_TEXT.to_string(), url: url.to_string() }
    }
}

/// Capabilities the launching environment may offer.
pub trait Host: Send {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String>;

    fn can_share(&self) -> bool {
        false
    }

    fn share(&mut self, payload: &SharePayload) -> Result<(), String> {
        Err(format!("sharing is not supported here ({})", payload.url))
    }
}

/// Terminal host: clipboard through an OSC 52 escape sequence, no share sheet.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl Host for TerminalHost {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String> {
        execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))
            .map_err(|e| format!("clipboard write failed: {e}"))
    }
}
