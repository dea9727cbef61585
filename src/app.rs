use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, GameResultView, ResultTone};
use crate::state::host::{Host, SharePayload};
use crate::state::identity::Identity;
use crate::state::messages::{Action, NetworkRequest, NetworkResponse};
use crate::state::navigation::{NavEvent, Screen, transition};
use log::{debug, error};
use lume_api::client::ApiError;
use lume_api::{BurnOutcome, GameOutcome, Profile, TitleKind, format_amount};

pub const MSG_INVALID_BET: &str = "Пожалуйста, введите корректную ставку";
pub const MSG_INVALID_BURN: &str = "Пожалуйста, введите корректную сумму";
pub const MSG_REQUEST_FAILED: &str = "Ошибка при выполнении запроса";
pub const MSG_GAME_LOST: &str = "Вы проиграли";
pub const MSG_TITLE_FAILED: &str = "Ошибка при покупке титула";
pub const MSG_CASE_FAILED: &str = "Ошибка при открытии кейса";
pub const MSG_BURN_FAILED: &str = "Ошибка при сжигании монет";
pub const MSG_LINK_COPIED: &str = "Ссылка скопирована в буфер обмена";

/// The view controller. Every handler either mutates display state directly
/// or hands back the request the caller should dispatch.
pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    host: Box<dyn Host>,
}

impl App {
    pub fn new(settings: AppSettings, host: Box<dyn Host>) -> Self {
        let identity = settings.init_data.as_deref().and_then(Identity::from_init_data);

        let app = Self { state: AppState::new(identity), settings, host };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    /// Initial profile load, issued once after the UI is up.
    pub fn startup_request(&self) -> Option<NetworkRequest> {
        if self.state.identity.is_none() {
            error!("Identity missing: start the client with the Telegram initData (KAZINO_INIT_DATA)");
            return None;
        }
        self.load_user_data()
    }

    fn init_data(&self) -> Option<String> {
        match &self.state.identity {
            Some(identity) => Some(identity.init_data.clone()),
            None => {
                error!("Telegram initData is missing; request not sent");
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Screen navigation
    // -----------------------------------------------------------------------

    pub fn show_screen(&mut self, screen: Screen) {
        self.state.screen = screen;
    }

    /// Apply a button press through the navigation table. Opening the profile
    /// also refreshes it.
    pub fn navigate(&mut self, event: NavEvent) -> Option<NetworkRequest> {
        let to = transition(self.state.screen, &event)?;
        if let NavEvent::SelectGame(kind) = event {
            self.state.game.open(kind);
        }
        self.show_screen(to);

        if to == Screen::Profile {
            return self.load_user_data();
        }
        None
    }

    pub fn open_selected_game(&mut self) -> Option<NetworkRequest> {
        let kind = self.state.play.selected_game();
        self.navigate(NavEvent::SelectGame(kind))
    }

    // -----------------------------------------------------------------------
    // Backend actions
    // -----------------------------------------------------------------------

    pub fn load_user_data(&self) -> Option<NetworkRequest> {
        let init_data = self.init_data()?;
        Some(NetworkRequest::LoadUser { init_data })
    }

    pub fn play_game(&mut self) -> Option<NetworkRequest> {
        let Some(bet) = self.state.game.bet.positive() else {
            self.state.alert = Some(MSG_INVALID_BET.to_string());
            return None;
        };
        let init_data = self.init_data()?;
        let kind = self
            .state
            .game
            .kind
            .clone()
            .unwrap_or_else(|| self.state.play.selected_game());
        Some(NetworkRequest::PlayGame { init_data, kind, bet })
    }

    pub fn buy_selected_title(&mut self) -> Option<NetworkRequest> {
        let title = self.state.titles.selected_title()?;
        self.buy_title(title.name, title.kind)
    }

    pub fn buy_title(&mut self, title: &str, kind: TitleKind) -> Option<NetworkRequest> {
        let init_data = self.init_data()?;
        Some(NetworkRequest::BuyTitle { init_data, title: title.to_string(), kind })
    }

    pub fn open_case(&mut self) -> Option<NetworkRequest> {
        let init_data = self.init_data()?;
        Some(NetworkRequest::OpenCase { init_data })
    }

    pub fn burn_coins(&mut self) -> Option<NetworkRequest> {
        let Some(amount) = self.state.bonuses.burn.positive() else {
            self.state.alert = Some(MSG_INVALID_BURN.to_string());
            return None;
        };
        let init_data = self.init_data()?;
        Some(NetworkRequest::Burn { init_data, amount })
    }

    // -----------------------------------------------------------------------
    // Referral sharing (host only, no backend calls)
    // -----------------------------------------------------------------------

    pub fn copy_referral_link(&mut self) {
        let link = self.state.profile.referral_link.clone();
        match self.host.copy_to_clipboard(&link) {
            Ok(()) => self.state.alert = Some(MSG_LINK_COPIED.to_string()),
            Err(e) => error!("Failed to copy referral link: {e}"),
        }
    }

    pub fn share_referral_link(&mut self) {
        if !self.host.can_share() {
            self.copy_referral_link();
            return;
        }
        let payload = SharePayload::referral(&self.state.profile.referral_link);
        if let Err(e) = self.host.share(&payload) {
            error!("Failed to share referral link: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Backend results
    // -----------------------------------------------------------------------

    /// Returns a follow-up request when the response calls for a profile resync.
    pub fn on_network_response(&mut self, response: NetworkResponse) -> Option<NetworkRequest> {
        match response {
            NetworkResponse::LoadingStateChanged { .. } => None,
            NetworkResponse::UserLoaded { profile } => {
                self.on_user_loaded(&profile);
                None
            }
            NetworkResponse::GamePlayed { outcome } => {
                self.on_game_played(outcome);
                None
            }
            NetworkResponse::TitleBought { title, kind } => {
                let verb = match kind {
                    TitleKind::Permanent => "купили",
                    TitleKind::Temporary => "арендовали",
                };
                self.state.alert = Some(format!("🎉 Вы {verb} титул \"{title}\"!"));
                self.load_user_data()
            }
            NetworkResponse::CaseOpened { reward } => {
                self.state.alert = Some(case_alert(&reward));
                self.load_user_data()
            }
            NetworkResponse::CoinsBurned { amount, outcome } => {
                self.on_coins_burned(amount, outcome);
                self.load_user_data()
            }
            NetworkResponse::Failed { action, error } => {
                self.on_failure(action, error);
                None
            }
        }
    }

    pub fn on_user_loaded(&mut self, profile: &Profile) {
        let name = self
            .state
            .identity
            .as_ref()
            .map(|i| i.display_name().to_string())
            .unwrap_or_default();
        debug!("profile synced: balance {}", format_amount(profile.balance));
        self.state.profile.apply(profile, &name);
    }

    pub fn on_game_played(&mut self, outcome: GameOutcome) {
        self.state.game.result = Some(GameResultView {
            text: format!("Вы выиграли {} LumeCoin!", format_amount(outcome.winnings)),
            tone: ResultTone::Win,
        });
        if let Some(balance) = outcome.new_balance {
            self.state.profile.main_balance = format_amount(balance);
        }
    }

    fn on_coins_burned(&mut self, amount: u64, outcome: BurnOutcome) {
        self.state.alert = Some(format!(
            "🔥 Вы сожгли {amount} монет и получили {} XP!",
            format_amount(outcome.xp_gained)
        ));
    }

    fn on_failure(&mut self, action: Action, error: ApiError) {
        let rejected = error.is_rejection();
        let message = error.rejection_message().map(str::to_string);
        if rejected {
            error!("{action:?} rejected by backend: {error}");
        } else {
            error!("{action:?} request failed: {error}");
        }

        let fallback = match action {
            // Profile failures only reach the log; displayed values stay as they were.
            Action::LoadUser => return,
            Action::PlayGame => {
                self.state.game.result = Some(if rejected {
                    GameResultView {
                        text: message.unwrap_or_else(|| MSG_GAME_LOST.to_string()),
                        tone: ResultTone::Loss,
                    }
                } else {
                    GameResultView { text: MSG_REQUEST_FAILED.to_string(), tone: ResultTone::Neutral }
                });
                return;
            }
            Action::BuyTitle => MSG_TITLE_FAILED,
            Action::OpenCase => MSG_CASE_FAILED,
            Action::Burn => MSG_BURN_FAILED,
        };

        self.state.alert = Some(if rejected {
            message.unwrap_or_else(|| fallback.to_string())
        } else {
            MSG_REQUEST_FAILED.to_string()
        });
    }

    // -----------------------------------------------------------------------
    // Overlays
    // -----------------------------------------------------------------------

    pub fn dismiss_alert(&mut self) {
        self.state.alert = None;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

/// Numeric rewards are coins; descriptive ones ("120 LumeCoin", "150 XP")
/// already name their unit.
fn case_alert(reward: &str) -> String {
    if reward.parse::<f64>().is_ok() {
        format!("🎁 Вы получили {reward} LumeCoin!")
    } else {
        format!("🎁 Вы получили {reward}!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_api::GameKind;
    use std::sync::{Arc, Mutex};

    const INIT_DATA: &str = "user=%7B%22id%22%3A7%2C%22first_name%22%3A%22Lume%22%7D&hash=ab";

    #[derive(Default)]
    struct HostLog {
        copied: Vec<String>,
        shared: Vec<SharePayload>,
    }

    struct FakeHost {
        log: Arc<Mutex<HostLog>>,
        can_share: bool,
        clipboard_works: bool,
        share_works: bool,
    }

    impl Host for FakeHost {
        fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String> {
            if !self.clipboard_works {
                return Err("denied".into());
            }
            self.log.lock().unwrap().copied.push(text.to_string());
            Ok(())
        }

        fn can_share(&self) -> bool {
            self.can_share
        }

        fn share(&mut self, payload: &SharePayload) -> Result<(), String> {
            if !self.share_works {
                return Err("share sheet dismissed".into());
            }
            self.log.lock().unwrap().shared.push(payload.clone());
            Ok(())
        }
    }

    fn app_with(init_data: Option<&str>, can_share: bool) -> (App, Arc<Mutex<HostLog>>) {
        let log = Arc::new(Mutex::new(HostLog::default()));
        let host = FakeHost { log: log.clone(), can_share, clipboard_works: true, share_works: true };
        let settings = AppSettings { init_data: init_data.map(str::to_string), ..AppSettings::default() };
        (App::new(settings, Box::new(host)), log)
    }

    fn app() -> App {
        app_with(Some(INIT_DATA), false).0
    }

    fn rejected(message: Option<&str>) -> ApiError {
        ApiError::Rejected { message: message.map(str::to_string) }
    }

    fn profile(balance: f64) -> Profile {
        Profile {
            balance,
            level: 1,
            rank: "Новичок".into(),
            xp: 30.0,
            xp_needed: 40.0,
            referral_link: "https://t.me/vapelumebot?start=ref7".into(),
            referral_count: 3,
            ..Profile::default()
        }
    }

    #[test]
    fn starts_on_main_and_loads_profile() {
        let app = app();
        assert_eq!(app.state.screen, Screen::Main);
        assert_eq!(
            app.startup_request(),
            Some(NetworkRequest::LoadUser { init_data: INIT_DATA.to_string() })
        );
    }

    #[test]
    fn no_identity_means_no_requests_at_all() {
        let (mut app, _) = app_with(None, false);
        assert_eq!(app.startup_request(), None);
        assert_eq!(app.load_user_data(), None);
        assert_eq!(app.open_case(), None);
        assert_eq!(app.buy_selected_title(), None);

        app.state.game.bet.value = "10".into();
        assert_eq!(app.play_game(), None);
        app.state.bonuses.burn.value = "10".into();
        assert_eq!(app.burn_coins(), None);

        app.navigate(NavEvent::Profile);
        assert_eq!(app.state.screen, Screen::Profile);
        // Missing identity is logged, never alerted.
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn profile_button_navigates_and_reloads() {
        let mut app = app();
        let request = app.navigate(NavEvent::Profile);
        assert_eq!(app.state.screen, Screen::Profile);
        assert!(matches!(request, Some(NetworkRequest::LoadUser { .. })));
    }

    #[test]
    fn game_back_returns_to_selection() {
        let mut app = app();
        app.navigate(NavEvent::Play);
        app.navigate(NavEvent::SelectGame(GameKind::Dice));
        assert_eq!(app.state.screen, Screen::Game);
        assert_eq!(app.state.game.title, "Кубик");
        app.navigate(NavEvent::Back);
        assert_eq!(app.state.screen, Screen::Play);
        app.navigate(NavEvent::Back);
        assert_eq!(app.state.screen, Screen::Main);
    }

    #[test]
    fn user_loaded_updates_both_balances() {
        let mut app = app();
        app.on_network_response(NetworkResponse::UserLoaded { profile: profile(120.0) });
        assert_eq!(app.state.profile.main_balance, "120");
        assert_eq!(app.state.profile.profile_balance, "120");
        assert_eq!(app.state.profile.user_name, "Lume");
        assert_eq!(app.state.profile.progress_label(), "75%");
    }

    #[test]
    fn failed_profile_load_keeps_previous_values() {
        let mut app = app();
        app.on_user_loaded(&profile(120.0));
        app.on_network_response(NetworkResponse::Failed {
            action: Action::LoadUser,
            error: rejected(Some("Invalid initData signature")),
        });
        app.on_network_response(NetworkResponse::Failed {
            action: Action::LoadUser,
            error: ApiError::Other("connection reset".into()),
        });
        assert_eq!(app.state.profile.main_balance, "120");
        assert_eq!(app.state.profile.rank, "Новичок");
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn zero_or_empty_bet_is_rejected_before_any_request() {
        let mut app = app();
        app.navigate(NavEvent::Play);
        app.navigate(NavEvent::SelectGame(GameKind::Dice));

        app.state.game.bet.value = "0".into();
        assert_eq!(app.play_game(), None);
        assert_eq!(app.state.alert.as_deref(), Some(MSG_INVALID_BET));

        app.dismiss_alert();
        app.state.game.bet.value.clear();
        assert_eq!(app.play_game(), None);
        assert_eq!(app.state.alert.as_deref(), Some(MSG_INVALID_BET));
    }

    #[test]
    fn valid_bet_targets_the_open_game() {
        let mut app = app();
        app.navigate(NavEvent::Play);
        app.navigate(NavEvent::SelectGame(GameKind::Slots));
        app.state.game.bet.value = "75".into();
        assert_eq!(
            app.play_game(),
            Some(NetworkRequest::PlayGame {
                init_data: INIT_DATA.to_string(),
                kind: GameKind::Slots,
                bet: 75
            })
        );
    }

    #[test]
    fn winning_game_updates_main_balance_from_response() {
        let mut app = app();
        app.on_user_loaded(&profile(150.0));
        app.on_network_response(NetworkResponse::GamePlayed {
            outcome: GameOutcome { winnings: 50.0, new_balance: Some(200.0) },
        });
        let result = app.state.game.result.as_ref().expect("result");
        assert!(result.text.contains("50"));
        assert_eq!(result.tone, ResultTone::Win);
        assert_eq!(app.state.profile.main_balance, "200");
    }

    #[test]
    fn lost_game_shows_backend_message_or_fallback() {
        let mut app = app();
        app.on_network_response(NetworkResponse::Failed {
            action: Action::PlayGame,
            error: rejected(Some("Insufficient balance")),
        });
        let result = app.state.game.result.clone().expect("result");
        assert_eq!(result.text, "Insufficient balance");
        assert_eq!(result.tone, ResultTone::Loss);

        app.on_network_response(NetworkResponse::Failed { action: Action::PlayGame, error: rejected(None) });
        assert_eq!(app.state.game.result.as_ref().unwrap().text, MSG_GAME_LOST);
    }

    #[test]
    fn transport_failure_during_game_shows_generic_text() {
        let mut app = app();
        app.on_user_loaded(&profile(150.0));
        app.on_network_response(NetworkResponse::Failed {
            action: Action::PlayGame,
            error: ApiError::Other("timed out".into()),
        });
        let result = app.state.game.result.as_ref().expect("result");
        assert_eq!(result.text, MSG_REQUEST_FAILED);
        assert_eq!(result.tone, ResultTone::Neutral);
        assert_eq!(app.state.profile.main_balance, "150");
    }

    #[test]
    fn title_alert_depends_on_title_kind() {
        let mut app = app();
        let follow_up = app.on_network_response(NetworkResponse::TitleBought {
            title: "Мэр".into(),
            kind: TitleKind::Permanent,
        });
        assert!(app.state.alert.as_deref().unwrap().contains("купили"));
        assert!(matches!(follow_up, Some(NetworkRequest::LoadUser { .. })));

        app.on_network_response(NetworkResponse::TitleBought {
            title: "Титул на 1 день".into(),
            kind: TitleKind::from_tag("temporary"),
        });
        assert!(app.state.alert.as_deref().unwrap().contains("арендовали"));
    }

    #[test]
    fn selected_title_is_sent_with_its_kind() {
        let mut app = app();
        app.state.titles.selected = 6;
        match app.buy_selected_title() {
            Some(NetworkRequest::BuyTitle { title, kind, .. }) => {
                assert_eq!(title, "Титул на 1 день");
                assert_eq!(kind, TitleKind::Temporary);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn case_and_burn_success_resync_profile() {
        let mut app = app();
        let follow_up = app.on_network_response(NetworkResponse::CaseOpened { reward: "120 LumeCoin".into() });
        assert_eq!(app.state.alert.as_deref(), Some("🎁 Вы получили 120 LumeCoin!"));
        assert!(follow_up.is_some());

        let follow_up = app.on_network_response(NetworkResponse::CoinsBurned {
            amount: 40,
            outcome: BurnOutcome { xp_gained: 80.0 },
        });
        assert_eq!(app.state.alert.as_deref(), Some("🔥 Вы сожгли 40 монет и получили 80 XP!"));
        assert!(follow_up.is_some());
    }

    #[test]
    fn numeric_case_reward_is_labelled_as_coins() {
        assert_eq!(case_alert("150"), "🎁 Вы получили 150 LumeCoin!");
        assert_eq!(case_alert("150 XP"), "🎁 Вы получили 150 XP!");
    }

    #[test]
    fn secondary_failures_alert_message_or_fallback() {
        let mut app = app();
        app.on_network_response(NetworkResponse::Failed { action: Action::OpenCase, error: rejected(None) });
        assert_eq!(app.state.alert.as_deref(), Some(MSG_CASE_FAILED));

        app.on_network_response(NetworkResponse::Failed {
            action: Action::Burn,
            error: rejected(Some("Insufficient balance")),
        });
        assert_eq!(app.state.alert.as_deref(), Some("Insufficient balance"));

        app.on_network_response(NetworkResponse::Failed {
            action: Action::BuyTitle,
            error: ApiError::Other("offline".into()),
        });
        assert_eq!(app.state.alert.as_deref(), Some(MSG_REQUEST_FAILED));
    }

    #[test]
    fn burn_requires_positive_amount() {
        let mut app = app();
        app.state.bonuses.burn.value = "0".into();
        assert_eq!(app.burn_coins(), None);
        assert_eq!(app.state.alert.as_deref(), Some(MSG_INVALID_BURN));

        app.state.bonuses.burn.value = "40".into();
        assert_eq!(
            app.burn_coins(),
            Some(NetworkRequest::Burn { init_data: INIT_DATA.to_string(), amount: 40 })
        );
    }

    #[test]
    fn share_falls_back_to_copy_without_share_capability() {
        let (mut app, log) = app_with(Some(INIT_DATA), false);
        app.on_user_loaded(&profile(1.0));
        app.share_referral_link();
        let log = log.lock().unwrap();
        assert_eq!(log.copied, vec!["https://t.me/vapelumebot?start=ref7".to_string()]);
        assert!(log.shared.is_empty());
        assert_eq!(app.state.alert.as_deref(), Some(MSG_LINK_COPIED));
    }

    #[test]
    fn share_uses_host_share_when_available() {
        let (mut app, log) = app_with(Some(INIT_DATA), true);
        app.on_user_loaded(&profile(1.0));
        app.share_referral_link();
        let log = log.lock().unwrap();
        assert_eq!(log.shared.len(), 1);
        assert_eq!(log.shared[0].url, "https://t.me/vapelumebot?start=ref7");
        assert!(log.copied.is_empty());
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn failed_copy_is_logged_not_alerted() {
        let log = Arc::new(Mutex::new(HostLog::default()));
        let host = FakeHost { log, can_share: false, clipboard_works: false, share_works: true };
        let settings = AppSettings { init_data: Some(INIT_DATA.into()), ..AppSettings::default() };
        let mut app = App::new(settings, Box::new(host));
        app.copy_referral_link();
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn failed_share_is_logged_without_alert_or_copy() {
        let log = Arc::new(Mutex::new(HostLog::default()));
        let host = FakeHost { log: log.clone(), can_share: true, clipboard_works: true, share_works: false };
        let settings = AppSettings { init_data: Some(INIT_DATA.into()), ..AppSettings::default() };
        let mut app = App::new(settings, Box::new(host));
        app.on_user_loaded(&profile(1.0));
        app.share_referral_link();
        let log = log.lock().unwrap();
        assert!(log.shared.is_empty());
        assert!(log.copied.is_empty());
        assert!(app.state.alert.is_none());
    }
}
