use crate::app::App;
use crate::state::messages::NetworkRequest;
use crate::state::navigation::{NavEvent, Screen};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lume_api::GameKind;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Handled(Option<NetworkRequest>),
    Quit,
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let outcome = {
        let mut guard = app.lock().await;
        dispatch_key(&mut guard, key_event)
    };

    match outcome {
        KeyOutcome::Quit => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }
        KeyOutcome::Handled(Some(request)) => {
            let _ = network_requests.send(request).await;
        }
        KeyOutcome::Handled(None) => {}
    }
}

/// Applies one key press to the app and reports what the caller must do next.
pub fn dispatch_key(app: &mut App, key_event: KeyEvent) -> KeyOutcome {
    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        return KeyOutcome::Quit;
    }

    if app.state.alert.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc | Char(' ')) {
            app.dismiss_alert();
        }
        return KeyOutcome::Handled(None);
    }

    let request = match (app.state.screen, key_event.code) {
        // Global
        (_, Char('"')) => {
            app.toggle_show_logs();
            None
        }
        (Screen::Main, Char('q')) => return KeyOutcome::Quit,
        (_, KeyCode::F(11)) => {
            app.toggle_full_screen();
            None
        }

        // Main menu
        (Screen::Main, Char('p') | Char('0')) => app.navigate(NavEvent::Play),
        (Screen::Main, Char('1') | Char('f')) => app.navigate(NavEvent::Profile),
        (Screen::Main, Char('2') | Char('r')) => app.navigate(NavEvent::Referrals),
        (Screen::Main, Char('3') | Char('t')) => app.navigate(NavEvent::Titles),
        (Screen::Main, Char('4') | Char('b')) => app.navigate(NavEvent::Bonuses),

        // Game selection
        (Screen::Play, Char('j') | KeyCode::Down) => {
            app.state.play.next();
            None
        }
        (Screen::Play, Char('k') | KeyCode::Up) => {
            app.state.play.prev();
            None
        }
        (Screen::Play, Char(digit @ '1'..='6')) => {
            let index = digit as usize - '1' as usize;
            app.state.play.selected = index;
            app.navigate(NavEvent::SelectGame(GameKind::ALL[index].clone()))
        }
        (Screen::Play, KeyCode::Enter) => app.open_selected_game(),

        // Betting
        (Screen::Game, Char(ch)) if ch.is_ascii_digit() => {
            app.state.game.bet.push(ch);
            None
        }
        (Screen::Game, KeyCode::Backspace) => {
            app.state.game.bet.pop();
            None
        }
        (Screen::Game, KeyCode::Enter) => app.play_game(),

        // Profile
        (Screen::Profile, Char('r')) => app.load_user_data(),

        // Referrals
        (Screen::Referrals, Char('c')) => {
            app.copy_referral_link();
            None
        }
        (Screen::Referrals, Char('s')) => {
            app.share_referral_link();
            None
        }

        // Titles
        (Screen::Titles, Char('j') | KeyCode::Down) => {
            app.state.titles.next();
            None
        }
        (Screen::Titles, Char('k') | KeyCode::Up) => {
            app.state.titles.prev();
            None
        }
        (Screen::Titles, KeyCode::Enter) => app.buy_selected_title(),

        // Bonuses
        (Screen::Bonuses, Char('o')) => app.open_case(),
        (Screen::Bonuses, Char(ch)) if ch.is_ascii_digit() => {
            app.state.bonuses.burn.push(ch);
            None
        }
        (Screen::Bonuses, KeyCode::Backspace) => {
            app.state.bonuses.burn.pop();
            None
        }
        (Screen::Bonuses, KeyCode::Enter) => app.burn_coins(),

        // Back buttons
        (_, KeyCode::Esc | Char('q')) => app.navigate(NavEvent::Back),

        _ => None,
    };

    KeyOutcome::Handled(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MSG_INVALID_BET;
    use crate::state::app_settings::AppSettings;
    use crate::state::host::Host;

    const INIT_DATA: &str = "user=%7B%22id%22%3A7%2C%22first_name%22%3A%22Lume%22%7D&hash=ab";

    struct SilentHost;

    impl Host for SilentHost {
        fn copy_to_clipboard(&mut self, _text: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn shared_app() -> Arc<Mutex<App>> {
        let settings = AppSettings { init_data: Some(INIT_DATA.into()), ..AppSettings::default() };
        Arc::new(Mutex::new(App::new(settings, Box::new(SilentHost))))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press_all(
        keys: &[KeyCode],
        app: &Arc<Mutex<App>>,
        tx: &mpsc::Sender<NetworkRequest>,
    ) {
        for code in keys {
            handle_key_bindings(key(*code), app, tx).await;
        }
    }

    #[tokio::test]
    async fn open_alert_swallows_keys_until_dismissed() {
        let app = shared_app();
        let (tx, mut rx) = mpsc::channel(8);

        // Dice is the fifth game; an empty bet raises the validation alert.
        press_all(&[Char('p'), Char('5'), KeyCode::Enter], &app, &tx).await;
        assert_eq!(app.lock().await.state.alert.as_deref(), Some(MSG_INVALID_BET));

        press_all(&[Char('q'), Char('1'), KeyCode::Backspace], &app, &tx).await;
        {
            let guard = app.lock().await;
            assert_eq!(guard.state.screen, Screen::Game);
            assert!(guard.state.alert.is_some());
            assert!(guard.state.game.bet.value.is_empty());
        }

        press_all(&[KeyCode::Enter], &app, &tx).await;
        assert!(app.lock().await.state.alert.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn esc_and_space_also_dismiss_alerts() {
        let app = shared_app();
        let (tx, _rx) = mpsc::channel(8);
        for dismiss in [KeyCode::Esc, Char(' ')] {
            app.lock().await.state.alert = Some("x".into());
            press_all(&[dismiss], &app, &tx).await;
            assert!(app.lock().await.state.alert.is_none(), "{dismiss:?}");
        }
    }

    #[tokio::test]
    async fn typed_bet_is_sent_to_the_selected_game() {
        let app = shared_app();
        let (tx, mut rx) = mpsc::channel(8);

        press_all(&[Char('p'), Char('5'), Char('1'), Char('0'), KeyCode::Enter], &app, &tx).await;

        assert_eq!(
            rx.try_recv().ok(),
            Some(NetworkRequest::PlayGame { init_data: INIT_DATA.into(), kind: GameKind::Dice, bet: 10 })
        );
    }

    #[tokio::test]
    async fn q_on_game_returns_to_selection_then_main() {
        let app = shared_app();
        let (tx, _rx) = mpsc::channel(8);

        press_all(&[Char('p'), KeyCode::Enter], &app, &tx).await;
        assert_eq!(app.lock().await.state.screen, Screen::Game);

        press_all(&[Char('q')], &app, &tx).await;
        assert_eq!(app.lock().await.state.screen, Screen::Play);

        press_all(&[KeyCode::Esc], &app, &tx).await;
        assert_eq!(app.lock().await.state.screen, Screen::Main);
    }

    #[tokio::test]
    async fn j_k_move_the_game_cursor_before_enter() {
        let app = shared_app();
        let (tx, mut rx) = mpsc::channel(8);

        press_all(&[Char('p'), Char('j'), Char('j'), Char('k'), KeyCode::Enter], &app, &tx).await;
        assert_eq!(app.lock().await.state.game.kind, Some(GameKind::ALL[1].clone()));

        press_all(&[Char('7'), KeyCode::Enter], &app, &tx).await;
        match rx.try_recv() {
            Ok(NetworkRequest::PlayGame { kind, bet, .. }) => {
                assert_eq!(kind, GameKind::ALL[1]);
                assert_eq!(bet, 7);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn profile_key_navigates_and_refreshes() {
        let app = shared_app();
        let (tx, mut rx) = mpsc::channel(8);

        press_all(&[Char('1')], &app, &tx).await;
        assert_eq!(app.lock().await.state.screen, Screen::Profile);
        assert!(matches!(rx.try_recv(), Ok(NetworkRequest::LoadUser { .. })));

        press_all(&[Char('r')], &app, &tx).await;
        assert!(matches!(rx.try_recv(), Ok(NetworkRequest::LoadUser { .. })));
    }

    #[tokio::test]
    async fn burn_amount_is_edited_with_digits_and_backspace() {
        let app = shared_app();
        let (tx, mut rx) = mpsc::channel(8);

        press_all(
            &[Char('4'), Char('2'), Char('5'), Char('9'), KeyCode::Backspace, KeyCode::Enter],
            &app,
            &tx,
        )
        .await;

        assert_eq!(app.lock().await.state.screen, Screen::Bonuses);
        assert_eq!(rx.try_recv().ok(), Some(NetworkRequest::Burn { init_data: INIT_DATA.into(), amount: 25 }));

        press_all(&[Char('o')], &app, &tx).await;
        assert!(matches!(rx.try_recv(), Ok(NetworkRequest::OpenCase { .. })));
    }

    #[test]
    fn q_quits_only_from_main() {
        let settings = AppSettings { init_data: Some(INIT_DATA.into()), ..AppSettings::default() };
        let mut app = App::new(settings, Box::new(SilentHost));

        assert_eq!(dispatch_key(&mut app, key(Char('q'))), KeyOutcome::Quit);

        let _ = app.navigate(NavEvent::Titles);
        assert_eq!(dispatch_key(&mut app, key(Char('q'))), KeyOutcome::Handled(None));
        assert_eq!(app.state.screen, Screen::Main);
    }

    #[test]
    fn ctrl_c_quits_even_behind_an_alert() {
        let mut app = App::new(AppSettings::default(), Box::new(SilentHost));
        app.state.alert = Some("x".into());
        let ctrl_c = KeyEvent::new(Char('c'), KeyModifiers::CONTROL);
        assert_eq!(dispatch_key(&mut app, ctrl_c), KeyOutcome::Quit);
    }
}
