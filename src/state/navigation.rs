use lume_api::GameKind;

/// The full-viewport views. Exactly one is active at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    Play,
    Game,
    Profile,
    Referrals,
    Titles,
    Bonuses,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Main => "Главное меню",
            Screen::Play => "Играть",
            Screen::Game => "Игра",
            Screen::Profile => "Профиль",
            Screen::Referrals => "Рефералы",
            Screen::Titles => "Титулы",
            Screen::Bonuses => "Бонусы",
        }
    }
}

/// Button presses that move between screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    Play,
    Profile,
    Referrals,
    Titles,
    Bonuses,
    SelectGame(GameKind),
    Back,
}

/// Destination for `event` pressed on `from`, or `None` when that screen has
/// no such button. "Back" is wired per screen: the game screen returns to the
/// selection screen, everything else to the main menu.
pub fn transition(from: Screen, event: &NavEvent) -> Option<Screen> {
    use NavEvent as E;
    use Screen as S;

    match (from, event) {
        (S::Main, E::Play) => Some(S::Play),
        (S::Main, E::Profile) => Some(S::Profile),
        (S::Main, E::Referrals) => Some(S::Referrals),
        (S::Main, E::Titles) => Some(S::Titles),
        (S::Main, E::Bonuses) => Some(S::Bonuses),

        (S::Play, E::SelectGame(_)) => Some(S::Game),
        (S::Play, E::Back) => Some(S::Main),
        (S::Game, E::Back) => Some(S::Play),

        (S::Profile | S::Referrals | S::Titles | S::Bonuses, E::Back) => Some(S::Main),

        _ => None,
    }
}
