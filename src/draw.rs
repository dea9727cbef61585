use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::state::app_state::ResultTone;
use crate::state::navigation::Screen;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use lume_api::{GameKind, TITLE_CATALOG, TitleKind};

const WIN_COLOR: Color = Color::Rgb(0x2e, 0xcc, 0x71);
const LOSS_COLOR: Color = Color::Rgb(0xe7, 0x4c, 0x3c);
const ACCENT: Color = Color::Magenta;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
        }

        match app.state.screen {
            Screen::Main => draw_main(f, layout.main, app),
            Screen::Play => draw_play(f, layout.main, app),
            Screen::Game => draw_game(f, layout.main, app),
            Screen::Profile => draw_profile(f, layout.main, app),
            Screen::Referrals => draw_referrals(f, layout.main, app),
            Screen::Titles => draw_titles(f, layout.main, app),
            Screen::Bonuses => draw_bonuses(f, layout.main, app),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);

        if let Some(message) = app.state.alert.as_deref() {
            draw_alert(f, f.area(), message);
        }
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

fn key_legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let title = match (app.state.screen, app.state.game.title.as_str()) {
        (Screen::Game, game_title) if !game_title.is_empty() => format!(" VapeLume Kazino › {game_title}"),
        (screen, _) => format!(" VapeLume Kazino › {}", screen.title()),
    };
    f.render_widget(
        Paragraph::new(title)
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                    .border_type(border_type),
            )
            .style(style.add_modifier(Modifier::BOLD)),
        header[0],
    );

    let balance = format!("💰 {} LumeCoin ", or_dash(&app.state.profile.main_balance));
    f.render_widget(
        Paragraph::new(balance)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                    .border_type(border_type),
            )
            .style(style),
        header[1],
    );
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(ACCENT).title(" VapeLume Kazino ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [greeting, balance, _gap, menu, legend] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let hello = match &app.state.identity {
        Some(identity) => format!("Привет, {}!", identity.display_name()),
        None => "Запустите клиент из Telegram: initData не передан".to_string(),
    };
    f.render_widget(Paragraph::new(hello).alignment(Alignment::Center), greeting);
    f.render_widget(
        Paragraph::new(format!("Баланс: {} LumeCoin", or_dash(&app.state.profile.main_balance)))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        balance,
    );

    let items = [
        ("p", "🎰 Играть"),
        ("1", "👤 Профиль"),
        ("2", "👥 Рефералы"),
        ("3", "👑 Титулы"),
        ("4", "🎁 Бонусы"),
    ];
    let lines: Vec<Line> = items
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)),
                Span::raw(*label),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), menu);
    f.render_widget(key_legend("Keys: p=play  1-4=sections  \"=logs  q=quit"), legend);
}

fn draw_play(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Выберите игру ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [list, legend] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = GameKind::ALL
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let selected = idx == app.state.play.selected;
            let marker = if selected { '>' } else { ' ' };
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(format!("{marker} {}. {}", idx + 1, kind.label()), style)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list);
    f.render_widget(key_legend("Keys: j/k=move  Enter or 1-6=play  Esc=back"), legend);
}

fn draw_game(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let block = default_border(ACCENT).title(format!(" {} ", or_dash(&game.title)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [balance, bet, result, _fill, legend] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!("Баланс: {} LumeCoin", or_dash(&app.state.profile.main_balance))),
        balance,
    );
    f.render_widget(
        Paragraph::new(format!("{}▏", game.bet.value))
            .block(default_border(Color::DarkGray).title(" Ставка ")),
        bet,
    );

    if let Some(outcome) = &game.result {
        let color = match outcome.tone {
            ResultTone::Win => WIN_COLOR,
            ResultTone::Loss => LOSS_COLOR,
            ResultTone::Neutral => Color::Gray,
        };
        f.render_widget(
            Paragraph::new(outcome.text.as_str())
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            result,
        );
    }

    f.render_widget(key_legend("Keys: 0-9=bet  Backspace=erase  Enter=place bet  Esc=games"), legend);
}

fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let profile = &app.state.profile;
    let block = default_border(Color::White).title(" Профиль ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [details, progress, achievements, legend] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let label = Style::default().fg(Color::DarkGray);
    let row = |name: &'static str, value: &str| {
        Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::raw(or_dash(value).to_string())])
    };
    let lines = vec![
        row("Имя", &profile.user_name),
        row("Баланс", &profile.profile_balance),
        row("Уровень", &profile.level),
        row("Звание", &profile.rank),
        row("Опыт", &format!("{} / {}", or_dash(&profile.xp), or_dash(&profile.xp_needed))),
        row("Обновлено", profile.synced_at.as_deref().unwrap_or_default()),
    ];
    f.render_widget(Paragraph::new(lines), details);

    f.render_widget(
        Gauge::default()
            .block(default_border(Color::DarkGray).title(" XP "))
            .gauge_style(Style::default().fg(ACCENT))
            .percent(profile.xp_progress.round() as u16)
            .label(profile.progress_label()),
        progress,
    );

    let badges = if profile.achievements.is_empty() {
        "Пока нет достижений".to_string()
    } else {
        profile
            .achievements
            .iter()
            .map(|a| format!("{} {}", a.icon, a.name))
            .collect::<Vec<_>>()
            .join("   ")
    };
    f.render_widget(
        Paragraph::new(badges)
            .wrap(Wrap { trim: true })
            .block(default_border(Color::DarkGray).title(" Достижения ")),
        achievements,
    );
    f.render_widget(key_legend("Keys: r=refresh  Esc=back"), legend);
}

fn draw_referrals(f: &mut Frame, area: Rect, app: &App) {
    let profile = &app.state.profile;
    let block = default_border(Color::White).title(" Рефералы ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [link, count, _fill, legend] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(or_dash(&profile.referral_link))
            .style(Style::default().fg(Color::Cyan))
            .block(default_border(Color::DarkGray).title(" Ваша ссылка ")),
        link,
    );
    f.render_widget(
        Paragraph::new(format!("Приглашено друзей: {}", or_dash(&profile.referral_count))),
        count,
    );
    f.render_widget(key_legend("Keys: c=copy link  s=share  Esc=back"), legend);
}

fn draw_titles(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Титулы ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [list, legend] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = TITLE_CATALOG
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            let selected = idx == app.state.titles.selected;
            let marker = if selected { '>' } else { ' ' };
            let term = match (title.kind, title.duration_days) {
                (TitleKind::Permanent, _) => "навсегда".to_string(),
                (TitleKind::Temporary, Some(days)) => format!("аренда {days} дн."),
                (TitleKind::Temporary, None) => "аренда".to_string(),
            };
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::styled(format!("{marker} {:<20} {:>7} LumeCoin  {term}", title.name, title.price), style)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list);
    f.render_widget(key_legend("Keys: j/k=move  Enter=buy/rent  Esc=back"), legend);
}

fn draw_bonuses(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Бонусы ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [case, burn, _fill, legend] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new("Раз в сутки: откройте кейс и получите случайную награду [o]")
            .block(default_border(Color::DarkGray).title(" 🎁 Кейс ")),
        case,
    );
    f.render_widget(
        Paragraph::new(format!("{}▏", app.state.bonuses.burn.value))
            .block(default_border(Color::DarkGray).title(" 🔥 Сжечь монеты за XP ")),
        burn,
    );
    f.render_widget(key_legend("Keys: o=open case  0-9=amount  Enter=burn  Esc=back"), legend);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
    let width = area.width.saturating_sub(4).min(60);
    let height = 5u16.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(Span::styled("Enter — OK", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(default_border(Color::Yellow)),
        popup,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(3), 0, 1, 1)
    };
    f.render_widget(spinner, area);
}
