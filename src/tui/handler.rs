use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Screen;
use crate::editor::DraftField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    OpenArticle,
    CloseArticle,
    NextCategory,
    ShowBookmarks,
    StartSearch,
    ToggleLike,
    ToggleBookmark,
    StartComment,
    OpenLink,
    Refresh,
    OpenAdmin,
    ShowHelp,
    HideHelp,
    // Text input actions
    InputChar(char),
    InputBackspace,
    InputConfirm,
    InputCancel,
    // Admin actions
    ExitAdmin,
    EditField(DraftField),
    CycleDraftCategory,
    ToggleSponsored,
    UseTrendingTopic(usize),
    Research,
    CleanText,
    GenerateHeadline,
    GenerateImage,
    LoadTrending,
    Publish,
}

pub fn handle_key_event(
    key: KeyEvent,
    screen: Screen,
    input_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    if input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::InputConfirm),
            KeyCode::Esc => Some(AppAction::InputCancel),
            KeyCode::Backspace => Some(AppAction::InputBackspace),
            KeyCode::Char(c) => Some(AppAction::InputChar(c)),
            _ => None,
        };
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }

    match screen {
        Screen::Feed => feed_key(key),
        Screen::Admin => admin_key(key),
    }
}

fn feed_key(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Char('q') => Some(AppAction::Quit),

        KeyCode::Char('j') | KeyCode::Down => Some(AppAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppAction::MoveUp),
        KeyCode::Char('<') => Some(AppAction::MoveToTop),
        KeyCode::Char('>') => Some(AppAction::MoveToBottom),

        KeyCode::Enter => Some(AppAction::OpenArticle),
        KeyCode::Esc => Some(AppAction::CloseArticle),

        KeyCode::Tab | KeyCode::Char('f') => Some(AppAction::NextCategory),
        KeyCode::Char('B') => Some(AppAction::ShowBookmarks),
        KeyCode::Char('/') => Some(AppAction::StartSearch),
        KeyCode::Char('l') => Some(AppAction::ToggleLike),
        KeyCode::Char('s') => Some(AppAction::ToggleBookmark),
        KeyCode::Char('c') => Some(AppAction::StartComment),
        KeyCode::Char('o') => Some(AppAction::OpenLink),
        KeyCode::Char('r') => Some(AppAction::Refresh),
        KeyCode::Char('A') => Some(AppAction::OpenAdmin),

        KeyCode::Char('?') => Some(AppAction::ShowHelp),

        _ => None,
    }
}

fn admin_key(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(AppAction::ExitAdmin),

        KeyCode::Char('t') => Some(AppAction::EditField(DraftField::Topic)),
        KeyCode::Char('h') => Some(AppAction::EditField(DraftField::Headline)),
        KeyCode::Char('x') => Some(AppAction::EditField(DraftField::Content)),
        KeyCode::Char('p') => Some(AppAction::EditField(DraftField::Preview)),
        KeyCode::Char('l') => Some(AppAction::EditField(DraftField::Location)),
        KeyCode::Char('i') => Some(AppAction::EditField(DraftField::ImageUrl)),
        KeyCode::Char('a') => Some(AppAction::EditField(DraftField::AffiliateLink)),
        KeyCode::Char('b') => Some(AppAction::EditField(DraftField::AffiliateText)),

        KeyCode::Char('g') => Some(AppAction::CycleDraftCategory),
        KeyCode::Char('s') => Some(AppAction::ToggleSponsored),
        KeyCode::Char(c @ '1'..='3') => Some(AppAction::UseTrendingTopic(c as usize - '1' as usize)),

        KeyCode::Char('R') => Some(AppAction::Research),
        KeyCode::Char('C') => Some(AppAction::CleanText),
        KeyCode::Char('H') => Some(AppAction::GenerateHeadline),
        KeyCode::Char('I') => Some(AppAction::GenerateImage),
        KeyCode::Char('n') => Some(AppAction::LoadTrending),
        KeyCode::Char('P') => Some(AppAction::Publish),

        KeyCode::Char('?') => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn input_mode_captures_letters() {
        let action = handle_key_event(press(KeyCode::Char('q')), Screen::Feed, true, false);
        assert_eq!(action, Some(AppAction::InputChar('q')));
    }

    #[test]
    fn help_swallows_any_key() {
        let action = handle_key_event(press(KeyCode::Char('l')), Screen::Admin, false, true);
        assert_eq!(action, Some(AppAction::HideHelp));
    }

    #[test]
    fn same_key_means_different_things_per_screen() {
        let key = press(KeyCode::Char('l'));
        assert_eq!(
            handle_key_event(key, Screen::Feed, false, false),
            Some(AppAction::ToggleLike)
        );
        assert_eq!(
            handle_key_event(key, Screen::Admin, false, false),
            Some(AppAction::EditField(DraftField::Location))
        );
    }

    #[test]
    fn trending_shortcuts_are_zero_based() {
        let action = handle_key_event(press(KeyCode::Char('2')), Screen::Admin, false, false);
        assert_eq!(action, Some(AppAction::UseTrendingTopic(1)));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key_event(key, Screen::Admin, false, false),
            Some(AppAction::Quit)
        );
    }
}
