use crate::application::{App, CityRequest, Focus};
use crossterm::event::{KeyCode, KeyModifiers};

const PAGE: isize = 10;

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum InputAction {
    Continue,
    FetchCities(CityRequest),
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> InputAction {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        if app.dropdown_open {
            Self::handle_open_dropdown(app, key);
            return InputAction::Continue;
        }

        match key {
            KeyCode::Char('q') => InputAction::Quit,
            KeyCode::Tab | KeyCode::BackTab => {
                app.toggle_focus();
                InputAction::Continue
            }
            KeyCode::Enter | KeyCode::Char(' ') => match app.focus {
                Focus::Dropdown => {
                    app.open_dropdown();
                    InputAction::Continue
                }
                Focus::Trigger => Self::confirm(app),
            },
            KeyCode::Char('o') => Self::confirm(app),
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_cities(-1);
                InputAction::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_cities(1);
                InputAction::Continue
            }
            KeyCode::PageUp => {
                app.scroll_cities(-PAGE);
                InputAction::Continue
            }
            KeyCode::PageDown => {
                app.scroll_cities(PAGE);
                InputAction::Continue
            }
            KeyCode::Home => {
                app.city_scroll = 0;
                InputAction::Continue
            }
            _ => InputAction::Continue,
        }
    }

    fn handle_open_dropdown(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_highlight(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_highlight(1),
            KeyCode::PageUp => app.move_highlight(-PAGE),
            KeyCode::PageDown => app.move_highlight(PAGE),
            KeyCode::Enter | KeyCode::Char(' ') => app.commit_highlighted(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Tab => app.close_dropdown(),
            _ => {}
        }
    }

    // The trigger is inert while disabled, matching a disabled button.
    fn confirm(app: &mut App) -> InputAction {
        match app.confirm_selection() {
            Some(request) => InputAction::FetchCities(request),
            None => InputAction::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::State;

    fn press(app: &mut App, key: KeyCode) -> InputAction {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = App::default();
        let request = app.begin_state_load().unwrap();
        app.apply_states(request.complete(Ok(vec![
            State::new(35, "SP", "São Paulo"),
            State::new(33, "RJ", "Rio de Janeiro"),
        ])));
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), InputAction::Quit));
        assert!(matches!(
            InputHandler::handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            InputAction::Quit
        ));
    }

    #[test]
    fn test_q_closes_open_dropdown_instead_of_quitting() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.dropdown_open);

        assert!(matches!(press(&mut app, KeyCode::Char('q')), InputAction::Continue));
        assert!(!app.dropdown_open);
    }

    #[test]
    fn test_choose_state_with_keyboard() {
        let mut app = loaded_app();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.selected_state(), Some("RJ"));
        assert!(app.trigger_enabled());
        assert!(!app.dropdown_open);
    }

    #[test]
    fn test_trigger_inert_before_selection() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Trigger);

        assert!(matches!(press(&mut app, KeyCode::Enter), InputAction::Continue));
        assert!(matches!(press(&mut app, KeyCode::Char('o')), InputAction::Continue));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_trigger_starts_fetch_after_selection() {
        let mut app = loaded_app();
        app.select_state("SP");
        press(&mut app, KeyCode::Tab);

        match press(&mut app, KeyCode::Enter) {
            InputAction::FetchCities(request) => {
                assert_eq!(request.uf, "SP");
                assert!(app.is_loading());
            }
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_confirm_ignored_while_loading() {
        let mut app = loaded_app();
        app.select_state("SP");
        let first = press(&mut app, KeyCode::Char('o'));
        assert!(matches!(first, InputAction::FetchCities(_)));

        assert!(matches!(press(&mut app, KeyCode::Char('o')), InputAction::Continue));
    }
}
