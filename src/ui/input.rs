use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Enter, _) => Some(AppMessage::OpenSelected),
            (KeyCode::Tab, _) => Some(AppMessage::NextShelf),
            (KeyCode::BackTab, _) => Some(AppMessage::PreviousShelf),
            (KeyCode::Esc | KeyCode::Backspace, _) => Some(AppMessage::Back),
            (KeyCode::Char('j') | KeyCode::Down, _) => Some(AppMessage::SelectNext),
            (KeyCode::Char('k') | KeyCode::Up, _) => Some(AppMessage::SelectPrevious),
            (KeyCode::Char('g') | KeyCode::Home, _) => Some(AppMessage::SelectFirst),
            (KeyCode::Char('G') | KeyCode::End, _) => Some(AppMessage::SelectLast),
            (KeyCode::Char('h') | KeyCode::Left, _) => Some(AppMessage::SeekBackward),
            (KeyCode::Char('l') | KeyCode::Right, _) => Some(AppMessage::SeekForward),
            (KeyCode::Char('+' | '='), _) => Some(AppMessage::VolumeUp),
            (KeyCode::Char('-'), _) => Some(AppMessage::VolumeDown),
            (KeyCode::Char('m'), _) => Some(AppMessage::ToggleMute),
            (KeyCode::Char('s'), _) => Some(AppMessage::ToggleShuffle),
            (KeyCode::Char('r'), _) => Some(AppMessage::ToggleRepeat),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextTrack),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousTrack),
            (KeyCode::Char('f'), _) => Some(AppMessage::ToggleLike),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char(' '))),
            Some(AppMessage::TogglePlayPause)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('l'))),
            Some(AppMessage::SeekForward)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('='))),
            Some(AppMessage::VolumeUp)
        );
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('f'))),
            Some(AppMessage::ToggleLike)
        );
    }

    #[test]
    fn ctrl_c_quits_and_unknown_keys_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::handle_key(ctrl_c), Some(AppMessage::Quit));
        assert_eq!(InputHandler::handle_key(key(KeyCode::Char('x'))), None);
        assert_eq!(InputHandler::handle_key(key(KeyCode::F(5))), None);
    }

    #[test]
    fn browse_keys() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Tab)),
            Some(AppMessage::NextShelf)
        );
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(InputHandler::handle_key(back_tab), Some(AppMessage::PreviousShelf));
        assert_eq!(InputHandler::handle_key(key(KeyCode::Esc)), Some(AppMessage::Back));
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Enter)),
            Some(AppMessage::OpenSelected)
        );
    }
}
