use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    NextTab,
    PrevTab,
    NextTimeWindow,
    SelectUp,
    SelectDown,
    Buy,
    Reload,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Right | KeyCode::Tab => Some(UiCommand::NextTab),
        KeyCode::Left | KeyCode::BackTab => Some(UiCommand::PrevTab),
        KeyCode::Up => Some(UiCommand::SelectUp),
        KeyCode::Down => Some(UiCommand::SelectDown),
        KeyCode::Enter => Some(UiCommand::Buy),
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            ']' | 'l' => Some(UiCommand::NextTab),
            '[' | 'h' => Some(UiCommand::PrevTab),
            't' => Some(UiCommand::NextTimeWindow),
            'k' => Some(UiCommand::SelectUp),
            'j' => Some(UiCommand::SelectDown),
            'b' => Some(UiCommand::Buy),
            'r' => Some(UiCommand::Reload),
            _ => None,
        },
        _ => None,
    }
}
