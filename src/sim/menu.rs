//! Menu items and cursor for the non-playing phases

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    StartGame,
    ToggleFullscreen,
    Resume,
    Restart,
    MainMenu,
}

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start Game",
            MenuItem::ToggleFullscreen => "Toggle Fullscreen",
            MenuItem::Resume => "Resume",
            MenuItem::Restart => "Restart",
            MenuItem::MainMenu => "Main Menu",
        }
    }
}

/// Items shown in `phase` (none while playing)
pub fn items_for(phase: GamePhase) -> &'static [MenuItem] {
    match phase {
        GamePhase::Menu => &[MenuItem::StartGame, MenuItem::ToggleFullscreen],
        GamePhase::Paused => &[MenuItem::Resume, MenuItem::Restart, MenuItem::MainMenu],
        GamePhase::GameOver => &[MenuItem::Restart, MenuItem::MainMenu],
        GamePhase::Playing => &[],
    }
}

/// Selection cursor, clamped to the items of the current phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    cursor: usize,
}

impl Menu {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self, phase: GamePhase) {
        let last = items_for(phase).len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn selected(&self, phase: GamePhase) -> Option<MenuItem> {
        items_for(phase).get(self.cursor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_both_ends() {
        let mut menu = Menu::default();
        menu.up();
        assert_eq!(menu.cursor(), 0);

        for _ in 0..5 {
            menu.down(GamePhase::Paused);
        }
        assert_eq!(menu.cursor(), 2);
        assert_eq!(menu.selected(GamePhase::Paused), Some(MenuItem::MainMenu));
    }

    #[test]
    fn test_items_per_phase() {
        assert_eq!(items_for(GamePhase::Menu)[0].label(), "Start Game");
        assert_eq!(items_for(GamePhase::GameOver).len(), 2);
        assert!(items_for(GamePhase::Playing).is_empty());
        assert_eq!(Menu::default().selected(GamePhase::Playing), None);
    }
}
