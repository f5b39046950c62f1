//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! application mode. The event loop resolves key presses through the same
//! registry the nav bar and help overlay are built from, so hints never
//! drift from behaviour.

use crate::animator::AboutSection;
use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// A car enters (occupy a random free spot)
    Occupy,
    /// A car leaves (release a random occupied spot)
    Release,
    /// Empty the lot
    Reset,
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Smooth-scroll to an About section
    JumpTo(AboutSection),
    ShowAbout,
    Back,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        // Shift is implied by the character itself ('?' on most layouts)
        self.key == key && (self.modifiers == modifiers || modifiers == KeyModifiers::SHIFT)
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Dashboard,
            vec![
                Keybinding::new(KeyCode::Char('o'), KeyAction::Occupy, "O", "Car enters"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Release, "R", "Car leaves"),
                Keybinding::new(KeyCode::Char('x'), KeyAction::Reset, "X", "Reset lot"),
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Select spot above"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Select spot below"),
                Keybinding::new(KeyCode::Left, KeyAction::NavigateLeft, "Left", "Select previous spot"),
                Keybinding::new(KeyCode::Right, KeyAction::NavigateRight, "Right", "Select next spot"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::ShowAbout, "A", "About SmartPark"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::About,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(
                    KeyCode::Char('1'),
                    KeyAction::JumpTo(AboutSection::Features),
                    "1",
                    "Go to Features",
                ),
                Keybinding::new(
                    KeyCode::Char('2'),
                    KeyAction::JumpTo(AboutSection::HowItWorks),
                    "2",
                    "Go to How it works",
                ),
                Keybinding::new(
                    KeyCode::Char('3'),
                    KeyAction::JumpTo(AboutSection::Pricing),
                    "3",
                    "Go to Pricing",
                ),
                Keybinding::new(
                    KeyCode::Char('4'),
                    KeyAction::JumpTo(AboutSection::Contact),
                    "4",
                    "Go to Contact",
                ),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to dashboard"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key press in `mode` to an action
    pub fn action_for(
        &self,
        mode: &AppMode,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(key, modifiers))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        // Select key bindings to show in nav bar (most important ones)
        let priority_actions = match mode {
            AppMode::Dashboard => vec![
                KeyAction::Occupy,
                KeyAction::Release,
                KeyAction::Reset,
                KeyAction::NavigateUp,
                KeyAction::ShowAbout,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::About => vec![
                KeyAction::ScrollUp,
                KeyAction::JumpTo(AboutSection::Features),
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            // Arrow and anchor groups collapse into a single hint
            let item = match action {
                KeyAction::NavigateUp => NavBarItem {
                    key_display: "Arrows".to_string(),
                    action_label: "Select spot".to_string(),
                },
                KeyAction::ScrollUp => NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Scroll".to_string(),
                },
                KeyAction::JumpTo(_) => NavBarItem {
                    key_display: "1-4".to_string(),
                    action_label: "Jump to section".to_string(),
                },
                _ => NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                },
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(&KeyAction) -> bool); 3] = [
            ("Lot", |a| {
                matches!(a, KeyAction::Occupy | KeyAction::Release | KeyAction::Reset)
            }),
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::NavigateLeft
                        | KeyAction::NavigateRight
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::JumpTo(_)
                )
            }),
            ("General", |a| {
                matches!(
                    a,
                    KeyAction::ShowAbout | KeyAction::Back | KeyAction::Help | KeyAction::Quit
                )
            }),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
