//! Host-side state of the terminal launcher and the mapping from terminal
//! input to launcher events.

use crate::bridge::WindowCommand;
use anything_core::config::WindowConfig;
use anything_core::{Event, HostEvent, Hotkey, Key, SettingsForm, SettingsPanel, UiEvent, ViewState};
use anything_tui::keymap;
use anything_tui::window::{SimWindow, first_visible, row_at, row_capacity};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, warn};

/// What the launcher currently looks like from the outside
pub struct Snapshot<'a> {
    pub view: ViewState,
    pub input: &'a str,
    pub form: Option<&'a SettingsForm>,
    pub rows: usize,
    pub selected: Option<usize>,
}

pub struct App {
    pub window: SimWindow,
    pub visible: bool,
    pub input_focused: bool,
    pub should_quit: bool,
    pub hotkey: Hotkey,
    /// Last drawn terminal area
    pub screen: Rect,
    /// Saved hotkey text last seen in the settings form
    hotkey_text: String,
    /// A reset was sent and the host has not drawn since
    reset_pending: bool,
}

impl App {
    pub fn new(window: &WindowConfig, hotkey: Hotkey) -> Self {
        Self {
            window: SimWindow::new(window.width, window.input_row_height),
            visible: true,
            input_focused: true,
            should_quit: false,
            hotkey_text: hotkey.to_string(),
            hotkey,
            screen: Rect::default(),
            reset_pending: false,
        }
    }

    /// Follow the saved hotkey shown in the settings form.
    pub fn set_hotkey(&mut self, text: &str) {
        if text == self.hotkey_text {
            return;
        }
        self.hotkey_text = text.to_string();
        match text.parse::<Hotkey>() {
            Ok(hotkey) => {
                debug!("Hotkey changed to {hotkey}");
                self.hotkey = hotkey;
            }
            Err(e) => warn!("Keeping hotkey {}: {e}", self.hotkey),
        }
    }

    /// Show the launcher and ask the core to reset it.
    pub fn show(&mut self) -> Event {
        self.visible = true;
        self.reset_pending = true;
        HostEvent::WindowReset.into()
    }

    /// The acknowledgment owed after the first frame following a reset.
    pub fn take_reset_ack(&mut self) -> Option<Event> {
        std::mem::take(&mut self.reset_pending).then(|| HostEvent::ResetSettled.into())
    }

    pub fn apply(&mut self, command: WindowCommand) {
        debug!("Window command {command:?}");
        match command {
            WindowCommand::Resize { width, height } => self.window.resize(width, height),
            WindowCommand::Recenter => self.window.recenter(self.screen),
            WindowCommand::Hide => {
                self.visible = false;
                self.input_focused = false;
            }
            WindowCommand::Quit => self.should_quit = true,
            WindowCommand::FocusInput => self.input_focused = true,
            WindowCommand::SettingsClosed => {}
        }
    }

    pub fn on_focus_change(&self, gained: bool) -> Option<Event> {
        if !self.visible {
            return None;
        }
        Some(if gained {
            HostEvent::WindowFocused.into()
        } else {
            HostEvent::FocusLost.into()
        })
    }

    pub fn on_key(&mut self, key: KeyEvent, launcher: &Snapshot<'_>) -> Option<Event> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if !self.visible {
            return keymap::matches(&self.hotkey, &key).then(|| self.show());
        }

        match launcher.view {
            ViewState::Launcher => launcher_key(key, ctrl, launcher.input),
            ViewState::Settings => launcher.form.and_then(|form| settings_key(key, ctrl, form)),
        }
    }

    pub fn on_mouse(&self, mouse: MouseEvent, launcher: &Snapshot<'_>) -> Option<Event> {
        if !self.visible || launcher.view != ViewState::Launcher {
            return None;
        }

        let area = self.window.area(self.screen);
        let offset = first_visible(launcher.selected, row_capacity(area));
        let index = row_at(area, offset, launcher.rows, mouse.column, mouse.row)?;

        match mouse.kind {
            MouseEventKind::Moved => Some(UiEvent::Hover { index }.into()),
            MouseEventKind::Down(MouseButton::Left) => Some(UiEvent::Click { index }.into()),
            _ => None,
        }
    }
}

fn launcher_key(key: KeyEvent, ctrl: bool, input: &str) -> Option<Event> {
    let event = match key.code {
        KeyCode::Esc => UiEvent::Key { key: Key::Escape },
        KeyCode::Up => UiEvent::Key { key: Key::ArrowUp },
        KeyCode::Down => UiEvent::Key {
            key: Key::ArrowDown,
        },
        KeyCode::Enter => UiEvent::Key { key: Key::Enter },
        KeyCode::Tab => UiEvent::Key { key: Key::Tab },
        KeyCode::F(2) => return Some(HostEvent::SettingsOpened.into()),
        KeyCode::Char('u') if ctrl => UiEvent::InputChanged {
            text: String::new(),
        },
        KeyCode::Char('p') if ctrl => UiEvent::Key { key: Key::ArrowUp },
        KeyCode::Char('n') if ctrl => UiEvent::Key {
            key: Key::ArrowDown,
        },
        KeyCode::Char(c) if !ctrl => UiEvent::InputChanged {
            text: format!("{input}{c}"),
        },
        KeyCode::Backspace => {
            let mut text = input.to_string();
            text.pop()?;
            UiEvent::InputChanged { text }
        }
        _ => return None,
    };
    Some(event.into())
}

fn settings_key(key: KeyEvent, ctrl: bool, form: &SettingsForm) -> Option<Event> {
    let event = match key.code {
        KeyCode::Esc => UiEvent::Key { key: Key::Escape },
        KeyCode::Tab | KeyCode::Right => UiEvent::Key { key: Key::Tab },
        KeyCode::Left => UiEvent::SelectPanel {
            panel: previous_panel(form.panel),
        },
        KeyCode::Enter => UiEvent::Key { key: Key::Enter },
        KeyCode::Char('s') if ctrl => UiEvent::SaveSettings,
        _ => match form.panel {
            SettingsPanel::General => edit_hotkey(key.code, ctrl, &form.hotkey_draft)?,
            SettingsPanel::Indexing if key.code == KeyCode::Char('r') => UiEvent::RebuildIndex,
            SettingsPanel::Models if key.code == KeyCode::Char('d') => UiEvent::DownloadModels,
            _ => return None,
        },
    };
    Some(event.into())
}

fn edit_hotkey(code: KeyCode, ctrl: bool, draft: &str) -> Option<UiEvent> {
    let mut text = draft.to_string();
    match code {
        KeyCode::Char(c) if !ctrl => text.push(c),
        KeyCode::Backspace => {
            text.pop()?;
        }
        _ => return None,
    }
    Some(UiEvent::HotkeyEdited { text })
}

fn previous_panel(panel: SettingsPanel) -> SettingsPanel {
    let all = SettingsPanel::ALL;
    let index = all.iter().position(|p| *p == panel).unwrap_or(0);
    all[(index + all.len() - 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anything_core::SettingsRecord;

    fn app() -> App {
        let mut app = App::new(&WindowConfig::default(), "Ctrl+Space".parse().unwrap());
        app.screen = Rect::new(0, 0, 120, 40);
        app
    }

    fn launcher(input: &str) -> Snapshot<'_> {
        Snapshot {
            view: ViewState::Launcher,
            input,
            form: None,
            rows: 0,
            selected: None,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ui(event: Option<Event>) -> UiEvent {
        match event {
            Some(Event::Ui(event)) => event,
            other => panic!("expected a UI event, got {other:?}"),
        }
    }

    #[test]
    fn typing_extends_the_query() {
        let mut app = app();
        let event = ui(app.on_key(press(KeyCode::Char('x')), &launcher("inde")));
        assert_eq!(
            event,
            UiEvent::InputChanged {
                text: "index".into()
            }
        );

        let event = ui(app.on_key(press(KeyCode::Backspace), &launcher("ab")));
        assert_eq!(event, UiEvent::InputChanged { text: "a".into() });
        let ignored = app.on_key(press(KeyCode::Backspace), &launcher(""));
        assert!(ignored.is_none());
    }

    #[test]
    fn hidden_launcher_only_reacts_to_hotkey() {
        let mut app = app();
        app.apply(WindowCommand::Hide);

        let ignored = app.on_key(press(KeyCode::Char('a')), &launcher(""));
        assert!(ignored.is_none());
        assert!(app.on_focus_change(false).is_none());

        let hotkey = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL);
        assert!(matches!(
            app.on_key(hotkey, &launcher("")),
            Some(Event::Host(HostEvent::WindowReset))
        ));
        assert!(app.visible);
    }

    #[test]
    fn reset_is_acknowledged_once() {
        let mut app = app();
        let _ = app.show();
        assert!(matches!(
            app.take_reset_ack(),
            Some(Event::Host(HostEvent::ResetSettled))
        ));
        assert!(app.take_reset_ack().is_none());
    }

    #[test]
    fn saved_hotkey_replaces_the_active_one() {
        let mut app = app();
        app.set_hotkey("Alt+F1");
        assert_eq!(app.hotkey.to_string(), "Alt+F1");

        app.set_hotkey("Alt+Nope");
        assert_eq!(app.hotkey.to_string(), "Alt+F1");
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.on_key(ctrl_c, &launcher("query")).is_none());
        assert!(app.should_quit);
    }

    #[test]
    fn settings_keys_edit_and_act_per_panel() {
        fn snapshot(form: &SettingsForm) -> Snapshot<'_> {
            Snapshot {
                view: ViewState::Settings,
                input: "",
                form: Some(form),
                rows: 0,
                selected: None,
            }
        }

        let mut app = app();
        let mut form = SettingsForm::new(SettingsRecord::default());
        form.hotkey_draft = "Ctrl+".into();

        let event = ui(app.on_key(press(KeyCode::Char('K')), &snapshot(&form)));
        assert_eq!(
            event,
            UiEvent::HotkeyEdited {
                text: "Ctrl+K".into()
            }
        );

        let event = ui(app.on_key(press(KeyCode::Left), &snapshot(&form)));
        assert_eq!(
            event,
            UiEvent::SelectPanel {
                panel: SettingsPanel::Models
            }
        );

        form.panel = SettingsPanel::Indexing;
        let event = ui(app.on_key(press(KeyCode::Char('r')), &snapshot(&form)));
        assert_eq!(event, UiEvent::RebuildIndex);
        let ignored = app.on_key(press(KeyCode::Char('d')), &snapshot(&form));
        assert!(ignored.is_none());
    }

    #[test]
    fn mouse_maps_to_rows() {
        let mut app = app();
        app.apply(WindowCommand::Resize {
            width: 700,
            height: 60 + 3 * 50 + 14,
        });
        app.apply(WindowCommand::Recenter);
        let area = app.window.area(app.screen);
        let snapshot = Snapshot {
            rows: 3,
            ..launcher("doc")
        };

        let hover = MouseEvent {
            kind: MouseEventKind::Moved,
            column: area.x + 4,
            row: area.y + 5,
            modifiers: KeyModifiers::NONE,
        };
        let event = ui(app.on_mouse(hover, &snapshot));
        assert_eq!(event, UiEvent::Hover { index: 1 });

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            row: area.y + 1,
            ..hover
        };
        assert!(app.on_mouse(click, &snapshot).is_none());
    }
}
