use rdev::{listen, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub use rdev::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Parse a hotkey string like "Ctrl+Shift+T" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut key: Option<Key> = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => ctrl = true,
            "SHIFT" => shift = true,
            "ALT" => alt = true,
            "" => {}
            _ => key = Some(parse_key(&upper)?),
        }
    }

    key.map(|k| Hotkey {
        key: k,
        ctrl,
        shift,
        alt,
    })
}

fn parse_key(upper: &str) -> Option<Key> {
    match upper {
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "ENTER" | "RETURN" => Some(Key::Return),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "DELETE" => Some(Key::Delete),
        "BACKSPACE" => Some(Key::Backspace),
        "CAPSLOCK" => Some(Key::CapsLock),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "LEFT" | "LEFTARROW" => Some(Key::LeftArrow),
        "RIGHT" | "RIGHTARROW" => Some(Key::RightArrow),
        "UP" | "UPARROW" => Some(Key::UpArrow),
        "DOWN" | "DOWNARROW" => Some(Key::DownArrow),
        _ if upper.len() > 1 && upper.starts_with('F') => parse_function_key(&upper[1..]),
        _ if upper.len() == 1 => {
            let c = upper.chars().next()?;
            if c.is_ascii_digit() {
                parse_digit(c)
            } else if c.is_ascii_alphabetic() {
                parse_letter(c)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_function_key(n: &str) -> Option<Key> {
    const FKEYS: [Key; 12] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
    match n.parse::<usize>().ok()? {
        i @ 1..=12 => Some(FKEYS[i - 1]),
        _ => None,
    }
}

fn parse_digit(c: char) -> Option<Key> {
    const DIGITS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];
    let i = c.to_digit(10)? as usize;
    DIGITS.get(i).copied()
}

fn parse_letter(c: char) -> Option<Key> {
    const LETTERS: [Key; 26] = [
        Key::KeyA,
        Key::KeyB,
        Key::KeyC,
        Key::KeyD,
        Key::KeyE,
        Key::KeyF,
        Key::KeyG,
        Key::KeyH,
        Key::KeyI,
        Key::KeyJ,
        Key::KeyK,
        Key::KeyL,
        Key::KeyM,
        Key::KeyN,
        Key::KeyO,
        Key::KeyP,
        Key::KeyQ,
        Key::KeyR,
        Key::KeyS,
        Key::KeyT,
        Key::KeyU,
        Key::KeyV,
        Key::KeyW,
        Key::KeyX,
        Key::KeyY,
        Key::KeyZ,
    ];
    let i = (c.to_ascii_uppercase() as usize).checked_sub('A' as usize)?;
    LETTERS.get(i).copied()
}

/// Which pending flag a watched combination raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    ToggleOverlay,
    CloseProcess,
    Quit,
}

/// Three independent flags set by the listener thread and drained by the UI
/// thread. `take_*` is an atomic test-and-clear, so a press observed by the
/// listener is consumed exactly once.
#[derive(Clone, Default)]
pub struct Signals {
    toggle: Arc<AtomicBool>,
    close_process: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self, kind: SignalKind) {
        let flag = match kind {
            SignalKind::ToggleOverlay => &self.toggle,
            SignalKind::CloseProcess => &self.close_process,
            SignalKind::Quit => &self.quit,
        };
        flag.store(true, Ordering::SeqCst);
    }

    pub fn take_toggle(&self) -> bool {
        self.toggle.swap(false, Ordering::SeqCst)
    }

    pub fn take_close_process(&self) -> bool {
        self.close_process.swap(false, Ordering::SeqCst)
    }

    pub fn take_quit(&self) -> bool {
        self.quit.swap(false, Ordering::SeqCst)
    }
}

/// Modifier state tracked from the raw key event stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mods {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Mods {
    pub fn apply(&mut self, event: &EventType) {
        let (key, down) = match event {
            EventType::KeyPress(k) => (*k, true),
            EventType::KeyRelease(k) => (*k, false),
            _ => return,
        };
        match key {
            Key::ControlLeft | Key::ControlRight => self.ctrl = down,
            Key::ShiftLeft | Key::ShiftRight => self.shift = down,
            Key::Alt | Key::AltGr => self.alt = down,
            _ => {}
        }
    }
}

/// Edge-triggered detector for a single key combination: fires once when the
/// combo becomes active and re-arms only after it is released.
#[derive(Debug, Clone, Copy)]
pub struct ComboWatcher {
    hotkey: Hotkey,
    key_down: bool,
    triggered: bool,
}

impl ComboWatcher {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            hotkey,
            key_down: false,
            triggered: false,
        }
    }

    /// Feed one event; returns `true` when the combination fires.
    pub fn on_event(&mut self, event: &EventType, mods: &Mods) -> bool {
        match event {
            EventType::KeyPress(k) if *k == self.hotkey.key => self.key_down = true,
            EventType::KeyRelease(k) if *k == self.hotkey.key => self.key_down = false,
            _ => {}
        }

        let active = self.key_down
            && (!self.hotkey.ctrl || mods.ctrl)
            && (!self.hotkey.shift || mods.shift)
            && (!self.hotkey.alt || mods.alt);

        if active {
            if !self.triggered {
                self.triggered = true;
                return true;
            }
        } else {
            self.triggered = false;
        }
        false
    }
}

/// The three combinations the overlay reacts to.
#[derive(Debug, Clone, Copy)]
pub struct HotkeyBindings {
    pub toggle: Hotkey,
    pub close_process: Hotkey,
    pub quit: Hotkey,
}

/// Spawn the global hotkey listener. The callback runs on the listener thread
/// and only ever raises flags on `signals`; all UI and process work happens on
/// the thread draining them.
pub fn start_listener(bindings: HotkeyBindings, signals: Signals) {
    tracing::debug!(?bindings, "starting hotkey listener");
    thread::spawn(move || loop {
        let signals = signals.clone();
        let mut mods = Mods::default();
        let mut watchers = [
            (ComboWatcher::new(bindings.toggle), SignalKind::ToggleOverlay),
            (ComboWatcher::new(bindings.close_process), SignalKind::CloseProcess),
            (ComboWatcher::new(bindings.quit), SignalKind::Quit),
        ];

        let result = listen(move |event| {
            mods.apply(&event.event_type);
            for (watcher, kind) in watchers.iter_mut() {
                if watcher.on_event(&event.event_type, &mods) {
                    tracing::debug!(?kind, "hotkey match");
                    signals.raise(*kind);
                }
            }
        });

        match result {
            Ok(()) => tracing::warn!("hotkey listener exited unexpectedly. Restarting shortly"),
            Err(e) => tracing::warn!("hotkey listener failed: {:?}. Retrying shortly", e),
        }

        thread::sleep(Duration::from_millis(500));
    });
}
