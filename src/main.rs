use killswitch::hotkey::{self, HotkeyBindings, Signals};
use killswitch::logging;
use killswitch::overlay::{self, hint_lines, OverlayApp, OverlayState};
use killswitch::picker;
use killswitch::processes::SystemProcesses;
use killswitch::settings::Settings;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    logging::init(settings.debug_logging);

    let Some(process_name) = picker::pick_process(Box::new(SystemProcesses))? else {
        tracing::info!("no process selected; exiting");
        return Ok(());
    };

    let toggle = settings.toggle_binding();
    let close = settings.close_binding();
    let quit = settings.quit_binding();

    let signals = Signals::new();
    hotkey::start_listener(
        HotkeyBindings {
            toggle: toggle.hotkey,
            close_process: close.hotkey,
            quit: quit.hotkey,
        },
        signals.clone(),
    );

    let lines = hint_lines(&process_name, &toggle.label, &close.label, &quit.label);
    let [r, g, b] = settings.font_color;
    let app = OverlayApp::new(
        OverlayState::new(process_name),
        signals,
        Box::new(SystemProcesses),
        lines,
        settings.font_size,
        egui::Color32::from_rgb(r, g, b),
    );

    overlay::run_overlay(app)
}
