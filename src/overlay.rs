use crate::hotkey::Signals;
use crate::processes::{display_name, ProcessTable};
use eframe::egui;

/// Horizontal padding added to the widest measured line.
pub const WIDTH_PADDING: f32 = 20.0;
/// Vertical padding added below the three lines.
pub const HEIGHT_PADDING: f32 = 10.0;
/// Margin from the top and right edges of the primary monitor.
pub const SCREEN_MARGIN: f32 = 10.0;

/// The three hint lines, built from the configured hotkey labels. The first
/// line shows the process with its file extension stripped; kill matching
/// still uses the full name held by [`OverlayState`].
pub fn hint_lines(process_name: &str, toggle: &str, close: &str, quit: &str) -> [String; 3] {
    [
        format!("{close}: Close {}", display_name(process_name)),
        format!("{toggle}: Show/Hide UI"),
        format!("{quit}: Close Program"),
    ]
}

/// Window size from the measured pixel widths of the three lines.
pub fn window_size(line_widths: [f32; 3], line_height: f32) -> egui::Vec2 {
    let widest = line_widths.iter().fold(0.0f32, |acc, w| acc.max(*w));
    egui::vec2(widest + WIDTH_PADDING, line_height * 3.0 + HEIGHT_PADDING)
}

/// Top-right anchor position on a monitor of the given size.
pub fn window_pos(monitor: egui::Vec2, size: egui::Vec2) -> egui::Pos2 {
    egui::pos2(monitor.x - size.x - SCREEN_MARGIN, SCREEN_MARGIN)
}

/// Fixed vertical offsets of the three lines. Toggling visibility re-places
/// the lines at these same offsets, never resizing the window.
pub fn line_offsets(line_height: f32) -> [f32; 3] {
    [0.0, line_height, line_height * 2.0]
}

/// State owned by the overlay window: the chosen process (immutable after the
/// picker), the visibility flag, and the monotonic running flag.
pub struct OverlayState {
    pub process_name: String,
    pub show_overlay: bool,
    pub running: bool,
}

impl OverlayState {
    pub fn new(process_name: String) -> Self {
        Self {
            process_name,
            show_overlay: true,
            running: true,
        }
    }

    /// Drain pending hotkey signals in fixed order: toggle, close-process,
    /// close-program. All side effects happen here, on the UI thread; the
    /// listener thread only raises flags. Returns `false` once the loop
    /// should stop.
    pub fn drain_signals(&mut self, signals: &Signals, table: &mut dyn ProcessTable) -> bool {
        if signals.take_toggle() {
            self.show_overlay = !self.show_overlay;
            tracing::debug!(visible = self.show_overlay, "overlay visibility toggled");
        }
        if signals.take_close_process() {
            tracing::info!(process = %self.process_name, "closing target process and exiting");
            let killed = table.kill_all(&self.process_name);
            tracing::info!(killed, "terminated matching processes");
            self.running = false;
        }
        if signals.take_quit() {
            tracing::info!("closing program");
            self.show_overlay = false;
            self.running = false;
        }
        self.running
    }
}

/// Borderless always-on-top window painting the three hint lines over a
/// transparent, click-through background.
pub struct OverlayApp {
    state: OverlayState,
    signals: Signals,
    table: Box<dyn ProcessTable>,
    lines: [String; 3],
    font: egui::FontId,
    color: egui::Color32,
    placed: bool,
}

impl OverlayApp {
    pub fn new(
        state: OverlayState,
        signals: Signals,
        table: Box<dyn ProcessTable>,
        lines: [String; 3],
        font_size: f32,
        color: egui::Color32,
    ) -> Self {
        Self {
            state,
            signals,
            table,
            lines,
            font: egui::FontId::proportional(font_size),
            color,
            placed: false,
        }
    }

    /// Size the window from the measured text extents and anchor it to the
    /// top-right corner of the monitor. Monitor geometry is not known until
    /// the backend reports it, so this retries each frame until placed.
    fn apply_geometry(&mut self, ctx: &egui::Context) {
        let (widths, line_height) = ctx.fonts(|fonts| {
            let widths = self
                .lines
                .clone()
                .map(|line| fonts.layout_no_wrap(line, self.font.clone(), self.color).size().x);
            (widths, fonts.row_height(&self.font))
        });

        let size = window_size(widths, line_height);
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(window_pos(
                monitor, size,
            )));
            self.placed = true;
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.placed {
            self.apply_geometry(ctx);
        }

        if !self.state.drain_signals(&self.signals, self.table.as_mut()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if !self.state.show_overlay {
                    return;
                }
                let origin = ui.max_rect().min;
                let line_height = ui.fonts(|f| f.row_height(&self.font));
                let painter = ui.painter();
                for (line, offset) in self.lines.iter().zip(line_offsets(line_height)) {
                    painter.text(
                        origin + egui::vec2(0.0, offset),
                        egui::Align2::LEFT_TOP,
                        line,
                        self.font.clone(),
                        self.color,
                    );
                }
            });

        // keep repainting so flags raised by the listener are drained with
        // sub-frame latency
        ctx.request_repaint();
    }
}

/// Run the overlay window to completion. Blocks until a close signal drains.
pub fn run_overlay(app: OverlayApp) -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 64.0])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_mouse_passthrough(true),
        ..Default::default()
    };

    eframe::run_native(
        "killswitch",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("overlay window failed: {e}"))
}
