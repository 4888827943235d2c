use crate::processes::{search, ProcessTable};
use eframe::egui;
use std::sync::{Arc, Mutex};

/// Modal dialog shown once at startup to choose the target process by name.
///
/// The list is recomputed against a fresh process snapshot on every edit of
/// the search box, so processes starting or exiting between keystrokes show
/// up immediately.
pub struct PickerApp {
    table: Box<dyn ProcessTable>,
    query: String,
    names: Vec<String>,
    selected: Option<usize>,
    choice: Arc<Mutex<Option<String>>>,
}

impl PickerApp {
    pub fn new(mut table: Box<dyn ProcessTable>, choice: Arc<Mutex<Option<String>>>) -> Self {
        let names = search(table.as_mut(), "");
        Self {
            table,
            query: String::new(),
            names,
            selected: None,
            choice,
        }
    }

    /// Re-enumerate and filter. Any highlight is dropped because the row it
    /// pointed at may no longer exist.
    pub fn refresh(&mut self) {
        self.names = search(self.table.as_mut(), &self.query);
        self.selected = None;
    }

    /// The highlighted name, if any.
    pub fn resolve(&self) -> Option<String> {
        self.selected.and_then(|i| self.names.get(i)).cloned()
    }

    /// Store the highlighted name as the final choice. Returns `true` when a
    /// choice was made and the dialog should close; submitting with nothing
    /// highlighted is a no-op.
    pub fn commit(&mut self) -> bool {
        match self.resolve() {
            Some(name) => {
                tracing::info!(process = %name, "process selected");
                *self.choice.lock().unwrap() = Some(name);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh();
    }

    pub fn select(&mut self, index: usize) {
        if index < self.names.len() {
            self.selected = Some(index);
        }
    }
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        use egui::*;

        let mut submit = false;
        CentralPanel::default().show(ctx, |ui| {
            let input = ui.text_edit_singleline(&mut self.query);
            if input.changed() {
                self.refresh();
            }

            ui.add_space(4.0);
            let area_height = ui.available_height() - 40.0;
            ScrollArea::vertical().max_height(area_height).show(ui, |ui| {
                for (i, name) in self.names.iter().enumerate() {
                    let row = ui.selectable_label(self.selected == Some(i), name.as_str());
                    if row.clicked() {
                        self.selected = Some(i);
                    }
                    if row.double_clicked() {
                        self.selected = Some(i);
                        submit = true;
                    }
                }
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("Submit").clicked() {
                    submit = true;
                }
            });
        });

        if submit && self.commit() {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}

/// Run the picker dialog to completion. Returns `None` when the dialog is
/// closed without a selection; the caller then exits without ever creating
/// the overlay.
pub fn pick_process(table: Box<dyn ProcessTable>) -> anyhow::Result<Option<String>> {
    let choice: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let choice_for_app = choice.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([350.0, 325.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Select Process",
        native_options,
        Box::new(move |_cc| Box::new(PickerApp::new(table, choice_for_app))),
    )
    .map_err(|e| anyhow::anyhow!("picker window failed: {e}"))?;

    let name = choice.lock().unwrap().take();
    Ok(name)
}
