//! Dashboard application entry point

use eframe::egui;
use parking_lot::RwLock;
use std::sync::Arc;

use egui::RichText;
use tracing::error;

use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, DashboardView};
use crate::dashboard::theme;
use crate::dashboard::views::{
    render_extract_view, render_manage_view, render_settings_view, ViewCtx,
};
use crate::shared::SharedAppState;
use crate::storage::{self, CardStore};

/// The main dashboard application
pub struct DashboardApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Open record store; None when the database failed to open
    store: Option<CardStore>,
    /// Whether theme has been applied
    theme_applied: bool,
    /// View shown last frame, for cache invalidation on switch
    last_view: DashboardView,
}

impl DashboardApp {
    /// Create a new dashboard application, opening the record store from
    /// the configured (or default) database path. A failed open is
    /// reported inline instead of aborting the GUI.
    pub fn new(shared_state: Arc<RwLock<SharedAppState>>) -> Self {
        let store = match open_store(&shared_state) {
            Ok(store) => Some(store),
            Err(e) => {
                error!("failed to open card store: {e}");
                shared_state.write().runtime.set_error(e.to_string());
                None
            }
        };

        Self {
            shared_state,
            dashboard_state: DashboardState::default(),
            store,
            theme_applied: false,
            last_view: DashboardView::default(),
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 640.0])
                .with_min_inner_size([760.0, 480.0])
                .with_title("CardScan"),
            ..Default::default()
        }
    }

    /// Render the inline status/error strip shared by all views.
    fn render_messages(&self, ui: &mut egui::Ui) {
        let runtime = self.shared_state.read().runtime.clone();
        if let Some(error) = runtime.last_error {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(theme::ThemeColors::ACCENT_ERROR));
                ui.label(RichText::new(error).color(theme::ThemeColors::ACCENT_ERROR));
            });
            ui.add_space(6.0);
        } else if let Some(status) = runtime.last_status {
            ui.label(RichText::new(status).color(theme::ThemeColors::ACCENT_SUCCESS));
            ui.add_space(6.0);
        }
    }
}

fn open_store(shared_state: &RwLock<SharedAppState>) -> anyhow::Result<CardStore> {
    let configured = shared_state.read().config.storage.db_path.clone();
    let path = match configured {
        Some(path) => path,
        None => storage::default_db_path()?,
    };
    Ok(CardStore::open(&path)?)
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        // Entering the modification view reloads holder names, so records
        // saved in the extraction view show up without a manual refresh.
        let current_view = self.dashboard_state.current_view;
        if current_view != self.last_view {
            if current_view == DashboardView::Manage {
                self.dashboard_state.manage.invalidate();
            }
            self.shared_state.write().runtime.clear_messages();
            self.last_view = current_view;
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(20.0).show(ui, |ui| {
                self.render_messages(ui);

                let view_ctx = ViewCtx {
                    shared: &self.shared_state,
                    store: self.store.as_ref(),
                };

                match self.dashboard_state.current_view {
                    DashboardView::Extract => {
                        render_extract_view(ui, &mut self.dashboard_state.extract, &view_ctx);
                    }
                    DashboardView::Manage => {
                        render_manage_view(ui, &mut self.dashboard_state.manage, &view_ctx);
                    }
                    DashboardView::Settings => {
                        render_settings_view(ui, &view_ctx);
                    }
                }
            });
        });
    }
}

/// Run the dashboard application
pub fn run_dashboard(shared_state: Arc<RwLock<SharedAppState>>) -> Result<(), eframe::Error> {
    let app = DashboardApp::new(shared_state);
    eframe::run_native(
        "CardScan",
        DashboardApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
