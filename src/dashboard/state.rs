//! Dashboard view state

use crate::classify::CardRecord;

/// Which view is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    /// Upload, extract, review, save
    #[default]
    Extract,
    /// Edit and delete stored records
    Manage,
    /// Application settings
    Settings,
}

impl DashboardView {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Extract => "Extraction",
            DashboardView::Manage => "Modification",
            DashboardView::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Extract => "⬆",
            DashboardView::Manage => "✏",
            DashboardView::Settings => "⚙",
        }
    }
}

/// Top-level dashboard state
#[derive(Default)]
pub struct DashboardState {
    pub current_view: DashboardView,
    pub extract: ExtractViewState,
    pub manage: ManageViewState,
}

/// State for the extraction view
#[derive(Default)]
pub struct ExtractViewState {
    /// Path of the card image to process
    pub image_path: String,
    /// Freshly classified record, editable before saving
    pub record: Option<CardRecord>,
    /// Number of fragments the detector returned
    pub fragment_count: usize,
    /// Overlay preview texture
    pub preview_texture: Option<egui::TextureHandle>,
}

/// State for the modification view
#[derive(Default)]
pub struct ManageViewState {
    /// Cached holder names for the selection boxes
    pub holder_names: Vec<String>,
    /// Whether the name cache has been filled at least once
    pub names_loaded: bool,
    /// Holder selected in the edit section
    pub edit_selection: Option<String>,
    /// Record currently loaded into the edit form
    pub edit_form: Option<CardRecord>,
    /// Holder selected in the delete section
    pub delete_selection: Option<String>,
}

impl ManageViewState {
    /// Drop cached names and any loaded form; the next frame reloads.
    pub fn invalidate(&mut self) {
        self.names_loaded = false;
        self.holder_names.clear();
        self.edit_selection = None;
        self.edit_form = None;
        self.delete_selection = None;
    }
}
