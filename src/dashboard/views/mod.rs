//! Dashboard views

pub mod extract;
pub mod manage;
pub mod settings;

pub use extract::render_extract_view;
pub use manage::render_manage_view;
pub use settings::render_settings_view;

use parking_lot::RwLock;

use crate::shared::SharedAppState;
use crate::storage::CardStore;

/// Shared handles the views act through.
pub struct ViewCtx<'a> {
    pub shared: &'a RwLock<SharedAppState>,
    /// None when the database could not be opened; views disable store
    /// actions in that case.
    pub store: Option<&'a CardStore>,
}
