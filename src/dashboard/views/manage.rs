//! Data modification view
//!
//! Edit a stored card (full-field overwrite, keyed by the immutable
//! cardholder name) or delete one by holder name.

use egui::RichText;

use super::ViewCtx;
use crate::dashboard::state::ManageViewState;
use crate::dashboard::theme::ThemeColors;

/// Render the modification view
pub fn render_manage_view(ui: &mut egui::Ui, view_state: &mut ManageViewState, ctx: &ViewCtx<'_>) {
    ui.heading("Data Modification");
    ui.add_space(8.0);

    let Some(store) = ctx.store else {
        ui.label(
            RichText::new("Database is not available")
                .color(ThemeColors::ACCENT_ERROR),
        );
        return;
    };

    if !view_state.names_loaded {
        match store.list_holder_names() {
            Ok(names) => {
                view_state.holder_names = names;
                view_state.names_loaded = true;
            }
            Err(e) => {
                ctx.shared.write().runtime.set_error(e.to_string());
                return;
            }
        }
    }

    if view_state.holder_names.is_empty() {
        ui.label(
            RichText::new("No cards stored yet")
                .size(11.0)
                .color(ThemeColors::TEXT_MUTED),
        );
        return;
    }

    ui.columns(2, |columns| {
        render_edit_section(&mut columns[0], view_state, ctx);
        render_delete_section(&mut columns[1], view_state, ctx);
    });
}

fn render_edit_section(ui: &mut egui::Ui, view_state: &mut ManageViewState, ctx: &ViewCtx<'_>) {
    let Some(store) = ctx.store else { return };

    ui.label(RichText::new("Edit option").strong());
    ui.add_space(4.0);

    let previous = view_state.edit_selection.clone();
    egui::ComboBox::from_label("Cardholder to edit")
        .selected_text(previous.as_deref().unwrap_or("Select a name"))
        .show_ui(ui, |ui| {
            for name in &view_state.holder_names {
                ui.selectable_value(
                    &mut view_state.edit_selection,
                    Some(name.clone()),
                    name,
                );
            }
        });

    // Load the form whenever the selection changes
    if view_state.edit_selection != previous {
        if let Some(name) = view_state.edit_selection.clone() {
            match store.fetch_by_holder(&name) {
                Ok(record) => view_state.edit_form = record,
                Err(e) => ctx.shared.write().runtime.set_error(e.to_string()),
            }
        }
    }

    let Some(record) = view_state.edit_form.as_mut() else {
        return;
    };

    ui.add_space(8.0);
    egui::Grid::new("edit_fields")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (label, value) in record.fields_mut() {
                ui.label(label);
                // The cardholder name is the record key and stays fixed
                let editable = label != "Cardholder";
                ui.add_enabled(
                    editable,
                    egui::TextEdit::singleline(value).desired_width(220.0),
                );
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    if ui.button("Update").clicked() {
        match store.update_by_holder(record) {
            Ok(()) => ctx
                .shared
                .write()
                .runtime
                .set_status("Details successfully updated"),
            Err(e) => ctx.shared.write().runtime.set_error(e.to_string()),
        }
    }
}

fn render_delete_section(ui: &mut egui::Ui, view_state: &mut ManageViewState, ctx: &ViewCtx<'_>) {
    let Some(store) = ctx.store else { return };

    ui.label(RichText::new("Delete option").strong());
    ui.add_space(4.0);

    egui::ComboBox::from_label("Cardholder to delete")
        .selected_text(
            view_state
                .delete_selection
                .as_deref()
                .unwrap_or("Select a name"),
        )
        .show_ui(ui, |ui| {
            for name in &view_state.holder_names {
                ui.selectable_value(
                    &mut view_state.delete_selection,
                    Some(name.clone()),
                    name,
                );
            }
        });

    ui.add_space(8.0);
    let delete = ui.add_enabled(
        view_state.delete_selection.is_some(),
        egui::Button::new("Delete").fill(ThemeColors::ACCENT_ERROR),
    );
    if delete.clicked() {
        if let Some(name) = view_state.delete_selection.clone() {
            match store.delete_by_holder(&name) {
                Ok(()) => {
                    ctx.shared
                        .write()
                        .runtime
                        .set_status("Details successfully deleted");
                    view_state.invalidate();
                }
                Err(e) => ctx.shared.write().runtime.set_error(e.to_string()),
            }
        }
    }
}
