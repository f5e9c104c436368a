//! Data extraction view
//!
//! Upload a card image, run the pipeline, review the overlay and the
//! classified fields, then save the record.

use std::path::Path;

use egui::RichText;

use super::ViewCtx;
use crate::dashboard::state::ExtractViewState;
use crate::dashboard::theme::ThemeColors;
use crate::pipeline;
use crate::storage::StoreError;

/// Render the extraction view
pub fn render_extract_view(ui: &mut egui::Ui, view_state: &mut ExtractViewState, ctx: &ViewCtx<'_>) {
    ui.heading("Data Extraction");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Business card image:");
        ui.add(
            egui::TextEdit::singleline(&mut view_state.image_path)
                .hint_text("path/to/card.png")
                .desired_width(360.0),
        );
        if ui.button("Extract").clicked() {
            run_extraction(ui, view_state, ctx);
        }
    });

    ui.label(
        RichText::new(
            "File extension support: PNG, JPG. Size limit: 2 MB, dimension limit: \
             1500 px, language: English. Limits are advisory and not enforced.",
        )
        .size(11.0)
        .color(ThemeColors::TEXT_MUTED),
    );

    ui.add_space(12.0);

    ui.columns(2, |columns| {
        render_preview(&mut columns[0], view_state);
        render_fields(&mut columns[1], view_state, ctx);
    });
}

fn run_extraction(ui: &mut egui::Ui, view_state: &mut ExtractViewState, ctx: &ViewCtx<'_>) {
    let config = ctx.shared.read().config.clone();
    let ocr = crate::ocr::OcrPipeline::new(config.ocr.clone());

    match pipeline::extract(
        Path::new(&view_state.image_path),
        &ocr,
        config.classifier.variant,
        &config.overlay,
    ) {
        Ok(extraction) => {
            let size = [
                extraction.overlay.width() as usize,
                extraction.overlay.height() as usize,
            ];
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied(size, extraction.overlay.as_raw());
            view_state.preview_texture = Some(ui.ctx().load_texture(
                "card-overlay",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
            view_state.fragment_count = extraction.fragments.len();
            view_state.record = Some(extraction.record);
            ctx.shared.write().runtime.set_status(format!(
                "Captured {} text fragments",
                view_state.fragment_count
            ));
        }
        Err(e) => {
            view_state.record = None;
            view_state.preview_texture = None;
            ctx.shared.write().runtime.set_error(e.to_string());
        }
    }
}

fn render_preview(ui: &mut egui::Ui, view_state: &mut ExtractViewState) {
    ui.label(RichText::new("Captured text").strong());
    ui.add_space(4.0);

    if let Some(ref texture) = view_state.preview_texture {
        let tex_size = texture.size_vec2();
        let max = egui::vec2(ui.available_width(), 360.0);
        let scale = (max.x / tex_size.x).min(max.y / tex_size.y).min(1.0);
        ui.image((texture.id(), tex_size * scale));
    } else {
        ui.label(
            RichText::new("Upload an image and press Extract")
                .size(11.0)
                .color(ThemeColors::TEXT_MUTED),
        );
    }
}

fn render_fields(ui: &mut egui::Ui, view_state: &mut ExtractViewState, ctx: &ViewCtx<'_>) {
    ui.label(RichText::new("Extracted fields").strong());
    ui.add_space(4.0);

    let Some(record) = view_state.record.as_mut() else {
        ui.label(
            RichText::new("No data extracted yet")
                .size(11.0)
                .color(ThemeColors::TEXT_MUTED),
        );
        return;
    };

    // Fields stay editable so detection mistakes can be fixed before save.
    egui::Grid::new("extracted_fields")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (label, value) in record.fields_mut() {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(220.0));
                ui.end_row();
            }
        });

    ui.add_space(8.0);

    let save = ui.add_enabled(ctx.store.is_some(), egui::Button::new("Save to database"));
    if save.clicked() {
        let Some(store) = ctx.store else { return };
        match store.insert(record) {
            Ok(id) => {
                record.id = Some(id);
                ctx.shared
                    .write()
                    .runtime
                    .set_status("Data successfully uploaded");
            }
            Err(StoreError::Duplicate(_)) => {
                ctx.shared
                    .write()
                    .runtime
                    .set_status("Card data already exists");
            }
            Err(e) => ctx.shared.write().runtime.set_error(e.to_string()),
        }
    }
}
