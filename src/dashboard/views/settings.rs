//! Settings view

use egui::RichText;

use super::ViewCtx;
use crate::classify::ClassifierVariant;
use crate::config;
use crate::dashboard::theme::ThemeColors;
use crate::ocr::OcrBackend;
use crate::storage;

/// Render the settings view
pub fn render_settings_view(ui: &mut egui::Ui, ctx: &ViewCtx<'_>) {
    ui.heading("Settings");
    ui.add_space(8.0);

    let mut shared = ctx.shared.write();
    let config = &mut shared.config;

    ui.label(RichText::new("Classifier").strong());
    ui.horizontal(|ui| {
        ui.radio_value(
            &mut config.classifier.variant,
            ClassifierVariant::Positional,
            "Positional (first/last fragment rules)",
        );
        ui.radio_value(
            &mut config.classifier.variant,
            ClassifierVariant::FillOrder,
            "Fill order (first unclaimed fragment rules)",
        );
    });

    ui.add_space(12.0);
    ui.label(RichText::new("OCR").strong());
    ui.horizontal(|ui| {
        ui.radio_value(&mut config.ocr.backend, OcrBackend::Fixture, "Fixture sidecar");
        ui.radio_value(&mut config.ocr.backend, OcrBackend::Tesseract, "Tesseract");
    });
    ui.horizontal(|ui| {
        ui.label("Minimum confidence:");
        ui.add(egui::Slider::new(&mut config.ocr.min_confidence, 0.0..=1.0));
    });

    ui.add_space(12.0);
    ui.label(RichText::new("Overlay").strong());
    ui.horizontal(|ui| {
        ui.label("Box stroke width:");
        ui.add(egui::Slider::new(&mut config.overlay.width, 1..=6));
    });

    ui.add_space(16.0);
    if ui.button("Save settings").clicked() {
        let config = config.clone();
        drop(shared);
        let result = storage::get_config_dir()
            .and_then(|dir| config::save_config(&config, &dir.join("config.toml")));
        let mut shared = ctx.shared.write();
        match result {
            Ok(()) => shared.runtime.set_status("Settings saved"),
            Err(e) => shared.runtime.set_error(e.to_string()),
        }
        return;
    }

    drop(shared);

    ui.add_space(8.0);
    ui.label(
        RichText::new("Backend and classifier changes apply to the next extraction.")
            .size(11.0)
            .color(ThemeColors::TEXT_MUTED),
    );
}
