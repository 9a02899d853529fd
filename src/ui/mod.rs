use eframe::egui::{self, RichText, Stroke};

use crate::controller::{ExportController, PanelIntent};
use crate::localizations::Localizations;
use crate::models::{AssetInfo, ExportPhase, Platform};
use crate::platforms;
use crate::theme::*;

pub fn render_header(ui: &mut egui::Ui, localizer: &Localizations) {
    ui.heading(RichText::new(localizer.text("panel-title", "Export")).color(MAIN_TEXT));
    ui.label(
        RichText::new(localizer.text(
            "panel-subtitle",
            "We'll make sure the export is compliant to the platform you select.",
        ))
        .color(SECONDARY_TEXT),
    );
}

pub fn render_asset_info(ui: &mut egui::Ui, asset: &AssetInfo) {
    egui::Frame::none()
        .fill(ASSET_BAR_BG)
        .rounding(ROUNDING_FRAME)
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("⏱ {}", asset.duration)).color(MAIN_TEXT));
                ui.separator();
                ui.label(RichText::new(format!("🎬 {}", asset.aspect_ratio)).color(MAIN_TEXT));
                ui.separator();
                ui.label(RichText::new(&asset.framerate).color(MAIN_TEXT));
            });
        });
}

pub fn render_platform_selector(
    ui: &mut egui::Ui,
    controller: &ExportController,
    localizer: &Localizations,
) -> Vec<PanelIntent> {
    let mut intents = Vec::new();
    let disabled = controller.state().phase() == ExportPhase::Loading;

    ui.horizontal(|ui| {
        ui.label(RichText::new(localizer.text("platforms-label", "Platform(s)")).strong());
        if let Some(badge) = controller.selection_badge(localizer) {
            ui.label(RichText::new(badge).color(SECONDARY_TEXT));
        }
    });

    for platform in platforms::all() {
        intents.extend(render_platform_row(ui, controller, localizer, platform, disabled));
        ui.add_space(4.0);
    }

    intents
}

fn render_platform_row(
    ui: &mut egui::Ui,
    controller: &ExportController,
    localizer: &Localizations,
    platform: &Platform,
    disabled: bool,
) -> Option<PanelIntent> {
    let selected = controller.state().is_selected(platform.id);
    let expanded = controller.state().is_expanded(platform.id);
    let mut intent = None;

    let (fill, border) = if selected {
        (ROW_SELECTED_BG, SELECTED_BORDER)
    } else {
        (ROW_BG, BORDER_COLOR)
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .stroke(Stroke::new(1.0, border))
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.add_enabled_ui(!disabled, |ui| {
                ui.horizontal(|ui| {
                    let mut checked = selected;
                    let checkbox = ui.checkbox(&mut checked, "");
                    if checkbox.clicked() {
                        // Space/Enter on a focused checkbox arrives as a click
                        // without any pointer press.
                        let by_pointer = ui.input(|i| i.pointer.any_click());
                        intent = Some(if by_pointer {
                            PanelIntent::PlatformClicked {
                                platform: platform.id,
                                on_checkbox: true,
                            }
                        } else {
                            PanelIntent::PlatformActivated(platform.id)
                        });
                    }

                    let logo = ui.add(
                        egui::Label::new(
                            RichText::new(platform.logo_text.replace('\n', " "))
                                .size(LOGO_FONT_SIZE)
                                .color(LOGO_TEXT)
                                .background_color(logo_color(platform.logo_color)),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if logo.clicked() {
                        intent = Some(PanelIntent::PlatformClicked {
                            platform: platform.id,
                            on_checkbox: true,
                        });
                    }

                    let chevron = if expanded { "  ▾" } else { "  ▸" };
                    let text = if selected {
                        format!("{}{}", platform.name, chevron)
                    } else {
                        platform.name.to_string()
                    };
                    let body = ui.add(
                        egui::Label::new(RichText::new(text).color(MAIN_TEXT))
                            .sense(egui::Sense::click()),
                    );
                    if body.clicked() {
                        intent = Some(PanelIntent::PlatformClicked {
                            platform: platform.id,
                            on_checkbox: false,
                        });
                    }
                });

                if selected && expanded {
                    render_spec_grid(ui, localizer, platform);
                }
            });
        });

    intent
}

fn render_spec_grid(ui: &mut egui::Ui, localizer: &Localizations, platform: &Platform) {
    let spec = &platform.spec;
    ui.add_space(4.0);
    egui::Grid::new(("spec-grid", platform.id.key()))
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            let rows = [
                (localizer.text("spec-format", "Format"), spec.format.label().to_string()),
                (localizer.text("spec-resolution", "Resolution"), spec.resolution.to_string()),
                (localizer.text("spec-duration", "Duration"), spec.duration.to_string()),
                (localizer.text("spec-max-size", "Max file size"), spec.max_file_size.to_string()),
            ];
            for (label, value) in rows {
                ui.label(RichText::new(label).color(SECONDARY_TEXT));
                ui.label(RichText::new(value).color(MAIN_TEXT));
                ui.end_row();
            }
        });
}

pub fn render_progress(ui: &mut egui::Ui, controller: &ExportController, localizer: &Localizations) {
    if controller.state().phase() != ExportPhase::Loading {
        return;
    }

    let (caption, percent) = controller.progress_caption(localizer);
    ui.horizontal(|ui| {
        ui.label(RichText::new(caption).color(MAIN_TEXT));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(percent).color(SECONDARY_TEXT));
        });
    });
    ui.add(egui::ProgressBar::new(controller.state().progress() / 100.0));
}

pub fn render_note_box(ui: &mut egui::Ui, controller: &ExportController, localizer: &Localizations) {
    egui::Frame::none()
        .fill(NOTE_BG)
        .rounding(ROUNDING_FRAME)
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("ⓘ {}", localizer.text("note-title", "Note"))).strong());
            for line in controller.note_lines(localizer) {
                ui.label(RichText::new(format!("• {}", line)).color(SECONDARY_TEXT));
            }
        });
}

pub fn render_action_buttons(
    ui: &mut egui::Ui,
    controller: &ExportController,
    localizer: &Localizations,
) -> Option<PanelIntent> {
    let phase = controller.state().phase();
    let enabled = controller.action_enabled();
    let fill = match phase {
        ExportPhase::Success => SUCCESS_BUTTON_BG,
        ExportPhase::Error => ERROR_BUTTON_BG,
        _ if !enabled => DISABLED_BUTTON_BG,
        _ => PRIMARY_BUTTON_BG,
    };

    let mut intent = None;

    if let Some(message) = controller.state().error_message() {
        ui.label(RichText::new(message).color(TEXT_ERROR));
    }

    ui.horizontal(|ui| {
        let button = egui::Button::new(
            RichText::new(controller.action_label(localizer))
                .size(BUTTON_FONT_SIZE)
                .color(BUTTON_MAIN_TEXT),
        )
        .min_size(MIN_SIZE_BUTTON)
        .fill(fill)
        .rounding(ROUNDING_BUTTON)
        .stroke(Stroke::new(1.0, BORDER_COLOR));

        if ui.add_enabled(enabled, button).clicked() {
            intent = Some(controller.action_intent());
        }

        if phase == ExportPhase::Loading
            && ui.button(localizer.text("button-cancel", "Cancel")).clicked()
        {
            intent = Some(PanelIntent::CancelRequested);
        }
    });

    intent
}
