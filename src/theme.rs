use eframe::egui::{self, Color32};

// Surfaces
pub const PANEL_BG: Color32 = Color32::from_rgb(255, 255, 255);
pub const ROW_BG: Color32 = Color32::from_rgb(248, 248, 248);
pub const ROW_SELECTED_BG: Color32 = Color32::from_rgb(235, 242, 255);
pub const NOTE_BG: Color32 = Color32::from_rgb(242, 242, 242);
pub const ASSET_BAR_BG: Color32 = Color32::from_rgb(245, 245, 245);

// Text
pub const MAIN_TEXT: Color32 = Color32::from_rgb(36, 36, 36);
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(110, 110, 115);
pub const LOGO_TEXT: Color32 = Color32::from_rgb(255, 255, 255);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(211, 21, 16);

// Action button, one fill per phase
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(59, 99, 251);
pub const DISABLED_BUTTON_BG: Color32 = Color32::from_rgb(200, 200, 200);
pub const SUCCESS_BUTTON_BG: Color32 = Color32::from_rgb(0, 122, 77);
pub const ERROR_BUTTON_BG: Color32 = Color32::from_rgb(211, 21, 16);
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);

pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 30);
pub const SELECTED_BORDER: Color32 = Color32::from_rgb(59, 99, 251);

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 8.0;
pub const ROUNDING_BUTTON: f32 = 16.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(320.0, 36.0);
pub const BUTTON_FONT_SIZE: f32 = 15.0;
pub const LOGO_FONT_SIZE: f32 = 10.0;

pub fn logo_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}
