use egui::Color32;

use crate::models::schedule_item::{ItemStatus, ItemType, ScheduleItem};

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse `#RRGGBB` or one of the admin's named highlight colours.
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color32::from_rgb(r, g, b));
    }

    match value.to_ascii_lowercase().as_str() {
        "blue" => Some(Color32::from_rgb(147, 197, 253)),
        "yellow" => Some(Color32::from_rgb(253, 224, 71)),
        "orange" => Some(Color32::from_rgb(253, 186, 116)),
        "red" | "coral" => Some(Color32::from_rgb(252, 165, 165)),
        "green" => Some(Color32::from_rgb(134, 239, 172)),
        "purple" => Some(Color32::from_rgb(216, 180, 254)),
        "pink" => Some(Color32::from_rgb(249, 168, 212)),
        "cream" => Some(Color32::from_rgb(254, 243, 199)),
        _ => None,
    }
}

#[derive(Clone, Copy)]
pub(crate) struct SchedulePalette {
    pub header_bg: Color32,
    pub gutter_text: Color32,
    pub placeholder_bg: Color32,
    pub placeholder_text: Color32,
    pub can_drop_bg: Color32,
    pub hover_bg: Color32,
    pub hover_border: Color32,
    pub in_progress_bg: Color32,
    pub card_text: Color32,
    pub card_border: Color32,
}

impl SchedulePalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        if visuals.dark_mode {
            Self {
                header_bg: Color32::from_gray(35),
                gutter_text: Color32::GRAY,
                placeholder_bg: Color32::from_gray(28),
                placeholder_text: Color32::from_gray(110),
                can_drop_bg: Color32::from_rgb(30, 45, 60),
                hover_bg: Color32::from_rgb(71, 85, 105),
                hover_border: Color32::from_rgb(120, 200, 120),
                in_progress_bg: Color32::from_rgb(60, 50, 30),
                card_text: Color32::from_gray(20),
                card_border: Color32::from_gray(80),
            }
        } else {
            Self {
                header_bg: Color32::WHITE,
                gutter_text: Color32::GRAY,
                placeholder_bg: Color32::from_gray(245),
                placeholder_text: Color32::from_gray(150),
                can_drop_bg: Color32::from_rgb(226, 236, 246),
                hover_bg: Color32::from_rgb(148, 163, 184),
                hover_border: Color32::from_rgb(120, 200, 120),
                in_progress_bg: Color32::from_rgb(254, 240, 200),
                card_text: Color32::from_gray(20),
                card_border: Color32::from_gray(190),
            }
        }
    }
}

/// Card fill: the item's highlight colour, else a colour per type.
pub(crate) fn card_fill(item: &ScheduleItem) -> Color32 {
    let base = item
        .highlight_color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(match item.item_type {
            ItemType::Keynote => Color32::from_rgb(253, 230, 138),
            ItemType::Training => Color32::from_rgb(187, 247, 208),
            ItemType::Submission => Color32::from_rgb(226, 232, 240),
            ItemType::Custom => Color32::from_rgb(233, 213, 255),
        });

    if item.status == ItemStatus::Cancelled {
        with_alpha(base, 110)
    } else {
        base
    }
}
