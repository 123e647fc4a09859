//! Category colors, labels and marker icons.
//!
//! Built once at start-up and passed by reference to every renderer.

use crate::types::{Category, Phase, ResearchProject};

const FALLBACK_COLOR: &str = "#707372";
const CONFIDENTIAL_COLOR: &str = "#666666";
const MARKER_SIZE: u32 = 36;

/// Lucide-style glyph drawn inside a map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Brain,
    Heart,
    Sprout,
    Monitor,
    Home,
    Palette,
    Lock,
    Circle,
}

impl MarkerIcon {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerIcon::Brain => "brain",
            MarkerIcon::Heart => "heart",
            MarkerIcon::Sprout => "sprout",
            MarkerIcon::Monitor => "monitor",
            MarkerIcon::Home => "home",
            MarkerIcon::Palette => "palette",
            MarkerIcon::Lock => "lock",
            MarkerIcon::Circle => "circle",
        }
    }

    /// Inner SVG markup for a 24x24 viewBox.
    pub fn svg_paths(&self) -> &'static str {
        match self {
            MarkerIcon::Brain => r#"<path d="M12 2a10 10 0 0 1 10 10c0 5.25-4.47 9.17-7.47 11.66-.39.32-.86.48-1.33.48s-.94-.16-1.33-.48C8.87 21.17 4.4 17.25 4.4 12A10 10 0 0 1 12 2z"/><circle cx="12" cy="10" r="3"/>"#,
            MarkerIcon::Heart => r#"<path d="M19 14c1.49-1.46 3-3.21 3-5.5A5.5 5.5 0 0 0 16.5 3c-1.76 0-3 .5-4.5 2-1.5-1.5-2.74-2-4.5-2A5.5 5.5 0 0 0 2 8.5c0 2.3 1.5 4.05 3 5.5l7 7Z"/>"#,
            MarkerIcon::Sprout => r#"<path d="M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10Z"/><path d="M2 21c0-3 1.85-5.36 5.08-6C9.5 14.52 12 13 13 12"/>"#,
            MarkerIcon::Monitor => r#"<rect width="18" height="18" x="3" y="3" rx="2"/><path d="M7 7h10"/><path d="M7 12h10"/><path d="M7 17h10"/>"#,
            MarkerIcon::Home => r#"<path d="m3 9 9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/><polyline points="9 22 9 12 15 12 15 22"/>"#,
            MarkerIcon::Palette => r#"<path d="m21.64 3.64-1.28-1.28a1.21 1.21 0 0 0-1.72 0L2.36 18.64a1.21 1.21 0 0 0 0 1.72l1.28 1.28a1.2 1.2 0 0 0 1.72 0L21.64 5.36a1.2 1.2 0 0 0 0-1.72Z"/><path d="m14 7 3 3"/>"#,
            MarkerIcon::Lock => r#"<rect width="18" height="11" x="3" y="11" rx="2" ry="2"/><path d="M7 11V7a5 5 0 0 1 10 0v4"/>"#,
            MarkerIcon::Circle => r#"<circle cx="12" cy="12" r="10"/>"#,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub label: String,
    pub icon: MarkerIcon,
}

struct Entry {
    category: Category,
    color: &'static str,
    icon: MarkerIcon,
}

/// Lookup table from category to visual style.
pub struct Palette {
    entries: Vec<Entry>,
    confidential_color: &'static str,
    marker_size: u32,
}

impl Default for Palette {
    fn default() -> Self {
        let entry = |category, color, icon| Entry {
            category,
            color,
            icon,
        };
        Self {
            entries: vec![
                entry(Category::Psychology, "#9A3324", MarkerIcon::Brain),
                entry(Category::HealthSafety, "#f16555", MarkerIcon::Heart),
                entry(Category::Sustainability, "#67823A", MarkerIcon::Sprout),
                entry(Category::Immersive, "#00A9E0", MarkerIcon::Monitor),
                entry(Category::CampusLife, "#B5BD00", MarkerIcon::Home),
                entry(Category::FineArts, "#F2A900", MarkerIcon::Palette),
            ],
            confidential_color: CONFIDENTIAL_COLOR,
            marker_size: MARKER_SIZE,
        }
    }
}

impl Palette {
    /// Style for a category. Never fails: unknown categories get the gray fallback
    /// with their raw tag as label.
    pub fn style(&self, category: &Category) -> CategoryStyle {
        match self.entries.iter().find(|e| &e.category == category) {
            Some(e) => CategoryStyle {
                color: e.color,
                label: e.category.label().to_string(),
                icon: e.icon,
            },
            None => CategoryStyle {
                color: FALLBACK_COLOR,
                label: category.slug().to_string(),
                icon: MarkerIcon::Circle,
            },
        }
    }

    pub fn color(&self, category: &Category) -> &'static str {
        self.entries
            .iter()
            .find(|e| &e.category == category)
            .map(|e| e.color)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Color of a project's marker; confidential projects are muted.
    pub fn marker_color(&self, project: &ResearchProject) -> &'static str {
        if project.is_confidential() {
            self.confidential_color
        } else {
            self.color(&project.category)
        }
    }

    pub fn marker_icon(&self, project: &ResearchProject) -> MarkerIcon {
        if project.is_confidential() {
            MarkerIcon::Lock
        } else {
            self.style(&project.category).icon
        }
    }

    /// Known categories in legend order.
    pub fn legend(&self) -> Vec<(Category, CategoryStyle)> {
        self.entries
            .iter()
            .map(|e| (e.category.clone(), self.style(&e.category)))
            .collect()
    }

    pub fn confidential_color(&self) -> &'static str {
        self.confidential_color
    }

    pub fn marker_size(&self) -> u32 {
        self.marker_size
    }
}

/// Scale a `#rrggbb` color by the phase's brightness factor.
/// Malformed input is returned unchanged.
pub fn phase_color(base: &str, phase: &Phase) -> String {
    let factor = match phase {
        Phase::PreResearch => 0.5,
        Phase::Developmental => 0.75,
        _ => 1.0,
    };

    let hex = match base.strip_prefix('#') {
        Some(h) if h.len() == 6 && h.is_ascii() => h,
        _ => return base.to_string(),
    };
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) else {
        return base.to_string();
    };

    let scale = |c: u8| (c as f64 * factor).round() as u8;
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confidentiality, Position};

    fn project(id: &str, category: Category, confidentiality: Confidentiality) -> ResearchProject {
        ResearchProject {
            id: id.to_string(),
            title: "T".to_string(),
            researcher: "R".to_string(),
            image: category.image_url(),
            category,
            phase: Phase::Developmental,
            description: String::new(),
            position: Position::new(30.0, -97.0),
            partners: None,
            start_date: None,
            completion_date: None,
            confidentiality,
        }
    }

    #[test]
    fn known_category_style() {
        let palette = Palette::default();
        let style = palette.style(&Category::Immersive);
        assert_eq!(style.color, "#00A9E0");
        assert_eq!(style.label, "Immersive Learning");
        assert_eq!(style.icon, MarkerIcon::Monitor);
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let palette = Palette::default();
        let cat = Category::parse("underwater-basket-weaving");
        let style = palette.style(&cat);
        assert_eq!(style.color, FALLBACK_COLOR);
        assert_eq!(style.label, "underwater-basket-weaving");
        assert_eq!(style.icon, MarkerIcon::Circle);
        assert_eq!(palette.color(&Category::parse("")), FALLBACK_COLOR);
    }

    #[test]
    fn confidential_marker_is_muted_and_locked() {
        let palette = Palette::default();
        let p = project("X25-RB09", Category::Psychology, Confidentiality::Confidential);
        assert_eq!(palette.marker_color(&p), CONFIDENTIAL_COLOR);
        assert_eq!(palette.marker_icon(&p), MarkerIcon::Lock);

        let p = project("X25-RB01", Category::Psychology, Confidentiality::Public);
        assert_eq!(palette.marker_color(&p), "#9A3324");
        assert_eq!(palette.marker_icon(&p), MarkerIcon::Brain);
    }

    #[test]
    fn legend_lists_six_categories() {
        let legend = Palette::default().legend();
        assert_eq!(legend.len(), 6);
        assert_eq!(legend[0].0, Category::Psychology);
    }

    #[test]
    fn phase_color_scales_brightness() {
        assert_eq!(phase_color("#9A3324", &Phase::Completed), "#9a3324");
        assert_eq!(phase_color("#9A3324", &Phase::PreResearch), "#4d1a12");
        assert_eq!(phase_color("#ffffff", &Phase::Developmental), "#bfbfbf");
        assert_eq!(phase_color("#ffffff", &Phase::Other("x".into())), "#ffffff");
    }

    #[test]
    fn phase_color_leaves_malformed_input() {
        assert_eq!(phase_color("red", &Phase::PreResearch), "red");
        assert_eq!(phase_color("#zzzzzz", &Phase::PreResearch), "#zzzzzz");
    }
}
