use ezra_common::{phase_color, Palette, ResearchProject};

pub mod analytics;
pub mod collaborate;
pub mod dashboard;
pub mod detail;
pub mod layout;
pub mod login;
pub mod map;
pub mod pitch;
pub mod portfolio;

pub use analytics::{build_analytics_data, render_analytics, AnalyticsData};
pub use collaborate::{render_collaborate, CollaborateData};
pub use dashboard::{render_dashboard, DashboardData};
pub use layout::Viewer;
pub use login::render_login;
pub use map::{render_map, LeafletRenderer, MapPageData, MarkerRenderer};
pub use pitch::{render_pitch, PitchPageData};
pub use portfolio::{render_portfolio, PortfolioData, PortfolioMode};

// --- View Models ---

#[derive(Clone, PartialEq)]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub category_label: String,
    pub color: String,
    /// Category color scaled by phase brightness.
    pub phase_color: String,
    pub phase: String,
    pub description: String,
    pub partners: Vec<String>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    pub image: String,
    pub confidential: bool,
    pub lat: f64,
    pub lng: f64,
}

/// Build the view of a project. Confidential titles and descriptions are
/// redacted unless `reveal` is set (signed-in views).
pub fn project_to_view(project: &ResearchProject, palette: &Palette, reveal: bool) -> ProjectView {
    let style = palette.style(&project.category);
    let color = palette.marker_color(project).to_string();
    let redact = project.is_confidential() && !reveal;

    ProjectView {
        id: project.id.clone(),
        title: if redact {
            project.public_title().to_string()
        } else {
            project.title.clone()
        },
        researcher: project.researcher.clone(),
        category: project.category.slug().to_string(),
        category_label: style.label,
        phase_color: phase_color(&color, &project.phase),
        color,
        phase: project.phase.label().to_string(),
        description: if redact {
            String::new()
        } else {
            project.description.clone()
        },
        partners: project.partners.clone().unwrap_or_default(),
        start_date: project.start_date.clone(),
        completion_date: project.completion_date.clone(),
        image: project.image.clone(),
        confidential: project.is_confidential(),
        lat: project.position.lat,
        lng: project.position.lng,
    }
}

/// Category `<select>` options: `(value, label)` with "All" first.
pub fn category_options(palette: &Palette) -> Vec<(String, String)> {
    std::iter::once(("all".to_string(), "All Categories".to_string()))
        .chain(
            palette
                .legend()
                .into_iter()
                .map(|(category, style)| (category.slug().to_string(), style.label)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezra_common::{Category, Confidentiality, Phase, Position};

    fn project(confidentiality: Confidentiality) -> ResearchProject {
        ResearchProject {
            id: "X25-RB09".into(),
            title: "Security Vestibules".into(),
            researcher: "Agustin Gonzalez".into(),
            category: Category::HealthSafety,
            phase: Phase::Developmental,
            description: "Entry sequences".into(),
            position: Position::new(30.0, -97.0),
            partners: Some(vec!["AISD".into()]),
            start_date: None,
            completion_date: None,
            image: Category::HealthSafety.image_url(),
            confidentiality,
        }
    }

    #[test]
    fn public_project_keeps_title_and_category_color() {
        let view = project_to_view(&project(Confidentiality::Public), &Palette::default(), false);
        assert_eq!(view.title, "Security Vestibules");
        assert_eq!(view.color, "#f16555");
        assert_eq!(view.category_label, "Health & Safety");
        assert_eq!(view.partners, vec!["AISD".to_string()]);
    }

    #[test]
    fn confidential_project_is_redacted_and_muted() {
        let view = project_to_view(
            &project(Confidentiality::Confidential),
            &Palette::default(),
            false,
        );
        assert_eq!(view.title, "CONFIDENTIAL");
        assert!(view.description.is_empty());
        assert_eq!(view.color, "#666666");
        assert!(view.confidential);
    }

    #[test]
    fn signed_in_views_reveal_confidential_titles() {
        let view = project_to_view(
            &project(Confidentiality::Confidential),
            &Palette::default(),
            true,
        );
        assert_eq!(view.title, "Security Vestibules");
        assert_eq!(view.color, "#666666");
    }

    #[test]
    fn category_options_start_with_all() {
        let options = category_options(&Palette::default());
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].0, "all");
        assert_eq!(options[1], ("psychology".to_string(), "Psychology".to_string()));
    }
}
