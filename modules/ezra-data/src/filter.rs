//! Search, category filter, and selection over the project list.
//!
//! The map sidebar, the marker feed and the portfolio all filter through
//! `ProjectQuery`, so a project is visible in one place iff it is visible in
//! the others.

use ezra_common::{Category, MapConfig, Position, ResearchProject};

/// Category restriction. `All` disables the restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `"all"` and the empty string mean no restriction; anything else is an
    /// exact category slug.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => CategoryFilter::All,
            slug => CategoryFilter::Only(Category::parse(slug)),
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Value used in query strings and `<select>` options.
    pub fn as_param(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.slug(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    search: String,
    pub category: CategoryFilter,
    // Match confidential projects on their public title only.
    public_titles: bool,
}

impl ProjectQuery {
    /// The search text is matched verbatim (lowercased, never trimmed).
    pub fn new(search: &str, category: CategoryFilter) -> Self {
        Self {
            search: search.to_lowercase(),
            category,
            public_titles: false,
        }
    }

    /// Restrict title matching to what a signed-out reader sees, so a search
    /// cannot reveal a confidential title.
    pub fn for_guest(mut self) -> Self {
        self.public_titles = true;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Case-insensitive substring match on title or researcher, then the
    /// category restriction. An empty search matches everything.
    pub fn matches(&self, project: &ResearchProject) -> bool {
        let title = if self.public_titles {
            project.public_title()
        } else {
            project.title.as_str()
        };
        let text_hit = self.search.is_empty()
            || title.to_lowercase().contains(&self.search)
            || project.researcher.to_lowercase().contains(&self.search);
        text_hit && self.category.matches(&project.category)
    }

    /// Matching projects in their original order.
    pub fn apply<'a>(&self, projects: &'a [ResearchProject]) -> Vec<&'a ResearchProject> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// At most one selected project. Selecting replaces whatever was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn from_param(raw: Option<&str>) -> Self {
        Self {
            selected: raw
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// The selected project, if it is still in the list.
    pub fn project<'a>(&self, projects: &'a [ResearchProject]) -> Option<&'a ResearchProject> {
        let id = self.selected.as_deref()?;
        projects.iter().find(|p| p.id == id)
    }

    /// Where the map should look: the selected project at the selection zoom,
    /// or the configured default view.
    pub fn view_target(&self, projects: &[ResearchProject], map: &MapConfig) -> (Position, u8) {
        match self.project(projects) {
            Some(p) if p.position.is_finite() => (p.position, map.selected_zoom),
            _ => (map.center, map.zoom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezra_common::{Confidentiality, Phase};

    fn project(id: &str, title: &str, researcher: &str, category: &str) -> ResearchProject {
        let category = Category::parse(category);
        ResearchProject {
            id: id.to_string(),
            title: title.to_string(),
            researcher: researcher.to_string(),
            image: category.image_url(),
            category,
            phase: Phase::Completed,
            description: String::new(),
            position: Position::new(30.0, -97.0),
            partners: None,
            start_date: None,
            completion_date: None,
            confidentiality: Confidentiality::Public,
        }
    }

    fn sample() -> Vec<ResearchProject> {
        vec![
            project("P1", "Acoustic Design", "Emily Watson", "health-safety"),
            project("P2", "Biophilic Learning", "Sarah Chen", "sustainability"),
            project("P3", "Quiet Spaces", "Marcus Acosta", "psychology"),
        ]
    }

    fn ids(found: Vec<&ResearchProject>) -> Vec<&str> {
        found.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_researcher() {
        let projects = sample();
        let q = ProjectQuery::new("ACO", CategoryFilter::All);
        assert_eq!(ids(q.apply(&projects)), vec!["P1", "P3"]);

        let q = ProjectQuery::new("chen", CategoryFilter::All);
        assert_eq!(ids(q.apply(&projects)), vec!["P2"]);
    }

    #[test]
    fn empty_search_and_all_category_match_everything() {
        let projects = sample();
        assert_eq!(ProjectQuery::default().apply(&projects).len(), 3);
        assert_eq!(
            ProjectQuery::new("", CategoryFilter::parse("all"))
                .apply(&projects)
                .len(),
            3
        );
    }

    #[test]
    fn search_text_is_not_trimmed() {
        let projects = sample();
        let q = ProjectQuery::new("design ", CategoryFilter::All);
        assert!(q.apply(&projects).is_empty());

        let q = ProjectQuery::new("   ", CategoryFilter::All);
        assert!(q.apply(&projects).is_empty());

        let q = ProjectQuery::new("c design", CategoryFilter::All);
        assert_eq!(ids(q.apply(&projects)), vec!["P1"]);
    }

    #[test]
    fn guest_search_ignores_confidential_titles() {
        let mut projects = sample();
        projects[0].confidentiality = Confidentiality::Confidential;

        let q = ProjectQuery::new("acoustic", CategoryFilter::All);
        assert_eq!(ids(q.apply(&projects)), vec!["P1"]);
        assert!(q.clone().for_guest().apply(&projects).is_empty());

        // Researcher names stay searchable, and the public label matches.
        let q = ProjectQuery::new("watson", CategoryFilter::All).for_guest();
        assert_eq!(ids(q.apply(&projects)), vec!["P1"]);
        let q = ProjectQuery::new("confidential", CategoryFilter::All).for_guest();
        assert_eq!(ids(q.apply(&projects)), vec!["P1"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let projects = sample();
        let q = ProjectQuery::new("", CategoryFilter::parse("psychology"));
        assert_eq!(ids(q.apply(&projects)), vec!["P3"]);

        let q = ProjectQuery::new("", CategoryFilter::parse("Psychology"));
        assert!(q.apply(&projects).is_empty());
    }

    #[test]
    fn search_and_category_combine() {
        let projects = sample();
        let q = ProjectQuery::new("aco", CategoryFilter::parse("health-safety"));
        assert_eq!(ids(q.apply(&projects)), vec!["P1"]);
    }

    #[test]
    fn category_filter_param_round_trip() {
        assert_eq!(CategoryFilter::parse("").as_param(), "all");
        assert_eq!(CategoryFilter::parse("fine-arts").as_param(), "fine-arts");
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let projects = sample();
        let mut selection = Selection::default();
        selection.select("P1");
        selection.select("P2");
        assert!(!selection.is_selected("P1"));
        assert_eq!(selection.project(&projects).map(|p| p.id.as_str()), Some("P2"));

        selection.clear();
        assert!(selection.project(&projects).is_none());
    }

    #[test]
    fn view_target_zooms_to_selection() {
        let projects = sample();
        let map = MapConfig::default();

        let none = Selection::from_param(Some(""));
        assert_eq!(none.view_target(&projects, &map), (map.center, 13));

        let some = Selection::from_param(Some("P2"));
        assert_eq!(
            some.view_target(&projects, &map),
            (Position::new(30.0, -97.0), 15)
        );

        let gone = Selection::from_param(Some("P9"));
        assert_eq!(gone.view_target(&projects, &map), (map.center, 13));
    }
}
