use dioxus::prelude::*;

use super::layout::{Layout, Viewer};
use super::ProjectView;
use crate::templates::{encode_query_value, render_to_html};

#[derive(Clone, PartialEq)]
pub struct CategoryRow {
    pub name: String,
    pub count: usize,
    /// Share of all projects, 0-100.
    pub percent: usize,
}

#[derive(Clone, PartialEq)]
pub struct DashboardData {
    pub viewer: Viewer,
    // Stat cards
    pub project_count: usize,
    pub researcher_count: usize,
    pub categories: Vec<CategoryRow>,
    pub active_projects: Vec<ProjectView>,
    pub loading: bool,
    pub error: Option<String>,
}

pub fn category_rows(counts: &[ezra_data::insights::Count], total: usize) -> Vec<CategoryRow> {
    counts
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            count: c.count,
            percent: if total == 0 { 0 } else { c.count * 100 / total },
        })
        .collect()
}

#[allow(non_snake_case)]
#[component]
fn Dashboard(data: DashboardData) -> Element {
    rsx! {
        Layout { title: "Research Hub".to_string(), active_page: "dashboard".to_string(), viewer: data.viewer.clone(),
            div { class: "max-w-7xl mx-auto p-6",
                div { class: "flex items-center justify-between mb-6",
                    div {
                        h2 { class: "text-2xl font-bold text-white", "Research Hub" }
                        p { class: "text-sm text-gray-400", "Welcome back, {data.viewer.name}" }
                    }
                    form { method: "POST", action: "/dashboard/refresh",
                        button {
                            r#type: "submit",
                            class: "px-3 py-1.5 rounded border border-neutral-700 text-sm text-gray-300 hover:text-white",
                            if data.loading { "Refreshing..." } else { "Refresh data" }
                        }
                    }
                }

                if let Some(err) = &data.error {
                    div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                        "Failed to load projects: {err}"
                    }
                }

                if data.loading && data.project_count == 0 {
                    div { class: "flex items-center gap-3 text-gray-400 py-12 justify-center",
                        div { class: "w-5 h-5 rounded-full border-2 border-red-500 border-t-transparent animate-spin" }
                        "Loading research data..."
                    }
                } else {
                    // --- Stat cards ---
                    div { class: "grid grid-cols-2 gap-4 mb-6",
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            div { class: "text-sm text-gray-400", "Active Research" }
                            div { class: "text-3xl font-bold text-white", "{data.project_count}" }
                        }
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            div { class: "text-sm text-gray-400", "Researchers" }
                            div { class: "text-3xl font-bold text-white", "{data.researcher_count}" }
                        }
                    }

                    div { class: "grid grid-cols-1 lg:grid-cols-2 gap-4",
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Research by Category" }
                            if data.categories.is_empty() {
                                p { class: "text-gray-500 text-sm", "No projects yet." }
                            }
                            for row in data.categories.iter() {
                                {
                                    let bar = format!("width: {}%", row.percent);
                                    rsx! {
                                        div { class: "mb-3",
                                            div { class: "flex justify-between text-sm mb-1",
                                                span { class: "text-gray-300", "{row.name}" }
                                                span { class: "text-gray-500", "{row.count}" }
                                            }
                                            div { class: "h-1.5 bg-neutral-800 rounded",
                                                div { class: "h-1.5 bg-red-600 rounded", style: "{bar}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Active Projects" }
                            if data.active_projects.is_empty() {
                                p { class: "text-gray-500 text-sm", "No projects yet." }
                            }
                            for p in data.active_projects.iter() {
                                {
                                    let href = format!("/map?selected={}", encode_query_value(&p.id));
                                    let badge = format!("background-color: {}", p.phase_color);
                                    rsx! {
                                        a { href: "{href}", class: "flex items-center justify-between py-2 border-b border-neutral-800 no-underline",
                                            div {
                                                div { class: "text-sm font-medium text-white", "{p.title}" }
                                                div { class: "text-xs text-gray-500", "{p.researcher} \u{00b7} {p.category_label}" }
                                            }
                                            span { class: "px-2 py-0.5 rounded-full text-xs text-white", style: "{badge}", "{p.phase}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_dashboard(data: DashboardData) -> String {
    let mut dom = VirtualDom::new_with_props(Dashboard, DashboardProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezra_data::insights::Count;

    #[test]
    fn category_rows_handle_empty_total() {
        let counts = vec![Count { name: "Fine Arts".into(), count: 0 }];
        assert_eq!(category_rows(&counts, 0)[0].percent, 0);
    }

    #[test]
    fn category_rows_compute_share() {
        let counts = vec![
            Count { name: "Campus Life".into(), count: 1 },
            Count { name: "Psychology".into(), count: 3 },
        ];
        let rows = category_rows(&counts, 4);
        assert_eq!(rows[0].percent, 25);
        assert_eq!(rows[1].percent, 75);
    }

    #[test]
    fn renders_stat_cards() {
        let html = render_dashboard(DashboardData {
            viewer: Viewer::team("Pfluger Team"),
            project_count: 12,
            researcher_count: 5,
            categories: Vec::new(),
            active_projects: Vec::new(),
            loading: false,
            error: None,
        });
        assert!(html.contains("Active Research"));
        assert!(html.contains("12"));
        assert!(html.contains("Pfluger Team"));
    }

    #[test]
    fn renders_loading_state_before_first_load() {
        let html = render_dashboard(DashboardData {
            viewer: Viewer::team("Pfluger Team"),
            project_count: 0,
            researcher_count: 0,
            categories: Vec::new(),
            active_projects: Vec::new(),
            loading: true,
            error: None,
        });
        assert!(html.contains("Loading research data..."));
        assert!(!html.contains("Active Research"));
    }
}
