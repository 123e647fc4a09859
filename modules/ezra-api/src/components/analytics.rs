use dioxus::prelude::*;

use ezra_common::{Category, Palette, ResearchProject};
use ezra_data::insights;

use super::layout::{Layout, Viewer};
use crate::templates::render_to_html;

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

#[derive(Clone, PartialEq)]
pub struct AnalyticsData {
    pub viewer: Viewer,
    pub project_count: usize,
    pub loading: bool,
    pub error: Option<String>,
    // Chart data (pre-serialized JSON for Chart.js)
    pub category_json: String,
    pub phase_json: String,
    pub researcher_json: String,
    pub started_json: String,
}

pub fn build_analytics_data(
    viewer: Viewer,
    projects: &[ResearchProject],
    palette: &Palette,
    loading: bool,
    error: Option<String>,
) -> AnalyticsData {
    let as_pairs = |counts: Vec<insights::Count>| -> Vec<(String, u64)> {
        counts.into_iter().map(|c| (c.name, c.count as u64)).collect()
    };

    // Doughnut slices follow palette colors, keyed by the first project seen
    // in each category.
    let categories = insights::category_counts(projects);
    let colors: Vec<&str> = categories
        .iter()
        .map(|c| {
            projects
                .iter()
                .map(|p| &p.category)
                .find(|cat| cat.display_name() == c.name)
                .map(|cat: &Category| palette.color(cat))
                .unwrap_or_else(|| palette.color(&Category::Other(String::new())))
        })
        .collect();

    let started: Vec<(String, u64)> = insights::started_per_year(projects)
        .into_iter()
        .map(|(year, n)| (year.to_string(), n as u64))
        .collect();

    AnalyticsData {
        viewer,
        project_count: projects.len(),
        loading,
        error,
        category_json: build_doughnut_chart("chart-category", &as_pairs(categories), &colors),
        phase_json: build_bar_chart(
            "chart-phase",
            &as_pairs(insights::phase_counts(projects)),
            "#ef4444",
        ),
        researcher_json: build_horizontal_bar_chart(
            "chart-researcher",
            &as_pairs(insights::researcher_counts(projects)),
            "#9A3324",
        ),
        started_json: build_bar_chart("chart-started", &started, "#00A9E0"),
    }
}

#[allow(non_snake_case)]
#[component]
fn Analytics(data: AnalyticsData) -> Element {
    rsx! {
        Layout { title: "Insights".to_string(), active_page: "analytics".to_string(), viewer: data.viewer.clone(),
            script { src: CHART_JS_SRC }
            div { class: "max-w-7xl mx-auto p-6",
                h2 { class: "text-2xl font-bold text-white", "Research Insights" }
                p { class: "text-sm text-gray-400 mb-6", "{data.project_count} projects" }

                if let Some(err) = &data.error {
                    div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                        "Failed to load projects: {err}"
                    }
                }

                if data.loading && data.project_count == 0 {
                    p { class: "text-gray-500", "Loading research data..." }
                } else {
                    div { class: "grid grid-cols-1 lg:grid-cols-2 gap-4",
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Projects by Category" }
                            canvas { id: "chart-category", height: "200" }
                            script { dangerous_inner_html: "{data.category_json}" }
                        }
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Projects by Phase" }
                            canvas { id: "chart-phase", height: "200" }
                            script { dangerous_inner_html: "{data.phase_json}" }
                        }
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Projects per Researcher" }
                            canvas { id: "chart-researcher", height: "200" }
                            script { dangerous_inner_html: "{data.researcher_json}" }
                        }
                        div { class: "bg-neutral-900 border border-neutral-800 rounded-lg p-4",
                            h3 { class: "font-semibold mb-3 text-sm text-white", "Projects Started per Year" }
                            canvas { id: "chart-started", height: "200" }
                            script { dangerous_inner_html: "{data.started_json}" }
                        }
                    }
                }
            }
        }
    }
}

// --- Chart.js JSON builders ---

fn json_array<T: serde::Serialize>(values: &[T]) -> String {
    serde_json::to_string(values)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

pub fn build_doughnut_chart(id: &str, data: &[(String, u64)], colors: &[&str]) -> String {
    let labels: Vec<&str> = data.iter().map(|(l, _)| l.as_str()).collect();
    let values: Vec<u64> = data.iter().map(|(_, c)| *c).collect();

    format!(
        r#"new Chart(document.getElementById('{id}'),{{type:'doughnut',data:{{labels:{labels},datasets:[{{data:{values},backgroundColor:{colors}}}]}},options:{{responsive:true,plugins:{{legend:{{position:'bottom',labels:{{boxWidth:12,padding:8,color:'#d1d5db'}}}}}}}}}});"#,
        labels = json_array(&labels),
        values = json_array(&values),
        colors = json_array(colors),
    )
}

pub fn build_horizontal_bar_chart(id: &str, data: &[(String, u64)], color: &str) -> String {
    let labels: Vec<&str> = data.iter().map(|(l, _)| l.as_str()).collect();
    let values: Vec<u64> = data.iter().map(|(_, c)| *c).collect();

    format!(
        r#"new Chart(document.getElementById('{id}'),{{type:'bar',data:{{labels:{labels},datasets:[{{data:{values},backgroundColor:'{color}'}}]}},options:{{responsive:true,indexAxis:'y',plugins:{{legend:{{display:false}}}},scales:{{x:{{beginAtZero:true,ticks:{{precision:0}}}}}}}}}});"#,
        labels = json_array(&labels),
        values = json_array(&values),
    )
}

pub fn build_bar_chart(id: &str, data: &[(String, u64)], color: &str) -> String {
    let labels: Vec<&str> = data.iter().map(|(l, _)| l.as_str()).collect();
    let values: Vec<u64> = data.iter().map(|(_, c)| *c).collect();

    format!(
        r#"new Chart(document.getElementById('{id}'),{{type:'bar',data:{{labels:{labels},datasets:[{{data:{values},backgroundColor:'{color}'}}]}},options:{{responsive:true,plugins:{{legend:{{display:false}}}},scales:{{y:{{beginAtZero:true,ticks:{{precision:0}}}}}}}}}});"#,
        labels = json_array(&labels),
        values = json_array(&values),
    )
}

pub fn render_analytics(data: AnalyticsData) -> String {
    let mut dom = VirtualDom::new_with_props(Analytics, AnalyticsProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}
