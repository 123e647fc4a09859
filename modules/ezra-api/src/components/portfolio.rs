use dioxus::prelude::*;

use super::detail::ProjectDetail;
use super::layout::{Layout, Viewer};
use super::ProjectView;
use crate::templates::{encode_query_value, render_to_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortfolioMode {
    #[default]
    Grid,
    List,
}

impl PortfolioMode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "list" => PortfolioMode::List,
            _ => PortfolioMode::Grid,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            PortfolioMode::Grid => "grid",
            PortfolioMode::List => "list",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct PortfolioData {
    pub viewer: Viewer,
    pub projects: Vec<ProjectView>,
    pub category: String,
    pub categories: Vec<(String, String)>,
    pub mode: PortfolioMode,
    pub selected: Option<ProjectView>,
    pub loading: bool,
    pub error: Option<String>,
}

fn portfolio_href(category: &str, mode: PortfolioMode, selected: Option<&str>) -> String {
    let mut href = format!(
        "/portfolio?category={}&view={}",
        encode_query_value(category),
        mode.as_param()
    );
    if let Some(id) = selected {
        href.push_str("&selected=");
        href.push_str(&encode_query_value(id));
    }
    href
}

fn toggle_class(active: bool) -> &'static str {
    if active {
        "px-3 py-1.5 rounded text-sm bg-red-600 text-white no-underline"
    } else {
        "px-3 py-1.5 rounded text-sm bg-neutral-800 text-gray-400 hover:text-white no-underline"
    }
}

#[allow(non_snake_case)]
#[component]
fn Portfolio(data: PortfolioData) -> Element {
    let grid_href = portfolio_href(&data.category, PortfolioMode::Grid, None);
    let list_href = portfolio_href(&data.category, PortfolioMode::List, None);
    let close_href = portfolio_href(&data.category, data.mode, None);
    let container_class = match data.mode {
        PortfolioMode::Grid => "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4",
        PortfolioMode::List => "flex flex-col gap-3",
    };

    rsx! {
        Layout { title: "Gallery".to_string(), active_page: "portfolio".to_string(), viewer: data.viewer.clone(),
            div { class: "max-w-7xl mx-auto p-6",
                div { class: "flex flex-wrap items-center justify-between gap-4 mb-6",
                    div {
                        h2 { class: "text-2xl font-bold text-white", "Research Gallery" }
                        p { class: "text-sm text-gray-400", "Completed research ready to inform built work" }
                    }
                    div { class: "flex items-center gap-3",
                        // Category chips
                        div { class: "flex flex-wrap gap-2",
                            for (value, label) in data.categories.iter() {
                                {
                                    let href = portfolio_href(value, data.mode, None);
                                    let class = toggle_class(*value == data.category);
                                    rsx! { a { href: "{href}", class: class, "{label}" } }
                                }
                            }
                        }
                        div { class: "flex gap-1",
                            a { href: "{grid_href}", class: toggle_class(data.mode == PortfolioMode::Grid), "Grid" }
                            a { href: "{list_href}", class: toggle_class(data.mode == PortfolioMode::List), "List" }
                        }
                    }
                }

                if let Some(err) = &data.error {
                    div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                        "Failed to load projects: {err}"
                    }
                }

                if let Some(project) = &data.selected {
                    div { class: "mb-6 max-w-2xl",
                        ProjectDetail { project: project.clone(), close_href: close_href.clone() }
                    }
                }

                if data.loading && data.projects.is_empty() {
                    p { class: "text-gray-500", "Loading research data..." }
                } else if data.projects.is_empty() {
                    p { class: "text-gray-500", "No completed projects in this category yet." }
                } else {
                    div { class: container_class,
                        for p in data.projects.iter() {
                            {
                                let href = portfolio_href(&data.category, data.mode, Some(&p.id));
                                let accent = format!("color: {}", p.color);
                                let is_list = data.mode == PortfolioMode::List;
                                rsx! {
                                    a { href: "{href}", class: "block bg-neutral-900 border border-neutral-800 hover:border-red-500/40 rounded-xl overflow-hidden no-underline",
                                        if !is_list && !p.confidential {
                                            img { src: "{p.image}", alt: "{p.title}", class: "w-full h-40 object-cover" }
                                        }
                                        div { class: "p-4",
                                            span { class: "text-xs font-semibold uppercase", style: "{accent}", "{p.category_label}" }
                                            h3 { class: "font-semibold text-white mt-1", "{p.title}" }
                                            p { class: "text-xs text-gray-400 mt-1", "{p.researcher}" }
                                            if let Some(done) = &p.completion_date {
                                                p { class: "text-xs text-gray-500 mt-1", "Completed {done}" }
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
}

pub fn render_portfolio(data: PortfolioData) -> String {
    let mut dom = VirtualDom::new_with_props(Portfolio, PortfolioProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_grid() {
        assert_eq!(PortfolioMode::parse(""), PortfolioMode::Grid);
        assert_eq!(PortfolioMode::parse("list"), PortfolioMode::List);
        assert_eq!(PortfolioMode::parse("LIST"), PortfolioMode::Grid);
    }

    #[test]
    fn href_keeps_filter_and_mode() {
        assert_eq!(
            portfolio_href("fine-arts", PortfolioMode::List, Some("X25-RB07")),
            "/portfolio?category=fine-arts&view=list&selected=X25-RB07"
        );
    }
}
