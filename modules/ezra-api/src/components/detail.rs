use dioxus::prelude::*;

use super::ProjectView;

/// Detail panel for the selected project. `close_href` clears the selection.
#[allow(non_snake_case)]
#[component]
pub fn ProjectDetail(project: ProjectView, close_href: String) -> Element {
    let badge_style = format!("background-color: {}", project.phase_color);
    let accent_style = format!("color: {}", project.color);
    rsx! {
        div { class: "bg-neutral-900 border border-red-500/20 rounded-xl overflow-hidden",
            if !project.confidential {
                img { src: "{project.image}", alt: "{project.title}", class: "w-full h-40 object-cover" }
            }
            div { class: "p-5 space-y-3",
                div { class: "flex items-start justify-between gap-3",
                    div {
                        h3 { class: "text-lg font-semibold text-white", "{project.title}" }
                        span { class: "text-xs text-gray-500", "{project.id}" }
                    }
                    a { href: "{close_href}", class: "text-gray-400 hover:text-white no-underline text-lg", "\u{00d7}" }
                }
                div { class: "flex flex-wrap gap-2 text-xs",
                    span { class: "px-2 py-0.5 rounded-full text-white", style: "{badge_style}", "{project.phase}" }
                    span { class: "px-2 py-0.5 rounded-full bg-neutral-800", style: "{accent_style}", "{project.category_label}" }
                    if project.confidential {
                        span { class: "px-2 py-0.5 rounded-full bg-neutral-800 text-gray-400", "Confidential" }
                    }
                }
                p { class: "text-sm text-gray-400", "Lead: {project.researcher}" }
                if !project.description.is_empty() {
                    p { class: "text-sm text-gray-300", "{project.description}" }
                }
                if !project.partners.is_empty() {
                    div {
                        h4 { class: "text-xs uppercase tracking-wide text-gray-500 mb-1", "Partners" }
                        ul { class: "text-sm text-gray-300 list-disc pl-5",
                            for partner in project.partners.iter() {
                                li { "{partner}" }
                            }
                        }
                    }
                }
                div { class: "flex gap-4 text-xs text-gray-500",
                    if let Some(start) = &project.start_date {
                        span { "Started {start}" }
                    }
                    if let Some(done) = &project.completion_date {
                        span { "Completed {done}" }
                    }
                }
            }
        }
    }
}
