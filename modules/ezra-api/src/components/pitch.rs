use dioxus::prelude::*;

use ezra_common::Category;

use super::layout::{Layout, Viewer};
use crate::forms::{PitchDraft, PitchStep, Timeline};
use crate::templates::render_to_html;

#[derive(Clone, PartialEq)]
pub struct PitchPageData {
    pub viewer: Viewer,
    pub step: PitchStep,
    pub draft: PitchDraft,
    pub error: Option<String>,
    /// Acknowledgment shown after a successful submit.
    pub receipt: Option<String>,
}

const INPUT_CLASS: &str =
    "w-full px-3 py-2 rounded-lg border border-neutral-700 bg-neutral-950 text-white text-sm mb-4";
const LABEL_CLASS: &str = "block text-sm text-gray-400 mb-1";

/// Fields edited on `step`. Everything else rides along as hidden inputs.
fn step_fields(step: PitchStep) -> &'static [&'static str] {
    match step {
        PitchStep::ProjectContext => &["project_identification", "category"],
        PitchStep::ResearchQuestion => &["research_question"],
        PitchStep::Methodology => &["exploration_plan", "timeline", "resources"],
        PitchStep::PartnersResources => &["partners"],
        PitchStep::SuccessMetrics => &["success_measurement"],
    }
}

fn draft_fields(draft: &PitchDraft) -> [(&'static str, &str); 8] {
    [
        ("project_identification", draft.project_identification.as_str()),
        ("category", draft.category.as_str()),
        ("research_question", draft.research_question.as_str()),
        ("exploration_plan", draft.exploration_plan.as_str()),
        ("timeline", draft.timeline.as_str()),
        ("resources", draft.resources.as_str()),
        ("partners", draft.partners.as_str()),
        ("success_measurement", draft.success_measurement.as_str()),
    ]
}

fn hidden_fields(step: PitchStep, draft: &PitchDraft) -> Vec<(&'static str, String)> {
    let visible = step_fields(step);
    draft_fields(draft)
        .into_iter()
        .filter(|(name, _)| !visible.contains(name))
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

#[allow(non_snake_case)]
#[component]
fn StepFields(step: PitchStep, draft: PitchDraft) -> Element {
    match step {
        PitchStep::ProjectContext => rsx! {
            label { r#for: "project_identification", class: LABEL_CLASS, "Which project prompted this research? *" }
            input {
                r#type: "text", id: "project_identification", name: "project_identification",
                value: "{draft.project_identification}", class: INPUT_CLASS,
            }
            label { r#for: "category", class: LABEL_CLASS, "Research category *" }
            select { id: "category", name: "category", class: INPUT_CLASS,
                option { value: "", selected: draft.category.is_empty(), "Select a category" }
                for c in Category::KNOWN.iter() {
                    {
                        let label = c.label().to_string();
                        let selected = draft.category == label;
                        rsx! { option { value: "{label}", selected: selected, "{label}" } }
                    }
                }
            }
        },
        PitchStep::ResearchQuestion => rsx! {
            label { r#for: "research_question", class: LABEL_CLASS, "What question will this research answer? *" }
            textarea { id: "research_question", name: "research_question", rows: "4", class: INPUT_CLASS,
                "{draft.research_question}"
            }
        },
        PitchStep::Methodology => rsx! {
            label { r#for: "exploration_plan", class: LABEL_CLASS, "How will you explore it? *" }
            textarea { id: "exploration_plan", name: "exploration_plan", rows: "4", class: INPUT_CLASS,
                "{draft.exploration_plan}"
            }
            fieldset { class: "mb-4",
                legend { class: LABEL_CLASS, "Expected intensity *" }
                for t in Timeline::ALL.iter() {
                    {
                        let value = t.value();
                        let label = t.label();
                        let checked = draft.timeline == value;
                        rsx! {
                            label { class: "flex items-center gap-2 text-sm text-gray-300 mb-1",
                                input { r#type: "radio", name: "timeline", value: value, checked: checked }
                                "{label}"
                            }
                        }
                    }
                }
            }
            label { r#for: "resources", class: LABEL_CLASS, "Resources needed" }
            textarea { id: "resources", name: "resources", rows: "3", class: INPUT_CLASS,
                "{draft.resources}"
            }
        },
        PitchStep::PartnersResources => rsx! {
            label { r#for: "partners", class: LABEL_CLASS, "Who will you partner with? *" }
            textarea { id: "partners", name: "partners", rows: "3", class: INPUT_CLASS,
                "{draft.partners}"
            }
        },
        PitchStep::SuccessMetrics => rsx! {
            label { r#for: "success_measurement", class: LABEL_CLASS, "How will you measure success? *" }
            textarea { id: "success_measurement", name: "success_measurement", rows: "4", class: INPUT_CLASS,
                "{draft.success_measurement}"
            }
        },
    }
}

#[allow(non_snake_case)]
#[component]
fn PitchPage(data: PitchPageData) -> Element {
    let step_number = data.step.number();
    let hidden = hidden_fields(data.step, &data.draft);
    let is_first = data.step == PitchStep::ProjectContext;
    let is_last = data.step == PitchStep::SuccessMetrics;
    let step_title = data.step.title();

    rsx! {
        Layout { title: "Submit Pitch".to_string(), active_page: "pitch".to_string(), viewer: data.viewer.clone(),
            div { class: "max-w-2xl mx-auto p-6",
                h2 { class: "text-2xl font-bold text-white mb-1", "Submit a Research Pitch" }
                p { class: "text-sm text-gray-400 mb-6", "Step {step_number} of 5: {step_title}" }

                // Progress
                div { class: "flex gap-2 mb-6",
                    for s in PitchStep::ALL.iter() {
                        {
                            let class = if s.number() <= step_number {
                                "flex-1 h-1.5 rounded bg-red-600"
                            } else {
                                "flex-1 h-1.5 rounded bg-neutral-800"
                            };
                            let title = s.title();
                            rsx! { div { class: class, title: title } }
                        }
                    }
                }

                if let Some(msg) = &data.receipt {
                    div { class: "bg-green-950 border border-green-800 text-green-200 text-sm px-3 py-2 rounded mb-4",
                        "{msg}"
                    }
                }
                if let Some(err) = &data.error {
                    div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                        "{err}"
                    }
                }

                form { method: "POST", action: "/pitch",
                    class: "bg-neutral-900 border border-neutral-800 rounded-lg p-6",
                    input { r#type: "hidden", name: "step", value: "{step_number}" }
                    for (name, value) in hidden.iter() {
                        input { r#type: "hidden", name: *name, value: "{value}" }
                    }

                    StepFields { step: data.step, draft: data.draft.clone() }

                    div { class: "flex justify-between mt-2",
                        if is_first {
                            span {}
                        } else {
                            button { r#type: "submit", name: "action", value: "back",
                                class: "px-4 py-2 rounded border border-neutral-700 text-sm text-gray-300 hover:text-white",
                                "Back"
                            }
                        }
                        if is_last {
                            button { r#type: "submit", name: "action", value: "submit",
                                class: "px-4 py-2 rounded bg-red-600 text-white text-sm hover:bg-red-700",
                                "Submit Pitch"
                            }
                        } else {
                            button { r#type: "submit", name: "action", value: "next",
                                class: "px-4 py-2 rounded bg-red-600 text-white text-sm hover:bg-red-700",
                                "Next"
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_pitch(data: PitchPageData) -> String {
    let mut dom = VirtualDom::new_with_props(PitchPage, PitchPageProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}
