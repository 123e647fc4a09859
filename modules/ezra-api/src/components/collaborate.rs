use dioxus::prelude::*;

use super::layout::{Layout, Viewer};
use crate::forms::ContactForm;
use crate::templates::render_to_html;

#[derive(Clone, PartialEq)]
pub struct CollaborateData {
    pub viewer: Viewer,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
    pub confidential: bool,
    pub error: Option<String>,
    pub sent: bool,
}

impl CollaborateData {
    pub fn empty(viewer: Viewer) -> Self {
        Self::from_form(viewer, &ContactForm::default())
    }

    /// Re-fill the form with what was posted.
    pub fn from_form(viewer: Viewer, form: &ContactForm) -> Self {
        Self {
            viewer,
            name: form.name.clone(),
            email: form.email.clone(),
            organization: form.organization.clone(),
            message: form.message.clone(),
            confidential: form.is_confidential(),
            error: None,
            sent: false,
        }
    }
}

const INPUT_CLASS: &str =
    "w-full px-3 py-2 rounded-lg border border-neutral-700 bg-neutral-950 text-white text-sm mb-4";

#[allow(non_snake_case)]
#[component]
fn Collaborate(data: CollaborateData) -> Element {
    rsx! {
        Layout { title: "Collaborate".to_string(), active_page: "collaborate".to_string(), viewer: data.viewer.clone(),
            div { class: "max-w-xl mx-auto p-6",
                h2 { class: "text-2xl font-bold text-white mb-1", "Collaborate With Us" }
                p { class: "text-sm text-gray-400 mb-6",
                    "Districts, universities and partners: tell us what you want to explore."
                }

                if data.sent {
                    div { class: "bg-neutral-900 border border-green-800 rounded-lg p-8 text-center",
                        h3 { class: "text-xl font-semibold text-green-300 mb-2", "Message Sent!" }
                        p { class: "text-sm text-gray-400", "Thanks, {data.name}. We'll be in touch soon." }
                        a { href: "/collaborate", class: "inline-block mt-4 text-sm text-red-400 no-underline hover:text-white",
                            "Send another message"
                        }
                    }
                } else {
                    if let Some(err) = &data.error {
                        div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                            "{err}"
                        }
                    }
                    form { method: "POST", action: "/collaborate",
                        class: "bg-neutral-900 border border-neutral-800 rounded-lg p-6",
                        label { r#for: "name", class: "block text-sm text-gray-400 mb-1", "Name *" }
                        input { r#type: "text", id: "name", name: "name", value: "{data.name}", class: INPUT_CLASS }
                        label { r#for: "email", class: "block text-sm text-gray-400 mb-1", "Email *" }
                        input { r#type: "email", id: "email", name: "email", value: "{data.email}", class: INPUT_CLASS }
                        label { r#for: "organization", class: "block text-sm text-gray-400 mb-1", "Organization" }
                        input { r#type: "text", id: "organization", name: "organization", value: "{data.organization}", class: INPUT_CLASS }
                        label { r#for: "message", class: "block text-sm text-gray-400 mb-1", "Message *" }
                        textarea { id: "message", name: "message", rows: "5", class: INPUT_CLASS, "{data.message}" }
                        label { class: "flex items-center gap-2 text-sm text-gray-300 mb-4",
                            input { r#type: "checkbox", name: "confidential", value: "on", checked: data.confidential }
                            "This is a confidential inquiry"
                        }
                        button {
                            r#type: "submit",
                            class: "w-full py-2.5 bg-red-600 text-white rounded text-sm font-medium hover:bg-red-700",
                            "Send Message"
                        }
                    }
                }
            }
        }
    }
}

pub fn render_collaborate(data: CollaborateData) -> String {
    let mut dom = VirtualDom::new_with_props(Collaborate, CollaborateProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}
