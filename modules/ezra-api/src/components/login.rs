use dioxus::prelude::*;

use crate::templates::{page_title, render_to_html};

#[allow(non_snake_case)]
#[component]
fn LoginForm(error: Option<String>) -> Element {
    let title = page_title("Team Login");
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
            script { src: "https://cdn.tailwindcss.com" }
        }
        body { class: "flex items-center justify-center min-h-screen bg-neutral-950 font-sans text-gray-100",
            div { class: "w-full max-w-sm bg-neutral-900 border border-red-500/20 rounded-lg p-8",
                h2 { class: "text-xl font-semibold mb-1 text-white", "Team Login" }
                p { class: "text-gray-400 text-sm mb-4",
                    "Sign in to reach the Research Hub, pitches and insights."
                }
                if let Some(err) = &error {
                    div { class: "bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded mb-4",
                        "{err}"
                    }
                }
                form { method: "POST", action: "/login",
                    label { r#for: "email", class: "block text-sm text-gray-400 mb-1", "Email" }
                    input {
                        r#type: "email", name: "email", id: "email", required: true,
                        autocomplete: "username",
                        class: "w-full px-3 py-2.5 border border-neutral-700 bg-neutral-950 rounded text-base mb-3",
                        autofocus: true
                    }
                    label { r#for: "password", class: "block text-sm text-gray-400 mb-1", "Password" }
                    input {
                        r#type: "password", name: "password", id: "password", required: true,
                        autocomplete: "current-password",
                        class: "w-full px-3 py-2.5 border border-neutral-700 bg-neutral-950 rounded text-base mb-3",
                    }
                    button {
                        r#type: "submit",
                        class: "w-full py-2.5 bg-red-600 text-white rounded text-sm font-medium cursor-pointer hover:bg-red-700",
                        "Sign In"
                    }
                }
                a { href: "/map", class: "block text-center text-xs text-gray-500 mt-4 no-underline hover:text-gray-300",
                    "Back to the Research Campus"
                }
            }
        }
    }
}

pub fn render_login(error: Option<String>) -> String {
    let mut dom = VirtualDom::new_with_props(LoginForm, LoginFormProps { error });
    dom.rebuild_in_place();
    render_to_html(&dom)
}
