use dioxus::prelude::*;

use crate::templates::page_title;

/// Who is looking at the page. Drives which navigation entries appear.
#[derive(Clone, PartialEq, Default)]
pub struct Viewer {
    pub signed_in: bool,
    pub name: String,
}

impl Viewer {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self {
            signed_in: true,
            name: name.into(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Audience {
    Everyone,
    /// Hidden once signed in.
    Guests,
    Team,
}

struct NavItem {
    key: &'static str,
    label: &'static str,
    href: &'static str,
    audience: Audience,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { key: "map", label: "Research Campus", href: "/map", audience: Audience::Everyone },
    NavItem { key: "portfolio", label: "Gallery", href: "/portfolio", audience: Audience::Everyone },
    NavItem { key: "collaborate", label: "Collaborate", href: "/collaborate", audience: Audience::Guests },
    NavItem { key: "dashboard", label: "Research Hub", href: "/dashboard", audience: Audience::Team },
    NavItem { key: "pitch", label: "Submit Pitch", href: "/pitch", audience: Audience::Team },
    NavItem { key: "analytics", label: "Insights", href: "/analytics", audience: Audience::Team },
];

fn nav_items(signed_in: bool) -> impl Iterator<Item = &'static NavItem> {
    NAV_ITEMS.iter().filter(move |item| match item.audience {
        Audience::Everyone => true,
        Audience::Guests => !signed_in,
        Audience::Team => signed_in,
    })
}

/// Page shell with top navigation.
#[allow(non_snake_case)]
#[component]
pub fn Layout(title: String, active_page: String, viewer: Viewer, children: Element) -> Element {
    let full_title = page_title(&title);
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{full_title}" }
            script { src: "https://cdn.tailwindcss.com" }
        }
        body { class: "min-h-screen bg-neutral-950 font-sans text-gray-100",
            header { class: "sticky top-0 z-50 flex items-center gap-6 px-6 h-14 bg-neutral-900 border-b border-red-500/20",
                a { href: "/map", class: "text-lg font-bold tracking-wide text-red-500 no-underline", "EZRA" }
                nav { class: "flex gap-1",
                    for item in nav_items(viewer.signed_in) {
                        {
                            let class = if item.key == active_page {
                                "px-3 py-1.5 rounded text-sm text-white bg-red-600"
                            } else {
                                "px-3 py-1.5 rounded text-sm text-gray-400 hover:text-white hover:bg-neutral-800 transition-colors"
                            };
                            let href = item.href;
                            let label = item.label;
                            rsx! { a { href: href, class: class, "{label}" } }
                        }
                    }
                }
                div { class: "ml-auto flex items-center gap-3 text-sm",
                    if viewer.signed_in {
                        span { class: "text-gray-400", "{viewer.name}" }
                        form { method: "POST", action: "/logout",
                            button {
                                r#type: "submit",
                                class: "px-3 py-1.5 rounded border border-neutral-700 text-gray-300 hover:text-white",
                                "Sign out"
                            }
                        }
                    } else {
                        a { href: "/login", class: "px-3 py-1.5 rounded border border-red-500/40 text-red-400 hover:text-white no-underline",
                            "Team Login"
                        }
                    }
                }
            }
            main { class: "min-w-0",
                {children}
            }
        }
    }
}
