use dioxus::prelude::*;
use serde::Serialize;

use ezra_common::{MapConfig, Position};

use super::detail::ProjectDetail;
use super::layout::{Layout, Viewer};
use super::ProjectView;
use crate::templates::{encode_query_value, render_to_html};

/// Initial camera and data endpoints handed to the client map.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: Position,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub markers_url: String,
    pub districts_url: String,
    pub selected: Option<String>,
    pub marker_size: u32,
    /// Link prefix for selecting a marker; the project id is appended.
    pub select_href: String,
}

impl MapView {
    pub fn new(map: &MapConfig, target: (Position, u8), filter_query: &str, marker_size: u32) -> Self {
        let (center, zoom) = target;
        Self {
            center,
            zoom,
            min_zoom: map.min_zoom,
            max_zoom: map.max_zoom,
            tile_url: map.resolved_tile_url(),
            attribution: map.attribution.clone(),
            markers_url: format!("/api/markers?{filter_query}"),
            districts_url: "/api/districts".to_string(),
            selected: None,
            marker_size,
            select_href: format!("/map?{filter_query}&selected="),
        }
    }
}

/// A client-side map backend. Exactly one is compiled in.
pub trait MarkerRenderer {
    fn stylesheet(&self) -> &'static str;
    fn script_src(&self) -> &'static str;
    /// Script that creates the map, draws district outlines, then replaces
    /// the marker layer with the current marker feed.
    fn init_script(&self, view: &MapView) -> String;
}

pub struct LeafletRenderer;

const LEAFLET_MAP_SCRIPT: &str = r#"
const map = L.map('map', { zoomControl: false, minZoom: cfg.min_zoom, maxZoom: cfg.max_zoom })
    .setView(cfg.center, cfg.zoom);
L.tileLayer(cfg.tile_url, { attribution: cfg.attribution, maxZoom: cfg.max_zoom }).addTo(map);
L.control.zoom({ position: 'topright' }).addTo(map);

map.createPane('districts');
map.getPane('districts').style.zIndex = 350;
const districtColors = ['#1f2937', '#7f1d1d', '#14532d', '#1e3a8a', '#713f12', '#374151', '#4c1d95'];

fetch(cfg.districts_url)
    .then(r => r.json())
    .then(data => {
        L.geoJSON(data, {
            pane: 'districts',
            style: f => ({
                color: '#ef4444', weight: 1, opacity: 0.4,
                fillColor: districtColors[parseInt(f.properties.color, 10) % districtColors.length] || '#374151',
                fillOpacity: 0.15,
            }),
            onEachFeature: (f, layer) => layer.bindTooltip(`${f.properties.name} (${f.properties.office})`),
        }).addTo(map);
    })
    .catch(() => {});

let markers = L.layerGroup().addTo(map);

function markerIcon(p) {
    const size = cfg.marker_size;
    const selected = p.id === cfg.selected;
    const border = p.confidential ? '3px dashed rgba(255,255,255,0.3)'
        : selected ? '3px solid #ffffff' : '3px solid rgba(17,17,17,0.9)';
    const background = p.confidential ? 'linear-gradient(135deg, #666666, #333333)' : p.color;
    const stroke = p.confidential ? '#cccccc' : 'white';
    const muted = p.confidential ? 'opacity:0.7;filter:blur(0.5px);' : '';
    return L.divIcon({
        className: 'ezra-marker',
        html: `<div style="width:${size}px;height:${size}px;background:${background};border-radius:50%;display:flex;align-items:center;justify-content:center;box-shadow:0 2px 8px rgba(0,0,0,0.3);border:${border};${muted}"><svg width="${size / 2}" height="${size / 2}" viewBox="0 0 24 24" fill="none" stroke="${stroke}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">${p.icon_svg}</svg></div>`,
        iconSize: [size, size],
        iconAnchor: [size / 2, size],
        popupAnchor: [0, -size],
    });
}

function loadMarkers() {
    fetch(cfg.markers_url)
        .then(r => r.json())
        .then(data => {
            markers.clearLayers();
            (data.features || []).forEach(f => {
                const p = f.properties;
                const [lng, lat] = f.geometry.coordinates;
                const m = L.marker([lat, lng], { icon: markerIcon(p) });
                const label = document.createElement('div');
                label.style.textAlign = 'center';
                const strong = document.createElement('strong');
                strong.style.color = p.color;
                strong.textContent = p.confidential ? '\u{1F512} ' + p.label : p.label;
                const id = document.createElement('div');
                id.style.fontSize = '11px';
                id.style.color = '#999';
                id.textContent = p.id;
                label.append(strong, id);
                m.bindTooltip(label, { direction: 'top', offset: [0, -10] });
                m.on('click', () => { window.location.href = cfg.select_href + encodeURIComponent(p.id); });
                markers.addLayer(m);
            });
        });
}

window.addEventListener('pagehide', () => { markers.clearLayers(); map.remove(); });
loadMarkers();
"#;

/// JSON for embedding inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

impl MarkerRenderer for LeafletRenderer {
    fn stylesheet(&self) -> &'static str {
        "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
    }

    fn script_src(&self) -> &'static str {
        "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
    }

    fn init_script(&self, view: &MapView) -> String {
        format!("const cfg = {};\n{LEAFLET_MAP_SCRIPT}", script_json(view))
    }
}

#[derive(Clone, PartialEq)]
pub struct MapPageData {
    pub viewer: Viewer,
    pub projects: Vec<ProjectView>,
    pub total: usize,
    pub search: String,
    pub category: String,
    pub categories: Vec<(String, String)>,
    pub legend: Vec<(String, String)>,
    pub selected: Option<ProjectView>,
    pub loading: bool,
    pub error: Option<String>,
    pub stylesheet: String,
    pub script_src: String,
    pub map_script: String,
}

/// `q=...&category=...` for links that keep the current filter.
pub fn filter_query(search: &str, category: &str) -> String {
    format!(
        "q={}&category={}",
        encode_query_value(search),
        encode_query_value(category)
    )
}

#[allow(non_snake_case)]
#[component]
fn MapPage(data: MapPageData) -> Element {
    let filter = filter_query(&data.search, &data.category);
    let close_href = format!("/map?{filter}");
    let shown = data.projects.len();

    rsx! {
        Layout { title: "Research Campus".to_string(), active_page: "map".to_string(), viewer: data.viewer.clone(),
            div { class: "relative h-[calc(100vh-3.5rem)]",
                div { id: "map", class: "absolute inset-0 z-0" }

                // Sidebar
                div { class: "absolute top-0 left-0 bottom-0 z-10 w-80 flex flex-col bg-neutral-900/95 border-r border-red-500/20",
                    div { class: "p-4 border-b border-red-500/20",
                        h2 { class: "text-lg font-bold text-white", "Research Campus" }
                        p { class: "text-xs text-gray-500", "{shown} of {data.total} projects" }
                    }
                    form { method: "GET", action: "/map", class: "p-4 space-y-3 border-b border-red-500/20",
                        input {
                            r#type: "text", name: "q", value: "{data.search}",
                            placeholder: "Search projects...",
                            class: "w-full px-3 py-2 rounded-lg border border-neutral-700 bg-neutral-950 text-white text-sm",
                        }
                        select { name: "category",
                            class: "w-full px-3 py-2 rounded-lg border border-neutral-700 bg-neutral-950 text-white text-sm",
                            for (value, label) in data.categories.iter() {
                                option { value: "{value}", selected: *value == data.category, "{label}" }
                            }
                        }
                        button { r#type: "submit", class: "w-full py-2 rounded-lg bg-red-600 text-white text-sm", "Filter" }
                    }
                    if let Some(err) = &data.error {
                        div { class: "m-4 bg-red-950 border border-red-800 text-red-200 text-sm px-3 py-2 rounded",
                            "Failed to load projects: {err}"
                        }
                    }
                    div { class: "flex-1 overflow-y-auto",
                        if data.loading && data.projects.is_empty() {
                            p { class: "p-4 text-sm text-gray-500", "Loading research data..." }
                        } else if data.projects.is_empty() {
                            p { class: "p-4 text-sm text-gray-500", "No projects match." }
                        }
                        for p in data.projects.iter() {
                            {
                                let href = format!("/map?{filter}&selected={}", encode_query_value(&p.id));
                                let is_selected = data.selected.as_ref().is_some_and(|s| s.id == p.id);
                                let class = if is_selected {
                                    "block px-4 py-3 border-b border-neutral-800 bg-red-600/20 no-underline"
                                } else {
                                    "block px-4 py-3 border-b border-neutral-800 hover:bg-neutral-800 no-underline"
                                };
                                let dot = format!("background-color: {}", p.color);
                                rsx! {
                                    a { href: "{href}", class: class,
                                        div { class: "flex items-center gap-2",
                                            span { class: "inline-block w-2.5 h-2.5 rounded-full", style: "{dot}" }
                                            h3 { class: "font-semibold text-sm text-white", "{p.title}" }
                                        }
                                        p { class: "text-xs text-gray-400 mt-1", "{p.researcher} \u{00b7} {p.phase}" }
                                    }
                                }
                            }
                        }
                    }
                    // Legend
                    div { class: "p-4 border-t border-red-500/20 grid grid-cols-2 gap-1 text-xs text-gray-400",
                        for (label, color) in data.legend.iter() {
                            {
                                let dot = format!("background-color: {color}");
                                rsx! {
                                    div { class: "flex items-center gap-2",
                                        span { class: "inline-block w-2.5 h-2.5 rounded-full", style: "{dot}" }
                                        "{label}"
                                    }
                                }
                            }
                        }
                    }
                }

                if let Some(project) = &data.selected {
                    div { class: "absolute top-4 right-16 z-10 w-96",
                        ProjectDetail { project: project.clone(), close_href: close_href.clone() }
                    }
                }
            }
            link { rel: "stylesheet", href: "{data.stylesheet}" }
            script { src: "{data.script_src}" }
            script { dangerous_inner_html: "{data.map_script}" }
        }
    }
}

pub fn render_map(data: MapPageData) -> String {
    let mut dom = VirtualDom::new_with_props(MapPage, MapPageProps { data });
    dom.rebuild_in_place();
    render_to_html(&dom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_script_clears_markers_before_adding() {
        let view = MapView::new(
            &MapConfig::default(),
            (Position::new(30.0, -97.0), 15),
            "q=&category=all",
            36,
        );
        let script = LeafletRenderer.init_script(&view);
        let clear = script.find("markers.clearLayers()").unwrap();
        let add = script.find("markers.addLayer(m)").unwrap();
        assert!(clear < add);
        assert!(script.starts_with("const cfg = {"));
        assert!(script.contains("\"zoom\":15"));
    }

    #[test]
    fn script_json_cannot_close_the_script_tag() {
        let json = script_json(&serde_json::json!({ "q": "</script><b>" }));
        assert!(!json.contains("</script>"));
    }

    #[test]
    fn filter_query_encodes_values() {
        assert_eq!(filter_query("a&b", "all"), "q=a%26b&category=all");
    }
}
