use super::ExportError;
use crate::sdk::route::{Marker, MarkerKind, Route};
use std::fmt::Write as _;

const ZOOM_START: u8 = 10;
const MAX_ZOOM: u8 = 19;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta http-equiv="content-type" content="text/html; charset=UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
<title>Garmin Polyline Map</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css" />
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.2.0/css/all.min.css" />
<script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
<style>
html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
#map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }
</style>
</head>
<body>
<div id="map"></div>
<script>
"#;

const TAIL: &str = "</script>\n</body>\n</html>\n";

/// Renders a standalone Leaflet page for one route.
///
/// The view is centred on the first decoded point. The line and the flag
/// markers come from the thinned points: a blue flag on the start and a red
/// flag on the end.
pub fn render_html(route: &Route, markers: &[Marker]) -> Result<String, ExportError> {
    let center = route.first().ok_or(ExportError::EmptyRoute)?;
    let vertices: Vec<[f64; 2]> = markers
        .iter()
        .map(|m| [m.coordinate.lat, m.coordinate.lon])
        .collect();

    let mut html = String::from(HEAD);
    let _ = writeln!(
        html,
        "var map = L.map(\"map\", {{center: {}, zoom: {ZOOM_START}, maxZoom: {MAX_ZOOM}}});",
        serde_json::to_string(&[center.lat, center.lon])?
    );
    let _ = writeln!(
        html,
        "L.tileLayer(\"https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png\", \
         {{maxZoom: {MAX_ZOOM}, attribution: \"&copy; OpenStreetMap contributors\"}}).addTo(map);"
    );
    let _ = writeln!(
        html,
        "L.polyline({}, {{color: \"red\", weight: 2.5, opacity: 1}}).addTo(map);",
        serde_json::to_string(&vertices)?
    );

    for marker in markers {
        let (color, popup) = match marker.kind {
            MarkerKind::Start => ("blue", "Start Location"),
            MarkerKind::End => ("red", "End Location"),
            MarkerKind::Vertex => continue,
        };
        let _ = writeln!(
            html,
            "L.marker({}, {{icon: L.AwesomeMarkers.icon({{icon: \"flag\", prefix: \"fa\", markerColor: \"{color}\"}})}})\
             .bindPopup(\"{popup}\").addTo(map);",
            serde_json::to_string(&[marker.coordinate.lat, marker.coordinate.lon])?
        );
    }

    html.push_str(TAIL);
    Ok(html)
}
