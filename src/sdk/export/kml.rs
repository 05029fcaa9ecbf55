use crate::sdk::route::{format_degrees, Route};
use std::fmt::Write as _;

const HEADER: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
<name>Coordinates</name>
<description>Coordinates</description>
<Style id="yellowLineGreenPoly">
<LineStyle>
<color>7f00ffff</color>
<width>4</width>
</LineStyle>
<PolyStyle>
<color>7f00ff00</color>
</PolyStyle>
</Style>
<Placemark>
<name>Absolute Extruded</name>
<description>Transparent green wall with yellow outlines</description>
<styleUrl>#yellowLineGreenPoly</styleUrl>
<LineString>
<extrude>1</extrude>
<tessellate>1</tessellate>
<altitudeMode>clampedToGround</altitudeMode>
<coordinates>
"##;

// Existing consumers expect the residual three spaces after `</kml>`.
const FOOTER: &str = "</coordinates>\n</LineString>\n</Placemark>\n</Document>\n</kml>\n   ";

/// Builds the KML overlay for the full route, one `lon,lat,0 ` line per point.
pub fn build_kml(route: &Route) -> String {
    let mut kml = String::with_capacity(HEADER.len() + FOOTER.len() + route.len() * 24);
    kml.push_str(HEADER);
    for point in route.points() {
        let _ = writeln!(kml, "{},{},0 ", format_degrees(point.lon), format_degrees(point.lat));
    }
    kml.push_str(FOOTER);
    kml
}
