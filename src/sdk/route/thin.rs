use super::Coordinate;

/// Points closer than this on both axes to the last kept point are dropped.
pub const TOLERANCE_DEGREES: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
    Vertex,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub kind: MarkerKind,
}

/// Drops stationary points for map rendering.
///
/// Each point is compared with the last point that was kept, not with its
/// immediate predecessor. The test is an axis-aligned box: a point survives
/// when either axis differs by at least [`TOLERANCE_DEGREES`].
pub fn thin(points: &[Coordinate]) -> Vec<Coordinate> {
    let mut kept: Vec<Coordinate> = Vec::with_capacity(points.len());
    for &point in points {
        if let Some(last) = kept.last() {
            if (last.lat - point.lat).abs() < TOLERANCE_DEGREES
                && (last.lon - point.lon).abs() < TOLERANCE_DEGREES
            {
                continue;
            }
        }
        kept.push(point);
    }
    kept
}

/// Tags thinned points: the first is the start, the last (if distinct) the end.
pub fn markers(thinned: &[Coordinate]) -> Vec<Marker> {
    let last = thinned.len().saturating_sub(1);
    thinned
        .iter()
        .enumerate()
        .map(|(index, &coordinate)| {
            let kind = match index {
                0 => MarkerKind::Start,
                i if i == last => MarkerKind::End,
                _ => MarkerKind::Vertex,
            };
            Marker { coordinate, kind }
        })
        .collect()
}
