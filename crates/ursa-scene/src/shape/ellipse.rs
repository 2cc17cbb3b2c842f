use crate::path::PathPart;
use crate::vector3::Vector3;

/// Ellipse outline as a start point plus four quarter arcs (clockwise from the top).
pub fn ellipse_path(width: f64, height: f64) -> Vec<PathPart> {
    let w = width / 2.0;
    let h = height / 2.0;
    vec![
        PathPart::Point(Vector3::xy(0.0, -h)),
        PathPart::Arc([Vector3::xy(w, -h), Vector3::xy(w, 0.0)]),
        PathPart::Arc([Vector3::xy(w, h), Vector3::xy(0.0, h)]),
        PathPart::Arc([Vector3::xy(-w, h), Vector3::xy(-w, 0.0)]),
        PathPart::Arc([Vector3::xy(-w, -h), Vector3::xy(0.0, -h)]),
    ]
}
