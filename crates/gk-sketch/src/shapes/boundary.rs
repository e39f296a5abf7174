//! Boundary sampling helpers shared by the shape implementations

use glam::DVec2;

use gk_core::Point3D;

/// One piece of a piecewise boundary, in unrotated shape coordinates
#[derive(Debug, Clone, Copy)]
pub(crate) enum Piece {
    Line {
        start: DVec2,
        end: DVec2,
    },
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        /// Signed sweep (positive = counterclockwise)
        sweep: f64,
    },
}

impl Piece {
    fn length(&self) -> f64 {
        match self {
            Piece::Line { start, end } => start.distance(*end),
            Piece::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    fn point_at(&self, t: f64) -> DVec2 {
        match self {
            Piece::Line { start, end } => *start + (*end - *start) * t,
            Piece::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let angle = start_angle + sweep * t;
                *center + DVec2::new(angle.cos(), angle.sin()) * *radius
            }
        }
    }
}

/// `count` evenly spaced values from `start` to `end`, both included
///
/// One value yields `start`; zero yields nothing.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| {
        if count > 1 && i == count - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Closed loop of straight sides through `vertices`
pub(crate) fn closed_polyline(vertices: &[DVec2]) -> Vec<Piece> {
    (0..vertices.len())
        .map(|i| Piece::Line {
            start: vertices[i],
            end: vertices[(i + 1) % vertices.len()],
        })
        .collect()
}

/// Sample `count` points spread evenly by arc length along `pieces`
pub(crate) fn sample_path(pieces: &[Piece], count: usize) -> Vec<DVec2> {
    let Some(last) = pieces.last() else {
        return Vec::new();
    };
    let total: f64 = pieces.iter().map(Piece::length).sum();

    let mut points: Vec<DVec2> = linspace(0.0, total, count)
        .map(|s| {
            let mut walked = 0.0;
            for (i, piece) in pieces.iter().enumerate() {
                let length = piece.length();
                if s <= walked + length || i == pieces.len() - 1 {
                    let t = if length > 0.0 {
                        ((s - walked) / length).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    return piece.point_at(t);
                }
                walked += length;
            }
            last.point_at(1.0)
        })
        .collect();

    if count > 1 {
        points[count - 1] = last.point_at(1.0);
    }
    points
}

/// Signed area enclosed by a vertex loop (positive when counterclockwise)
pub(crate) fn signed_area(vertices: &[DVec2]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum();
    twice / 2.0
}

/// Length of a closed vertex loop
pub(crate) fn loop_length(vertices: &[DVec2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].distance(vertices[(i + 1) % n]))
        .sum()
}

/// Rotate by `rotation` radians and translate by `center`
#[inline]
pub(crate) fn place(point: DVec2, center: DVec2, rotation: f64) -> DVec2 {
    center + DVec2::from_angle(rotation).rotate(point)
}

#[inline]
pub(crate) fn to_local(point: DVec2) -> Point3D {
    Point3D::new(point.x, point.y, 0.0)
}
