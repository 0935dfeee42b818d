//! Outline flattening and ring bookkeeping.
//!
//! Coordinates are y-up. A ring is clockwise when its shoelace signed area
//! is negative. After `shapes()`, every boundary is clockwise and every hole
//! counter-clockwise, which is what the non-zero fill in `mesh` relies on.

use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::math::Point;

use crate::font::PathCommand;

/// Closed polygon; the closing edge back to the first point is implicit.
pub(crate) type Ring = Vec<Point>;

/// One filled region: an outer boundary and the holes cut out of it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Shape {
    pub boundary: Ring,
    pub holes: Vec<Ring>,
}

/// Flatten an outline into rings, splitting each curve into `segments` lines.
pub(crate) fn flatten(outline: &[PathCommand], segments: u32) -> Vec<Ring> {
    let segments = segments.max(1);
    let mut rings = Vec::new();
    let mut ring = Ring::new();
    let mut start = Point::zero();
    let mut cursor = Point::zero();

    for cmd in outline {
        match *cmd {
            PathCommand::MoveTo(p) => {
                finish_ring(&mut rings, &mut ring);
                ring.push(p);
                start = p;
                cursor = p;
            }
            PathCommand::LineTo(to) => {
                begin_if_empty(&mut ring, &mut start, cursor);
                ring.push(to);
                cursor = to;
            }
            PathCommand::QuadTo { ctrl, to } => {
                begin_if_empty(&mut ring, &mut start, cursor);
                let seg = QuadraticBezierSegment {
                    from: cursor,
                    ctrl,
                    to,
                };
                ring.extend((1..=segments).map(|k| seg.sample(k as f32 / segments as f32)));
                cursor = to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                begin_if_empty(&mut ring, &mut start, cursor);
                let seg = CubicBezierSegment {
                    from: cursor,
                    ctrl1,
                    ctrl2,
                    to,
                };
                ring.extend((1..=segments).map(|k| seg.sample(k as f32 / segments as f32)));
                cursor = to;
            }
            PathCommand::Close => {
                finish_ring(&mut rings, &mut ring);
                cursor = start;
            }
        }
    }
    finish_ring(&mut rings, &mut ring);
    rings
}

/// Drawing without a preceding move starts from the current pen position.
fn begin_if_empty(ring: &mut Ring, start: &mut Point, cursor: Point) {
    if ring.is_empty() {
        ring.push(cursor);
        *start = cursor;
    }
}

fn finish_ring(rings: &mut Vec<Ring>, ring: &mut Ring) {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if !ring.is_empty() {
        rings.push(std::mem::take(ring));
    }
}

/// Shoelace signed area. Positive is counter-clockwise (y-up).
pub(crate) fn signed_area(ring: &[Point]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let twice: f32 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice * 0.5
}

pub(crate) fn is_clockwise(ring: &[Point]) -> bool {
    signed_area(ring) < 0.0
}

/// Even-odd point-in-polygon test.
pub(crate) fn contains(ring: &[Point], p: Point) -> bool {
    let Some(&last) = ring.last() else {
        return false;
    };
    let mut inside = false;
    let mut prev = last;
    for &cur in ring {
        if (cur.y > p.y) != (prev.y > p.y)
            && p.x < (prev.x - cur.x) * (p.y - cur.y) / (prev.y - cur.y) + cur.x
        {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

/// Group rings into shapes and normalize their winding.
///
/// The ring with the largest absolute area sets the solid orientation, so
/// both TrueType (clockwise outer) and CFF (counter-clockwise outer) outlines
/// classify the same way. Each hole goes to the smallest boundary containing
/// its first point; a hole inside nothing becomes a boundary of its own.
pub(crate) fn shapes(rings: Vec<Ring>) -> Vec<Shape> {
    let areas: Vec<f32> = rings.iter().map(Vec::as_slice).map(signed_area).collect();
    let Some(dominant) = areas
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
    else {
        return Vec::new();
    };
    let solid_is_cw = dominant < 0.0;

    let mut shapes = Vec::new();
    let mut holes = Vec::new();
    for (ring, area) in rings.into_iter().zip(areas) {
        if (area < 0.0) == solid_is_cw {
            shapes.push(Shape {
                boundary: ring,
                holes: Vec::new(),
            });
        } else {
            holes.push(ring);
        }
    }

    for hole in holes {
        let owner = shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| contains(&s.boundary, hole[0]))
            .min_by(|(_, a), (_, b)| {
                signed_area(&a.boundary)
                    .abs()
                    .total_cmp(&signed_area(&b.boundary).abs())
            })
            .map(|(i, _)| i);
        match owner {
            Some(i) => shapes[i].holes.push(hole),
            None => shapes.push(Shape {
                boundary: hole,
                holes: Vec::new(),
            }),
        }
    }

    for shape in &mut shapes {
        normalize_winding(shape);
    }
    shapes
}

/// Boundary clockwise, holes counter-clockwise.
fn normalize_winding(shape: &mut Shape) {
    if !is_clockwise(&shape.boundary) {
        shape.boundary.reverse();
    }
    for hole in &mut shape.holes {
        if is_clockwise(hole) {
            hole.reverse();
        }
    }
}
