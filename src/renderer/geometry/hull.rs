//! Convex hull of planar point sets
//!
//! Andrew's monotone chain over a lexicographically sorted point list.

use std::cmp::Ordering;

use glam::Vec2;

/// Points closer than this on both axes are merged.
const COINCIDENT_EPSILON: f32 = 0.001;

/// Order points by x, then by y.
pub fn lexicographic(a: &Vec2, b: &Vec2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

#[inline]
fn coincident(a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    ab.x.abs() < COINCIDENT_EPSILON && ab.y.abs() < COINCIDENT_EPSILON
}

/// Drop points that coincide with their predecessor in a sorted list.
///
/// Each point is compared with the point before it in the input, not with
/// the last point kept, so a run of nearby points collapses onto its first
/// member.
pub fn dedup_sorted(points: &mut Vec<Vec2>) {
    if points.len() < 2 {
        return;
    }
    let mut write = 1;
    for read in 1..points.len() {
        if !coincident(points[read], points[read - 1]) {
            points[write] = points[read];
            write += 1;
        }
    }
    points.truncate(write);
}

/// True when `a -> b -> c` turns left (y up) or goes straight.
#[inline]
fn bends_left_or_straight(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(c - b) >= 0.0
}

/// Convex hull of a sorted, deduplicated point list.
///
/// Vertices come out clockwise with x right and y up (counter-clockwise on
/// the ground plane seen from above), starting at the lexicographically
/// smallest point, without repeating it at the end. Collinear points are
/// dropped, so a collinear input yields its two end points. Inputs with
/// fewer than three points are returned unchanged.
pub fn convex_hull(sorted: &[Vec2]) -> Vec<Vec2> {
    if sorted.len() < 3 {
        return sorted.to_vec();
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len() * 2);

    // Upper chain, left to right
    for &p in sorted {
        while hull.len() >= 2 && bends_left_or_straight(hull[hull.len() - 2], hull[hull.len() - 1], p)
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Lower chain, right to left
    let lower_start = hull.len();
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() > lower_start
            && bends_left_or_straight(hull[hull.len() - 2], hull[hull.len() - 1], p)
        {
            hull.pop();
        }
        hull.push(p);
    }

    // The first point closes the lower chain
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut points: Vec<Vec2>) -> Vec<Vec2> {
        points.sort_by(lexicographic);
        points
    }

    #[test]
    fn test_lexicographic_order() {
        let points = sorted(vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, -3.0),
        ]);
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 5.0),
                Vec2::new(1.0, -3.0),
                Vec2::new(1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_dedup_merges_near_points() {
        let mut points = sorted(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0005, 0.0002),
            Vec2::new(3.0, 1.0),
            Vec2::new(3.0, 1.0),
        ]);
        dedup_sorted(&mut points);
        assert_eq!(points, vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 1.0)]);
    }

    #[test]
    fn test_dedup_compares_with_predecessor() {
        // Each step is below the epsilon, so the whole run collapses
        let mut points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0008, 0.0),
            Vec2::new(0.0016, 0.0),
            Vec2::new(0.0024, 0.0),
        ];
        dedup_sorted(&mut points);
        assert_eq!(points, vec![Vec2::ZERO]);
    }

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let points = sorted(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.5),
        ]);
        let hull = convex_hull(&points);
        assert_eq!(
            hull,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(2.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_hull_is_clockwise() {
        let points = sorted(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(3.0, 5.0),
            Vec2::new(-1.0, 3.0),
            Vec2::new(1.0, 2.0),
        ]);
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);

        // Shoelace sum is negative for clockwise winding
        let signed_area: f32 = (0..hull.len())
            .map(|i| hull[i].perp_dot(hull[(i + 1) % hull.len()]))
            .sum();
        assert!(signed_area < 0.0);
    }

    #[test]
    fn test_hull_drops_collinear_points() {
        let points = sorted(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        ]);
        let hull = convex_hull(&points);
        assert_eq!(hull, vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0)]);
    }

    #[test]
    fn test_hull_of_tiny_inputs() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[Vec2::ONE]), vec![Vec2::ONE]);
        assert_eq!(
            convex_hull(&[Vec2::ZERO, Vec2::ONE]),
            vec![Vec2::ZERO, Vec2::ONE]
        );
    }
}
