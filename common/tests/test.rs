use approx::assert_relative_eq;
use common::collision_detection::*;
use common::geometry::*;
use common::shapes::*;
use common::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_local_space_axis_alignment() {
    let local = point_to_local_space(Vec2::new(5.0, 5.0), Vec2::new(0.0, 1.0), Vec2::new(5.0, 0.0));
    assert_relative_eq!(local, Vec2::new(5.0, 0.0), epsilon = 1e-5);

    // Lateral offsets are positive on the left of the heading.
    let local = point_to_local_space(Vec2::new(3.0, 1.0), Vec2::new(1.0, 0.0), Vec2::zeros());
    assert_relative_eq!(local, Vec2::new(3.0, 1.0), epsilon = 1e-5);
    let local = point_to_local_space(Vec2::new(4.0, 5.0), Vec2::new(0.0, 1.0), Vec2::new(5.0, 0.0));
    assert_relative_eq!(local, Vec2::new(5.0, 1.0), epsilon = 1e-5);
}

#[test]
fn test_local_world_round_trip() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(7);
    for _ in 0..200 {
        let point = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let origin = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let direction = Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        if direction.norm() < 1e-3 {
            continue;
        }
        let local = point_to_local_space(point, direction, origin);
        let back = point_to_world_space(local, direction, origin);
        assert_relative_eq!(back, point, epsilon = 1e-3);
    }
}

#[test]
fn test_round_trip_with_zero_direction() {
    let point = Vec2::new(2.0, -7.0);
    let origin = Vec2::new(1.0, 1.0);
    let local = point_to_local_space(point, Vec2::zeros(), origin);
    assert_relative_eq!(local, Vec2::new(1.0, -8.0), epsilon = 1e-6);
    assert_relative_eq!(point_to_world_space(local, Vec2::zeros(), origin), point, epsilon = 1e-6);
}

#[test]
fn test_vector_to_world_space() {
    let world = vector_to_world_space(Vec2::new(2.0, 0.0), Vec2::new(0.0, -3.0));
    assert_relative_eq!(world, Vec2::new(0.0, -2.0), epsilon = 1e-6);
}

#[test]
fn test_line_intersection_midpoints() {
    let hit = line_intersection(
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(0.0, 2.0),
        Vec2::new(2.0, 0.0),
    );
    let (t, point) = hit.expect("segments cross");
    assert_relative_eq!(t, 0.5, epsilon = 1e-6);
    assert_relative_eq!(point, Vec2::new(1.0, 1.0), epsilon = 1e-6);
}

#[test]
fn test_line_intersection_parameter_along_first_segment() {
    let (t, point) = line_intersection(
        Vec2::new(0.0, 5.0),
        Vec2::new(100.0, 5.0),
        Vec2::new(25.0, 0.0),
        Vec2::new(25.0, 10.0),
    )
    .unwrap();
    assert_relative_eq!(t, 0.25, epsilon = 1e-6);
    assert_relative_eq!(point, Vec2::new(25.0, 5.0), epsilon = 1e-5);
}

#[test]
fn test_line_intersection_parallel_and_colinear() {
    assert_eq!(
        line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(4.0, 1.0),
        ),
        None
    );
    assert_eq!(
        line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, 0.0),
        ),
        None
    );
    // Degenerate segment.
    assert_eq!(
        line_intersection(
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
        ),
        None
    );
}

#[test]
fn test_line_intersection_misses_beyond_segment_end() {
    assert_eq!(
        line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        ),
        None
    );
}

#[test]
fn test_point_to_line_distance_clamps() {
    let start = Vec2::new(0.0, 0.0);
    let end = Vec2::new(10.0, 0.0);
    assert_relative_eq!(point_to_line_distance(Vec2::new(5.0, 3.0), start, end), 3.0);
    assert_relative_eq!(point_to_line_distance(Vec2::new(-3.0, 4.0), start, end), 5.0);
    assert_relative_eq!(point_to_line_distance(Vec2::new(13.0, -4.0), start, end), 5.0);
    assert_relative_eq!(point_to_line_distance(Vec2::new(3.0, 4.0), start, start), 5.0);
}

#[test]
fn test_shape_bounding_radius() {
    assert_eq!(Shape::None.bounding_radius(), 0.0);
    assert_eq!(Shape::circle(2.5).bounding_radius(), 2.5);
    assert_relative_eq!(Shape::rectangle(6.0, 8.0).bounding_radius(), 5.0);
    let quad = Shape::quad([
        Vec2::new(-1.0, -1.0),
        Vec2::new(3.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ]);
    assert_relative_eq!(quad.bounding_radius(), 10.0f32.sqrt());
}

#[test]
fn test_rectangle_edges_close_the_boundary() {
    let edges = Shape::rectangle(4.0, 2.0)
        .edges(Vec2::new(10.0, 10.0))
        .unwrap();
    assert_eq!(edges[0].from, Vec2::new(8.0, 9.0));
    assert_eq!(edges[1].from, Vec2::new(12.0, 9.0));
    for i in 0..4 {
        assert_eq!(edges[i].to, edges[(i + 1) % 4].from);
    }
    assert!(Shape::circle(1.0).edges(Vec2::zeros()).is_none());
    assert!(Shape::None.edges(Vec2::zeros()).is_none());
}

#[test]
fn test_segment_helpers() {
    let segment = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0));
    assert_eq!(segment.length(), 4.0);
    assert_eq!(segment.midpoint(), Vec2::new(0.0, 2.0));
    assert_relative_eq!(segment.normal(), Vec2::new(-1.0, 0.0));
    assert_relative_eq!(segment.distance_to_point(Vec2::new(3.0, 2.0)), 3.0);
}

#[test]
fn test_circle_circle() {
    assert!(circle_circle(Vec2::zeros(), 1.0, Vec2::new(1.5, 0.0), 1.0));
    assert!(!circle_circle(Vec2::zeros(), 1.0, Vec2::new(2.0, 0.0), 1.0));
}

#[test]
fn test_circle_rectangle() {
    let rect_center = Vec2::new(2.0, 3.0);
    assert!(circle_rectangle(Vec2::new(2.0, 3.0), 1.0, rect_center, 4.0, 6.0));
    assert!(circle_rectangle(Vec2::new(4.5, 3.0), 1.0, rect_center, 4.0, 6.0));
    assert!(!circle_rectangle(Vec2::new(6.0, 3.0), 1.0, rect_center, 4.0, 6.0));
    // Near a corner but outside the rounded region.
    assert!(!circle_rectangle(Vec2::new(4.8, 6.8), 1.0, rect_center, 4.0, 6.0));
    assert!(circle_rectangle(Vec2::new(4.5, 6.5), 1.0, rect_center, 4.0, 6.0));
    // Touching an edge counts, from either side of the box.
    assert!(circle_rectangle(Vec2::new(5.0, 3.0), 1.0, rect_center, 4.0, 6.0));
    assert!(circle_rectangle(Vec2::new(2.0, -1.0), 1.0, rect_center, 4.0, 6.0));
    assert!(!circle_rectangle(Vec2::new(-1.5, 3.0), 1.0, rect_center, 4.0, 6.0));
}

#[test]
fn test_shape_circle_dispatch() {
    let corners = [
        Vec2::new(-2.0, -2.0),
        Vec2::new(2.0, -2.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(-2.0, 2.0),
    ];
    let quad = Shape::quad(corners);
    assert!(shape_circle(&quad, Vec2::zeros(), Vec2::zeros(), 0.1));
    assert!(shape_circle(&quad, Vec2::zeros(), Vec2::new(2.5, 0.0), 1.0));
    assert!(!shape_circle(&quad, Vec2::zeros(), Vec2::new(4.0, 0.0), 1.0));
    assert!(shape_circle(&Shape::None, Vec2::zeros(), Vec2::new(0.5, 0.0), 1.0));
    assert!(!shape_circle(&Shape::None, Vec2::zeros(), Vec2::new(2.0, 0.0), 1.0));
    assert!(shape_circle(&Shape::rectangle(2.0, 2.0), Vec2::zeros(), Vec2::new(1.5, 0.0), 1.0));
}
