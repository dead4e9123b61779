#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn point_lerp_endpoints() {
    let a = Point::new(0.0, 10.0);
    let b = Point::new(20.0, 30.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
}

#[test]
fn point_lerp_midpoint() {
    let mid = Point::new(0.0, 10.0).lerp(Point::new(20.0, 30.0), 0.5);
    assert!(approx_eq(mid.x, 10.0));
    assert!(approx_eq(mid.y, 20.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_origin_is_zero() {
    let cam = Camera::default();
    assert_eq!(cam.origin_x, 0.0);
    assert_eq!(cam.origin_y, 0.0);
}

#[test]
fn camera_default_zoom_is_one() {
    assert_eq!(Camera::default().zoom, 1.0);
}

// --- to_wall_point ---

#[test]
fn to_wall_point_identity_keeps_whole_coordinates() {
    let cam = Camera::default();
    assert_eq!(cam.to_wall_point(Point::new(50.0, 75.0)), Point::new(50.0, 75.0));
}

#[test]
fn to_wall_point_floors_fractional_input() {
    let cam = Camera::default();
    assert_eq!(cam.to_wall_point(Point::new(50.9, 75.2)), Point::new(50.0, 75.0));
}

#[test]
fn to_wall_point_divides_by_zoom_before_flooring() {
    let cam = Camera { origin_x: 0.0, origin_y: 0.0, zoom: 2.0 };
    assert_eq!(cam.to_wall_point(Point::new(41.0, 81.0)), Point::new(20.0, 40.0));
}

#[test]
fn to_wall_point_adds_origin() {
    let cam = Camera { origin_x: 100.0, origin_y: -50.0, zoom: 1.0 };
    assert_eq!(cam.to_wall_point(Point::new(10.0, 10.0)), Point::new(110.0, -40.0));
}

#[test]
fn to_wall_point_zoomed_out() {
    let cam = Camera { origin_x: 5.0, origin_y: 5.0, zoom: 0.5 };
    assert_eq!(cam.to_wall_point(Point::new(10.0, 3.0)), Point::new(25.0, 11.0));
}

// --- page_dist_to_wall ---

#[test]
fn page_dist_to_wall_scales_by_zoom() {
    let cam = Camera { origin_x: 0.0, origin_y: 0.0, zoom: 4.0 };
    assert!(approx_eq(cam.page_dist_to_wall(20.0), 5.0));
}
