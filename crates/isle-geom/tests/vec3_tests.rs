use core::f32::consts::{FRAC_PI_2, PI};

use isle_geom::{Vec3, lerp_angle, point_segment_distance_sq, wrap_angle};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_normalized_zero_is_noop() {
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn lerp_endpoints() {
    let a = Vec3::new(1.0, 1.0, 1.0);
    let b = Vec3::new(3.0, -1.0, 5.0);
    assert!(vec3_approx_eq(a.lerp(b, 0.0), a, 1e-6));
    assert!(vec3_approx_eq(a.lerp(b, 1.0), b, 1e-6));
    assert!(vec3_approx_eq(a.lerp(b, 0.5), Vec3::new(2.0, 0.0, 3.0), 1e-6));
}

#[test]
fn horizontal_drops_y() {
    let v = Vec3::new(2.0, 9.0, -1.0);
    assert!(vec3_approx_eq(v.horizontal(), Vec3::new(2.0, 0.0, -1.0), 1e-6));
    assert!(approx_eq(v.horizontal_length_sq(), 5.0, 1e-6));
}

#[test]
fn yaw_round_trips_facing() {
    for &yaw in &[0.0f32, 0.7, -2.1, FRAC_PI_2] {
        let f = Vec3::from_yaw(yaw);
        assert!(approx_eq(f.yaw(), yaw, 1e-5));
        assert!(approx_eq(f.length(), 1.0, 1e-6));
    }
    // +Z is yaw zero, +X is a quarter turn
    assert!(vec3_approx_eq(Vec3::from_yaw(0.0), Vec3::new(0.0, 0.0, 1.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::from_yaw(FRAC_PI_2), Vec3::new(1.0, 0.0, 0.0), 1e-6));
}

#[test]
fn rotate_y_preserves_horizontal_length() {
    let v = Vec3::new(1.6, 0.3, 0.0);
    let r = v.rotate_y(1.1);
    assert!(approx_eq(r.horizontal_length_sq(), v.horizontal_length_sq(), 1e-5));
    assert!(approx_eq(r.y, 0.3, 1e-6));
}

#[test]
fn segment_distance_interior_and_clamped() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(10.0, 0.0, 0.0);
    // perpendicular foot inside the segment
    assert!(approx_eq(point_segment_distance_sq(Vec3::new(4.0, 0.0, 3.0), a, b), 9.0, 1e-5));
    // beyond the end clamps to b
    assert!(approx_eq(point_segment_distance_sq(Vec3::new(13.0, 0.0, 4.0), a, b), 25.0, 1e-4));
    // before the start clamps to a
    assert!(approx_eq(point_segment_distance_sq(Vec3::new(-1.0, 0.0, 0.0), a, b), 1.0, 1e-6));
}

#[test]
fn segment_distance_degenerate_segment() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let p = Vec3::new(1.0, 2.0, 5.0);
    assert!(approx_eq(point_segment_distance_sq(p, a, a), 4.0, 1e-6));
}

#[test]
fn wrap_and_lerp_angle_take_short_arc() {
    assert!(approx_eq(wrap_angle(3.0 * PI / 2.0), -FRAC_PI_2, 1e-5));
    assert!(approx_eq(wrap_angle(-3.0 * PI / 2.0), FRAC_PI_2, 1e-5));
    // from just below +π to just above -π goes forward through π, not backwards through 0
    let cur = PI - 0.1;
    let tgt = -PI + 0.1;
    let half = lerp_angle(cur, tgt, 0.5);
    assert!(approx_eq(half, PI, 1e-5));
}
