use isle_geom::{Vec3, point_segment_distance_sq, wrap_angle};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Addition commutativity: a + b == b + a
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        let l = a + b;
        let r = b + a;
        prop_assert!(approx(l.x, r.x, 1e-4) && approx(l.y, r.y, 1e-4) && approx(l.z, r.z, 1e-4));
    }

    // Segment distance never exceeds the distance to either endpoint
    #[test]
    fn segment_distance_bounded_by_endpoints(p in arb_vec3(), a in arb_vec3(), b in arb_vec3()) {
        let d = point_segment_distance_sq(p, a, b);
        let da = p.distance_sq(a);
        let db = p.distance_sq(b);
        let tol = 1e-3 * (1.0 + da.max(db));
        prop_assert!(d >= 0.0);
        prop_assert!(d <= da + tol);
        prop_assert!(d <= db + tol);
    }

    // Rotation about Y keeps the horizontal magnitude and the vertical component
    #[test]
    fn rotate_y_is_rigid(v in arb_vec3(), angle in -10.0f32..10.0) {
        let r = v.rotate_y(angle);
        let scale = 1.0 + v.horizontal_length_sq();
        prop_assert!(approx(r.horizontal_length_sq(), v.horizontal_length_sq(), 1e-4 * scale));
        prop_assert_eq!(r.y, v.y);
    }

    // wrap_angle lands in [-π, π] and preserves the angle modulo 2π
    #[test]
    fn wrap_angle_in_range(a in -100.0f32..100.0) {
        let w = wrap_angle(a);
        prop_assert!(w >= -core::f32::consts::PI - 1e-4);
        prop_assert!(w <= core::f32::consts::PI + 1e-4);
        prop_assert!(approx(w.sin(), a.sin(), 1e-3));
        prop_assert!(approx(w.cos(), a.cos(), 1e-3));
    }
}
