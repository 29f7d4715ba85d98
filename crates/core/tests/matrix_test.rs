//! Tests for the affine matrix and number formatting.

use pssvg_core::utils::{MATRIX_IDENTITY, Matrix, mult_matrix, num_fmt};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn approx_point(p: (f64, f64), q: (f64, f64)) -> bool {
    approx(p.0, q.0) && approx(p.1, q.1)
}

#[test]
fn test_identity_decomposes_to_nothing() {
    let parts = MATRIX_IDENTITY.decompose();
    assert_eq!(parts.translate, (0.0, 0.0));
    assert_eq!(parts.scale, (1.0, 1.0));
    assert_eq!(parts.rotate, 0.0);
    assert!(MATRIX_IDENTITY.is_identity());
    assert!(Matrix::default().is_identity());
}

#[test]
fn test_identity_check_is_exact() {
    let almost = Matrix::new(1.0, 0.0, 0.0, 1.0, 1e-12, 0.0);
    assert!(!almost.is_identity());
}

#[test]
fn test_operator_order() {
    // translate then scale: the scale applies to user coordinates first
    let m = MATRIX_IDENTITY.translate(10.0, 0.0).scale(2.0, 2.0);
    assert_eq!(m.apply_point(1.0, 1.0), (12.0, 2.0));

    let m = MATRIX_IDENTITY.scale(2.0, 2.0).translate(10.0, 0.0);
    assert_eq!(m.apply_point(1.0, 1.0), (22.0, 2.0));
}

#[test]
fn test_rotate_degrees() {
    let m = MATRIX_IDENTITY.rotate(90.0);
    assert!(approx_point(m.apply_point(1.0, 0.0), (0.0, 1.0)));
    assert!(approx(m.decompose().rotate, 90.0));
}

#[test]
fn test_multiply_matches_mult_matrix() {
    let a = Matrix::new(2.0, 0.0, 0.0, 3.0, 5.0, 7.0);
    let b = Matrix::new(1.0, 1.0, 0.0, 1.0, 0.0, 0.0);
    assert_eq!(a.multiply(&b), mult_matrix(b, a));
}

#[test]
fn test_invert_round_trips_a_point() {
    let m = MATRIX_IDENTITY.translate(3.0, -4.0).rotate(30.0).scale(2.0, 0.5);
    let (x, y) = m.apply_point(7.0, 11.0);
    assert!(approx_point(m.invert().apply_point(x, y), (7.0, 11.0)));
}

#[test]
fn test_singular_inverts_to_identity() {
    let singular = Matrix::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
    assert!(singular.invert().is_identity());
}

#[test]
fn test_decompose_scale_and_translate() {
    let parts = MATRIX_IDENTITY.translate(4.0, 5.0).scale(2.0, -3.0).decompose();
    assert_eq!(parts.translate, (4.0, 5.0));
    assert!(approx(parts.scale.0, 2.0));
    assert!(approx(parts.scale.1, -3.0));
}

#[test]
fn test_axis_scales() {
    let m = MATRIX_IDENTITY.scale(3.0, 4.0);
    assert_eq!(m.axis_scales(), (3.0, 4.0));
}

#[test]
fn test_number_policy() {
    assert_eq!(num_fmt(90.0), "90");
    assert_eq!(num_fmt(0.5), "0.5");
    assert_eq!(num_fmt(1.0 / 3.0), "0.333");
    assert_eq!(num_fmt(-12.25), "-12.25");
    assert_eq!(num_fmt(f64::NAN), "0");
}
