use nuosc_core::{Dual, Scalar};

const EPSILON: f64 = 1e-12;

#[test]
fn product_rule() {
    let x = Dual::variable(1.7);
    let y = x * x * x;
    assert!((y.val - 1.7f64.powi(3)).abs() < EPSILON);
    assert!((y.eps - 3.0 * 1.7f64.powi(2)).abs() < EPSILON);
}

#[test]
fn quotient_rule() {
    let x = Dual::variable(0.8);
    let y = Dual::constant(1.0) / (Dual::constant(1.0) + x);
    let expected = -1.0 / (1.8f64 * 1.8);
    assert!((y.eps - expected).abs() < EPSILON);
}

#[test]
fn chain_rule_through_sin_and_sqrt() {
    let x = Dual::variable(0.4);
    let y = x.sin().sqrt();
    let val = 0.4f64.sin().sqrt();
    let deriv = 0.4f64.cos() / (2.0 * val);
    assert!((y.val - val).abs() < EPSILON);
    assert!((y.eps - deriv).abs() < EPSILON);
}

#[test]
fn cos_derivative_is_negative_sin() {
    let x = Dual::variable(1.1);
    let y = x.cos();
    assert!((y.eps + 1.1f64.sin()).abs() < EPSILON);
}

#[test]
fn constants_carry_no_derivative() {
    let c = Dual::from_f64(3.5);
    assert_eq!(c.eps, 0.0);
    let y = c * c + (-c);
    assert_eq!(y.eps, 0.0);
}

#[test]
fn policy_flags_differ_by_type() {
    assert!(<f64 as Scalar>::REUSES_POINT_CACHE);
    assert!(!<Dual as Scalar>::REUSES_POINT_CACHE);
}
