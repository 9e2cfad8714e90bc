use nuosc_core::{OscParams, ProbabilityEngine};
use nuosc_dmp::DmpEngine;

const EPSILON: f64 = 1e-9;

fn dune_params() -> OscParams<f64> {
    OscParams::nufit52_no(1300.0, 2.84)
}

fn expand(energies: &[f64]) -> Vec<f64> {
    let mut expanded = energies.to_vec();
    expanded.extend(energies.iter().map(|&e| -e));
    expanded
}

#[test]
fn block_has_engine_contract_shape() {
    let engine = DmpEngine::default();
    let expanded = expand(&[1.0, 2.0, 3.0]);
    let block = engine.compute_all(&expanded, &dune_params()).unwrap();
    assert_eq!(block.dim(), (6, 9));
}

#[test]
fn antineutrino_rows_align_with_their_energy() {
    let engine = DmpEngine::default();
    let params = dune_params();
    let expanded = expand(&[1.3, 2.5, 4.1]);
    let block = engine.compute_all(&expanded, &params).unwrap();
    for (row, &energy) in [1.3, 2.5, 4.1].iter().enumerate() {
        let single = engine.compute_all(&[-energy], &params).unwrap();
        for col in 0..9 {
            assert_eq!(block[[3 + row, col]], single[[0, col]]);
        }
    }
}

#[test]
fn rows_are_unitary() {
    let engine = DmpEngine::default();
    let expanded = expand(&[0.8, 1.9, 2.5, 3.7]);
    let block = engine.compute_all(&expanded, &dune_params()).unwrap();
    for row in 0..block.nrows() {
        for before in 0..3 {
            let sum: f64 = (0..3).map(|after| block[[row, 3 * after + before]]).sum();
            assert!(
                (sum - 1.0).abs() < EPSILON,
                "row {row}, flavor {before}: sum = {sum}"
            );
        }
    }
}

#[test]
fn zero_baseline_is_the_identity() {
    let engine = DmpEngine::default();
    let params = OscParams::nufit52_no(0.0, 2.6);
    let block = engine.compute_all(&expand(&[2.0]), &params).unwrap();
    for row in 0..2 {
        for before in 0..3 {
            for after in 0..3 {
                let expected = if before == after { 1.0 } else { 0.0 };
                let got: f64 = block[[row, 3 * after + before]];
                assert!((got - expected).abs() < EPSILON);
            }
        }
    }
}

#[test]
fn vacuum_antineutrinos_conjugate_the_cp_phase() {
    let engine = DmpEngine::default();
    let mut params = OscParams::nufit52_no(1300.0, 0.0);
    let block = engine.compute_all(&expand(&[2.5]), &params).unwrap();
    params.deltacp = -params.deltacp;
    let conjugate = engine.compute_all(&[2.5], &params).unwrap();
    for col in 0..9 {
        let antinu: f64 = block[[1, col]];
        let flipped: f64 = conjugate[[0, col]];
        assert!((antinu - flipped).abs() < 1e-12, "column {col}");
    }
}

#[test]
fn matter_modifies_appearance() {
    let engine = DmpEngine::default();
    let vacuum = OscParams::nufit52_no(1300.0, 0.0);
    let matter = OscParams::nufit52_no(1300.0, 2.84);
    // P(mu -> e) sits in column 3*0 + 1.
    let p_vac: f64 = engine.compute_all(&[2.5], &vacuum).unwrap()[[0, 1]];
    let p_mat: f64 = engine.compute_all(&[2.5], &matter).unwrap()[[0, 1]];
    assert!((p_mat - p_vac).abs() > 0.001);
}

#[test]
fn newton_refinement_stays_close_to_the_closed_form() {
    let plain = DmpEngine::default();
    let refined = DmpEngine {
        newton_steps: 3,
        ..DmpEngine::default()
    };
    let params = dune_params();
    let expanded = expand(&[0.7, 2.5]);
    let base = plain.compute_all(&expanded, &params).unwrap();
    let better = refined.compute_all(&expanded, &params).unwrap();
    for row in 0..base.nrows() {
        for col in 0..9 {
            let a: f64 = base[[row, col]];
            let b: f64 = better[[row, col]];
            assert!((a - b).abs() < 1e-3);
        }
    }
}
