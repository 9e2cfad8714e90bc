//! The DMP probability engine.
//!
//! Evaluates the constant-density three-flavor transition matrix with the
//! closed-form matter eigenvalues of Denton, Minakata, and Parke, with
//! optional Newton refinement. The engine works on signed energies: a
//! negative entry in the expanded array evaluates the same formulas with a
//! sign-flipped matter potential and kinematic phases, which is exactly the
//! antineutrino channel at that energy magnitude.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use nuosc_core::{OscError, OscParams, ProbabilityEngine, Scalar, NUM_FLAVOR_CHANNELS};

/// Oscillation-phase conversion: eV^2 * km / GeV, divided by four.
const EV_SQ_KM_TO_GEV_OVER4: f64 = 1e-9 / 1.97327e-7 * 1e3 / 4.0;

/// Matter-potential conversion: Y_e * rho * E -> A, in eV^2 per
/// (g/cm^3 * GeV).
const YE_RHO_E_TO_A: f64 = 1.52e-4;

fn default_electron_fraction() -> f64 {
    0.5
}

/// Configuration of the DMP engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmpEngine {
    /// Electron fraction Y_e of the traversed matter.
    #[serde(default = "default_electron_fraction")]
    pub electron_fraction: f64,
    /// Newton iterations refining the third matter eigenvalue. Zero keeps
    /// the plain DMP closed form.
    #[serde(default)]
    pub newton_steps: u8,
}

impl Default for DmpEngine {
    fn default() -> Self {
        Self {
            electron_fraction: default_electron_fraction(),
            newton_steps: 0,
        }
    }
}

impl<T: Scalar> ProbabilityEngine<T> for DmpEngine {
    fn compute_all(&self, energies: &[f64], params: &OscParams<T>) -> Result<Array2<T>, OscError> {
        let rows: Vec<[T; NUM_FLAVOR_CHANNELS]> = energies
            .iter()
            .map(|&energy| transition_row(params, energy, self.electron_fraction, self.newton_steps))
            .collect();
        Ok(Array2::from_shape_fn(
            (energies.len(), NUM_FLAVOR_CHANNELS),
            |(row, col)| rows[row][col],
        ))
    }
}

/// Evaluates one block row: the nine transition probabilities at a signed
/// energy, laid out as column `3 * j + i` for `flavor i -> flavor j`.
///
/// No physicality validation happens here; NaN inputs produce NaN outputs
/// and a zero energy divides by zero, both of which propagate to the caller
/// as values.
fn transition_row<T: Scalar>(
    params: &OscParams<T>,
    energy: f64,
    electron_fraction: f64,
    newton_steps: u8,
) -> [T; NUM_FLAVOR_CHANNELS] {
    let one = T::from_f64(1.0);
    let two = T::from_f64(2.0);
    let four = T::from_f64(4.0);
    let half = T::from_f64(0.5);

    let s12 = params.th12.sin();
    let s13 = params.th13.sin();
    let s23 = params.th23.sin();
    let s12sq = s12 * s12;
    let s13sq = s13 * s13;
    let s23sq = s23 * s23;
    let c13sq = one - s13sq;
    let sind = params.deltacp.sin();
    let cosd = params.deltacp.cos();

    let dmsq21 = params.dmsq21;
    let dmsq31 = params.dmsq32 + params.dmsq21;

    // Vacuum PMNS moduli and the vacuum Jarlskog prefactor.
    let ue2sq = c13sq * s12sq;
    let ue3sq = s13sq;
    let um3sq = c13sq * s23sq;
    let ut2sq = s13sq * s12sq * s23sq;
    let um2sq_bare = (one - s12sq) * (one - s23sq);
    let jrr = (um2sq_bare * ut2sq).sqrt();
    let um2sq = um2sq_bare + ut2sq - two * jrr * cosd;
    let j_vac = T::from_f64(8.0) * jrr * c13sq * sind;

    // The signed energy carries the particle/antiparticle tag: it flips the
    // matter potential here and the CP-violating term through the kinematic
    // phases below.
    let e = T::from_f64(energy);
    let a_matter = T::from_f64(electron_fraction) * params.rho * e * T::from_f64(YE_RHO_E_TO_A);
    let dmsq_ee = dmsq31 - s12sq * dmsq21;

    let a_sum = dmsq21 + dmsq31;
    let s_ee = a_sum - dmsq21 * ue2sq - dmsq31 * ue3sq;
    let t_base = dmsq21 * dmsq31;
    let t_ee = t_base * (one - ue3sq - ue2sq);
    let c = a_matter * t_ee;
    let a = a_sum + a_matter;

    // Third eigenvalue from the DMP closed form, then optional Newton steps.
    let x_mat = a_matter / dmsq_ee;
    let tmp = one - x_mat;
    let mut lambda3 =
        dmsq31 + half * dmsq_ee * (x_mat - one + (tmp * tmp + four * s13sq * x_mat).sqrt());
    let b = t_base + a_matter * s_ee;
    for _ in 0..newton_steps {
        lambda3 = (lambda3 * lambda3 * (lambda3 - a) + c) / (lambda3 * (two * lambda3 - a) + b);
    }

    let residue = a - lambda3;
    let dlambda21 = (residue * residue - four * c / lambda3).sqrt();
    let lambda2 = half * (a - lambda3 + dlambda21);
    let dlambda32 = lambda3 - lambda2;
    let dlambda31 = dlambda32 + dlambda21;

    // Matter PMNS moduli through the eigenvector relations, matter Jarlskog
    // through the NHS identity.
    let pi_dlambda_inv = one / (dlambda31 * dlambda32 * dlambda21);
    let xp3 = pi_dlambda_inv * dlambda21;
    let xp2 = -(pi_dlambda_inv * dlambda31);

    let ue3sq_m = (lambda3 * (lambda3 - s_ee) + t_ee) * xp3;
    let ue2sq_m = (lambda2 * (lambda2 - s_ee) + t_ee) * xp2;

    let s_mm = a - dmsq21 * um2sq - dmsq31 * um3sq;
    let t_mm = t_base * (one - um3sq - um2sq) + a_matter * (s_ee + s_mm - a_sum);

    let um3sq_m = (lambda3 * (lambda3 - s_mm) + t_mm) * xp3;
    let um2sq_m = (lambda2 * (lambda2 - s_mm) + t_mm) * xp2;

    let j_matter = j_vac * dmsq21 * dmsq31 * (dmsq31 - dmsq21) * pi_dlambda_inv;

    // Remaining moduli by unitarity.
    let ue1sq_m = one - ue3sq_m - ue2sq_m;
    let um1sq_m = one - um3sq_m - um2sq_m;
    let ut3sq_m = one - um3sq_m - ue3sq_m;
    let ut2sq_m = one - um2sq_m - ue2sq_m;
    let ut1sq_m = one - um1sq_m - ue1sq_m;

    let l_over_4e = T::from_f64(EV_SQ_KM_TO_GEV_OVER4) * params.baseline / e;
    let d21 = dlambda21 * l_over_4e;
    let d32 = dlambda32 * l_over_4e;

    let sin_d21 = d21.sin();
    let sin_d31 = (d32 + d21).sin();
    let sin_d32 = d32.sin();

    let triple_sin = sin_d21 * sin_d31 * sin_d32;
    let sinsq_d21_2 = two * sin_d21 * sin_d21;
    let sinsq_d31_2 = two * sin_d31 * sin_d31;
    let sinsq_d32_2 = two * sin_d32 * sin_d32;

    // CPC/CPV split of P(mu->e), survival probabilities, unitarity for the
    // rest.
    let p_me_cpc = (ut3sq_m - um2sq_m * ue1sq_m - um1sq_m * ue2sq_m) * sinsq_d21_2
        + (ut2sq_m - um3sq_m * ue1sq_m - um1sq_m * ue3sq_m) * sinsq_d31_2
        + (ut1sq_m - um3sq_m * ue2sq_m - um2sq_m * ue3sq_m) * sinsq_d32_2;
    let p_me_cpv = -(j_matter * triple_sin);

    let p_mm = one
        - two
            * (um2sq_m * um1sq_m * sinsq_d21_2
                + um3sq_m * um1sq_m * sinsq_d31_2
                + um3sq_m * um2sq_m * sinsq_d32_2);

    let p_ee = one
        - two
            * (ue2sq_m * ue1sq_m * sinsq_d21_2
                + ue3sq_m * ue1sq_m * sinsq_d31_2
                + ue3sq_m * ue2sq_m * sinsq_d32_2);

    let p_em = p_me_cpc - p_me_cpv;
    let p_et = one - p_ee - p_em;
    let p_me = p_me_cpc + p_me_cpv;
    let p_mt = one - p_me - p_mm;
    let p_te = one - p_ee - p_me;
    let p_tm = one - p_em - p_mm;
    let p_tt = one - p_et - p_mt;

    // Column 3*j + i for flavor i -> flavor j.
    [p_ee, p_me, p_te, p_em, p_mm, p_tm, p_et, p_mt, p_tt]
}
