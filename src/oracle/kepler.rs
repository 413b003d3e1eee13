//! Keplerian orbit projection.

use std::f64::consts::{PI, TAU};

use crate::model::Offset;

use super::orbit::OrbitalElements;

const DAYS_PER_YEAR: f64 = 365.25;
const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-12;

/// Projected offset of the companion from its star at `epoch_mjd`, in mas.
///
/// `tau` is the epoch of periastron as a fraction of the period after `tau_ref_epoch`.
pub(super) fn sky_offset(elements: &OrbitalElements, epoch_mjd: f64, tau_ref_epoch: f64) -> Offset {
    let OrbitalElements {
        sma,
        ecc,
        inc,
        aop,
        pan,
        tau,
        plx,
        mtot,
    } = *elements;

    let period_years = (sma.powi(3) / mtot).sqrt();
    let mean_motion = TAU / period_years;
    let manom = (mean_motion * (epoch_mjd - tau_ref_epoch) / DAYS_PER_YEAR - TAU * tau).rem_euclid(TAU);

    let eanom = eccentric_anomaly(manom, ecc);
    let tanom = 2.0 * (((1.0 + ecc) / (1.0 - ecc)).sqrt() * (0.5 * eanom).tan()).atan();
    let radius = sma * (1.0 - ecc * eanom.cos());

    let c2i2 = (0.5 * inc).cos().powi(2);
    let s2i2 = (0.5 * inc).sin().powi(2);
    let arg1 = tanom + aop + pan;
    let arg2 = tanom + aop - pan;

    let ra = radius * (c2i2 * arg1.sin() - s2i2 * arg2.sin()) * plx;
    let dec = radius * (c2i2 * arg1.cos() + s2i2 * arg2.cos()) * plx;
    Offset::new(ra, dec)
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly.
fn eccentric_anomaly(manom: f64, ecc: f64) -> f64 {
    if ecc == 0.0 {
        return manom;
    }

    let mut eanom = if ecc < 0.8 { manom } else { PI };
    for _ in 0..MAX_ITERATIONS {
        let step = (eanom - ecc * eanom.sin() - manom) / (1.0 - ecc * eanom.cos());
        eanom -= step;
        if step.abs() < TOLERANCE {
            break;
        }
    }
    eanom
}
