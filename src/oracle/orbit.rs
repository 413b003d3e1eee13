//! Orbit catalog: companion positions predicted from posterior draws.
//!
//! Each companion has one JSON file in the catalog directory:
//!
//! ```text
//! <catalog>/<name>.json
//!   { "tau_ref_epoch": 58849.0,
//!     "samples": [[sma, ecc, inc, aop, pan, tau, plx, mtot], ...] }
//! ```
//!
//! Semi-major axis in au, angles in radians, `tau` as a fraction of the
//! period, parallax in mas, total mass in solar masses.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{epoch, model::Offset, validate::is_plain_name};

use super::{FixedPositions, OracleError, PositionOracle, Result, kepler};

/// One posterior draw of orbital elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 8]", into = "[f64; 8]")]
pub struct OrbitalElements {
    pub sma: f64,
    pub ecc: f64,
    pub inc: f64,
    pub aop: f64,
    pub pan: f64,
    pub tau: f64,
    pub plx: f64,
    pub mtot: f64,
}

impl From<[f64; 8]> for OrbitalElements {
    fn from([sma, ecc, inc, aop, pan, tau, plx, mtot]: [f64; 8]) -> Self {
        Self {
            sma,
            ecc,
            inc,
            aop,
            pan,
            tau,
            plx,
            mtot,
        }
    }
}

impl From<OrbitalElements> for [f64; 8] {
    fn from(e: OrbitalElements) -> Self {
        [e.sma, e.ecc, e.inc, e.aop, e.pan, e.tau, e.plx, e.mtot]
    }
}

/// Posterior draws for one companion's orbit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posterior {
    /// Reference epoch for `tau`, MJD.
    pub tau_ref_epoch: f64,
    pub samples: Vec<OrbitalElements>,
}

/// A posterior file as read, before each row is checked for eight elements.
#[derive(Deserialize)]
struct RawPosterior {
    tau_ref_epoch: f64,
    samples: Vec<Vec<f64>>,
}

/// Median and spread of one predicted quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub median: f64,
    pub std: f64,
}

impl Estimate {
    fn from_samples(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self {
            median: median(&values),
            std: std_dev(&values),
        }
    }
}

/// Predicted position of a companion at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// RA offset, mas.
    pub ra: Estimate,

    /// Dec offset, mas.
    pub dec: Estimate,

    /// Separation, mas.
    pub separation: Estimate,

    /// Position angle east of north, degrees in `[0, 360)`.
    pub position_angle: Estimate,
}

impl Prediction {
    /// Point estimate used for planning.
    pub fn offset(&self) -> Offset {
        Offset::new(self.ra.median, self.dec.median)
    }
}

impl Posterior {
    /// Project every draw to `epoch_mjd` and summarize.
    pub fn predict(&self, epoch_mjd: f64) -> Option<Prediction> {
        if self.samples.is_empty() {
            return None;
        }

        let offsets: Vec<Offset> = self
            .samples
            .iter()
            .map(|el| kepler::sky_offset(el, epoch_mjd, self.tau_ref_epoch))
            .collect();

        let ras = offsets.iter().map(|o| o.ra).collect();
        let decs = offsets.iter().map(|o| o.dec).collect();
        let seps = offsets.iter().map(|o| o.ra.hypot(o.dec)).collect();
        let pas = offsets
            .iter()
            .map(|o| o.ra.atan2(o.dec).to_degrees().rem_euclid(360.0))
            .collect();

        Some(Prediction {
            ra: Estimate::from_samples(ras),
            dec: Estimate::from_samples(decs),
            separation: Estimate::from_samples(seps),
            position_angle: Estimate::from_samples(pas),
        })
    }
}

/// A directory of posterior files, plus fixed positions that take precedence.
#[derive(Debug, Clone)]
pub struct OrbitCatalog {
    dir: PathBuf,
    aliases: BTreeMap<String, String>,
    fixed: FixedPositions,
}

impl OrbitCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            aliases: BTreeMap::new(),
            fixed: FixedPositions::new(),
        }
    }

    /// Alternate names, e.g. `betpicb` → `betapicb`. Matched case-insensitively.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, String>) -> Self {
        self.aliases = aliases
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
            .collect();
        self
    }

    /// Positions answered without consulting the posterior files.
    #[must_use]
    pub fn with_fixed(mut self, fixed: FixedPositions) -> Self {
        self.fixed = fixed;
        self
    }

    /// Fixed position for a companion, if one is configured under its own name or its alias target.
    pub fn fixed_position(&self, companion: &str) -> Option<Offset> {
        self.fixed
            .get(companion)
            .or_else(|| self.fixed.get(&self.resolve(companion)))
    }

    /// Canonical catalog name for a companion.
    pub fn resolve(&self, companion: &str) -> String {
        let name = companion.to_lowercase();
        self.aliases.get(&name).cloned().unwrap_or(name)
    }

    /// All companion names the catalog can answer for, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.fixed.names().map(String::from).collect();
        names.extend(self.aliases.keys().cloned());

        match fs::read_dir(&self.dir) {
            Ok(entries) => {
                for entry in entries {
                    let path = entry?.path();
                    if path.extension().is_some_and(|ext| ext == "json")
                        && let Some(stem) = path.file_stem()
                    {
                        names.push(stem.to_string_lossy().to_lowercase());
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Loads the posterior draws for a companion.
    pub fn load(&self, companion: &str) -> Result<Posterior> {
        let name = self.resolve(companion);
        if !is_plain_name(&name) {
            return Err(OracleError::UnknownCompanion(companion.to_string()));
        }
        let path = self.dir.join(format!("{name}.json"));
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(OracleError::UnknownCompanion(companion.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let raw: RawPosterior = serde_json::from_str(&json)?;
        let samples = raw
            .samples
            .iter()
            .enumerate()
            .map(|(row, values)| {
                <[f64; 8]>::try_from(values.as_slice())
                    .map(OrbitalElements::from)
                    .map_err(|_| OracleError::MalformedSample {
                        companion: name.clone(),
                        row,
                        len: values.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Posterior {
            tau_ref_epoch: raw.tau_ref_epoch,
            samples,
        })
    }

    /// Full prediction with uncertainties, from the posterior draws.
    pub fn prediction(&self, companion: &str, at: Timestamp) -> Result<Prediction> {
        let posterior = self.load(companion)?;
        posterior
            .predict(epoch::to_mjd(at))
            .ok_or_else(|| OracleError::EmptyPosterior(companion.to_string()))
    }
}

impl PositionOracle for OrbitCatalog {
    fn predict(&self, companion: &str, at: Timestamp) -> Result<Offset> {
        let offset = match self.fixed_position(companion) {
            Some(offset) => offset,
            None => self.prediction(companion, at)?.offset(),
        };
        tracing::debug!(companion, %at, ra = offset.ra, dec = offset.dec, "predicted offset");
        Ok(offset)
    }
}

/// Median of sorted values. Averages the middle pair for even counts.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Population standard deviation.
#[allow(clippy::cast_precision_loss)]
fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    const REF_EPOCH: f64 = 58_849.0;

    fn circular(plx: f64) -> OrbitalElements {
        OrbitalElements {
            sma: 1.0,
            ecc: 0.0,
            inc: 0.0,
            aop: 0.0,
            pan: 0.0,
            tau: 0.0,
            plx,
            mtot: 1.0,
        }
    }

    fn write_posterior(dir: &TempDir, name: &str, samples: Vec<OrbitalElements>) {
        let posterior = Posterior {
            tau_ref_epoch: REF_EPOCH,
            samples,
        };
        fs::write(
            dir.path().join(format!("{name}.json")),
            serde_json::to_string(&posterior).unwrap(),
        )
        .unwrap();
    }

    fn at_ref_epoch() -> Timestamp {
        epoch::from_mjd(REF_EPOCH).unwrap()
    }

    #[test]
    fn median_and_spread_over_draws() {
        let posterior = Posterior {
            tau_ref_epoch: REF_EPOCH,
            samples: vec![circular(90.0), circular(100.0), circular(110.0)],
        };
        let p = posterior.predict(REF_EPOCH).unwrap();

        assert!((p.dec.median - 100.0).abs() < 1e-9);
        assert!((p.dec.std - (200.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert!(p.ra.median.abs() < 1e-9);
        assert!((p.separation.median - 100.0).abs() < 1e-9);
        assert!(p.position_angle.median.abs() < 1e-6 || (p.position_angle.median - 360.0).abs() < 1e-6);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert!((median(&[1.0, 2.0, 4.0, 10.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn position_angle_is_east_of_north() {
        let posterior = Posterior {
            tau_ref_epoch: REF_EPOCH,
            samples: vec![circular(100.0)],
        };
        let p = posterior.predict(REF_EPOCH + 365.25 / 4.0).unwrap();
        assert!((p.position_angle.median - 90.0).abs() < 1e-6);
    }

    #[test]
    fn empty_posterior_has_no_prediction() {
        let posterior = Posterior {
            tau_ref_epoch: REF_EPOCH,
            samples: vec![],
        };
        assert!(posterior.predict(REF_EPOCH).is_none());
    }

    #[test]
    fn elements_read_as_flat_arrays() {
        let posterior: Posterior = serde_json::from_str(
            r#"{"tau_ref_epoch": 58849.0, "samples": [[70.0, 0.1, 0.5, 1.0, 2.0, 0.3, 24.2, 1.5]]}"#,
        )
        .unwrap();
        assert_eq!(posterior.samples[0].sma, 70.0);
        assert_eq!(posterior.samples[0].mtot, 1.5);
    }

    #[test]
    fn catalog_predicts_from_file() {
        let dir = TempDir::new().unwrap();
        write_posterior(&dir, "hr8799e", vec![circular(100.0)]);

        let catalog = OrbitCatalog::new(dir.path());
        let offset = catalog.predict("HR8799e", at_ref_epoch()).unwrap();
        assert!(offset.ra.abs() < 1e-6);
        assert!((offset.dec - 100.0).abs() < 1e-6);
    }

    #[test]
    fn catalog_resolves_aliases() {
        let dir = TempDir::new().unwrap();
        write_posterior(&dir, "betapicb", vec![circular(50.0)]);

        let aliases = BTreeMap::from([("betpicb".to_string(), "betapicb".to_string())]);
        let catalog = OrbitCatalog::new(dir.path()).with_aliases(&aliases);
        let offset = catalog.predict("BetPicb", at_ref_epoch()).unwrap();
        assert!((offset.dec - 50.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_positions_take_precedence() {
        let dir = TempDir::new().unwrap();
        write_posterior(&dir, "hd206893b", vec![circular(100.0)]);

        let catalog = OrbitCatalog::new(dir.path())
            .with_fixed(FixedPositions::new().with("HD206893b", Offset::new(124.0, 200.0)));
        let offset = catalog.predict("HD206893b", at_ref_epoch()).unwrap();
        assert_eq!(offset, Offset::new(124.0, 200.0));
    }

    #[test]
    fn fixed_positions_answer_for_aliases() {
        let dir = TempDir::new().unwrap();
        let aliases = BTreeMap::from([("betpicb".to_string(), "betapicb".to_string())]);
        let catalog = OrbitCatalog::new(dir.path())
            .with_aliases(&aliases)
            .with_fixed(FixedPositions::new().with("betapicb", Offset::new(-10.0, 20.0)));

        assert_eq!(catalog.fixed_position("BetPicb"), Some(Offset::new(-10.0, 20.0)));
        assert_eq!(
            catalog.predict("betpicb", at_ref_epoch()).unwrap(),
            Offset::new(-10.0, 20.0)
        );
    }

    #[test]
    fn short_sample_row_is_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("hr8799c.json"),
            r#"{"tau_ref_epoch": 58849.0, "samples": [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 1.0], [1.0, 0.0, 0.0]]}"#,
        )
        .unwrap();

        let err = OrbitCatalog::new(dir.path())
            .predict("hr8799c", at_ref_epoch())
            .unwrap_err();
        assert!(matches!(
            err,
            OracleError::MalformedSample { ref companion, row: 1, len: 3 } if companion == "hr8799c"
        ));
    }

    #[test]
    fn names_outside_catalog_are_unknown() {
        let root = TempDir::new().unwrap();
        let catalog_dir = root.path().join("orbits");
        fs::create_dir(&catalog_dir).unwrap();
        write_posterior(&root, "outside", vec![circular(100.0)]);

        let catalog = OrbitCatalog::new(&catalog_dir);
        let err = catalog.predict("../outside", at_ref_epoch()).unwrap_err();
        assert!(matches!(err, OracleError::UnknownCompanion(name) if name == "../outside"));
    }

    #[test]
    fn unknown_companion_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = OrbitCatalog::new(dir.path());
        let err = catalog.predict("hr8799z", at_ref_epoch()).unwrap_err();
        assert!(matches!(err, OracleError::UnknownCompanion(name) if name == "hr8799z"));
    }

    #[test]
    fn empty_posterior_file_fails() {
        let dir = TempDir::new().unwrap();
        write_posterior(&dir, "hr8799b", vec![]);
        let err = OrbitCatalog::new(dir.path())
            .predict("hr8799b", at_ref_epoch())
            .unwrap_err();
        assert!(matches!(err, OracleError::EmptyPosterior(_)));
    }

    #[test]
    fn names_cover_files_fixed_and_aliases() {
        let dir = TempDir::new().unwrap();
        write_posterior(&dir, "hr8799c", vec![circular(1.0)]);
        write_posterior(&dir, "betapicb", vec![circular(1.0)]);
        fs::write(dir.path().join("README.txt"), "not a posterior").unwrap();

        let aliases = BTreeMap::from([("betpicb".to_string(), "betapicb".to_string())]);
        let catalog = OrbitCatalog::new(dir.path())
            .with_aliases(&aliases)
            .with_fixed(FixedPositions::new().with("HD206893b", Offset::ZERO));

        assert_eq!(
            catalog.names().unwrap(),
            vec!["betapicb", "betpicb", "hd206893b", "hr8799c"]
        );
    }

    #[test]
    fn missing_catalog_dir_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let catalog = OrbitCatalog::new(dir.path().join("absent"));
        assert!(catalog.names().unwrap().is_empty());
    }
}
