//! Template builder: turns a validated sequence into ordered instrument templates.
//!
//! Every plan opens with a header and an acquisition, then runs either the
//! on-axis or the off-axis block once per pass. Swap sequences run two
//! passes with a swap template between them; the second pass observes the
//! companion with its offset mirrored.

use jiff::Timestamp;

use crate::{
    model::{
        Acquisition, AxisMode, CompanionPosition, Dither, Exposure, Header, ObservationContext,
        Observation, Offset, SequenceSpec, Template,
    },
    normalize::normalize,
    oracle::{PositionOracle, Result},
};

/// Magnitude added to the star K magnitude for the dither reference.
pub const DITHER_MAG_OFFSET: f64 = 9.0;

const OBJECT: &str = "O";
const OBJECT_SKY: &str = "O S";

/// Build the template list for one sequence.
///
/// Fails on the first oracle error. No partial list is returned.
pub fn build<O: PositionOracle + ?Sized>(
    context: &ObservationContext,
    spec: &SequenceSpec,
    oracle: &O,
    at: Timestamp,
) -> Result<Vec<Template>> {
    let mut builder = Builder {
        context,
        spec,
        oracle,
        at,
        repeat: spec.repeat_or(context.repeat),
        templates: Vec::new(),
    };

    builder.header();
    let raw = builder.locate(&spec.primary().name)?;
    let center = normalize(raw, spec.axis, spec.swap);
    builder.acquisition(center);

    match spec.axis {
        AxisMode::On => builder.on_axis(center)?,
        AxisMode::Off => builder.off_axis()?,
    }

    Ok(builder.templates)
}

struct Builder<'a, O: ?Sized> {
    context: &'a ObservationContext,
    spec: &'a SequenceSpec,
    oracle: &'a O,
    at: Timestamp,
    repeat: u32,
    templates: Vec<Template>,
}

impl<O: PositionOracle + ?Sized> Builder<'_, O> {
    fn locate(&self, companion: &str) -> Result<Offset> {
        self.oracle.predict(companion, self.at)
    }

    fn header(&mut self) {
        self.templates.push(Template::Header(Header {
            run_id: self.context.run_id.clone(),
            ob_name: self.context.star.clone(),
            obs_time: self.at,
        }));
    }

    fn acquisition(&mut self, center: Offset) {
        let ctx = self.context;
        self.templates.push(Template::Acquisition(Acquisition {
            target: self.spec.primary().name.clone(),
            ra: ctx.ra.clone(),
            dec: ctx.dec.clone(),
            pm_ra: ctx.pm_ra,
            pm_dec: ctx.pm_dec,
            k_mag: ctx.k_mag,
            h_mag: ctx.h_mag,
            resolution: ctx.resolution.clone(),
            wollaston: ctx.wollaston.clone(),
            gs_mag: ctx.gs_mag,
            offset: center,
        }));
    }

    fn observe(
        &mut self,
        target: &str,
        offset: Offset,
        exposure: Exposure,
        sequence: &str,
        companion: Option<CompanionPosition>,
    ) {
        self.templates.push(Template::Observation(Observation {
            target: target.to_string(),
            offset,
            dit: exposure.dit,
            ndit: exposure.ndit,
            sequence: sequence.to_string(),
            companion,
        }));
    }

    /// Repeat index whose star observation also takes a sky frame.
    fn sky_repeat(&self) -> Option<u32> {
        (self.repeat > 1).then(|| (self.repeat - 1) / 2)
    }

    fn swap_after(&mut self, pass: u32) {
        if self.spec.swap && pass == 0 {
            self.templates.push(Template::Swap);
        }
    }

    /// Star stays centered; every companion is observed relative to the acquisition center.
    fn on_axis(&mut self, center: Offset) -> Result<()> {
        let spec = self.spec;
        let star = self.context.star.clone();

        for pass in 0..spec.passes() {
            let swapped = pass == 1;
            for r in 0..self.repeat {
                let sequence = if pass == 0 && self.sky_repeat() == Some(r) {
                    OBJECT_SKY
                } else {
                    OBJECT
                };
                self.observe(&star, -center, spec.star_exposure, sequence, None);

                for companion in &spec.companions {
                    let raw = self.locate(&companion.name)?;
                    let (offset, annotation) = if swapped {
                        (-raw - center, Some(center.into()))
                    } else {
                        (raw - center, None)
                    };
                    self.observe(&companion.name, offset, companion.exposure, OBJECT, annotation);
                }
            }
            self.swap_after(pass);
        }

        if !spec.swap {
            let closing = self.context.star_exposure();
            self.observe(&star, -center, closing, OBJECT, None);
        }
        Ok(())
    }

    /// Pointing moves onto each companion in turn, dithering from the third one on.
    fn off_axis(&mut self) -> Result<()> {
        let spec = self.spec;
        let dither_mag = self.context.k_mag + DITHER_MAG_OFFSET;

        for pass in 0..spec.passes() {
            for _ in 0..self.repeat {
                for (n, companion) in spec.companions.iter().enumerate() {
                    if n > 1 {
                        let offset = self.locate(&companion.name)?;
                        self.templates.push(Template::Dither(Dither {
                            target: companion.name.clone(),
                            mag: dither_mag,
                            offset,
                        }));
                    }
                    self.observe(&companion.name, Offset::ZERO, companion.exposure, OBJECT, None);
                }
            }
            self.swap_after(pass);
        }
        Ok(())
    }
}
