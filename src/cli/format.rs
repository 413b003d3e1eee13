//! Output formatting for CLI display.

use crate::{model::Template, oracle::Prediction};

/// One line per template: index, kind, and what it points at.
pub(super) fn format_template(index: usize, template: &Template) -> String {
    let detail = match template {
        Template::Header(h) => format!("{} [{}] at {}", h.ob_name, h.run_id, h.obs_time),
        Template::Acquisition(a) => format!(
            "{} offset ({:.3}, {:.3}) mas",
            a.target, a.offset.ra, a.offset.dec
        ),
        Template::Observation(o) => {
            let mut line = format!(
                "{} offset ({:.3}, {:.3}) mas, DIT {} × NDIT {} [{}]",
                o.target, o.offset.ra, o.offset.dec, o.dit, o.ndit, o.sequence
            );
            if let Some(c) = &o.companion {
                line.push_str(&format!(", companion at ({:.3}, {:.3})", c.ra, c.dec));
            }
            line
        }
        Template::Dither(d) => format!(
            "{} offset ({:.3}, {:.3}) mas, mag {:.2}",
            d.target, d.offset.ra, d.offset.dec, d.mag
        ),
        Template::Swap => String::new(),
    };

    let line = format!("{index:>3}  {:<12}{detail}", template.kind());
    line.trim_end().to_string()
}

/// Median ± standard deviation of each predicted quantity.
pub(super) fn format_prediction(p: &Prediction) -> [String; 4] {
    [
        format!("RA Offset = {:.3} +/- {:.3} mas", p.ra.median, p.ra.std),
        format!("Dec Offset = {:.3} +/- {:.3} mas", p.dec.median, p.dec.std),
        format!(
            "Separation = {:.3} +/- {:.3} mas",
            p.separation.median, p.separation.std
        ),
        format!(
            "PA = {:.3} +/- {:.3} deg",
            p.position_angle.median, p.position_angle.std
        ),
    ]
}
