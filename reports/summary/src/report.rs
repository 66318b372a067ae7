//! 报告输出.

use papila_berry::prelude::*;
use std::io::{self, Write};

const SEP: &str = "--------------------------------------------------------";
const S4: &str = "    ";

#[inline]
fn f64_to_display(f: Option<f64>) -> String {
    match f {
        Some(f) => format!("{f:.4}"),
        None => "/".to_string(),
    }
}

/// 将单个字段的统计摘要写进 `w` 中.
fn field_into<W: Write>(name: &str, s: &FieldSummary, w: &mut W) -> io::Result<()> {
    writeln!(
        w,
        "{S4}{name}: n = {}, mean = {}, std = {}, range = [{}, {}]",
        s.count,
        f64_to_display(s.mean),
        f64_to_display(s.std_dev),
        f64_to_display(s.min),
        f64_to_display(s.max)
    )
}

/// 将 `stats` 的结果写进 `w` 中.
fn statistics_into<W: Write>(stats: &Statistics, w: &mut W) -> io::Result<()> {
    writeln!(w, "Dataset statistics:")?;
    writeln!(w, "{S4}Patients: {}", stats.total_patients())?;
    writeln!(w, "{S4}Eyes: {}", stats.total_eyes())?;
    for g in Gender::ALL {
        writeln!(w, "{S4}{g:?}: {}", stats.gender_count(g))?;
    }
    for d in DiagnosisStatus::ALL {
        writeln!(w, "{S4}{d:?} eyes: {}", stats.diagnosis_count(d))?;
    }
    for c in CrystallineStatus::ALL {
        writeln!(w, "{S4}{c:?} eyes: {}", stats.crystalline_count(c))?;
    }
    let pd = stats.patient_diagnosis();
    writeln!(
        w,
        "{S4}Patients by diagnosis: healthy {}, glaucoma {}, suspect {}, mixed {}, no data {}",
        pd.healthy, pd.glaucoma, pd.suspect, pd.mixed, pd.no_data
    )?;

    field_into("Age", &stats.age(), w)?;
    field_into("Pneumatic IOP (mmHg)", &stats.pneumatic_iop(), w)?;
    field_into("Perkins IOP (mmHg)", &stats.perkins_iop(), w)?;
    field_into("Pachymetry (um)", &stats.pachymetry(), w)?;
    field_into("Axial length (mm)", &stats.axial_length(), w)?;
    field_into("Mean defect (dB)", &stats.mean_defect(), w)?;
    field_into("CDR", &stats.cdr(), w)?;
    for r in RiskLevel::ALL {
        writeln!(w, "{S4}CDR risk {r:?}: {}", stats.risk_count(r))?;
    }
    write!(w, "{S4}CDR skipped: {}", stats.cdr_skipped())
}

/// 将一位患者的摘要写进 `w` 中.
fn patient_into<W: Write>(p: &Patient, w: &mut W) -> io::Result<()> {
    writeln!(
        w,
        "Patient `{}` ({} y, {:?}): {:?}",
        p.patient_id(),
        p.age(),
        p.gender(),
        p.diagnosis()
    )?;
    for eye in p.eyes() {
        write!(w, "{S4}{}: {:?}", eye.eye(), eye.diagnosis())?;
        if let Some(r) = eye.refractive_error() {
            write!(w, ", {r}")?;
        }
        if let Some(s) = eye.glaucoma_severity() {
            write!(w, ", severity {s:?}")?;
        }
        match eye.segmentation().map(|s| analyze(s, &CdrThresholds::clinical())) {
            Some(Ok(r)) => write!(
                w,
                ", CDR {:.4} ({:?}), rim/disc {:.4}, cup within disc: {}",
                r.cdr, r.risk, r.rim_to_disc, r.cup_within_disc
            )?,
            Some(Err(e)) => write!(w, ", CDR unavailable: {e}")?,
            None => {}
        }
        writeln!(w)?;
    }
    Ok(())
}

/// 打印所有患者的摘要.
pub fn describe_patients(dataset: &PapilaDataset) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{SEP}")?;
    for p in dataset {
        patient_into(p, &mut out)?;
    }
    writeln!(out, "{SEP}")
}

/// 打印统计结果.
pub fn describe_statistics(stats: &Statistics) -> io::Result<()> {
    let mut out = io::stdout().lock();
    statistics_into(stats, &mut out)?;
    writeln!(out, "\n{SEP}")
}
