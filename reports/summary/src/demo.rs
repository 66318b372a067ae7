//! 示例数据.

use papila_berry::prelude::*;
use std::error::Error;

/// 以 `(cx, cy)` 为中心, 半轴为 `(rx, ry)` 的椭圆轮廓, 共 `n` 个顶点.
fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, n: usize) -> Polygon {
    (0..n)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(cx + rx * t.cos(), cy + ry * t.sin())
        })
        .collect()
}

/// 一位青光眼患者 (右眼青光眼, 左眼可疑) 和一位健康患者.
pub fn dataset() -> Result<PapilaDataset, Box<dyn Error>> {
    let right = EyeData::new(Eye::Right, DiagnosisStatus::Glaucoma)
        .with_refractive_error(RefractiveError::new(-1.5, -0.75, 180.0))
        .with_crystalline_status(CrystallineStatus::Phakic)
        .with_measurements(Measurements {
            pneumatic_iop: Some(25.0),
            perkins_iop: Some(24.0),
            pachymetry: Some(545.0),
            axial_length: Some(24.5),
            mean_defect: Some(-8.5),
        })
        .with_segmentation(Segmentation::new(
            ellipse(1000.0, 800.0, 180.0, 200.0, 36),
            ellipse(1005.0, 805.0, 120.0, 140.0, 36),
        ));
    let left = EyeData::new(Eye::Left, DiagnosisStatus::Suspect)
        .with_refractive_error(RefractiveError::spherical(-1.25))
        .with_crystalline_status(CrystallineStatus::Phakic)
        .with_measurements(Measurements {
            pneumatic_iop: Some(22.0),
            perkins_iop: Some(21.0),
            pachymetry: Some(540.0),
            axial_length: Some(24.3),
            mean_defect: Some(-2.5),
        });

    let mut p1 = Patient::new("P001", 65, Gender::Male);
    p1.set_eye_data(right)?;
    p1.set_eye_data(left)?;

    let p2 = Patient::new("P002", 52, Gender::Female)
        .with_eye_data(
            EyeData::new(Eye::Right, DiagnosisStatus::Healthy)
                .with_crystalline_status(CrystallineStatus::Pseudophakic)
                .with_measurements(Measurements {
                    pneumatic_iop: Some(15.0),
                    pachymetry: Some(560.0),
                    ..Default::default()
                })
                .with_segmentation(Segmentation::new(
                    ellipse(900.0, 760.0, 170.0, 185.0, 32),
                    ellipse(900.0, 760.0, 45.0, 55.0, 32),
                )),
        )?;

    let mut dataset = PapilaDataset::new();
    dataset.add_patient(p1)?;
    dataset.add_patient(p2)?;
    Ok(dataset)
}
