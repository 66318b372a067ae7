//! 构建示例患者, 运行分割分析并打印数据集统计报告.

mod demo;
mod report;

use papila_berry::prelude::*;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Info)?;

    let mut dataset = demo::dataset()?;
    if let Some(dir) = dataset_dir_from_env_or_home().filter(|d| d.is_dir()) {
        dataset.set_base_directory(&dir)?;
    }
    log::info!(
        "{} patient(s), base directory: {:?}",
        dataset.len(),
        dataset.base_directory()
    );

    report::describe_patients(&dataset)?;
    report::describe_statistics(&dataset.get_statistics())?;

    let older_glaucoma = PatientFilter::new()
        .diagnosis(DiagnosisStatus::Glaucoma)
        .age_range(61..);
    let hits: Vec<&str> = dataset
        .select(&older_glaucoma)
        .into_iter()
        .map(Patient::patient_id)
        .collect();
    println!("Glaucoma, age > 60: {hits:?}");
    Ok(())
}
