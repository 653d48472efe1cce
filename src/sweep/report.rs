use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use bevy::log::info;

use super::Experiment;
use crate::algo::mst::KruskalVariant;
use crate::error::Result;

/// `n,construction,<one column per variant>`
pub fn header() -> String {
    let mut columns = vec!["n", "construction"];
    columns.extend(KruskalVariant::ALL.iter().map(|variant| variant.label()));
    columns.join(",")
}

/// Durations are written in seconds.
pub fn row(experiment: &Experiment) -> String {
    let mut fields = vec![
        experiment.n.to_string(),
        experiment.construction.as_secs_f64().to_string(),
    ];
    fields.extend(
        experiment
            .timings
            .iter()
            .map(|timing| timing.as_secs_f64().to_string()),
    );
    fields.join(",")
}

/// Appends `experiment` to the CSV at `path`, creating parent directories and
/// writing the header first if the file is new or empty.
pub fn append_row(path: &Path, experiment: &Experiment) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let fresh = fs::metadata(path).map_or(true, |meta| meta.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if fresh {
        info!("starting results log at {}", path.display());
        writeln!(file, "{}", header())?;
    }
    writeln!(file, "{}", row(experiment))?;
    Ok(())
}
