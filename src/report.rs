//! Post-run trajectory report.
//!
//! Built from a finished [`AnnealResult`]; nothing here runs inside the
//! search loop. The TSV output is meant for an external plotting tool.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::TableError;
use crate::sa::{AnnealConfig, AnnealResult};

/// One outer iteration of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRow {
    /// 1-based outer iteration.
    pub iteration: usize,
    /// Temperature after the iteration's cooling step, `T0 * rate^iteration`.
    pub temperature: f64,
    /// Current cost at the end of the iteration.
    pub current_cost: f64,
    /// Running minimum of the current costs.
    pub best_cost: f64,
}

/// Expands a result into per-iteration rows.
///
/// `best_cost` is the running minimum of the sampled current costs, so it
/// can sit above the true best when an improvement was later left behind
/// within the same level.
pub fn trajectory_rows(result: &AnnealResult, config: &AnnealConfig) -> Vec<TrajectoryRow> {
    let mut running_best = f64::INFINITY;
    result
        .trajectory
        .iter()
        .enumerate()
        .map(|(index, &current_cost)| {
            running_best = running_best.min(current_cost);
            TrajectoryRow {
                iteration: index + 1,
                temperature: config.temperature_after(index + 1),
                current_cost,
                best_cost: running_best,
            }
        })
        .collect()
}

/// Renders rows as tab-separated text with a header line.
pub fn to_tsv(rows: &[TrajectoryRow]) -> String {
    let mut out = String::from("iteration\ttemperature\tcurrent_cost\tbest_cost\n");
    for row in rows {
        let _ = writeln!(
            out,
            "{}\t{:e}\t{}\t{}",
            row.iteration, row.temperature, row.current_cost, row.best_cost
        );
    }
    out
}

/// Writes the trajectory report of `result` to `path`.
pub fn write_tsv(
    path: impl AsRef<Path>,
    result: &AnnealResult,
    config: &AnnealConfig,
) -> Result<(), TableError> {
    let path = path.as_ref();
    std::fs::write(path, to_tsv(&trajectory_rows(result, config))).map_err(|source| {
        TableError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
