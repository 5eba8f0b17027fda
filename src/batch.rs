use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::encode::png::{EncodeConfig, save_png};
use crate::foundation::error::{ScanpaintError, ScanpaintResult};
use crate::scene::model::Scene;

/// One scene file to render and where its PNG goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchJob {
    /// Scene JSON to read.
    pub input: PathBuf,
    /// PNG to write; its parent directory is created on demand.
    pub output: PathBuf,
}

impl BatchJob {
    /// Map `input` to `<out_dir>/<input stem>.png`.
    pub fn into_dir(input: impl Into<PathBuf>, out_dir: &Path) -> ScanpaintResult<Self> {
        let input = input.into();
        let stem = input.file_stem().ok_or_else(|| {
            ScanpaintError::validation(format!("scene path '{}' has no file name", input.display()))
        })?;
        let mut name = stem.to_os_string();
        name.push(".png");
        let output = out_dir.join(name);
        Ok(Self { input, output })
    }
}

/// Render and save every job in parallel.
///
/// Each job owns its own surface, so workers share nothing but the read-only config. Results
/// come back in job order; the first failure (in job order) is returned.
#[tracing::instrument(skip(jobs, cfg), fields(jobs = jobs.len()))]
pub fn render_batch(
    jobs: &[BatchJob],
    cfg: &EncodeConfig,
    threads: Option<usize>,
) -> ScanpaintResult<Vec<PathBuf>> {
    cfg.validate()?;
    let pool = build_thread_pool(threads)?;

    let results = pool.install(|| {
        jobs.par_iter()
            .map(|job| -> ScanpaintResult<PathBuf> {
                let surface = Scene::from_path(&job.input)?.render()?;
                save_png(&surface, cfg, &job.output)?;
                tracing::debug!(input = %job.input.display(), output = %job.output.display(), "rendered");
                Ok(job.output.clone())
            })
            .collect::<Vec<_>>()
    });

    results.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ScanpaintResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ScanpaintError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScanpaintError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
