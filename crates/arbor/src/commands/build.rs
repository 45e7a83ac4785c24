//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arbor_static::{Manifest, SiteBuilder, Verbatim};

/// Run the build command.
///
/// `output` and `format` override the manifest's `[build]` table.
pub fn run(site: &Path, output: Option<PathBuf>, format: Option<bool>) -> Result<()> {
    tracing::info!("Building site from {}...", site.display());

    let manifest = Manifest::load(site)
        .with_context(|| format!("Failed to load manifest {}", site.display()))?;

    if manifest.pages.is_empty() {
        anyhow::bail!("{} declares no [[page]] entries", site.display());
    }

    let output_dir = output.unwrap_or_else(|| manifest.output_dir());
    let pretty = format.unwrap_or(manifest.build.format);

    let mut builder = SiteBuilder::new(&output_dir);
    if !pretty {
        builder = builder.with_formatter(Verbatim);
    }

    let result = builder
        .build_all(manifest.into_documents())
        .context("Build failed")?;

    tracing::info!(
        "Built {} documents ({} generated files, {} copied assets) in {}ms",
        result.documents,
        result.files_written,
        result.assets_copied,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
