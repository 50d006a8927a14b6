//! Compose command: write the merged package configuration

use std::path::Path;

use colored::Colorize;

use registrar_config::io::write_text;
use registrar_config::{Composer, PackageDescriptor, RegistrarConfig};

use crate::error::Result;

/// Run the compose command
///
/// With `dry_run` the document goes to stdout and nothing is written.
pub fn run_compose(
    descriptor_path: &Path,
    output: Option<&Path>,
    dry_run: bool,
    config: &RegistrarConfig,
) -> Result<()> {
    let descriptor = PackageDescriptor::load(descriptor_path)?;
    let composed = Composer::new(&config.types).compose(&descriptor)?;
    let document = composed.render()?;

    if dry_run {
        print!("{document}");
        return Ok(());
    }

    let path = output.unwrap_or(config.output.path.as_path());
    write_text(path, &document)?;
    tracing::info!(path = %path.display(), "Wrote merged configuration");

    println!(
        "{} Wrote {} ({} packages, {} extensions)",
        "OK".green().bold(),
        path.display().to_string().cyan(),
        descriptor.len(),
        composed.extensions.len()
    );
    Ok(())
}
