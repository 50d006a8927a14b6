//! Check command: resolve the extension order without writing anything

use std::path::Path;

use registrar_config::{Composer, PackageDescriptor, RegistrarConfig};

use crate::error::Result;

/// Run the check command
///
/// Prints one `key (typeId)` line per extension, in resolved order.
pub fn run_check(descriptor_path: &Path, config: &RegistrarConfig) -> Result<()> {
    let descriptor = PackageDescriptor::load(descriptor_path)?;
    let composed = Composer::new(&config.types).compose(&descriptor)?;

    for candidate in &composed.extensions {
        println!("{} ({})", candidate.key, candidate.type_id);
    }
    Ok(())
}
