//! Two-phase conversion of GenomeStudio AB genotype calls: index an Illumina manifest, then
//! stream the genotype matrix through it.

use ab_io::{
    parse::OutputFiles,
    read::{GenotypeReader, ManifestReader, MatrixLayout},
    write::PlinkWriter,
};
use located_error::prelude::*;
use log::{info, warn};

pub mod index;
pub use index::{MarkerIndex, MarkerRecord};

pub mod transform;
pub use transform::{transform, Summary, TransformOptions};

mod error;
pub use error::MatrixError;

/// Run a full conversion: index `--manifest`, then translate `--genotypes` into
/// `{--output-dir}/{--prefix}.{tfam,tped,txt}`.
///
/// # Errors
/// - if any output file already exists and `--overwrite` was not requested.
/// - if any input fails to be read, or contains invalid entries.
pub fn run(convert: &parser::Convert) -> Result<Summary> {
    let outputs = OutputFiles::new(&convert.file_prefix()?, convert.overwrite)?;

    // ---------------------------- Build marker index.
    info!("Indexing manifest {}...", convert.manifest.display());
    let manifest = ManifestReader::new(&convert.manifest, convert.column_mode)?;
    let index = MarkerIndex::build(manifest)?;
    info!("Indexed {} markers ({} indels skipped).", index.len(), index.skipped_indels());
    if index.duplicates() > 0 {
        warn!("{} manifest entries were overridden by a subsequent entry with the same key.", index.duplicates());
    }

    // ---------------------------- Translate genotypes.
    info!("Translating genotypes of {}...", convert.genotypes.display());
    let layout = MatrixLayout{offset: convert.sample_offset, stride: convert.sample_stride};
    let reader = GenotypeReader::new(&convert.genotypes, convert.column_mode, layout)?;
    let mut writer = PlinkWriter::new(&outputs)?;
    let options = TransformOptions{threads: convert.threads, batch_size: convert.batch_size};
    let summary = transform(reader, &index, &mut writer, options)?;

    info!("Output files:\n{}", outputs.iter().map(|path| format!(" - {}", path.display())).collect::<Vec<_>>().join("\n"));
    Ok(summary)
}
