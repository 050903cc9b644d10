use std::{fs, path::{Path, PathBuf}};

use located_error::LocatedError;

use log::trace;
use anyhow::Result;

mod error;
pub use error::ParseError;

/// PLINK transposed pedigree file extension.
pub const TFAM_EXT: &str = "tfam";
/// PLINK transposed genotype file extension.
pub const TPED_EXT: &str = "tped";
/// Strand-flip marker list extension (`plink --flip` input).
pub const FLIP_EXT: &str = "txt";

/// Attempt to create the parent directories of a path (if needed) and return an error if it failed.
pub fn create_parent_directory(path: &Path) -> Result<()> {
    use ParseError::CreateParentDirectory;
    let parent_dir = path.parent().unwrap_or(path);
    let loc_msg = || format!("While attempting to create output directory '{}'", path.display());
    fs::create_dir_all(parent_dir).map_err(CreateParentDirectory).with_loc(loc_msg)?;
    Ok(())
}

/// Check if a given file already exists ; raise an error if such is the case, and the user did not explicitly
/// allow file overwriting.
///
/// # Errors
/// - If the provided `path` already exists and the user did not specifically allow for file
///   overwrite using the `--overwrite` argument
pub fn can_write_file(overwrite: bool, path: &Path) -> Result<bool> {
    let loc_msg = "While ensuring that file permissions were appropriate";
    if !overwrite && path.exists() {
        return Err(ParseError::OverwriteDisallowed{path: path.to_path_buf()}).loc(loc_msg)
    }
    Ok(true)
}

/// Paths of the three files produced by a conversion run, all sharing the same prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub tfam: PathBuf,
    pub tped: PathBuf,
    pub flip: PathBuf,
}

impl OutputFiles {
    /// Derive output paths from `file_prefix` (i.e. `{output-dir}/{prefix}`), creating the output
    /// directory if required.
    ///
    /// # Errors
    /// - if the parent directory of `file_prefix` cannot be created.
    /// - if any of the output files already exists and `allow_overwrite` is false.
    /// - if `file_prefix` does not contain a file name.
    pub fn new(file_prefix: &Path, allow_overwrite: bool) -> Result<Self> {
        let err_context = "While attempting to format the name of the output files";
        create_parent_directory(file_prefix)?;

        let stem = file_prefix.file_name()
            .ok_or_else(|| ParseError::InvalidFilename(file_prefix.to_path_buf()))
            .loc(err_context)?
            .to_string_lossy();

        // set_extension() would truncate prefixes that contain dots.
        let with_ext = |ext: &str| file_prefix.with_file_name(format!("{stem}.{ext}"));
        let outputs = Self {
            tfam: with_ext(TFAM_EXT),
            tped: with_ext(TPED_EXT),
            flip: with_ext(FLIP_EXT),
        };

        for file in outputs.iter() {
            can_write_file(allow_overwrite, file).loc(err_context)?;
        }

        trace!("Output File(s): {outputs:#?}");
        Ok(outputs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.tfam, &self.tped, &self.flip].into_iter()
    }
}
