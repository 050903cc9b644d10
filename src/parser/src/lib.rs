use std::{
    ffi::OsStr,
    fmt::{self, Display, Formatter},
    fs::File,
    path::{Path, PathBuf},
};

use located_error::prelude::*;

use clap::{Parser, Subcommand, Args, ArgEnum};
use serde::{Serialize, Deserialize};
use log::debug;

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[clap(name="ab2atgc", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// ab2atgc: Convert Illumina AB genotype calls into nucleotide calls, in PLINK transposed format.
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written at the root of the user-provided `--output-dir` folder.
    /// - `from-yaml` runs are not serialized again.
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the output yaml file cannot be written.
    pub fn serialize(&self) -> Result<()> {
        use ParserError::{Serialize, WriteConfig};
        let loc_msg = "While serializing command line arguments";

        let output_dir = match &self.commands {
            Commands::Convert{convert} => &convert.output_dir,
            Commands::FromYaml{yaml: _} => return Ok(()),
        };

        // Parse arguments to yaml and print to console.
        let serialized = serde_yaml::to_string(&self).map_err(Serialize).loc(loc_msg)?;
        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file  = output_dir.join(format!("{current_time}-convert.yaml"));

        std::fs::write(&output_file, serialized)
            .map_err(|e| WriteConfig(output_file.display().to_string(), e))
            .loc(loc_msg)
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - if the provided `.yaml` is invalid, or does not carry read permissions
    /// - if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        use ParserError::{OpenConfig, Deserialize};
        let loc_msg = || format!("While deserializing command line arguments from {}", yaml.display());
        let file = File::open(yaml)
            .map_err(|e| OpenConfig(yaml.display().to_string(), e))
            .with_loc(loc_msg)?;
        serde_yaml::from_reader(file)
            .map_err(|e| Deserialize(yaml.display().to_string(), e))
            .with_loc(loc_msg)
    }
}

#[derive(Subcommand, Debug, Clone, Serialize, Deserialize)]
pub enum Commands {
    /// Translate the AB calls of a GenomeStudio export into PLINK `.tfam`/`.tped` files.
    ///
    /// Alleles are resolved from the Illumina manifest (TOP/BOT strand, SNP descriptor). Markers
    /// lying on the reverse strand of the reference genome are listed within a separate `.txt`
    /// file, which can be provided to `plink --flip`.
    Convert {
        #[clap(flatten)]
        convert: Convert,
    },

    /// Run ab2atgc using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply an ab2atgc command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

/// Column lookup strategy of the input tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum, Serialize, Deserialize)]
pub enum ColumnMode {
    /// Find columns using their header label (e.g. 'IlmnStrand', 'RefStrand').
    Named,
    /// Expect columns at fixed positions.
    Positional,
}

impl Default for ColumnMode {
    fn default() -> Self {Self::Named}
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct Convert {
    /// Illumina manifest file (e.g. 'HumanOmniExpressExome-8-v1-1-C.csv').
    ///
    /// Both raw manifests (containing [Heading], [Assay] and [Controls] sections) and plain
    /// comma-separated assay tables are accepted.
    #[clap(short='m', long, parse(try_from_os_str=valid_input_file))]
    pub manifest: PathBuf,

    /// GenomeStudio genotype export, in comma-separated format.
    ///
    /// The first three columns are expected to carry the marker name, chromosome and position. Per-sample
    /// genotype calls are then found at --sample-offset, every --sample-stride columns.
    #[clap(short='g', long, parse(try_from_os_str=valid_input_file))]
    pub genotypes: PathBuf,

    /// Output directory where results will be written.
    ///
    /// The directory is created if it does not exist.
    #[clap(short, long, default_value("ab2atgc-output"), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// File prefix of the output '.tfam', '.tped' and '.txt' files.
    ///
    /// Defaults to the file stem of --genotypes
    #[clap(short, long)]
    pub prefix: Option<String>,

    /// Overwrite existing output files.
    #[clap(short='w', long)]
    pub overwrite: bool,

    /// Column lookup strategy of the input tables.
    ///
    /// 'named' looks for the expected labels within the header of each file.{n}
    /// 'positional' expects the manifest columns 'Name', 'IlmnStrand', 'SNP', 'Chr', 'MapInfo', 'RefStrand' at
    /// 0-based positions 1, 2, 3, 9, 10, 20, and the genotype columns 'Name', 'Chr', 'Position' at positions 0, 1, 2.
    #[clap(short, long, arg_enum, default_value("named"))]
    pub column_mode: ColumnMode,

    /// 0-based index of the first sample genotype column, within the genotype export.
    #[clap(long, default_value("3"))]
    pub sample_offset: usize,

    /// Number of columns separating two consecutive samples within the genotype export.
    ///
    /// GenomeStudio exports carry six columns per sample (GType, Score, Theta, R, X, Y)
    #[clap(long, default_value("6"), parse(try_from_str=strictly_positive))]
    pub sample_stride: usize,

    /// Number of parallel threads used when translating genotype calls.
    #[clap(short='@', long, default_value("1"), parse(try_from_str=strictly_positive))]
    pub threads: usize,

    /// Number of genotype rows translated per batch.
    ///
    /// Rows are read and translated in batches, and written in their input order.
    #[clap(short='b', long, default_value("4096"), parse(try_from_str=strictly_positive))]
    pub batch_size: usize,
}

impl Convert {
    /// Get a generic filename for our output files: `{--output-dir}/{--prefix}`. If the user did not
    /// specify any `--prefix`, the file stem of `--genotypes` is used.
    ///
    /// # Errors
    /// - if a default file-prefix cannot be created from the input genotype filestem.
    pub fn file_prefix(&self) -> Result<PathBuf> {
        let file_prefix = match &self.prefix {
            Some(prefix) => OsStr::new(prefix),
            None         => self.genotypes.file_stem()
                .ok_or(ParserError::ParseOutputPrefix)
                .loc("While parsing command line arguments")?,
        };
        Ok(self.output_dir.join(file_prefix))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FileEntity {File, Directory}

impl Display for FileEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File      => write!(f, "File"),
            Self::Directory => write!(f, "Directory"),
        }
    }
}

impl FileEntity {
    fn validate(self, path: &Path) -> Result<(), ParserError> {
        use ParserError::InvalidFileEntity;
        let valid = match self {
            Self::File      => path.is_file(),
            Self::Directory => path.is_dir()
        };

        if valid {
            Ok(())
        } else {
            Err(InvalidFileEntity(self, path.display().to_string()))
        }
    }
}

fn assert_filesystem_entity_is_valid(s: &OsStr, entity: FileEntity) -> Result<()> {
    use ParserError::MissingFileEntity;
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFileEntity(entity, path.display().to_string()))
            .loc("While parsing arguments.")
    }

    entity.validate(path).loc("While parsing arguments.")
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    assert_filesystem_entity_is_valid(s, FileEntity::File)
        .loc("While checking for file validity")?;
    Ok(PathBuf::from(s))
}

fn valid_output_dir(s: &OsStr) -> Result<PathBuf> {
    let path = Path::new(s);
    if ! path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|e| ParserError::CreateOutputDir(path.display().to_string(), e))
            .loc("While checking for directory validity")?;
    }
    assert_filesystem_entity_is_valid(s, FileEntity::Directory)
        .loc("While checking for directory validity")?;
    Ok(PathBuf::from(s))
}

fn strictly_positive(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ParserError::NotStrictlyPositive(s.to_string())).loc("While parsing arguments.")
    }
}
