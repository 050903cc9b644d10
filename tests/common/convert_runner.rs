use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use parser::{Cli, Commands, Convert};

use super::Fixture;

/// Builds an `ab2atgc convert` command line over test-data fixtures.
#[derive(Default)]
pub struct ConvertRunnerBuilder {
    manifest : Option<String>,
    genotypes: Option<String>,
    extra    : Vec<String>,
}

impl ConvertRunnerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest(mut self, fixture: &str) -> Self {
        self.manifest = Some(fixture.to_string());
        self
    }

    pub fn genotypes(mut self, fixture: &str) -> Self {
        self.genotypes = Some(fixture.to_string());
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.extra.extend(arg.split_whitespace().map(ToString::to_string));
        self
    }

    pub fn build(self) -> Result<ConvertRunner> {
        let (Some(manifest), Some(genotypes)) = (self.manifest, self.genotypes) else {
            bail!("Both a manifest and a genotype file are required")
        };
        Ok(ConvertRunner {
            manifest  : Fixture::copy(&manifest),
            genotypes : Fixture::copy(&genotypes),
            output_dir: Fixture::blank("ab2atgc-output"),
            extra     : self.extra,
        })
    }
}

pub struct ConvertRunner {
    pub manifest  : Fixture,
    pub genotypes : Fixture,
    pub output_dir: Fixture,
    extra         : Vec<String>,
}

impl ConvertRunner {
    pub fn args(&self) -> Vec<String> {
        let mut args = ["ab2atgc", "convert"].map(String::from).to_vec();
        args.extend(["--manifest".into(), self.manifest.to_string()]);
        args.extend(["--genotypes".into(), self.genotypes.to_string()]);
        args.extend(["--output-dir".into(), self.output_dir.to_string()]);
        args.extend(self.extra.iter().cloned());
        args
    }

    pub fn cli(&self) -> Result<Cli> {
        Ok(Cli::try_parse_from(self.args())?)
    }

    pub fn convert(&self) -> Result<Convert> {
        match self.cli()?.commands {
            Commands::Convert{convert} => Ok(convert),
            Commands::FromYaml{..}     => bail!("Expected a convert subcommand"),
        }
    }

    /// Run the whole program, as the binary would (minus the logger).
    pub fn run(&self) -> Result<()> {
        let cli = self.cli()?;
        cli.serialize()?;
        ab2atgc::run(cli)
    }

    /// Path of an output file, given its extension.
    pub fn output(&self, prefix: &str, ext: &str) -> PathBuf {
        self.output_dir.join(format!("{prefix}.{ext}"))
    }
}
