//! Contract generation driven by the CLI configuration.
//!
//! This module turns a [`Config`] into a type registry and an emitter for the
//! selected target, and checks previously generated files against fresh
//! output.

use crate::config::{Config, Target};
use crate::error::{CliResult, ConfigError};
use primlisten_gen::generator::{
    CodeGenerator, ContractGenerator, GeneratorConfig, JavaEmitter, RustEmitter,
};
use primlisten_gen::{Artifact, TypeRegistry};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rust primitive types a descriptor may name without a `rust_type`.
const RUST_PRIMITIVES: [&str; 16] = [
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Generated output for one configuration.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Files to write, with paths relative to the output directory.
    pub artifacts: Vec<Artifact>,

    /// Contract names in emission order.
    pub contracts: Vec<String>,
}

/// State of one generated file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Contents match freshly generated output.
    UpToDate(PathBuf),
    /// Contents differ from freshly generated output.
    Stale(PathBuf),
    /// The file does not exist.
    Missing(PathBuf),
    /// A file next to the generated ones that the configuration no longer produces.
    Extra(PathBuf),
}

/// Result of comparing generated files on disk against fresh output.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Status of every expected file in emission order, followed by
    /// leftover files.
    pub files: Vec<FileStatus>,
}

/// Contract generator configured from a CLI [`Config`].
pub struct ListenerGenerator {
    config: Config,
}

impl ListenerGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration driving this generator.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the type registry from configuration.
    pub fn registry(&self) -> CliResult<TypeRegistry> {
        self.config.registry()
    }

    /// Generate every artifact for the configured target.
    pub fn generate(&self) -> CliResult<GeneratedOutput> {
        let registry = self.registry()?;
        let options = self.config.generator_config()?;

        if self.config.output.target == Target::Rust {
            if let Some(descriptor) = registry.iter().find(|t| {
                t.rust_type.is_none() && !RUST_PRIMITIVES.contains(&t.name.as_str())
            }) {
                return Err(ConfigError::invalid_value(
                    "types",
                    format!(
                        "'{}' has no rust_type and is not a Rust primitive",
                        descriptor.name
                    ),
                )
                .into());
            }
        }

        info!(
            target = ?self.config.output.target,
            types = registry.len(),
            "generating contracts"
        );

        let artifacts = match self.config.output.target {
            Target::Java => self.run(JavaEmitter::new(), options, &registry)?,
            Target::Rust => self.run(RustEmitter::new(), options, &registry)?,
        };

        Ok(GeneratedOutput {
            contracts: registry.contract_names(),
            artifacts,
        })
    }

    /// Compare the files below `dir` with freshly generated output.
    ///
    /// For the Java target, `.java` files in a package directory that the
    /// configuration does not produce are reported as [`FileStatus::Extra`].
    pub fn validate(&self, dir: &Path) -> CliResult<ValidationReport> {
        let output = self.generate()?;
        let mut report = ValidationReport::default();
        let mut expected = HashSet::new();
        let mut searched = BTreeSet::new();

        for artifact in &output.artifacts {
            let path = dir.join(&artifact.path);
            let status = if !path.exists() {
                FileStatus::Missing(path.clone())
            } else if std::fs::read(&path)? == artifact.contents.as_bytes() {
                FileStatus::UpToDate(path.clone())
            } else {
                FileStatus::Stale(path.clone())
            };
            debug!(?status, "checked generated file");
            report.files.push(status);

            // Only the per-contract Java layout owns its directory.
            if self.config.output.target == Target::Java {
                if let (Some(parent), Some(ext)) = (path.parent(), path.extension()) {
                    searched.insert((parent.to_path_buf(), ext.to_os_string()));
                }
            }
            expected.insert(path);
        }

        for (parent, ext) in searched {
            if !parent.is_dir() {
                continue;
            }

            let mut extra = Vec::new();
            for entry in std::fs::read_dir(&parent)? {
                let path = entry?.path();
                if path.is_file()
                    && path.extension() == Some(ext.as_os_str())
                    && !expected.contains(&path)
                {
                    extra.push(path);
                }
            }
            extra.sort();

            for path in extra {
                debug!(path = %path.display(), "found leftover file");
                report.files.push(FileStatus::Extra(path));
            }
        }

        Ok(report)
    }

    fn run<G: CodeGenerator>(
        &self,
        emitter: G,
        options: GeneratorConfig,
        registry: &TypeRegistry,
    ) -> CliResult<Vec<Artifact>> {
        let mut generator = ContractGenerator::new(emitter, options);
        if let Some(file) = &self.config.output.file {
            generator = generator.with_file_name(file);
        }
        Ok(generator.generate(registry)?)
    }
}

impl FileStatus {
    /// Path of the checked file.
    pub fn path(&self) -> &Path {
        match self {
            FileStatus::UpToDate(p)
            | FileStatus::Stale(p)
            | FileStatus::Missing(p)
            | FileStatus::Extra(p) => p,
        }
    }

    /// Check if the file matches fresh output.
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, FileStatus::UpToDate(_))
    }
}

impl ValidationReport {
    /// Check if every expected file is present and current, with nothing
    /// left over.
    pub fn is_up_to_date(&self) -> bool {
        self.files.iter().all(FileStatus::is_up_to_date)
    }

    /// Files that are stale, missing or left over.
    pub fn outdated(&self) -> impl Iterator<Item = &FileStatus> {
        self.files.iter().filter(|status| !status.is_up_to_date())
    }
}
