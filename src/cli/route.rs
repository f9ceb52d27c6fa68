//! CLI route: single route table and run context. Dispatches to library operations and presentation.

use crate::cli::command_name;
use crate::cli::parse::{AnalyzeFormat, Commands, ListingArgs};
use crate::cli::presentation::{
    format_analysis_json, format_analysis_table, format_analysis_text, format_listing_summary,
    format_verify_summary, format_written,
};
use crate::config::CullerConfig;
use crate::error::ApiError;
use crate::listing::{generate_listing, HashMode, Signer, WalkerConfig};
use crate::manifest::{write_manifest, Manifest};
use crate::rules::{apply_script, parse_script};
use crate::similarity::{classify, report_similarities, Report};
use crate::tree::{merge_trees, name_roots_alphabetically, Tree, TreeBuilder};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, info_span};

/// Runtime context for CLI execution: the effective configuration.
/// Built from a workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: CullerConfig,
}

impl RunContext {
    /// Load and validate configuration for `workspace_root`
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = CullerConfig::resolve(config_path.as_deref(), &workspace_root)?;
        Ok(Self { config })
    }

    pub fn from_config(config: CullerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CullerConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The returned string is the command's stdout payload, printed verbatim.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let span = info_span!("command", name = command_name(command));
        let _enter = span.enter();

        let result = match command {
            Commands::List {
                dir,
                hash,
                sample_size,
                follow_symlinks,
                exclude,
                max_depth,
            } => {
                let walker_config = WalkerConfig {
                    follow_symlinks: *follow_symlinks,
                    ignore_names: exclude.clone(),
                    max_depth: *max_depth,
                };
                self.handle_list(dir, *hash, *sample_size, walker_config)
            }
            Commands::Analyze { input, format } => self.handle_analyze(input, *format),
            Commands::Manifest {
                input,
                include_files,
                output,
            } => self.handle_manifest(input, *include_files, output.as_deref()),
            Commands::Apply {
                manifest,
                script,
                output,
            } => self.handle_apply(manifest, script, output.as_deref()),
            Commands::Verify { manifest } => self.handle_verify(manifest),
            Commands::Config => self.config.to_toml(),
        };

        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    fn handle_list(
        &self,
        dir: &Path,
        hash: Option<HashMode>,
        sample_size: Option<u64>,
        walker_config: WalkerConfig,
    ) -> Result<String, ApiError> {
        let mode = hash.unwrap_or(self.config.listing.hash_mode);
        let sample_size = sample_size.unwrap_or(self.config.listing.sample_size);
        if sample_size == 0 {
            return Err(ApiError::InvalidArgument(
                "--sample-size must be greater than zero".to_string(),
            ));
        }
        let mut out = Vec::new();
        let summary = generate_listing(dir, Signer::new(mode, sample_size), walker_config, &mut out)?;
        info!("{}", format_listing_summary(&summary));
        String::from_utf8(out)
            .map_err(|e| ApiError::InvalidArgument(format!("Listing is not valid UTF-8: {}", e)))
    }

    fn handle_analyze(&self, input: &ListingArgs, format: AnalyzeFormat) -> Result<String, ApiError> {
        let tree = self.load_tree(input)?;
        let classification = classify(&tree);
        let mut reports: Vec<Report> = Vec::new();
        report_similarities(&tree, &classification, |report| reports.push(report.clone()));

        match format {
            AnalyzeFormat::Text => Ok(format_analysis_text(&tree, &reports)),
            AnalyzeFormat::Table => Ok(format_analysis_table(&tree, &classification, &reports)),
            AnalyzeFormat::Json => {
                format_analysis_json(&tree, &classification, &reports).map(|mut s| {
                    s.push('\n');
                    s
                })
            }
        }
    }

    fn handle_manifest(
        &self,
        input: &ListingArgs,
        include_files: bool,
        output: Option<&Path>,
    ) -> Result<String, ApiError> {
        let tree = self.load_tree(input)?;
        let classification = classify(&tree);
        let include_files = include_files || self.config.manifest.include_files;
        let (manifest, _) = write_manifest(&tree, &classification, include_files)?;
        emit(&manifest, output)
    }

    fn handle_apply(
        &self,
        manifest_path: &Path,
        script_path: &Path,
        output: Option<&Path>,
    ) -> Result<String, ApiError> {
        let manifest = Manifest::parse(&read_text(manifest_path)?)?;
        let script = parse_script(&read_text(script_path)?)?;
        let result = apply_script(&manifest, &script)?;
        result.verify_keeps()?;
        emit(&result, output)
    }

    fn handle_verify(&self, manifest_path: &Path) -> Result<String, ApiError> {
        let manifest = Manifest::parse(&read_text(manifest_path)?)?;
        manifest.verify_keeps()?;
        Ok(format_verify_summary(&manifest))
    }

    /// Build the tree for `input`: one concatenated listing, or one tree per
    /// listing merged under alphabetical roots when `--merge` is given.
    fn load_tree(&self, input: &ListingArgs) -> Result<Tree, ApiError> {
        let builder = if input.no_ignore {
            TreeBuilder::new()
        } else {
            TreeBuilder::new().with_ignored_names(self.config.ignore.names.iter().cloned())
        };

        if !input.merge {
            let mut text = String::new();
            for path in &input.listings {
                let content = read_text(path)?;
                text.push_str(&content);
                if !content.is_empty() && !content.ends_with('\n') {
                    text.push('\n');
                }
            }
            return Ok(builder.build_from_str(&text)?);
        }

        let mut trees = input
            .listings
            .iter()
            .map(|path| Ok(builder.build_from_str(&read_text(path)?)?))
            .collect::<Result<Vec<Tree>, ApiError>>()?;
        if trees.len() == 1 {
            return Ok(trees.remove(0));
        }
        name_roots_alphabetically(&mut trees)?;
        Ok(merge_trees(trees)?)
    }
}

fn read_text(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|e| ApiError::io(path, e))
}

/// Return the manifest as output, or write it to `output` and return a note
fn emit(manifest: &Manifest, output: Option<&Path>) -> Result<String, ApiError> {
    match output {
        Some(path) => {
            std::fs::write(path, manifest.serialize()).map_err(|e| ApiError::io(path, e))?;
            Ok(format_written(manifest, path))
        }
        None => Ok(manifest.serialize()),
    }
}
