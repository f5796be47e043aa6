//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::engine::GenerationEngine;
use crate::generate::GeneratorConfig;
use crate::pipeline::{ConfigError, PipelineCoordinator, PipelineOptions, PipelineReport};

use super::{Cli, CliError, CliResult, ExitCode};

/// Directory names never descended into by a recursive scan.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

/// A validated invocation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub recursive: bool,
    pub options: PipelineOptions,
    pub generator: GeneratorConfig,
}

impl GenerateRequest {
    /// Validate parsed arguments. Nothing is created or written here.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error (exit code 2) if the source directory is missing, the parallelism is not
    /// a positive integer, or the extension is empty.
    pub fn from_cli(cli: Cli) -> CliResult<Self> {
        if !cli.source_dir.is_dir() {
            return Err(config_error(ConfigError::SourceDirectory(cli.source_dir)));
        }
        let options = PipelineOptions::parse_degree(&cli.parallelism)
            .and_then(|o| o.with_extension(&cli.extension))
            .map_err(config_error)?
            .with_collision_policy(cli.collision.into());
        let generator = GeneratorConfig::new().with_import_policy(cli.import_policy.into());

        Ok(Self {
            source_dir: cli.source_dir,
            output_dir: cli.output_dir,
            recursive: cli.recursive,
            options,
            generator,
        })
    }
}

fn config_error(e: ConfigError) -> CliError {
    CliError::config(format!("Error: {e}"))
}

/// Discover the sources, create the output directory and run the pipeline.
pub fn generate(request: &GenerateRequest) -> CliResult<ExitCode> {
    let files = collect_source_files(&request.source_dir, &request.options, request.recursive).map_err(|e| {
        CliError::config(format!(
            "Error: cannot scan source directory '{}': {}",
            request.source_dir.display(),
            e
        ))
    })?;

    fs::create_dir_all(&request.output_dir).map_err(|e| {
        CliError::config(format!(
            "Error: cannot create output directory '{}': {}",
            request.output_dir.display(),
            e
        ))
    })?;

    if files.is_empty() {
        tracing::info!(
            dir = %request.source_dir.display(),
            extension = request.options.extension(),
            "no source files found"
        );
        return Ok(ExitCode::SUCCESS);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("Error: cannot start async runtime: {e}")))?;

    let coordinator = PipelineCoordinator::new(
        GenerationEngine::new(request.generator.clone()),
        request.options.clone(),
    );
    tracing::info!(
        files = files.len(),
        parallelism = coordinator.options().parallelism(),
        output = %request.output_dir.display(),
        "generating test scaffolds"
    );
    let report = runtime.block_on(coordinator.run(files, &request.output_dir));
    print_report(&report);

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

fn print_report(report: &PipelineReport) {
    for failure in &report.failures {
        eprintln!("error: {failure}");
    }
    println!(
        "✓ {} test file(s) written from {} source file(s), {} failure(s)",
        report.outputs.len(),
        report.files_read,
        report.failures.len()
    );
}

/// Collect files with the configured extension, sorted so submission order is reproducible.
///
/// A recursive scan skips hidden directories and build output (`bin`, `obj`).
pub fn collect_source_files(dir: &Path, options: &PipelineOptions, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_into(dir, options, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(dir: &Path, options: &PipelineOptions, recursive: bool, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if recursive && !name.starts_with('.') && !SKIPPED_DIRS.contains(&name) {
                collect_into(&path, options, recursive, files)?;
            }
        } else if options.matches(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn options() -> PipelineOptions {
        PipelineOptions::from_degree(2).unwrap()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class A { }").unwrap();
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stubgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_collect_top_level_only_by_default() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("B.cs"));
        touch(&dir.path().join("A.cs"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub/C.cs"));

        let files = collect_source_files(dir.path(), &options(), false).unwrap();
        let names: Vec<&str> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["A.cs", "B.cs"]);
    }

    #[test]
    fn test_collect_recursive_skips_build_and_hidden_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("A.cs"));
        touch(&dir.path().join("sub/deeper/C.cs"));
        touch(&dir.path().join("bin/Debug/Gen.cs"));
        touch(&dir.path().join("obj/Gen.cs"));
        touch(&dir.path().join(".git/X.cs"));

        let files = collect_source_files(dir.path(), &options(), true).unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(relative, vec![PathBuf::from("A.cs"), PathBuf::from("sub/deeper/C.cs")]);
    }

    #[test]
    fn test_missing_source_dir_is_config_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = GenerateRequest::from_cli(cli(&[missing.to_str().unwrap(), "out", "1"])).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::CONFIG);
        assert!(err.message.contains("does not exist"));
    }

    #[test]
    fn test_bad_parallelism_is_config_error() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().to_str().unwrap();
        for bad in ["0", "-1", "many"] {
            let err = GenerateRequest::from_cli(cli(&[src, "out", bad])).unwrap_err();
            assert_eq!(err.exit_code, ExitCode::CONFIG, "{bad}");
        }
    }

    #[test]
    fn test_config_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let args = [dir.path().to_str().unwrap(), out.to_str().unwrap(), "0"];
        assert!(super::super::execute(cli(&args)).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_end_to_end() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let out = dir.path().join("out/nested");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("Cart.cs"),
            "namespace Shop { public class Cart { public int Count() => 0; } }",
        )
        .unwrap();

        let request = GenerateRequest::from_cli(cli(&[src.to_str().unwrap(), out.to_str().unwrap(), "2"])).unwrap();
        assert_eq!(generate(&request).unwrap(), ExitCode::SUCCESS);
        let written = fs::read_to_string(out.join("CartTests.cs")).unwrap();
        assert!(written.contains("public class CartTests"));
    }

    #[test]
    fn test_generate_reports_per_file_failure() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Good.cs"), "public class Good { }").unwrap();
        fs::write(src.join("Broken.cs"), "public class Broken {").unwrap();

        let request = GenerateRequest::from_cli(cli(&[src.to_str().unwrap(), out.to_str().unwrap(), "1"])).unwrap();
        let err = generate(&request).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(out.join("GoodTests.cs").exists());
        assert!(!out.join("BrokenTests.cs").exists());
    }
}
