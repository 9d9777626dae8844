//! CLI entrypoint for context-discovery
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use discovery_application::{
    AnnotatedTypeDiscoveryStrategy, ContextMapDiscoverer, ContractDiscoveryStrategy, DiscoveryPlan,
    DiscoveryProgressNotifier, ExportContextMapInput, ExportContextMapUseCase, NoProgress,
    ResourceBasedDiscoveryStrategy, TopologyRelationshipStrategy, TypeMetadataScanner,
};
use discovery_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use discovery_infrastructure::{
    CmlFileWriter, ConfigLoader, DockerComposeReader, FileConfig, OpenApiContractReader, TypeCatalog,
};
use discovery_presentation::{Cli, ConsoleFormatter, DiscoverySummary, ProgressReporter};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the map was written but a relationship strategy failed
const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    apply_cli_overrides(cli, &mut config);
    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let mut plan = config.to_plan();
    cli.extend_plan(&mut plan);

    let mut issues = config.validate();
    if !plan.has_bounded_context_sources() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::NoDiscoverySource,
            "no Bounded Context source configured (use --types, --openapi or a config file)",
        ));
    }
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if ConfigIssue::has_errors(&issues) {
        return Ok(ExitCode::FAILURE);
    }

    info!(
        sources = plan.bounded_context_source_count(),
        topology = plan.topology_directories.len(),
        "Starting context discovery"
    );

    // === Dependency Injection ===
    let discoverer = build_discoverer(&plan)?;
    let use_case = ExportContextMapUseCase::new(discoverer, Arc::new(CmlFileWriter::new()));

    let progress: Box<dyn DiscoveryProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let output = use_case.execute_with_progress(
        ExportContextMapInput::new(&config.output.path),
        progress.as_ref(),
    )?;

    let format = config.output.format.unwrap_or(OutputFormat::Text);
    let summary = DiscoverySummary::from_output(&output);
    println!("{}", ConsoleFormatter::format(&summary, format));

    if output.report.has_failures() {
        warn!(failures = output.report.failures.len(), "Some relationship strategies failed");
        return Ok(ExitCode::from(EXIT_PARTIAL));
    }
    Ok(ExitCode::SUCCESS)
}

/// Flags take precedence over every configuration file
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }
    if let Some(format) = cli.format {
        config.output.format = Some(format.into());
    }
}

fn build_discoverer(plan: &DiscoveryPlan) -> Result<ContextMapDiscoverer> {
    let mut catalogs: HashMap<PathBuf, Arc<TypeCatalog>> = HashMap::new();
    let mut scanner = |path: &PathBuf| -> Result<Arc<dyn TypeMetadataScanner>> {
        if let Some(catalog) = catalogs.get(path) {
            return Ok(catalog.clone());
        }
        let catalog = Arc::new(
            TypeCatalog::load(path).with_context(|| format!("Failed to load type catalog {}", path.display()))?,
        );
        catalogs.insert(path.clone(), catalog.clone());
        Ok(catalog)
    };

    let mut discoverer = ContextMapDiscoverer::new();
    for source in &plan.resources {
        discoverer = discoverer.with_bounded_context_strategy(ResourceBasedDiscoveryStrategy::new(
            source.scope.clone(),
            scanner(&source.catalog)?,
            source.conventions.clone(),
        ));
    }
    for source in &plan.tagged_types {
        discoverer = discoverer.with_bounded_context_strategy(AnnotatedTypeDiscoveryStrategy::new(
            source.scope.clone(),
            source.tag.clone(),
            source.technology.clone(),
            scanner(&source.catalog)?,
        ));
    }
    if !plan.contract_locations.is_empty() {
        discoverer = discoverer.with_bounded_context_strategy(ContractDiscoveryStrategy::new(
            plan.contract_locations.clone(),
            Arc::new(OpenApiContractReader::new()),
        ));
    }
    for directory in &plan.topology_directories {
        discoverer = discoverer.with_relationship_strategy(TopologyRelationshipStrategy::new(
            directory.clone(),
            Arc::new(DockerComposeReader::new()),
        ));
    }
    for mapping in plan.mappings() {
        discoverer = discoverer.with_name_mapping(mapping);
    }
    Ok(discoverer)
}
