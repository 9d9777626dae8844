//! CLI command definitions

use clap::{Parser, ValueEnum};
use discovery_application::config::{DiscoveryPlan, NameMappingRule, ResourceSource, TaggedTypeSource};
use discovery_application::strategies::resource_based::ResourceConventions;
use discovery_domain::OutputFormat;
use std::path::PathBuf;

/// Summary format printed after the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human readable summary
    Text,
    /// JSON summary
    Json,
}

impl From<SummaryFormat> for OutputFormat {
    fn from(format: SummaryFormat) -> Self {
        match format {
            SummaryFormat::Text => OutputFormat::Text,
            SummaryFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for context-discovery
#[derive(Parser, Debug)]
#[command(name = "context-discovery")]
#[command(author, version, about = "Reverse-engineer a DDD Context Map from an existing system")]
#[command(long_about = r#"
context-discovery collects Bounded Contexts from type metadata and API contracts,
relates them using deployment descriptors and writes the result as a CML file.

Sources (combine as needed):
  --types <CATALOG>         Spring Boot applications described by a type catalog
  --tagged <TAG>            Types carrying a context tag in the same catalog
  --openapi <FILE>          OpenAPI 3 documents
  --docker-compose <DIR>    docker-compose files, for upstream/downstream relationships

Configuration files are loaded from (in priority order):
1. --config <path>         Explicit config file
2. ./discovery.toml        Project-level config
3. ~/.config/context-discovery/config.toml   Global config

Example:
  context-discovery --types build/types.json --scope org.acme --docker-compose . -o model/acme.cml
  context-discovery --openapi api/customer.yml --openapi api/policy.yml -o acme.cml
"#)]
pub struct Cli {
    /// Type catalog for type-metadata discovery (JSON or YAML)
    #[arg(long, value_name = "CATALOG")]
    pub types: Option<PathBuf>,

    /// Package/module scope searched in the type catalog
    #[arg(long, value_name = "PKG", default_value = "", requires = "types")]
    pub scope: String,

    /// Discover every type carrying this tag as a Bounded Context
    #[arg(long, value_name = "TAG", requires = "types")]
    pub tagged: Option<String>,

    /// Implementation technology of tag-discovered Bounded Contexts
    #[arg(long, value_name = "LABEL", requires = "tagged")]
    pub technology: Option<String>,

    /// OpenAPI document (can be specified multiple times)
    #[arg(long, value_name = "FILE")]
    pub openapi: Vec<String>,

    /// Directory searched for docker-compose files (can be specified multiple times)
    #[arg(long = "docker-compose", value_name = "DIR")]
    pub docker_compose: Vec<PathBuf>,

    /// Separator of service names, converted to CamelCase (can be specified multiple times)
    #[arg(long, value_name = "SEP")]
    pub name_separator: Vec<String>,

    /// Suffix removed from service names after CamelCase conversion
    #[arg(long, value_name = "SUFFIX", requires = "name_separator")]
    pub strip_suffix: Option<String>,

    /// Destination CML file
    #[arg(short, long, value_name = "FILE.cml")]
    pub output: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum)]
    pub format: Option<SummaryFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Add the sources given on the command line to `plan`.
    pub fn extend_plan(&self, plan: &mut DiscoveryPlan) {
        if let Some(catalog) = &self.types {
            plan.resources.push(ResourceSource {
                catalog: catalog.clone(),
                scope: self.scope.clone(),
                conventions: ResourceConventions::spring_boot(),
            });
            if let Some(tag) = &self.tagged {
                plan.tagged_types.push(TaggedTypeSource {
                    catalog: catalog.clone(),
                    scope: self.scope.clone(),
                    tag: tag.clone(),
                    technology: self.technology.clone().unwrap_or_default(),
                });
            }
        }

        plan.contract_locations.extend(self.openapi.iter().cloned());
        plan.topology_directories.extend(self.docker_compose.iter().cloned());
        plan.name_mappings.extend(self.name_separator.iter().map(|separator| {
            let rule = NameMappingRule::new(separator);
            match &self.strip_suffix {
                Some(suffix) => rule.with_strip_suffix(suffix),
                None => rule,
            }
        }));
    }
}
