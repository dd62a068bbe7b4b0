// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ACALSim Code Generator CLI
//!
//! # Usage
//!
//! ```bash
//! # Generate from a design document
//! acalsim-gen generate --design soc.json --output out --project-name Soc
//!
//! # Check a design document without writing anything
//! acalsim-gen validate --design soc.json
//!
//! # Generate the built-in demo tree
//! acalsim-gen demo --app demo
//!
//! # Write an example configuration file
//! acalsim-gen gen-config --output acalsim.toml
//! ```

mod demo;

use acalsim_codegen::{DesignDocument, DirTemplates, Generator, GeneratorConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// ACALSim code generator
#[derive(Parser, Debug)]
#[command(name = "acalsim-gen")]
#[command(about = "ACALSim Code Generator - C++ simulator scaffolding from component trees")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate sources from a design document
    Generate {
        /// Design document (JSON)
        #[arg(short, long, value_name = "FILE")]
        design: PathBuf,

        /// Output root directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Emit project scaffolding under this name
        #[arg(long)]
        project_name: Option<String>,

        /// Directory of replacement templates
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Build the model from a design document without writing files
    Validate {
        /// Design document (JSON)
        #[arg(short, long, value_name = "FILE")]
        design: PathBuf,
    },

    /// Generate the built-in demo tree
    Demo {
        /// Application name
        #[arg(long)]
        app: String,

        /// Project name
        #[arg(long, default_value = "CodegenProj")]
        project_name: String,

        /// Output root directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "acalsim.toml")]
        output: PathBuf,

        /// Also export the built-in templates to this directory
        #[arg(long, value_name = "DIR")]
        export_templates: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[ERROR] {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.command {
        Commands::Generate {
            config: Some(path), ..
        } => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        _ => GeneratorConfig::default(),
    };

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate {
            design,
            output,
            project_name,
            templates,
            ..
        } => cmd_generate(&design, config, output, project_name, templates),
        Commands::Validate { design } => cmd_validate(&design),
        Commands::Demo {
            app,
            project_name,
            output,
        } => cmd_demo(&app, &project_name, output),
        Commands::GenConfig {
            output,
            export_templates,
        } => cmd_gen_config(&output, export_templates),
    }
}

fn cmd_generate(
    design: &Path,
    mut config: GeneratorConfig,
    output: Option<PathBuf>,
    project_name: Option<String>,
    templates: Option<PathBuf>,
) -> Result<()> {
    let doc = DesignDocument::from_file(design)
        .with_context(|| format!("Failed to read design {}", design.display()))?;

    // CLI flags win over the file, the file wins over the document.
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(templates) = templates {
        config.template_dir = Some(templates);
    }
    config.project_name = project_name
        .or(config.project_name.take())
        .or_else(|| doc.project_name().map(str::to_string));

    let top = doc.into_model().context("Invalid design")?;
    let generator = Generator::from_config(&config)?;
    if let Some(dir) = &config.template_dir {
        tracing::info!("Using templates from {}", dir.display());
    }

    let report = generator
        .generate_top(&top, config.project_name.as_deref())
        .context("Generation failed")?;
    report.summary();
    Ok(())
}

fn cmd_validate(design: &Path) -> Result<()> {
    let doc = DesignDocument::from_file(design)
        .with_context(|| format!("Failed to read design {}", design.display()))?;
    let project = doc.project_name().map(str::to_string);
    let top = doc.into_model().context("Invalid design")?;

    println!("Design valid!");
    println!();
    println!("Top:        {} (app: {})", top.name(), top.app());
    if let Some(project) = project {
        println!("Project:    {}", project);
    }
    println!("Simulators: {}", top.simulator_count());
    for sim in top.simulators() {
        println!(
            "  - {}{} ({} modules, {} links)",
            sim.identity().qualified_name(),
            if sim.identity().is_shared() { " [shared]" } else { "" },
            sim.module_count(),
            sim.links().len()
        );
    }
    println!("Modules:    {}", top.module_count());
    println!("Port links: {}", top.port_links().len());
    println!("Channels:   {}", top.channel_links().len());
    Ok(())
}

fn cmd_demo(app: &str, project_name: &str, output: PathBuf) -> Result<()> {
    let top = demo::build(app).context("Failed to build demo tree")?;
    let report = Generator::new(output)
        .generate_top(&top, Some(project_name))
        .context("Generation failed")?;
    report.summary();
    println!(
        "Simulation setup complete for app: {} with project: {}",
        app, project_name
    );
    Ok(())
}

fn cmd_gen_config(output: &Path, export_templates: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = &export_templates {
        let written = DirTemplates::export_embedded(dir)
            .with_context(|| format!("Failed to export templates to {}", dir.display()))?;
        println!("Exported {} templates to {}", written.len(), dir.display());
    }

    let config = GeneratorConfig {
        output_dir: PathBuf::from("out"),
        template_dir: export_templates,
        project_name: Some("CodegenProj".into()),
        log_level: "info".into(),
    };

    let toml_str = toml::to_string_pretty(&config)?;

    // Add comments
    let content = format!(
        r#"# ACALSim Code Generator Configuration
# Generated by acalsim-gen gen-config
#
# Set template_dir to a directory laid out like the built-in templates
# (cc/, sc/, cmake/) to replace them.

{}
"#,
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}
