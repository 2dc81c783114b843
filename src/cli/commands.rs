//! Command dispatch

use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::DocumentReport;
use crate::application::{present, ApplicationError, OutlinePresenter, TextPresenter};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::{render, Component, ComponentType, View, MAX_SUPPORTED_DEPTH};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, Input, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see 'sdui --help'".to_string(),
        ));
    };

    match command {
        Commands::Render { file, format } => {
            let container = build_container(cli)?;
            let format = format.unwrap_or(container.settings.format);
            cmd_render(&container, file, format)
        }
        Commands::Check { file } => cmd_check(&build_container(cli)?, file),
        Commands::Fmt { file } => cmd_fmt(&build_container(cli)?, file),
        Commands::Config { command } => cmd_config(command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings from the working directory, with command-line overrides applied.
fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let settings = settings_from_cli(cli, Settings::load(Some(&cwd))?);
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

/// Apply command-line overrides on top of loaded settings.
pub fn settings_from_cli(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = usize::try_from(max_depth).unwrap_or(MAX_SUPPORTED_DEPTH);
    }
    settings
}

/// Decode the document named on the command line ("-" for stdin).
pub fn load_document(container: &ServiceContainer, file: &Path) -> CliResult<Component> {
    load_document_from(container, file, &mut io::stdin().lock())
}

/// Like `load_document`, with `stdin` standing in for the process stdin.
pub fn load_document_from(
    container: &ServiceContainer,
    file: &Path,
    stdin: &mut dyn Read,
) -> CliResult<Component> {
    let input = Input::from_arg(file);
    let component = match &input {
        Input::File(path) => container.documents.load(path)?,
        Input::Stdin => {
            let content = input
                .read(container.fs.as_ref(), stdin)
                .map_err(|e| InfraError::io("read stdin", e))?;
            container.documents.load_slice(&content)?
        }
    };
    debug!(
        "loaded {} from {}",
        component.component_type(),
        input.display_name()
    );
    Ok(component)
}

/// Present a view tree in the requested format.
pub fn format_view(view: &View, format: OutputFormat) -> CliResult<String> {
    let text = match format {
        OutputFormat::Outline => OutlinePresenter
            .to_tree_string(view)
            .to_string()
            .trim_end()
            .to_string(),
        OutputFormat::Text => present(view, &TextPresenter).join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(view).map_err(|source| ApplicationError::Encode {
                what: "view",
                source,
            })?
        }
    };
    Ok(text)
}

/// Human-readable lines for a document report.
pub fn format_report(report: &DocumentReport) -> Vec<String> {
    let counts = ComponentType::ALL
        .iter()
        .map(|t| format!("{} {}", t, report.counts.get(t).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!("root: {}", report.root),
        format!("components: {} ({})", report.total(), counts),
        format!("depth: {}", report.depth),
    ]
}

/// Duplicate-id warnings for a report, none when `warn_duplicate_ids` is off.
pub fn duplicate_warnings(report: &DocumentReport, settings: &Settings) -> Vec<String> {
    if !settings.warn_duplicate_ids {
        return Vec::new();
    }
    report
        .duplicate_ids
        .iter()
        .map(|id| format!("duplicate component id '{id}'"))
        .collect()
}

#[instrument(skip(container))]
fn cmd_render(container: &ServiceContainer, file: &Path, format: OutputFormat) -> CliResult<()> {
    let component = load_document(container, file)?;
    let view = render(&component);
    output::info(&format_view(&view, format)?);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let component = load_document(container, file)?;
    let report = container.documents.inspect(&component);

    output::header(&Input::from_arg(file).display_name());
    for line in format_report(&report) {
        output::detail(&line);
    }
    for warning in duplicate_warnings(&report, &container.settings) {
        output::warning(&warning);
    }
    output::success("valid");
    Ok(())
}

#[instrument(skip(container))]
fn cmd_fmt(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let component = load_document(container, file)?;
    let text = serde_json::to_string_pretty(&component).map_err(|source| {
        ApplicationError::Encode {
            what: "document",
            source,
        }
    })?;
    output::info(&text);
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(&cwd))?;
            output::info(settings.to_toml()?.trim_end());
            Ok(())
        }
        ConfigCommands::Path => {
            let fs = RealFileSystem;
            match global_config_path() {
                Some(path) => print_config_path(&fs, "global", &path),
                None => output::detail("global: <no config directory>"),
            }
            print_config_path(&fs, "local", &local_config_path(&cwd));
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(&cwd)
            };
            write_template(&RealFileSystem, &path)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn print_config_path(fs: &dyn FileSystem, label: &str, path: &Path) {
    let state = if fs.exists(path) { "" } else { " (missing)" };
    output::detail(&format!("{}: {}{}", label, path.display(), state));
}

/// Write the settings template, refusing to overwrite an existing file.
pub fn write_template(fs: &dyn FileSystem, path: &Path) -> CliResult<()> {
    if fs.exists(path) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    fs.write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
