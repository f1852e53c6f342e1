//! Command dispatch and handlers

use std::io;
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::CancellationToken;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{CategoryTree, NodeRef};
use crate::infrastructure::di::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;

/// Run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Tree) => cmd_tree(cli),
        Some(Commands::List) => cmd_list(cli),
        Some(Commands::Get { id }) => cmd_get(cli, *id),
        Some(Commands::Find { path }) => cmd_find(cli, path),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().ok();
            Ok(())
        }
    }
}

/// Load and validate settings, then wire up services.
///
/// With `--deadline` the per-request timeout never exceeds the deadline.
fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.validate()?;
    if let Some(secs) = cli.deadline {
        settings.cap_timeout(secs);
    }
    let services = ServiceContainer::new(settings)?;
    debug!(
        "catalog {}, timeout {}s",
        services.settings.catalog_url(),
        services.settings.timeout_secs
    );
    Ok(services)
}

fn cancellation(cli: &Cli) -> CancellationToken {
    match cli.deadline {
        Some(secs) => CancellationToken::with_timeout(Duration::from_secs(secs)),
        None => CancellationToken::new(),
    }
}

fn fetch_tree(cli: &Cli) -> CliResult<CategoryTree> {
    let services = container(cli)?;
    let tree = services.catalog.get_category_tree(&cancellation(cli))?;
    debug!("tree: {} nodes, depth {}", tree.len(), tree.depth());
    Ok(tree)
}

#[instrument(skip_all)]
fn cmd_tree(cli: &Cli) -> CliResult<()> {
    let tree = fetch_tree(cli)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(skip_all)]
fn cmd_list(cli: &Cli) -> CliResult<()> {
    let services = container(cli)?;
    let categories = services
        .catalog
        .fetch_all_categories(&cancellation(cli))?;
    for category in &categories {
        output::info(&format!(
            "{}\t{}\t{}",
            category.id, category.parent_id, category.name
        ));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_get(cli: &Cli, id: u32) -> CliResult<()> {
    let tree = fetch_tree(cli)?;
    let node = tree
        .lookup_by_id(id)
        .ok_or_else(|| CliError::NotFound(format!("category id {}", id)))?;
    print_node(&tree, node);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_find(cli: &Cli, path: &str) -> CliResult<()> {
    if path.is_empty() {
        return Err(CliError::InvalidArgs("path must not be empty".into()));
    }
    let tree = fetch_tree(cli)?;
    let node = tree
        .lookup_by_path(path)
        .ok_or_else(|| CliError::NotFound(format!("category path {:?}", path)))?;
    print_node(&tree, node);
    Ok(())
}

fn print_node(tree: &CategoryTree, node: NodeRef<'_>) {
    let category = node.category();
    output::header(category);
    output::action("parent", &category.parent_id);
    if let Some(path) = tree.path_of(category.id) {
        output::action("path", &path);
    }
    output::action("visible", &category.is_visible);
    if !category.description.is_empty() {
        output::action("description", &category.description);
    }
    if !node.is_leaf() {
        output::action("children", &node.children().count());
        for child in node.children() {
            output::detail(child.category());
        }
    }
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            if let Err(e) = settings.validate() {
                output::warning(&e);
            }
            let rendered = toml::to_string_pretty(&settings.masked()).map_err(|e| {
                crate::application::ApplicationError::Config {
                    message: format!("render settings: {}", e),
                }
            })?;
            output::info(&rendered);
            Ok(())
        }
        ConfigCommands::Path => {
            match cli.config.clone().or_else(global_config_path) {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available on this platform"),
            }
            Ok(())
        }
    }
}
