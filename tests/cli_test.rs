//! Tests for CLI parsing, exit codes and service wiring

use std::sync::Arc;

use clap::Parser;
use rstest::rstest;

use cattree::application::{ApplicationError, CancellationToken};
use cattree::cli::args::ConfigCommands;
use cattree::cli::{Cli, CliError, Commands};
use cattree::config::Settings;
use cattree::domain::{Category, DomainError};
use cattree::exitcode;
use cattree::infrastructure::di::ServiceContainer;
use cattree::infrastructure::TransportError;
use cattree::util::testing::ScriptedTransport;

#[test]
fn given_find_with_path_when_parsing_then_path_is_kept_verbatim() {
    let cli = Cli::try_parse_from(["cattree", "-dd", "find", "Shoes/Boots"]).unwrap();

    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Find { path }) => assert_eq!(path, "Shoes/Boots"),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_get_with_non_numeric_id_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["cattree", "get", "shoes"]).is_err());
}

#[test]
fn given_global_options_after_subcommand_when_parsing_then_accepted() {
    let cli = Cli::try_parse_from([
        "cattree",
        "tree",
        "--config",
        "/tmp/cattree.toml",
        "--deadline",
        "5",
    ])
    .unwrap();

    assert!(matches!(cli.command, Some(Commands::Tree)));
    assert_eq!(cli.deadline, Some(5));
    assert!(cli.config.is_some());
}

#[test]
fn given_config_show_when_parsing_then_subcommand_selected() {
    let cli = Cli::try_parse_from(["cattree", "config", "show"]).unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Show
        })
    ));
}

#[rstest]
#[case::config(
    CliError::Application(ApplicationError::Config { message: "x".into() }),
    exitcode::CONFIG
)]
#[case::transport(
    CliError::Application(ApplicationError::Transport(TransportError::new("down"))),
    exitcode::UNAVAILABLE
)]
#[case::dangling(
    CliError::Application(ApplicationError::Domain(DomainError::DanglingParent { id: 1, parent_id: 2 })),
    exitcode::DATAERR
)]
#[case::cancelled(
    CliError::Application(ApplicationError::Cancelled { page: 4 }),
    exitcode::TEMPFAIL
)]
#[case::not_found(CliError::NotFound("x".into()), exitcode::NOT_FOUND)]
#[case::usage(CliError::InvalidArgs("x".into()), exitcode::USAGE)]
fn given_error_when_mapping_exit_code_then_matches_kind(#[case] err: CliError, #[case] code: i32) {
    assert_eq!(err.exit_code(), code);
}

#[test]
fn given_settings_when_wiring_container_then_catalog_targets_store() {
    let settings = Settings {
        store_hash: "xyz".into(),
        client_id: "id".into(),
        client_secret: "secret".into(),
        access_token: "token".into(),
        api_url: "http://localhost:9000".into(),
        ..Settings::default()
    };
    let transport = Arc::new(ScriptedTransport::with_pages([vec![Category::new(1, 0, "A")]]));

    let container = ServiceContainer::with_deps(settings, transport.clone());
    assert_eq!(container.settings.store_hash, "xyz");
    assert_eq!(
        container.catalog.endpoint().catalog_url,
        container.settings.catalog_url()
    );
    let tree = container
        .catalog
        .get_category_tree(&CancellationToken::new())
        .unwrap();

    assert_eq!(tree.lookup_by_path("A").map(|n| n.id()), Some(1));
    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        "http://localhost:9000/stores/xyz/v3/catalog/categories"
    );
    assert_eq!(requests[0].header_value("X-Auth-Token"), Some("token"));
}
