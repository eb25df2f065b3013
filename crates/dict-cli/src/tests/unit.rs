//! Unit coverage for the CLI runtime.

use std::ffi::OsString;
use std::process::ExitCode;

use dict_client::test_support::{FakeDictServer, ServerScript};
use dict_client::{Database, DictionaryConnection};
use dict_config::Config;
use rstest::rstest;

use super::support::{APPLE_REPLY, CATALOGUE_REPLY, StaticConfigLoader, TestWorld};
use crate::cli::{Cli, DEFAULT_STRATEGY, LookupCommand};
use crate::command::LookupOutcome;
use crate::{IoStreams, run_with_loader};
use clap::Parser;

#[rstest]
#[case::define(&["dict", "define", "apple"], LookupCommand::Define {
    word: String::from("apple"),
    database: String::from("*"),
})]
#[case::define_first_match(&["dict", "define", "apple", "-d", "!"], LookupCommand::Define {
    word: String::from("apple"),
    database: String::from("!"),
})]
#[case::match_defaults(&["dict", "match", "app"], LookupCommand::Match {
    word: String::from("app"),
    strategy: String::from(DEFAULT_STRATEGY),
    database: String::from("*"),
})]
#[case::match_explicit(&["dict", "match", "app", "--strategy", "soundex", "--database", "fd"], LookupCommand::Match {
    word: String::from("app"),
    strategy: String::from("soundex"),
    database: String::from("fd"),
})]
fn parses_lookup_commands(#[case] args: &[&str], #[case] expected: LookupCommand) {
    let cli = Cli::try_parse_from(args).expect("arguments parse");
    assert_eq!(cli.command, expected);
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader::new(Config::default());
    let mut io = IoStreams::new(&mut stdout, &mut stderr, false);

    let exit = run_with_loader(
        [OsString::from("dict"), OsString::from("--help")],
        &mut io,
        &loader,
    );

    assert_eq!(exit, ExitCode::SUCCESS);
    let help = String::from_utf8(stdout).expect("utf8 help");
    assert!(help.contains("define"), "{help}");
    assert!(stderr.is_empty());
}

#[test]
fn database_listing_puts_the_sentinels_first() {
    let script = ServerScript::default().reply(CATALOGUE_REPLY);
    let server = FakeDictServer::spawn(script).expect("spawn server");
    let mut connection = DictionaryConnection::connect(&server.endpoint()).expect("connect");

    let outcome = LookupCommand::Databases
        .execute(&mut connection)
        .expect("databases listed");
    connection.close();

    let LookupOutcome::Databases { databases } = outcome else {
        panic!("expected a database listing, got {outcome:?}");
    };
    let names: Vec<&str> = databases.iter().map(Database::name).collect();
    assert_eq!(names, ["*", "!", "fd", "web1913"]);
    assert_eq!(
        server.finish().expect("server finished"),
        ["show db", "quit"]
    );
}

#[test]
fn define_sends_the_requested_database() {
    let mut world = TestWorld::default();
    world.script_reply(CATALOGUE_REPLY);
    world.script_reply(APPLE_REPLY);

    world
        .run("--output json define apple --database fd")
        .expect("CLI runs");

    world.assert_exit(ExitCode::SUCCESS).expect("lookup succeeds");
    assert_eq!(world.commands, ["show db", "define fd apple", "quit"]);
    let document: serde_json::Value =
        serde_json::from_str(&world.stdout_text().expect("stdout")).expect("json");
    assert_eq!(document["word"], "apple");
    assert_eq!(document["definitions"][1]["body"], "A tree.\n");
    assert_eq!(document["definitions"][1]["database"]["name"], "web1913");
}

#[test]
fn config_flags_after_the_command_are_rejected() {
    let mut world = TestWorld::default();
    world.run("databases --server localhost").expect("CLI runs");

    world.assert_exit(ExitCode::FAILURE).expect("usage error");
    assert!(world.stdout.is_empty());
    let stderr = world.stderr_text().expect("stderr");
    assert!(stderr.contains("--server"), "{stderr}");
}
