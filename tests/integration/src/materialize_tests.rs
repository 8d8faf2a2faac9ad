//! End-to-end materialization: config file in, server directory out

use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use srvconf_core::{ConfigMaterializer, MaterializeConfig, ResolutionOutcome};
use srvconf_test_utils::server::{SERVER_DIR, TestServer};

fn run(server: &TestServer, config_body: &str) -> srvconf_core::MaterializeReport {
    let path = server.write_config("srvconf.toml", config_body);
    let config = MaterializeConfig::load(&path).unwrap();
    let target = config.target_dir(&server.base_dir()).unwrap();
    ConfigMaterializer::new(config.options())
        .materialize(&target, &config.specs(&server.base_dir()))
        .unwrap()
}

#[test]
fn full_server_setup_from_config_file() {
    let server = TestServer::new();
    server.write_resource("server.xml", "<server>\n  <featureManager/>\n</server>\n");
    server.write_resource("server.env", "WLP_DEBUG_ADDRESS=7777\n");
    // Shadowed by the inline options below
    server.write_resource("jvm.options", "-Xmx8g\n");

    let report = run(
        &server,
        &format!(
            r#"
tool_name = "liberty-maven-plugin"
server_dir = "{SERVER_DIR}"
resources_dir = "src/test/resources"

[jvm_options]
inline = ["-Xmx512m", "-Xms256m"]

[bootstrap_properties]
inline = {{ "default.http.port" = "9080", "shared.dir" = "C:\\wlp\\usr\\shared" }}
"#
        ),
    );

    assert!(report.is_success());
    let outcomes: Vec<_> = report
        .outcomes()
        .into_iter()
        .map(|(name, outcome)| {
            let copied = matches!(outcome, ResolutionOutcome::CopiedFromExternal { .. });
            (name.to_string(), copied)
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("server.xml".to_string(), true),
            ("jvm.options".to_string(), false),
            ("bootstrap.properties".to_string(), false),
            ("server.env".to_string(), true),
        ]
    );

    let dir = assert_fs::fixture::ChildPath::new(server.server_dir().to_native());
    dir.child("jvm.options")
        .assert("# Generated by liberty-maven-plugin\n-Xmx512m\n-Xms256m\n");
    dir.child("bootstrap.properties").assert(concat!(
        "# Generated by liberty-maven-plugin\n",
        "default.http.port=9080\n",
        "shared.dir=C:/wlp/usr/shared\n",
    ));
    dir.child("server.xml").assert(predicate::str::contains("<featureManager/>"));
    dir.child("server.env").assert("WLP_DEBUG_ADDRESS=7777\n");

    assert_eq!(
        report.artifacts[1].resolution.shadowed_external,
        Some(server.resource_path("jvm.options"))
    );
}

#[test]
fn missing_resources_are_skipped_and_existing_files_survive() {
    let server = TestServer::new();
    server.write_server_file("server.xml", "<server description=\"hand edited\"/>\n");

    let report = run(
        &server,
        &format!("server_dir = \"{SERVER_DIR}\"\nresources_dir = \"src/test/resources\"\n"),
    );

    assert!(report.is_success());
    assert!(report
        .outcomes()
        .iter()
        .all(|(_, outcome)| outcome.is_skipped()));
    assert_eq!(
        server.read_server_file("server.xml"),
        "<server description=\"hand edited\"/>\n"
    );
    server.assert_server_file_absent("jvm.options");
    server.assert_server_file_absent("bootstrap.properties");
    server.assert_server_file_absent("server.env");
}

#[test]
fn dry_run_from_config_touches_nothing() {
    let server = TestServer::new();
    server.write_resource("server.env", "A=1\n");

    let report = run(
        &server,
        &format!(
            r#"
server_dir = "{SERVER_DIR}"
resources_dir = "src/test/resources"
dry_run = true

[jvm_options]
inline = ["-Xmx1g"]
"#
        ),
    );

    assert!(report.dry_run);
    assert!(matches!(
        report.outcome("server.env"),
        Some(ResolutionOutcome::CopiedFromExternal { .. })
    ));
    assert_eq!(
        report.outcome("jvm.options"),
        Some(&ResolutionOutcome::WrittenFromInline)
    );
    assert!(!server.server_dir().exists());
}

#[test]
fn second_run_is_byte_identical() {
    let server = TestServer::new();
    server.write_resource("server.xml", "<server/>\n");
    let body = format!(
        r#"
server_dir = "{SERVER_DIR}"
resources_dir = "src/test/resources"

[bootstrap_properties]
inline = {{ b = "2", a = "1" }}
"#
    );

    run(&server, &body);
    let first = (
        server.read_server_bytes("server.xml"),
        server.read_server_bytes("bootstrap.properties"),
    );
    run(&server, &body);
    let second = (
        server.read_server_bytes("server.xml"),
        server.read_server_bytes("bootstrap.properties"),
    );

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(second.1).unwrap(),
        "# Generated by srvconf\nb=2\na=1\n"
    );
}

#[test]
fn temp_dir_fixture_as_external_source() {
    let sources = assert_fs::TempDir::new().unwrap();
    let env = sources.child("custom.env");
    env.write_str("CUSTOM=1\n").unwrap();

    let server = TestServer::new();
    let report = run(
        &server,
        &format!(
            "server_dir = \"{SERVER_DIR}\"\n\n[server_env]\nfile = '{}'\n",
            env.path().display()
        ),
    );

    assert!(matches!(
        report.outcome("server.env"),
        Some(ResolutionOutcome::CopiedFromExternal { .. })
    ));
    assert_eq!(server.read_server_file("server.env"), "CUSTOM=1\n");
}
