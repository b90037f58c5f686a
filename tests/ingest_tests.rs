//! End-to-end ingest through the CLI handlers and a SQLite database.

mod harness;
mod support;

use std::fs;

use diesel::RunQueryDsl;
use harness::temp_db::TempDb;
use serde_json::Value;
use support::fixtures::{add_device, report_line};
use trackwell::adapter::inbound::cli::{self, command::Commands, command::IngestArgs};
use trackwell::infrastructure::bootstrap::Tracker;
use trackwell::infrastructure::config::settings::Config;
use trackwell::port::Store;

fn config_for(db: &TempDb) -> Config {
    let mut config = Config::default();
    config.database.url = db.path().display().to_string();
    config
}

fn run(command: Commands, config: &Config) -> Vec<Value> {
    let mut out = Vec::new();
    cli::execute(command, config, &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn ingest_file_stores_positions_and_moves_latest_pointer() {
    let db = TempDb::create("ingest-file");
    let store = db.store();
    let device = add_device(&store, "IMEI-A");

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reports.jsonl");
    let lines = [
        report_line("IMEI-A", 0, 52.50, 13.40),
        report_line("IMEI-UNKNOWN", 1, 1.0, 1.0),
        report_line("IMEI-A", 2, 52.51, 13.41),
    ];
    fs::write(&input, lines.join("\n")).unwrap();

    let config = config_for(&db);
    let output = run(
        Commands::Ingest(IngestArgs {
            input: Some(input.clone()),
        }),
        &config,
    );

    let summary = output.last().unwrap();
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["payload"]["stored"], 2);
    assert_eq!(summary["payload"]["unknown_devices"], 1);
    assert_eq!(summary["payload"]["rejected"], 0);

    let last_stored = output
        .iter()
        .filter(|line| line["payload"]["outcome"] == "stored")
        .last()
        .unwrap()["payload"]["position_id"]
        .as_i64()
        .unwrap();
    let reloaded = store
        .fetch_device_by_unique_id("IMEI-A")
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.id, device.id);
    assert_eq!(reloaded.position_id.map(|id| id.value()), Some(last_stored));
}

#[test]
fn tracker_over_sqlite_respects_record_positions_flag() {
    let db = TempDb::create("ingest-disabled");
    add_device(&db.store(), "IMEI-A");

    let mut config = config_for(&db);
    config.database.record_positions = false;
    let tracker = Tracker::open(&config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reports.jsonl");
    fs::write(&input, report_line("IMEI-A", 0, 10.0, 10.0)).unwrap();

    let mut out = Vec::new();
    cli::ingest::execute(&tracker, Some(input.as_path()), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"not_recorded\""));
    let device = db
        .store()
        .fetch_device_by_unique_id("IMEI-A")
        .unwrap()
        .unwrap();
    assert_eq!(device.position_id, None);
}

#[test]
fn resolve_and_device_commands_share_the_database() {
    let db = TempDb::create("cli-admin");
    let config = config_for(&db);

    let added = run(
        Commands::Device(cli::command::DeviceCommand::Add {
            unique_id: "IMEI-Q".into(),
            name: "truck".into(),
        }),
        &config,
    );
    let id = added[0]["payload"]["id"].as_i64().unwrap();

    let resolved = run(
        Commands::Resolve {
            unique_id: "IMEI-Q".into(),
        },
        &config,
    );
    assert_eq!(resolved[0]["type"], "device");
    assert_eq!(resolved[0]["payload"]["id"], id);

    run(
        Commands::Device(cli::command::DeviceCommand::Link { user: 5, device: id }),
        &config,
    );
    let allowed = run(
        Commands::Permissions(cli::command::PermissionsCommand::Allowed { user: 5 }),
        &config,
    );
    assert_eq!(allowed[0]["payload"]["device_ids"], serde_json::json!([id]));
}

#[test]
fn migrate_creates_a_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.url = dir.path().join("fresh.db").display().to_string();

    let output = run(Commands::Migrate, &config);

    assert_eq!(output[0]["type"], "migrated");
    assert!(dir.path().join("fresh.db").exists());
}

#[test]
fn unreadable_permissions_only_fail_permission_commands() {
    let db = TempDb::create("broken-permissions");
    add_device(&db.store(), "IMEI-A");
    {
        let mut conn = db.pool().get().unwrap();
        diesel::sql_query("DROP TABLE user_devices")
            .execute(&mut conn)
            .unwrap();
    }
    let config = config_for(&db);

    let resolved = run(
        Commands::Resolve {
            unique_id: "IMEI-A".into(),
        },
        &config,
    );
    assert_eq!(resolved[0]["type"], "device");

    let result = cli::execute(
        Commands::Permissions(cli::command::PermissionsCommand::Allowed { user: 1 }),
        &config,
        &mut Vec::new(),
    );
    assert!(result.unwrap_err().is_store_unavailable());
}
