//! User accounts over a SQLite database, through the CLI handlers.

mod harness;
mod support;

use harness::temp_db::TempDb;
use serde_json::{json, Value};
use support::fixtures::{add_device, link_all};
use trackwell::adapter::inbound::cli::{self, command::Commands};
use trackwell::adapter::inbound::cli::command::{PermissionsCommand, UserCommand};
use trackwell::domain::NewUser;
use trackwell::infrastructure::config::settings::Config;
use trackwell::port::UserAdmin;

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

fn login(email: &str, password: &str) -> Commands {
    Commands::User(UserCommand::Login {
        email: email.into(),
        password: password.into(),
    })
}

#[test]
fn added_user_logs_in_and_sees_linked_devices() {
    let db = TempDb::create("user-login");
    let config = config_for(&db);

    let added = run(
        Commands::User(UserCommand::Add {
            email: "ops@example.com".into(),
            name: "Ops".into(),
            password: "s3cret".into(),
            admin: true,
        }),
        &config,
    );
    let user_id = added[0]["payload"]["id"].as_i64().unwrap();
    assert_eq!(added[0]["payload"]["admin"], true);

    let store = db.store();
    let device = add_device(&store, "IMEI-A");
    link_all(&store, user_id, &[&device]);

    let logged_in = run(login("ops@example.com", "s3cret"), &config);
    assert_eq!(logged_in[0]["type"], "login");
    assert_eq!(logged_in[0]["payload"]["id"], user_id);

    let allowed = run(
        Commands::Permissions(PermissionsCommand::Allowed { user: user_id }),
        &config,
    );
    assert_eq!(allowed[0]["payload"]["device_ids"], json!([device.id.value()]));
}

#[test]
fn wrong_password_and_unknown_email_are_rejected() {
    let db = TempDb::create("user-reject");
    db.store()
        .add_user(&NewUser::try_new("Ann", "ann@example.com", "right", false).unwrap())
        .unwrap();
    let config = config_for(&db);

    for command in [
        login("ann@example.com", "wrong"),
        login("who@example.com", "right"),
    ] {
        let mut out = Vec::new();
        let err = cli::execute(command, &config, &mut out).unwrap_err();
        assert!(err.is_authentication_failed());
        assert!(out.is_empty());
    }
}

#[test]
fn duplicate_email_is_refused() {
    let db = TempDb::create("user-duplicate");
    let store = db.store();
    store
        .add_user(&NewUser::try_new("Ann", "ann@example.com", "a", false).unwrap())
        .unwrap();

    let err = store
        .add_user(&NewUser::try_new("Other Ann", "ann@example.com", "b", false).unwrap())
        .unwrap_err();

    assert!(err.is_store_unavailable());
    assert!(store.authenticate("ann@example.com", "a").unwrap().is_some());
    assert!(store.authenticate("ann@example.com", "b").unwrap().is_none());
}
