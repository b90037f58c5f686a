//! Handlers for `user` subcommands.

use std::io::Write;

use tracing::{info, warn};

use super::command::UserCommand;
use super::output;
use crate::domain::NewUser;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::Tracker;

/// Execute a user account command.
pub fn execute<W: Write>(tracker: &Tracker, command: UserCommand, out: &mut W) -> Result<()> {
    let users = tracker.users();
    match command {
        UserCommand::Add {
            email,
            name,
            password,
            admin,
        } => {
            let user = users.add_user(&NewUser::try_new(name, &email, &password, admin)?)?;
            info!(user_id = %user.id, admin = user.admin, "User added");
            output::emit(out, "user", &user)
        }
        UserCommand::Login { email, password } => match users.authenticate(&email, &password)? {
            Some(user) => output::emit(out, "login", &user),
            None => {
                warn!(email = %email.trim(), "Login rejected");
                Err(Error::AuthenticationFailed)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::infrastructure::config::settings::Config;
    use crate::testkit::clock::ManualClock;

    fn tracker() -> Tracker {
        Tracker::with_store(
            Arc::new(MemoryStore::new()),
            &Config::default(),
            Arc::new(ManualClock::at_epoch()),
        )
    }

    fn add(tracker: &Tracker, email: &str, password: &str) -> serde_json::Value {
        let mut out = Vec::new();
        execute(
            tracker,
            UserCommand::Add {
                email: email.into(),
                name: "Ann".into(),
                password: password.into(),
                admin: false,
            },
            &mut out,
        )
        .unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn add_prints_user_without_password() {
        let tracker = tracker();

        let line = add(&tracker, "ann@example.com", "secret");

        assert_eq!(line["type"], "user");
        assert_eq!(line["payload"]["email"], "ann@example.com");
        assert!(!line.to_string().contains("secret"));
    }

    #[test]
    fn login_succeeds_with_matching_password() {
        let tracker = tracker();
        let added = add(&tracker, "ann@example.com", "secret");
        let mut out = Vec::new();

        execute(
            &tracker,
            UserCommand::Login {
                email: "ann@example.com".into(),
                password: "secret".into(),
            },
            &mut out,
        )
        .unwrap();

        let line: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(line["type"], "login");
        assert_eq!(line["payload"]["id"], added["payload"]["id"]);
    }

    #[test]
    fn login_with_wrong_password_fails() {
        let tracker = tracker();
        add(&tracker, "ann@example.com", "secret");
        let mut out = Vec::new();

        let result = execute(
            &tracker,
            UserCommand::Login {
                email: "ann@example.com".into(),
                password: "guess".into(),
            },
            &mut out,
        );

        assert!(result.unwrap_err().is_authentication_failed());
        assert!(out.is_empty());
    }

    #[test]
    fn add_rejects_empty_password() {
        let tracker = tracker();

        let result = execute(
            &tracker,
            UserCommand::Add {
                email: "ann@example.com".into(),
                name: String::new(),
                password: String::new(),
                admin: false,
            },
            &mut Vec::new(),
        );

        assert!(matches!(result, Err(Error::Domain(_))));
    }
}
