//! Daemon argument handling specs

use crate::prelude::*;

#[test]
fn clubbotd_version() {
    daemon()
        .args(&["--version"])
        .passes()
        .stdout_eq(&format!("clubbotd {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn clubbotd_help_names_required_settings() {
    daemon()
        .args(&["--help"])
        .passes()
        .stdout_has("BOT_TOKEN, DB_DSN, ADMIN_IDS, CLUB_TZ");
}

#[test]
fn clubbotd_rejects_unknown_arguments() {
    daemon()
        .args(&["--foreground"])
        .fails()
        .stderr_has("unexpected argument '--foreground'");
}
