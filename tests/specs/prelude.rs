//! Test helpers for behavioral specifications.
//!
//! Two entry points: `cli()`/`daemon()` run the built binaries as black
//! boxes, and `Bot` drives the dispatcher in-process over in-memory stores.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use cb_adapters::{ChatCall, FakeChatAdapter, Inbound, MessageRef};
use cb_core::{AdminId, FakeClock, NavEntry};
use cb_daemon::Dispatcher;
use cb_engine::Club;
use cb_storage::{LoadedSession, MemoryClubRepo, MemorySessionRepo, SessionStore};

pub use cb_core::test_support::{new_team, new_tournament};
pub use cb_storage::Mutation;

/// Variables the binaries read; cleared so the developer's shell never leaks in.
const CONFIG_VARS: &[&str] = &[
    "BOT_TOKEN",
    "DB_DSN",
    "ADMIN_IDS",
    "CLUB_TZ",
    "SESSION_TTL_HOURS",
    "LOG_FORMAT",
    "DEBUG",
];

/// Returns the path to a binary, checking the llvm-cov target directory
/// first, then falling back to the directory of the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // target/debug/deps/specs-<hash> -> target/debug/
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Builder for the `cb` operator tool
pub fn cli() -> CliBuilder {
    CliBuilder::new("cb")
}

/// Builder for the `clubbotd` daemon
pub fn daemon() -> CliBuilder {
    CliBuilder::new("clubbotd")
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    binary: &'static str,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new(binary: &'static str) -> Self {
        Self {
            binary,
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it.
    ///
    /// Runs from the temp directory so no `.env` in the checkout is picked up.
    pub fn command(self) -> Command {
        let mut cmd = Command::new(binary_path(self.binary));
        cmd.args(&self.args).current_dir(std::env::temp_dir());
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

pub const ADMIN: AdminId = AdminId::new(1001);
pub const OTHER_ADMIN: AdminId = AdminId::new(1002);
pub const STRANGER: AdminId = AdminId::new(4242);

/// The message every button press in these specs is attached to
pub const KEYBOARD: MessageRef = MessageRef {
    chat_id: 1001,
    message_id: 55,
};

/// One bot process over in-memory stores.
///
/// Processes built with [`Bot::restarted`] share the session rows and
/// club records of the original, like a daemon restart against the same
/// database.
pub struct Bot {
    pub dispatcher: Dispatcher<MemorySessionRepo, FakeChatAdapter, FakeClock>,
    pub sessions: MemorySessionRepo,
    pub club: MemoryClubRepo,
    pub chat: FakeChatAdapter,
}

impl Bot {
    pub fn start() -> Self {
        Self::over(MemorySessionRepo::new(), MemoryClubRepo::new())
    }

    pub fn restarted(&self) -> Self {
        Self::over(self.sessions.clone(), self.club.clone())
    }

    fn over(sessions: MemorySessionRepo, club: MemoryClubRepo) -> Self {
        let chat = FakeChatAdapter::new();
        let dispatcher = Dispatcher::new(
            HashSet::from([ADMIN, OTHER_ADMIN]),
            sessions.clone(),
            Club::new(Arc::new(club.clone())),
            chat.clone(),
            FakeClock::new(),
            chrono_tz::Europe::Moscow,
        );
        Self {
            dispatcher,
            sessions,
            club,
            chat,
        }
    }

    pub async fn say(&self, text: &str) {
        self.say_as(ADMIN, text).await;
    }

    pub async fn say_as(&self, sender: AdminId, text: &str) {
        self.dispatcher
            .handle(Inbound::Text {
                sender,
                chat_id: sender.get(),
                text: text.to_string(),
            })
            .await;
    }

    pub async fn press(&self, data: &str) {
        self.press_as(ADMIN, data).await;
    }

    pub async fn press_as(&self, sender: AdminId, data: &str) {
        self.dispatcher
            .handle(Inbound::Callback {
                sender,
                callback_id: format!("cb-{}", sender.get()),
                message: Some(KEYBOARD),
                data: data.to_string(),
            })
            .await;
    }

    /// Every text shown to admins, sends and edits alike
    pub fn texts(&self) -> Vec<String> {
        self.chat.texts()
    }

    pub fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }

    /// Toast of the most recent callback answer
    pub fn toast(&self) -> Option<String> {
        self.chat.calls().into_iter().rev().find_map(|c| match c {
            ChatCall::AnswerCallback { text, .. } => Some(text),
            _ => None,
        })?
    }

    pub fn nav(&self, admin: AdminId) -> Vec<NavEntry> {
        self.dispatcher.navigator().snapshot(admin)
    }

    pub async fn stored(&self, admin: AdminId) -> LoadedSession {
        SessionStore::new(self.sessions.clone()).load(admin).await.unwrap()
    }
}
