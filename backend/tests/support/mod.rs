//! Embedded PostgreSQL helpers shared by repository integration tests.
//!
//! `pg-embed-setup-unpriv` needs writable runtime and data directories. When
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, both are pointed at a unique
//! directory under the target dir for the duration of the bootstrap.
//!
//! Suites skip with a `SKIP-TEST-CLUSTER` marker when the cluster cannot
//! start, unless `REQUIRE_TEST_CLUSTER` is truthy, in which case setup
//! failures panic so CI breakage is not masked.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::TestCluster;
use user_registry::outbound::persistence::MIGRATIONS;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Database created by `initdb` in every fresh cluster.
pub const DEFAULT_DATABASE: &str = "postgres";

fn pg_embed_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"));
    let base = target
        .join("pg-embed")
        .join(format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn require_test_cluster() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Start an embedded cluster, serialising bootstrap across tests.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap_guard = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env_guard = if needs_override {
        let (runtime_dir, data_dir) = pg_embed_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    TestCluster::new().map_err(|err| format!("{err:?}"))
}

/// Apply the service migrations to `url`.
pub fn migrate(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Skip or fail a suite whose cluster could not be prepared.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if require_test_cluster() {
        panic!("Test cluster setup failed: {reason}");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
