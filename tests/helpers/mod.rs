//! Shared test harness: an orchestrator wired to an in-memory database and
//! a temporary audit/artifact directory.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use cogent::domain::models::Config;
use cogent::infrastructure::sqlite::create_test_pool;
use cogent::infrastructure::{build_orchestrator, AgentMemory, SqliteMemoryStore};
use cogent::Orchestrator;

pub struct TestHarness {
    pub orchestrator: Orchestrator,
    pub memory: Arc<AgentMemory>,
    pub config: Config,
    // Held so the directory outlives the test.
    #[allow(dead_code)]
    pub dir: TempDir,
}

impl TestHarness {
    pub fn audit_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.audit.dir)
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.artifacts.dir)
    }
}

pub async fn harness() -> TestHarness {
    harness_with(Config::default()).await
}

pub async fn harness_with(mut config: Config) -> TestHarness {
    let dir = tempfile::tempdir().expect("tempdir");
    config.audit.dir = dir.path().join("audit").display().to_string();
    config.artifacts.dir = dir.path().join("artifacts").display().to_string();

    let pool = create_test_pool().await.expect("test pool");
    let ltm = SqliteMemoryStore::new(pool).await.expect("memory schema");
    let memory = Arc::new(AgentMemory::new(ltm));

    let orchestrator = build_orchestrator(&config, Arc::clone(&memory)).expect("orchestrator");

    TestHarness {
        orchestrator,
        memory,
        config,
        dir,
    }
}
