use serde::{Deserialize, Serialize};

/// Main configuration structure for Cogent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Goal-loop halt conditions
    #[serde(default)]
    pub stop: StopConfig,

    /// Quality monitor thresholds
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Reflector scoring knobs
    #[serde(default)]
    pub reflector: ReflectorConfig,

    /// Evidence fusion limits
    #[serde(default)]
    pub fusion: FusionConfig,

    /// Retrieval fan-out
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Tool executor retry policy
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Safety policy keyword lists
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Long-term memory database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Audit trail location
    #[serde(default)]
    pub audit: AuditConfig,

    /// Artifact output sandbox
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Halt conditions for the goal loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StopConfig {
    /// Hard ceiling on goal-loop iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Consecutive no-progress steps tolerated before halting
    #[serde(default = "default_max_no_progress")]
    pub max_no_progress: u32,
}

const fn default_max_iterations() -> u32 {
    25
}

const fn default_max_no_progress() -> u32 {
    5
}

impl Default for StopConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_no_progress: default_max_no_progress(),
        }
    }
}

/// Quality monitor thresholds, scoped to one goal run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonitorConfig {
    /// Per-task redo budget
    #[serde(default = "default_max_redos_per_task")]
    pub max_redos_per_task: u32,

    /// Scores below this count toward the low-quality streak
    #[serde(default = "default_low_score_threshold")]
    pub low_score_threshold: f64,

    /// Consecutive low scores that trip escalation
    #[serde(default = "default_low_score_streak_limit")]
    pub low_score_streak_limit: u32,

    /// Occurrences of the same normalized query tolerated in the history
    #[serde(default = "default_repeated_query_limit")]
    pub repeated_query_limit: usize,

    /// Bounded query-history capacity; oldest entries are evicted
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

const fn default_max_redos_per_task() -> u32 {
    2
}

const fn default_low_score_threshold() -> f64 {
    0.55
}

const fn default_low_score_streak_limit() -> u32 {
    2
}

const fn default_repeated_query_limit() -> usize {
    2
}

const fn default_history_capacity() -> usize {
    10
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_redos_per_task: default_max_redos_per_task(),
            low_score_threshold: default_low_score_threshold(),
            low_score_streak_limit: default_low_score_streak_limit(),
            repeated_query_limit: default_repeated_query_limit(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// Reflector scoring knobs.
///
/// Stub detection is deliberately data, not code: the markers list can be
/// replaced wholesale to match whatever placeholder text the configured
/// retrieval tools emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReflectorConfig {
    /// Results shorter than this (after trimming) are penalized
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Substrings that mark a result as stub/demo data
    #[serde(default = "default_stub_markers")]
    pub stub_markers: Vec<String>,
}

const fn default_min_chars() -> usize {
    120
}

fn default_stub_markers() -> Vec<String> {
    vec![
        "Stubbed web_search".to_string(),
        "example.com/stub".to_string(),
    ]
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            stub_markers: default_stub_markers(),
        }
    }
}

/// Evidence fusion limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FusionConfig {
    /// Maximum chunks surviving fusion
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

const fn default_max_chunks() -> usize {
    8
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            max_chunks: default_max_chunks(),
        }
    }
}

/// Retrieval fan-out per source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Chunk limit passed to each retrieval source
    #[serde(default = "default_retrieval_limit")]
    pub limit: usize,
}

const fn default_retrieval_limit() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: default_retrieval_limit(),
        }
    }
}

/// Tool executor retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutorConfig {
    /// Additional attempts after the first, for transient failures only
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff; the sleep before attempt n is `backoff_ms * n`
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_backoff_ms() -> u64 {
    150
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Safety policy keyword lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SafetyConfig {
    /// Any of these in a task description vetoes the whole plan
    #[serde(default = "default_blocked_keywords")]
    pub blocked_keywords: Vec<String>,

    /// Any of these flags the plan as requiring human approval
    #[serde(default = "default_approval_keywords")]
    pub approval_keywords: Vec<String>,
}

fn default_blocked_keywords() -> Vec<String> {
    ["robot", "weapon", "explosive", "malware", "hack"]
        .map(String::from)
        .to_vec()
}

fn default_approval_keywords() -> Vec<String> {
    [
        "publish",
        "post",
        "send email",
        "upload",
        "deploy",
        "delete",
        "overwrite",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            blocked_keywords: default_blocked_keywords(),
            approval_keywords: default_approval_keywords(),
        }
    }
}

/// Long-term memory database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    ".cogent/memory.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Audit trail location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditConfig {
    /// Directory receiving state.json and episodes.jsonl
    #[serde(default = "default_audit_dir")]
    pub dir: String,
}

fn default_audit_dir() -> String {
    "audit".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            dir: default_audit_dir(),
        }
    }
}

/// Artifact output sandbox for the file-writing tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ArtifactsConfig {
    /// Base directory; all written paths must stay inside it
    #[serde(default = "default_artifacts_dir")]
    pub dir: String,
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
