/// Scheduler configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum number of masters generating at once (default: `3`).
    pub max_concurrent: i64,
    /// Age in seconds after which a running master counts as stuck
    /// (default: `600`).
    pub stuck_threshold_secs: i64,
    /// Endpoint that runs full document generation for one master.
    pub orchestrator_url: String,
    /// Endpoint that generates the document structure for one chapter.
    pub structure_url: String,
    /// Bearer token sent to both generation endpoints.
    pub service_key: String,
}

impl SchedulerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                    |
    /// |---------------------------|--------------------------------------------|
    /// | `SCHEDULER_MAX_CONCURRENT`| `3`                                        |
    /// | `SCHEDULER_STUCK_SECS`    | `600`                                      |
    /// | `ORCHESTRATOR_URL`        | `http://localhost:8000/generate/orchestrate` |
    /// | `STRUCTURE_GENERATOR_URL` | `http://localhost:8000/generate/structure` |
    /// | `GENERATION_SERVICE_KEY`  | empty                                      |
    pub fn from_env() -> Self {
        let max_concurrent: i64 = std::env::var("SCHEDULER_MAX_CONCURRENT")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("SCHEDULER_MAX_CONCURRENT must be a valid i64");

        let stuck_threshold_secs: i64 = std::env::var("SCHEDULER_STUCK_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("SCHEDULER_STUCK_SECS must be a valid i64");

        let orchestrator_url = std::env::var("ORCHESTRATOR_URL")
            .unwrap_or_else(|_| "http://localhost:8000/generate/orchestrate".into());

        let structure_url = std::env::var("STRUCTURE_GENERATOR_URL")
            .unwrap_or_else(|_| "http://localhost:8000/generate/structure".into());

        let service_key = std::env::var("GENERATION_SERVICE_KEY").unwrap_or_default();

        Self {
            max_concurrent,
            stuck_threshold_secs,
            orchestrator_url,
            structure_url,
            service_key,
        }
    }
}
