//! Task request schema supplied by the analysis platform.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// Top-level task request document. Only `task_params` is consumed.
pub struct TaskRequest {
    pub task_params: TaskParams,
}

#[derive(Debug, Default, Deserialize)]
/// Per-task options controlling rule selection and scan mode.
pub struct TaskParams {
    #[serde(default)]
    pub incr_scan: bool,
    #[serde(default)]
    pub rule_list: Vec<RuleRef>,
}

#[derive(Debug, Clone, Deserialize)]
/// A rule requested by the task; only the name is meaningful to revive.
pub struct RuleRef {
    pub name: String,
}

impl TaskParams {
    /// Requested rule names in request order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rule_list.iter().map(|r| r.name.as_str())
    }
}
