//! Maps request paths to the deployment they are served by.

use crate::config::{DeploymentConfig, GateConfig};

/// Deployments indexed for longest-prefix resolution.
#[derive(Debug, Clone)]
pub struct Deployments {
    root: DeploymentConfig,
    // Longest context path first.
    mounted: Vec<DeploymentConfig>,
}

impl Deployments {
    #[must_use]
    pub fn from_config(cfg: &GateConfig) -> Self {
        let mut root = cfg.root.clone();
        root.context_path = String::new();

        let mut mounted: Vec<DeploymentConfig> = Vec::with_capacity(cfg.deployments.len());
        for deployment in &cfg.deployments {
            let context_path = normalize_context_path(&deployment.context_path);
            if context_path.is_empty() {
                tracing::warn!("deployment with an empty context path ignored; configure `root` instead");
                continue;
            }
            if mounted.iter().any(|d| d.context_path == context_path) {
                tracing::warn!(context_path = %context_path, "duplicate deployment ignored");
                continue;
            }
            let mut deployment = deployment.clone();
            deployment.context_path = context_path;
            mounted.push(deployment);
        }
        mounted.sort_by(|a, b| b.context_path.len().cmp(&a.context_path.len()));

        Self { root, mounted }
    }

    /// Deployment serving `path`, falling back to the root deployment.
    #[must_use]
    pub fn resolve(&self, path: &str) -> &DeploymentConfig {
        self.mounted
            .iter()
            .find(|d| is_under_context(path, &d.context_path))
            .unwrap_or(&self.root)
    }
}

/// `/app/`, `app` and `/app` all name the same mount point.
fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn is_under_context(path: &str, context_path: &str) -> bool {
    path.strip_prefix(context_path)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
