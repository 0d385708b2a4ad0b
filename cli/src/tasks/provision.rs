use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::operations;
use crate::resources::ResourceChange;

/// Install the certbot package.
#[derive(Debug)]
pub struct ProvisionCertbot;

impl Task for ProvisionCertbot {
    fn name(&self) -> &'static str {
        "Provision certbot"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn is_prerequisite(&self) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        Ok(match operations::provision(ctx)? {
            ResourceChange::Applied => TaskResult::Ok,
            ResourceChange::AlreadyCorrect => {
                TaskResult::Skipped("certbot already installed".to_string())
            }
            ResourceChange::DryRun => TaskResult::DryRun,
        })
    }
}
