//! Applies the sort plan to the department master

use mock_core::{MasterApi, MasterItemUpdate};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{FixupError, Result};
use crate::plan::{missing_departments, PlanEntry};

pub const DEPARTMENT_TYPE: &str = "department";

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print the planned updates without sending them
    pub dry_run: bool,
    /// Pause between update calls
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub planned: usize,
    pub updated: usize,
}

/// Parse a `--sleep` value in seconds
pub fn parse_delay(raw: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("invalid number of seconds '{raw}': {e}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid delay '{raw}': {e}"))
}

/// Fetch the department master, check every planned department exists,
/// then update (or preview) each entry in plan order.
///
/// Nothing is updated when a department is missing. The first failed
/// update stops the run.
pub async fn run<A, W>(api: &A, plan: &[PlanEntry], options: &RunOptions, out: &mut W) -> Result<RunSummary>
where
    A: MasterApi + ?Sized,
    W: Write,
{
    let items = api.list_master(DEPARTMENT_TYPE).await?;
    info!(count = items.len(), "Fetched department master");

    let categories: HashMap<&str, &str> = items
        .iter()
        .map(|item| (item.name.as_str(), item.category.as_str()))
        .collect();

    let known: HashSet<&str> = categories.keys().copied().collect();
    let missing = missing_departments(plan, &known);
    if !missing.is_empty() {
        return Err(FixupError::MissingDepartments(missing));
    }

    let mut updated = 0;
    for (index, entry) in plan.iter().enumerate() {
        let position = index + 1;
        let category = categories.get(entry.name).copied().unwrap_or_default();

        if options.dry_run {
            writeln!(
                out,
                "[dry-run] {position:02}: {} -> group={}, order={}",
                entry.name, entry.group, entry.order
            )?;
            continue;
        }

        let update = MasterItemUpdate {
            kind: DEPARTMENT_TYPE.to_string(),
            category: category.to_string(),
            name: entry.name.to_string(),
            sort_group: entry.group.to_string(),
            sort_order: entry.order,
        };
        debug!(name = entry.name, category, "Updating department");
        api.update_master_item(&update).await?;
        updated += 1;
        writeln!(out, "updated {position:02}: {}", entry.name)?;

        if position < plan.len() && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    Ok(RunSummary {
        planned: plan.len(),
        updated,
    })
}
