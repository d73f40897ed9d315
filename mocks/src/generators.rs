//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Task titles and categories
//! - Priorities and ISO-8601 timestamps
//! - Property-based testing strategies

use chrono::{Duration, TimeZone, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use mock_core::{Task, TaskStatus};
use proptest::prelude::*;
use rand::Rng;

const CATEGORIES: [&str; 5] = ["開発", "運用", "受付", "経理", "広報"];
const PRIORITIES: [&str; 3] = ["P1", "P2", "P3"];

pub fn generate_task_title() -> String {
    Sentence(2..6).fake()
}

pub fn generate_category() -> String {
    CATEGORIES[rand::thread_rng().gen_range(0..CATEGORIES.len())].to_string()
}

pub fn generate_priority() -> String {
    PRIORITIES[rand::thread_rng().gen_range(0..PRIORITIES.len())].to_string()
}

/// RFC 3339 timestamp within 2025
pub fn generate_created_at() -> String {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
    let offset: i64 = (0..365 * 24 * 60).fake();
    (base + Duration::minutes(offset)).to_rfc3339()
}

pub fn generate_random_task() -> Task {
    let status = if rand::thread_rng().gen_bool(0.5) {
        TaskStatus::Done
    } else {
        TaskStatus::Open
    };
    Task::new(
        generate_category(),
        generate_task_title(),
        status,
        generate_priority(),
        generate_created_at(),
    )
}

pub fn generate_random_tasks(count: usize) -> Vec<Task> {
    (0..count).map(|_| generate_random_task()).collect()
}

/// Property-based testing strategies
pub mod strategies {
    use super::*;

    pub fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![Just(TaskStatus::Open), Just(TaskStatus::Done)]
    }

    pub fn task_strategy() -> impl Strategy<Value = Task> {
        (
            prop::sample::select(CATEGORIES.to_vec()),
            "[a-zA-Z0-9ぁ-ん ]{1,40}",
            task_status_strategy(),
            prop::sample::select(PRIORITIES.to_vec()),
            0i64..1_000_000,
        )
            .prop_map(|(category, title, status, priority, minutes)| {
                let created_at = Utc
                    .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                    .single()
                    .map(|base| (base + Duration::minutes(minutes)).to_rfc3339())
                    .unwrap_or_default();
                Task::new(category, title, status, priority, created_at)
            })
    }

    pub fn task_list_strategy(max_len: usize) -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(task_strategy(), 0..=max_len)
    }
}
