mod helpers;

use helpers::entry;
use serde_json::json;
use vowlog::analysis::{NextStepPlanner, StepPriority};

#[test]
fn busy_latest_entry_is_capped_and_ordered() {
    let latest = entry(json!({
        "id": "latest",
        "tasks": {"explicit": [
            {"title": "Book caterer", "status": "pending", "priority": "high"},
            {"title": "Order flowers", "status": "pending", "priority": "medium"},
            {"title": "Hire DJ", "status": "pending", "priority": "high"},
            {"title": "Print menus", "status": "pending", "priority": "medium"},
            {"title": "Confirm officiant", "status": "pending", "priority": "high"}
        ]},
        "entities": {"vendors": [
            {"name": "Bloom & Co", "category": "florist", "status": "interested"},
            {"name": "Sound Wave", "category": "music", "status": "pending"},
            {"name": "Cake Shop", "category": "bakery"}
        ]}
    }));
    let history = vec![
        entry(json!({"id": "1"})),
        entry(json!({"id": "2"})),
        entry(json!({"id": "3"})),
        latest,
    ];

    let steps = NextStepPlanner::default().plan(&history);
    assert!(steps.len() <= 5);
    assert_eq!(steps.len(), 5);

    let first_medium = steps
        .iter()
        .position(|s| s.priority == StepPriority::Medium)
        .unwrap_or(steps.len());
    assert!(steps[..first_medium].iter().all(|s| s.priority == StepPriority::High));
    assert!(steps[first_medium..].iter().all(|s| s.priority != StepPriority::High));

    let actions: Vec<_> = steps.iter().map(|s| s.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            "Complete: Book caterer",
            "Complete: Hire DJ",
            "Book vendor: Bloom & Co (florist)",
            "Book vendor: Sound Wave (music)",
            "Complete: Order flowers",
        ]
    );
}

#[test]
fn earlier_entries_are_ignored_except_for_history_length() {
    let history = vec![
        entry(json!({"id": "old", "tasks": {"explicit": [{"title": "Old task", "status": "pending"}]}})),
        entry(json!({"id": "new"})),
    ];
    let steps = NextStepPlanner::default().plan(&history);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].action, "Continue journaling regularly");
}

#[test]
fn long_history_drops_the_journaling_nudge() {
    let history: Vec<_> = (0..4).map(|i| entry(json!({"id": i}))).collect();
    assert!(NextStepPlanner::default().plan(&history).is_empty());
}

#[test]
fn serialized_steps_use_lowercase_priorities() {
    let history = vec![entry(json!({
        "id": "a",
        "tasks": {"explicit": [{"title": "Send invites", "status": "pending", "priority": "high", "deadline": "2026-07-01"}]}
    }))];
    let value = serde_json::to_value(NextStepPlanner::default().plan(&history)).unwrap();
    assert_eq!(value[0]["priority"], "high");
    assert_eq!(value[0]["deadline"], "2026-07-01");
    assert_eq!(value[0]["reason"], "This task is high-priority");
    assert_eq!(value[1]["priority"], "medium");
}
