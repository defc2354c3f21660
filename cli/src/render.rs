use chrono::{DateTime, Utc};
use duetrack_core::{Stats, Task};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Safe date")]
    safe: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Days left")]
    days_left: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn fmt_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn print_tasks(tasks: &[Task], now: DateTime<Utc>) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id,
            name: task.name.clone(),
            safe: fmt_date(task.safe_date),
            deadline: fmt_date(task.deadline_date),
            days_left: if task.completed {
                "-".to_string()
            } else {
                task.remaining_days(now).to_string()
            },
            status: match task.completion_date {
                Some(done) => format!("done {}", fmt_date(done)),
                None => "open".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn print_stats(stats: &Stats) {
    println!(
        "Tasks: {} total, {} completed ({:.1}%)",
        stats.total_tasks, stats.completed_count, stats.completion_rate
    );
    println!("  completed before safe date : {}", stats.before_safe_date);
    println!("  completed on safe date     : {}", stats.on_safe_date);
    println!("  completed on deadline      : {}", stats.on_deadline);
    println!("  completed after deadline   : {}", stats.after_deadline);
    println!(
        "  still open past deadline   : {}",
        stats.still_incomplete_after_deadline
    );
}
