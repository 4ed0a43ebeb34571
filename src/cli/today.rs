//! `tasklog today` command implementation

use anyhow::Result;
use clap::Args;

use super::{pad, truncate, Context, GlobalArgs};
use crate::view::{TaskRow, TodayView};

const TABLE_COL_POS: usize = 4;
const TABLE_COL_TITLE: usize = 32;
const TABLE_COL_DETAIL: usize = 40;

#[derive(Args, Default)]
pub struct TodayArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(global: &GlobalArgs, args: TodayArgs) -> Result<()> {
    let ctx = Context::load(global).await?;
    let view = ctx.state.today_view();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!("{}", render(&view));
    Ok(())
}

fn render(view: &TodayView) -> String {
    let mut out = format!("{}  {}\n\n", view.month, view.date);

    out.push_str(&format!("Done on {}\n", view.prev_date));
    render_group(&mut out, &view.prev, "No tasks finished");

    if view.show_today {
        out.push_str(&format!("\nToday ({})\n", view.date));
        render_group(&mut out, &view.today, "No tasks yet");
    }
    out
}

fn render_group(out: &mut String, rows: &[TaskRow], empty: &str) {
    if rows.is_empty() {
        out.push_str(&format!("  {}\n", empty));
        return;
    }
    for row in rows {
        let pos = format!("{}.", row.position + 1);
        let line = format!(
            "  {} {} {} {}",
            pad(&pos, TABLE_COL_POS),
            row.task.status.marker(),
            pad(&truncate(&row.task.title, TABLE_COL_TITLE), TABLE_COL_TITLE),
            truncate(&row.task.detail, TABLE_COL_DETAIL),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarResolver;
    use crate::task::{Store, Task, TaskStatus};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_render_groups_and_positions() {
        let mut store = Store::new();
        store.bucket_mut(date("2024-05-31")).tasks.push(Task {
            title: "Release".to_string(),
            detail: String::new(),
            status: TaskStatus::Done,
        });
        let today = store.bucket_mut(date("2024-06-03"));
        today.tasks.push(Task {
            title: "Closed".to_string(),
            detail: String::new(),
            status: TaskStatus::Done,
        });
        today.tasks.push(Task {
            title: "Review".to_string(),
            detail: "two files left".to_string(),
            status: TaskStatus::Doing,
        });

        let view = TodayView::build(&store, &CalendarResolver::default(), date("2024-06-03"));
        let text = render(&view);

        assert!(text.starts_with("2024-06  2024-06-03\n"));
        assert!(text.contains("Done on 2024-05-31\n  1.   [x] Release\n"));
        assert!(text.contains("Today (2024-06-03)\n  2.   [~] Review"));
        assert!(text.contains("two files left"));
        assert!(!text.contains("Closed"));
    }

    #[test]
    fn test_render_empty_day() {
        let view = TodayView::build(&Store::new(), &CalendarResolver::default(), date("2024-06-04"));
        let text = render(&view);
        assert!(text.contains("No tasks finished"));
        assert!(text.contains("No tasks yet"));
    }
}
