//! `povfab tasks` — list selector tasks.

use anyhow::Result;
use serde::Serialize;

use crate::app::AppContext;
use crate::output::json;

#[derive(Serialize)]
struct TaskRow<'a> {
    name: &'a str,
    help: &'a str,
}

/// Run the tasks command.
pub fn run(app: &AppContext) -> Result<()> {
    if app.is_json() {
        let rows: Vec<TaskRow<'_>> = app
            .tasks
            .iter()
            .map(|task| TaskRow {
                name: task.name(),
                help: task.help(),
            })
            .collect();
        app.output.raw(&json::to_pretty(&rows)?);
        return Ok(());
    }

    if app.tasks.is_empty() {
        app.output
            .info("No instances defined. Add some to povfab.yaml or pass --inventory.");
        return Ok(());
    }
    let width = app.tasks.iter().map(|t| t.name().len()).max().unwrap_or(0);
    app.output.header("Selector tasks");
    for task in &app.tasks {
        app.output.entry(task.name(), width, task.help());
    }
    Ok(())
}
