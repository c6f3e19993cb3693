//! `povfab instances` — list inventory instances.

use anyhow::Result;

use crate::app::AppContext;
use crate::output::json;

/// Run the instances command.
pub fn run(app: &AppContext) -> Result<()> {
    if app.is_json() {
        let instances: Vec<_> = app.registry.instances().collect();
        app.output.raw(&json::to_pretty(&instances)?);
        return Ok(());
    }

    if app.registry.is_empty() {
        app.output.info("No instances defined.");
        return Ok(());
    }
    let width = app.registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for instance in app.registry.instances() {
        app.output.entry(instance.name(), width, instance.host());
        for (key, value) in instance.params() {
            app.output.kv(&format!("    {key}"), value);
        }
    }
    Ok(())
}
