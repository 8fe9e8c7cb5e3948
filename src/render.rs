use crate::juggler::Task;

/// Render tasks as TaskJuggler task blocks, one per task, tracker order.
pub fn render(tasks: &[Task]) -> String {
    let blocks: Vec<String> = tasks.iter().map(render_task).collect();
    blocks.join("\n")
}

fn render_task(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "task {} \"{}\" {{\n",
        task_id(&task.key),
        escape(&task.summary)
    ));

    if let Some(ref allocate) = task.properties.allocate {
        out.push_str(&format!("  allocate {}\n", resource_id(allocate)));
    }
    if let Some(effort) = task.properties.effort {
        out.push_str(&format!("  effort {effort}d\n"));
    }
    if !task.properties.depends.is_empty() {
        let refs: Vec<String> = task
            .properties
            .depends
            .iter()
            .map(|key| format!("!{}", task_id(key)))
            .collect();
        out.push_str(&format!("  depends {}\n", refs.join(", ")));
    }

    out.push_str("}\n");
    out
}

/// TaskJuggler ids reject hyphens, so `ABC-1` becomes `ABC_1`.
fn task_id(key: &str) -> String {
    key.replace('-', "_")
}

/// Reduce an assignee display name to a TaskJuggler resource id.
fn resource_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn escape(summary: &str) -> String {
    summary.replace('"', "\\\"")
}
