//! Example: Laying out a dialog built in code
//!
//! This example builds a dialog with `serde_json::json!` instead of reading a
//! file, lays it out, and walks the result with the keyboard cursor.

use serde_json::json;

use flowcanvas::{
    FlowBuilder,
    cursor::{Command, Direction},
    index::NodeIndexGenerator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Laying out dialog built in code...\n");

    let dialog = json!({
        "$kind": "Microsoft.OnBeginDialog",
        "actions": [
            { "$kind": "Microsoft.SendActivity", "activity": "Hello" },
            {
                "$kind": "Microsoft.IfCondition",
                "condition": "user.name == null",
                "actions": [{ "$kind": "Microsoft.TextInput", "property": "user.name" }],
                "elseActions": ["welcomeBack"]
            },
            {
                "$kind": "Microsoft.Foreach",
                "itemsProperty": "dialog.todos",
                "actions": [{ "$kind": "Microsoft.SendActivity", "activity": "${dialog.foreach.value}" }]
            }
        ]
    });

    let builder = FlowBuilder::default();
    let graph = builder.layout(&dialog);

    println!(
        "Canvas: {} x {}",
        graph.boundary().width(),
        graph.boundary().height()
    );
    for node in graph.nodes() {
        let rect = node.rect();
        println!(
            "  {:<40} {:?} at ({}, {})",
            node.id(),
            node.role(),
            rect.left(),
            rect.top()
        );
    }
    println!("Edges: {}\n", graph.edges().len());

    // Walk down the main spine with the arrow keys
    let elements = graph.selector_elements();
    let mut generator = NodeIndexGenerator::default();
    let tab_order = graph.tab_order(&mut generator);
    let cursor = builder.cursor(&elements, &tab_order);

    let mut focus = "actions[0]";
    println!("Focus: {focus}");
    while let Some(next) = cursor.move_focus(focus, Command::Move(Direction::Down)) {
        println!("  Down -> {next}");
        focus = next;
    }

    println!("\n{}", builder.render_json(&graph, true)?);
    Ok(())
}
