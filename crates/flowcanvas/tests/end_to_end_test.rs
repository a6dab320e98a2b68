//! End-to-end scenarios: document text through transform, layout and navigation.

use float_cmp::assert_approx_eq;

use flowcanvas::{
    FlowBuilder,
    config::{AppConfig, LayoutConfig, NavigationConfig},
    cursor::{Command, Direction, find_next, range_selection},
    index::NodeIndexGenerator,
    layout::{self, NodeRole},
};

const IF_ELSE_DIALOG: &str = r#"{
    "$kind": "Microsoft.AdaptiveDialog",
    "triggers": [
        {
            "$kind": "Microsoft.OnBeginDialog",
            "actions": [
                {
                    "$kind": "Microsoft.IfCondition",
                    "condition": "user.name == null",
                    "actions": [
                        { "$kind": "Microsoft.TextInput", "property": "user.name" }
                    ],
                    "elseActions": [
                        { "$kind": "Microsoft.SendActivity", "activity": "Welcome back" }
                    ]
                }
            ]
        }
    ]
}"#;

#[test]
fn test_conditional_with_two_single_action_branches() {
    let builder = FlowBuilder::default();
    let dialog = builder.parse(IF_ELSE_DIALOG).expect("Failed to parse dialog");

    let flow = builder.transform(&dialog).expect("Dialog should transform");
    let paths: Vec<_> = flow.indexed_nodes().iter().map(|node| node.path()).collect();
    assert_eq!(
        paths,
        vec![
            "triggers[0].actions[0]",
            "triggers[0].actions[0].condition",
            "triggers[0].actions[0].actions[0]",
            "triggers[0].actions[0].elseActions[0]",
        ]
    );

    let graph = builder.layout(&dialog);
    let roles: Vec<_> = graph.nodes().iter().map(|node| node.role()).collect();
    assert_eq!(
        roles,
        vec![
            NodeRole::Condition,
            NodeRole::Choice,
            NodeRole::Action,
            NodeRole::Action
        ]
    );
    assert_eq!(graph.edges().len(), 7);

    let condition_height = layout::NODE_HEIGHT;
    let choice_height = layout::DIAMOND_HEIGHT;
    let tallest_branch = layout::NODE_HEIGHT;
    assert_approx_eq!(
        f32,
        graph.boundary().height(),
        condition_height
            + layout::CHOICE_INTERVAL_Y
            + choice_height
            + layout::BRANCH_INTERVAL_Y
            + tallest_branch
            + layout::MERGE_MARGIN_Y
    );
}

#[test]
fn test_switch_with_three_branches() {
    let builder = FlowBuilder::default();
    let dialog = builder
        .parse(
            r#"{
                "$kind": "Microsoft.OnIntent",
                "actions": [
                    {
                        "$kind": "Microsoft.SwitchCondition",
                        "condition": "turn.intent",
                        "cases": [
                            { "value": "book", "actions": ["booking"] },
                            { "value": "cancel", "actions": ["cancel"] }
                        ],
                        "default": [{ "$kind": "Microsoft.SendActivity" }]
                    }
                ]
            }"#,
        )
        .expect("Failed to parse dialog");

    let graph = builder.layout(&dialog);
    assert_eq!(graph.edges().len(), 9);

    let labels: Vec<_> = graph
        .edges()
        .iter()
        .filter_map(|edge| edge.edge().label())
        .collect();
    assert_eq!(labels, vec!["book", "cancel", "Default"]);
}

#[test]
fn test_navigation_across_branches() {
    let builder = FlowBuilder::default();
    let dialog = builder.parse(IF_ELSE_DIALOG).expect("Failed to parse dialog");
    let graph = builder.layout(&dialog);

    let elements = graph.selector_elements();
    let mut generator = NodeIndexGenerator::default();
    let tab_order = graph.tab_order(&mut generator);
    let cursor = builder.cursor(&elements, &tab_order);

    let condition = "triggers[0].actions[0]";
    let if_action = "triggers[0].actions[0].actions[0]";
    let else_action = "triggers[0].actions[0].elseActions[0]";

    // The choice diamond belongs to the condition, so Down skips it.
    let below = cursor
        .move_focus(condition, Command::Move(Direction::Down))
        .expect("Something lies below the condition");
    assert!(below == if_action || below == else_action);

    assert_eq!(
        cursor.move_focus(if_action, Command::Move(Direction::Right)),
        Some(else_action)
    );
    assert_eq!(
        cursor.move_focus(else_action, Command::Move(Direction::Left)),
        Some(if_action)
    );

    let ids: Vec<_> = tab_order.iter().map(|item| item.id()).collect();
    assert_eq!(
        range_selection(else_action, condition, &ids),
        vec![
            condition,
            "triggers[0].actions[0].condition",
            if_action,
            else_action
        ]
    );
}

#[test]
fn test_navigation_into_choice_diamond() {
    let condition = "triggers[0].actions[0]";
    let choice = "triggers[0].actions[0].condition";

    let builder = FlowBuilder::new(AppConfig::new(
        LayoutConfig::default(),
        NavigationConfig::new(false, false),
    ));
    let dialog = builder.parse(IF_ELSE_DIALOG).expect("Failed to parse dialog");
    let graph = builder.layout(&dialog);
    let elements = graph.selector_elements();

    // The diamond sits straight below the condition box.
    assert_eq!(
        find_next(condition, Direction::Down, &elements),
        Some(choice)
    );

    let cursor = builder.cursor(&elements, &[]);
    assert_eq!(
        cursor.move_focus(condition, Command::Move(Direction::Down)),
        Some(choice)
    );
    assert_eq!(
        cursor.move_focus(choice, Command::Move(Direction::Up)),
        Some(condition)
    );
}
