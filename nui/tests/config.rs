use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use nui::prelude::*;
use serde_json::json;

// ============================================================================
// Options from JSON
// ============================================================================

#[test]
fn test_invalid_sort_spec_keeps_default_column() {
    let data: Vec<serde_json::Value> = (0..5).map(|i| json!({ "score": 5 - i })).collect();
    let list = List::new(
        ListConfig::new(data)
            .sort(vec![
                SortSpec::new("", "Blank"),
                SortSpec::numeric("score", "Score"),
            ])
            .sort_default(1, SortDirection::Up)
            .viewport_height(300.0),
    );

    assert_eq!(list.sort_state(), Some((0, SortDirection::Up)));
    assert_eq!(list.visible_order(), vec![4, 3, 2, 1, 0]);
}

#[test]
fn test_options_from_json() {
    let options = ListOptions::from_json(
        r#"{
            "search": [{ "prop": "name", "label": "Name" }],
            "sort": [
                { "prop": "name", "label": "Name" },
                { "prop": "size", "label": "Size", "numeric": true }
            ],
            "sort_default": 1,
            "sort_direction_default": "down",
            "footer": { "buttons_right": [{ "id": "ok", "label": "OK" }] },
            "logmode": true,
            "single": true
        }"#,
    )
    .unwrap();

    assert_eq!(options.search, vec![SearchField::new("name", "Name")]);
    assert_eq!(options.sort[1], SortSpec::numeric("size", "Size"));
    assert_eq!(options.sort_default, Some(1));
    assert_eq!(options.sort_direction_default, SortDirection::Down);
    let footer = options.footer.unwrap();
    assert!(footer.buttons_left.is_empty());
    assert_eq!(footer.buttons_right, vec![FooterButton::new("ok", "OK")]);
    assert!(options.logmode);
    assert!(options.single);
    assert!(!options.verbose);
    assert!(!options.touch);
}

#[test]
fn test_empty_json_gives_defaults() {
    let options = ListOptions::from_json("{}").unwrap();
    assert_eq!(options, ListOptions::default());
    assert_eq!(options.sort_direction_default, SortDirection::Up);
}

#[test]
fn test_bad_direction_is_parse_error() {
    let err = ListOptions::from_json(r#"{ "sort_direction_default": "sideways" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid list options"));
}

#[test]
fn test_sort_default_out_of_range() {
    let err = ListOptions::from_json(
        r#"{ "sort": [{ "prop": "name" }], "sort_default": 2 }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::SortDefaultOutOfRange { index: 2, len: 1 }
    ));
    assert_eq!(
        err.to_string(),
        "sort_default 2 is out of range (1 sort columns)"
    );
}

#[test]
fn test_empty_props_rejected() {
    let err = ListOptions::from_json(r#"{ "search": [{ "prop": "" }] }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EmptyProp {
            kind: "search",
            index: 0
        }
    ));

    let err = ListOptions::from_json(r#"{ "sort": [{ "prop": "a" }, { "prop": "" }] }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyProp { kind: "sort", index: 1 }));
}

#[test]
fn test_empty_button_id_rejected() {
    let err = ListOptions::from_json(
        r#"{ "footer": { "buttons_left": [{ "id": "a" }, { "id": "" }] } }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EmptyButtonId {
            side: "left",
            index: 1
        }
    ));
}

#[test]
fn test_direction_reversed() {
    assert_eq!(SortDirection::Up.reversed(), SortDirection::Down);
    assert_eq!(SortDirection::Down.reversed(), SortDirection::Up);
    assert!(SortDirection::Down.is_descending());
}

#[test]
fn test_default_timing() {
    let timing = Timing::default();
    assert_eq!(timing.search_debounce, Duration::from_millis(300));
    assert_eq!(timing.resize_debounce, Duration::from_millis(150));
    assert_eq!(timing.recalibrate_interval, Duration::from_millis(300));
    assert_eq!(timing.wheel_mute, Duration::from_secs(1));
    assert_eq!(timing.frame_interval, Duration::from_millis(16));
    assert_eq!(timing.fixed_threshold, 1000);
}

#[test]
fn test_custom_threshold_switches_mode() {
    let data: Vec<_> = (0..50).map(|i| json!({ "n": i })).collect();
    let list = List::new(ListConfig::new(data).timing(Timing {
        fixed_threshold: 10,
        ..Timing::default()
    }));
    assert_eq!(list.mode(), ScrollMode::Fixed);
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_json_record_fields() {
    let record = json!({ "name": "Ada", "age": 36, "admin": false, "note": null });
    assert_eq!(record.field("name"), Some(Cow::Borrowed("Ada")));
    assert_eq!(record.field("age").as_deref(), Some("36"));
    assert_eq!(record.field("admin").as_deref(), Some("false"));
    assert_eq!(record.field("note"), None);
    assert_eq!(record.field("missing"), None);
    assert_eq!(json!([1, 2]).field("name"), None);
}

#[test]
fn test_map_record_fields() {
    let mut record = HashMap::new();
    record.insert("city".to_string(), "Oslo".to_string());
    assert_eq!(record.field("city").as_deref(), Some("Oslo"));
    assert_eq!(record.field("zip"), None);
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_event_names() {
    let kinds: Vec<ListEventKind<serde_json::Value>> = vec![
        ListEventKind::List {
            reason: ListReason::Reset,
            total: 0,
            shown: 0,
        },
        ListEventKind::Selection {
            count: 0,
            indices: vec![],
            items: vec![],
        },
        ListEventKind::HeightChange { item_height: 30.0 },
        ListEventKind::Visibility { visible: true },
        ListEventKind::Sort {
            column: 0,
            direction: SortDirection::Up,
        },
        ListEventKind::SearchInput {
            term: String::new(),
        },
        ListEventKind::CleanUp,
    ];
    let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
    assert_eq!(
        names,
        vec![
            "list",
            "selection",
            "height_change",
            "visibility",
            "sort",
            "search_input",
            "list_cleanUp"
        ]
    );
}

#[test]
fn test_events_carry_list_id() {
    let list = List::new(ListConfig::new(vec![json!({ "n": 1 })]));
    let mut rx = list.subscribe();
    list.set_visible(false);
    let event = rx.try_recv().unwrap();
    assert_eq!(event.target, list.id());
}

#[test]
fn test_dropped_subscriber_does_not_block_others() {
    let list = List::new(ListConfig::new(vec![json!({ "n": 1 })]));
    let gone = list.subscribe();
    let mut kept = list.subscribe();
    drop(gone);

    list.set_visible(false);
    list.set_visible(true);

    assert!(kept.try_recv().is_ok());
    assert!(kept.try_recv().is_ok());
}

// ============================================================================
// Panic messages
// ============================================================================

fn formatted_panic() {
    panic!("boom {}", 1);
}

fn opaque_panic() {
    std::panic::panic_any(7_u8);
}

#[test]
fn test_extract_panic_message() {
    let payload = std::panic::catch_unwind(formatted_panic).unwrap_err();
    assert_eq!(nui::extract_panic_message(&*payload), "boom 1");

    let payload = std::panic::catch_unwind(opaque_panic).unwrap_err();
    assert_eq!(nui::extract_panic_message(&*payload), "Unknown panic");
}
