use std::time::Duration;

use nui::prelude::*;
use serde_json::{Value, json};

fn list_of(n: usize) -> List<Value> {
    let data: Vec<Value> = (0..n).map(|i| json!({ "name": format!("row {i}") })).collect();
    List::new(
        ListConfig::new(data)
            .render(|record, doc| {
                let name = record.field("name")?.into_owned();
                Some(Rendered::new(
                    doc.create(Element::box_().height(30.0).content(name)),
                ))
            })
            .viewport_height(300.0),
    )
}

#[tokio::test]
async fn test_frame_loop_renders() {
    let list = list_of(100);
    let frames = spawn_frame_loop(&list);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(list.rendered_range(), 0..20);
    list.scroll_to(600.0);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(list.rendered_range(), 14..34);

    frames.stop();
    frames.join().await;
}

#[tokio::test]
async fn test_frame_loop_stop_leaves_list_alive() {
    let list = list_of(10);
    let frames = spawn_frame_loop(&list);
    let token = frames.token();

    frames.stop();
    tokio::time::timeout(Duration::from_secs(1), frames.join())
        .await
        .unwrap();

    assert!(token.is_cancelled());
    assert!(!list.is_destroyed());
    assert!(!list.cancellation_token().is_cancelled());
}

#[tokio::test]
async fn test_destroy_ends_frame_loop() {
    let list = list_of(10);
    let frames = spawn_frame_loop(&list);
    tokio::time::sleep(Duration::from_millis(50)).await;

    list.destroy();

    tokio::time::timeout(Duration::from_secs(1), frames.join())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_debounce_through_frame_loop() {
    let list = list_of(100);
    let mut rx = list.subscribe();
    let frames = spawn_frame_loop(&list);

    list.search_input("row 9", std::time::Instant::now());
    assert_eq!(list.filtered_len(), 100);
    tokio::time::sleep(Duration::from_millis(500)).await;

    // "row 9" and 90-99
    assert_eq!(list.filtered_len(), 11);
    let mut reasons = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let ListEventKind::List { reason, .. } = event.kind {
            reasons.push(reason);
        }
    }
    assert_eq!(reasons, vec![ListReason::Filtered]);

    frames.stop();
    frames.join().await;
}
