use std::fs::File;
use std::time::{Duration, Instant};

use log::info;
use nui::prelude::*;
use serde_json::{Value, json};
use simplelog::{Config, LevelFilter, WriteLogger};

const RECORDS: usize = 1500;
const ROW_HEIGHT: f32 = 24.0;

const OPTIONS: &str = r#"{
    "search": [
        { "prop": "name", "label": "Name" },
        { "prop": "city", "label": "City" }
    ],
    "sort": [
        { "prop": "name", "label": "Name" },
        { "prop": "score", "label": "Score", "numeric": true }
    ],
    "sort_default": 1,
    "sort_direction_default": "down",
    "footer": {
        "buttons_left": [{ "id": "export", "label": "Export" }],
        "buttons_right": [{ "id": "close", "label": "Close" }]
    },
    "verbose": true
}"#;

fn records(count: usize) -> Vec<Value> {
    const CITIES: [&str; 5] = ["Lisbon", "Oslo", "Quito", "Osaka", "Perth"];
    (0..count)
        .map(|i| {
            json!({
                "name": format!("user-{i:04}"),
                "city": CITIES[i % CITIES.len()],
                "score": (i * 37) % 1000,
            })
        })
        .collect()
}

fn render_row(record: &Value, doc: &mut Document) -> Option<Rendered> {
    let name = record.field("name")?.into_owned();
    let city = record.field("city").unwrap_or_default().into_owned();
    let node = doc.create(
        Element::box_()
            .class("row")
            .height(ROW_HEIGHT)
            .content(format!("{name} ({city})")),
    );
    Some(Rendered::new(node).deferred(Duration::from_millis(50), |node, doc| {
        if let Some(element) = doc.get_mut(node) {
            element.add_class("row-ready");
        }
    }))
}

#[tokio::main]
async fn main() {
    let log_file = File::create("nui-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let options = match ListOptions::from_json(OPTIONS) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    let list = List::new(
        ListConfig::new(records(RECORDS))
            .options(options)
            .render(render_row)
            .viewport_height(480.0),
    );
    let mut events = list.subscribe();
    let frames = spawn_frame_loop(&list);

    // Let the loop render and measure the rows
    tokio::time::sleep(Duration::from_millis(400)).await;
    info!(
        "{} rows, {:?} scrolling, item height {}",
        list.len(),
        list.mode(),
        list.item_height()
    );

    list.wheel(2400.0, Instant::now());
    tokio::time::sleep(Duration::from_millis(50)).await;
    list.scroll_to_index(750);
    tokio::time::sleep(Duration::from_millis(50)).await;

    list.search_input("os", Instant::now());
    tokio::time::sleep(Duration::from_millis(400)).await;

    list.set_sort(0, SortDirection::Up);
    list.click(2, Modifiers::new());
    list.click(5, Modifiers::shift());
    list.click(8, Modifiers::ctrl());
    tokio::time::sleep(Duration::from_millis(50)).await;

    let status = list
        .surface()
        .and_then(|surface| surface.status)
        .and_then(|status| list.with_document(|doc| doc.text_content(status)));

    list.destroy();
    frames.join().await;

    let mut received = 0;
    while let Ok(event) = events.try_recv() {
        received += 1;
        info!("{}: {}", event.target, event.kind.name());
    }

    println!("records:   {RECORDS}");
    println!("status:    {}", status.unwrap_or_default());
    println!("events:    {received}");
    println!("log:       nui-demo.log");
}
