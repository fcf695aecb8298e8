use std::sync::Mutex;

use moneyball_lambda_rust::error::{LoadError, MappedBatch, MappingError};
use moneyball_lambda_rust::handler::persist_batch;
use moneyball_lambda_rust::loader::{BulkLoader, DATASET, WriteDisposition, persist, table_name, to_ndjson};
use moneyball_lambda_rust::mastered::{Event, Season};

/// Keeps everything it is asked to stage and load.
#[derive(Default)]
struct RecordingLoader {
    writes: Mutex<Vec<(String, Vec<u8>)>>,
    loads: Mutex<Vec<(String, String, WriteDisposition)>>,
}

impl BulkLoader for RecordingLoader {
    fn write(&self, bytes: &[u8], destination: &str) -> Result<(), LoadError> {
        self.writes.lock().unwrap().push((destination.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn load_table(&self, source: &str, table: &str, disposition: WriteDisposition) -> Result<(), LoadError> {
        self.loads
            .lock()
            .unwrap()
            .push((source.to_string(), table.to_string(), disposition));
        Ok(())
    }
}

fn event(game_id: &str) -> Event {
    Event {
        game_id: game_id.to_string(),
        league: "NBA".to_string(),
        season: Season { year: 2019, stage: 2 },
        ..Default::default()
    }
}

#[test]
fn table_names_live_in_the_boxscores_dataset() {
    assert_eq!(DATASET, "boxscores");
    assert_eq!(table_name("NBA"), "boxscoresNBA");
    assert_eq!(table_name("WNBA"), "boxscoresWNBA");
}

#[test]
fn ndjson_has_one_compact_record_per_line() {
    let bytes = to_ndjson(&[event("1"), event("2")]).expect("serialize");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.ends_with('\n'));

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "text was: {}", text);
    for (line, id) in lines.iter().zip(["1", "2"]) {
        let value: serde_json::Value = serde_json::from_str(line).expect("line is json");
        assert_eq!(value["gameId"], serde_json::json!(id));
        assert_eq!(value["season"]["seasonYear"], serde_json::json!(2019));
    }

    assert!(to_ndjson::<Event>(&[]).expect("serialize").is_empty());
}

#[test]
fn persist_writes_then_loads() {
    let loader = RecordingLoader::default();
    let n = persist(
        &loader,
        &[event("1")],
        "boxscores/nba/scoreboard.ndjson",
        "boxscoresNBA",
        WriteDisposition::Append,
    )
    .expect("persist");
    assert_eq!(n, 1);

    let writes = loader.writes.lock().unwrap();
    assert_eq!(writes[0].0, "boxscores/nba/scoreboard.ndjson");
    let loads = loader.loads.lock().unwrap();
    assert_eq!(
        loads[0],
        (
            "boxscores/nba/scoreboard.ndjson".to_string(),
            "boxscoresNBA".to_string(),
            WriteDisposition::Append
        )
    );
}

#[test]
fn partial_batch_is_loaded_and_reported() {
    let loader = RecordingLoader::default();
    let batch = MappedBatch {
        items: vec![event("1"), event("2")],
        error: Some(MappingError::NoCompetition {
            event_id: "3".to_string(),
        }),
    };
    let summary = persist_batch("Scoreboard", &batch, &loader, "dest", "boxscoresNBA", WriteDisposition::Append);

    assert!(summary.contains("loaded 2 records"), "summary was: {}", summary);
    assert!(summary.contains("partial"), "summary was: {}", summary);
    let staged = String::from_utf8(loader.writes.lock().unwrap()[0].1.clone()).unwrap();
    assert_eq!(staged.lines().count(), 2);
}

#[test]
fn empty_batch_is_skipped() {
    let loader = RecordingLoader::default();
    let batch: MappedBatch<Event> = MappedBatch {
        items: Vec::new(),
        error: None,
    };
    let summary = persist_batch("Schedule", &batch, &loader, "dest", "boxscoresNBA", WriteDisposition::Truncate);
    assert!(summary.contains("skipped"), "summary was: {}", summary);
    assert!(loader.writes.lock().unwrap().is_empty());
}
