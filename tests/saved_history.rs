use anyhow::{anyhow, Result};
use hamsterhouse::catalog;
use hamsterhouse::codec::{append_to_saved_history, read_saved_history};
use hamsterhouse::config::Config;
use hamsterhouse::design::DesignModel;
use hamsterhouse::host::{KeyValueStore, MemoryClipboard};
mod common;

#[test]
fn appends_keep_order_and_count() {
    let mut history: Option<String> = None;
    let mut expected = Vec::new();
    for (i, material) in ["grass", "dirt", "sand", "stone", "dirt"].iter().enumerate() {
        let mut model = DesignModel::new();
        model.set_layer("base", material);
        if i % 2 == 0 {
            model.add_furnishing("eating", "water-bottle");
        }
        let design = model.snapshot();
        history = Some(append_to_saved_history(history.as_deref(), &design));
        expected.push(design);
    }
    let saved = read_saved_history(history.as_deref());
    assert_eq!(saved.len(), 5);
    assert_eq!(saved, expected);
}

#[test]
fn corrupt_history_restarts_with_the_new_design() {
    let mut model = DesignModel::new();
    model.add_furnishing("bedroom", "hideout");
    let design = model.snapshot();

    for corrupt in ["{not json", "{\"layers\":{}}", "42", "\0\0\0"] {
        let next = append_to_saved_history(Some(corrupt), &design);
        let saved = read_saved_history(Some(&next));
        assert_eq!(saved, vec![design.clone()], "history was {:?}", corrupt);
    }
}

#[test]
fn legacy_px_positions_are_read_as_numbers() {
    let text = r#"[{"layers":{"base":"dirt"},"furnishings":{"bedroom":["tunnel"]},
        "furnishingPositions":{"tunnel":{"x":"120px","y":"40px"}},
        "timestamp":"2024-05-01T10:00:00Z"}]"#;
    let saved = read_saved_history(Some(text));
    assert_eq!(saved.len(), 1);
    let at = saved[0].furnishing_positions.as_ref().unwrap()["tunnel"];
    assert_eq!((at.x, at.y), (120.0, 40.0));
    assert!(saved[0].timestamp.is_some());
}

#[test]
fn save_records_positions_and_timestamp() {
    let mut s = common::session();
    s.controller.start(None);
    s.controller.toggle_furnishing("bedroom", "soft-bed", true);
    s.controller.toggle_furnishing("outside", "digging-pit", true);
    assert!(s.controller.save().is_some());
    s.controller.toggle_furnishing("outside", "digging-pit", false);
    assert!(s.controller.save().is_some());

    let key = &s.controller.config().storage.history_key;
    let saved = read_saved_history(s.store.get(key).as_deref());
    assert_eq!(saved.len(), 2);
    let first = saved[0].furnishing_positions.as_ref().unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.contains_key("soft-bed"));
    let second = saved[1].furnishing_positions.as_ref().unwrap();
    assert_eq!(second.keys().collect::<Vec<_>>(), vec!["soft-bed"]);
    assert!(saved.iter().all(|d| d.timestamp.is_some()));
    assert!(saved[0].timestamp <= saved[1].timestamp);
}

#[test]
fn save_shows_feedback_then_restores_label() {
    let mut s = common::session();
    s.controller.save();
    let button = s.controller.sync().scaffold().save_button;
    let surface = s.controller.sync().surface();
    assert_eq!(surface.text(button), Some(catalog::SAVED_LABEL));
    assert_eq!(s.controller.spoken().last().map(String::as_str), Some(catalog::DESIGN_SAVED));

    s.controller.advance(common::ms(2000));
    let surface = s.controller.sync().surface();
    assert_eq!(surface.text(button), Some(catalog::SAVE_LABEL));
    assert_eq!(surface.tag(button, "feedback"), None);
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("store is read-only, cannot write {}", key))
    }
}

#[test]
fn failed_write_is_reported_not_fatal() {
    let mut c = common::controller_with_store(
        Config::default(),
        vec![0.5],
        MemoryClipboard::new(),
        Box::new(ReadOnlyStore),
    );
    assert!(c.save().is_none());
    assert_eq!(c.spoken(), &[catalog::SAVE_FAILED.to_string()]);
    let button = c.sync().scaffold().save_button;
    assert_eq!(c.sync().surface().text(button), Some(catalog::SAVE_LABEL));
    assert!(c.select_layer("flooring", "fleece"));
}
