//! End-to-end import workflows: load, parse, edit, commit, clear

use pretty_assertions::assert_eq;
use slugline_editor::*;
use std::io::Write;

const HEIST: &str = "INT. WAREHOUSE - NIGHT\nShe enters.\nEXT. STREET - DAY\nHe runs.";

const FIVE_SCENES: &str = "\
INT. ONE - DAY
EXT. TWO - NIGHT
INT. THREE - DAWN
EXT. FOUR - DUSK
INT/EXT. FIVE - MORNING
";

const FDX_THREE_SCENES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FinalDraft DocumentType="Script" Version="5">
  <Content>
    <Paragraph Type="Scene Heading"><Text>EXT. HARBOR - DAWN</Text></Paragraph>
    <Paragraph Type="Action"><Text>Gulls.</Text></Paragraph>
    <Paragraph Type="Scene Heading"><Text>INT. KITCHEN</Text></Paragraph>
    <Paragraph Type="Dialogue"><Text>Coffee?</Text></Paragraph>
    <Paragraph Type="Scene Heading"><Text>INT. BEDROOM - NIGHT</Text></Paragraph>
  </Content>
</FinalDraft>"#;

fn parse(name: &str, text: &str) -> ImportSession {
    ImportSession::new()
        .load_text(name, text)
        .unwrap()
        .parse()
        .unwrap()
}

fn numbered(session: &ImportSession) -> Vec<(u32, String)> {
    session
        .scenes()
        .iter()
        .map(|s| (s.scene_number, s.location.clone()))
        .collect()
}

#[test]
fn fountain_two_scenes() {
    let session = parse("heist.fountain", HEIST);
    assert_eq!(session.state(), LifecycleState::Parsed);

    let scenes: Vec<_> = session
        .scenes()
        .iter()
        .map(|s| (s.scene_number, s.int_ext, s.location.as_str(), s.time_of_day))
        .collect();
    assert_eq!(
        scenes,
        vec![
            (1, IntExt::Int, "WAREHOUSE", TimeOfDay::Night),
            (2, IntExt::Ext, "STREET", TimeOfDay::Day),
        ]
    );
}

#[test]
fn fountain_without_headings_fails() {
    let session = parse("opening.fountain", "FADE IN:\nJOHN walks.\n");
    assert_eq!(session.state(), LifecycleState::ParseFailed);
    assert!(session.scenes().is_empty());
    assert_eq!(
        session.error_message(),
        Some("No scene headings found in Fountain document")
    );
}

#[test]
fn fdx_heading_without_time_defaults_to_day() {
    let session = parse("pilot.fdx", FDX_THREE_SCENES);
    assert_eq!(session.state(), LifecycleState::Parsed);
    assert_eq!(session.scenes().len(), 3);

    let kitchen = &session.scenes()[1];
    assert_eq!(kitchen.location, "KITCHEN");
    assert_eq!(kitchen.time_of_day, TimeOfDay::Day);
    assert_eq!(kitchen.scene_number, 2);
}

#[test]
fn delete_second_of_five_renumbers() {
    let session = parse("five.fountain", FIVE_SCENES);
    let second = session.scenes()[1].id;

    let session = session.delete_scene(second).unwrap();
    assert_eq!(
        numbered(&session),
        vec![
            (1, "ONE".to_string()),
            (2, "THREE".to_string()),
            (3, "FOUR".to_string()),
            (4, "FIVE".to_string()),
        ]
    );
}

#[test]
fn malformed_fdx_fails_with_structural_message() {
    let malformed = parse(
        "broken.fdx",
        r#"<FinalDraft><Content><Paragraph Type="Scene Heading"><Text>INT. A</Text></Content></FinalDraft>"#,
    );
    assert_eq!(malformed.state(), LifecycleState::ParseFailed);
    assert!(malformed.scenes().is_empty());

    let message = malformed.error_message().unwrap();
    assert!(message.starts_with("Malformed FDX document"), "{message}");

    let empty = parse("empty.fdx", "<FinalDraft><Content/></FinalDraft>");
    assert_eq!(empty.state(), LifecycleState::ParseFailed);
    assert_ne!(empty.error_message(), Some(message));
}

#[test]
fn edit_touches_only_the_target() {
    let session = parse("five.fountain", FIVE_SCENES);
    let target = session.scenes()[2].id;

    let edited = session
        .edit_scene(target, "BASEMENT", TimeOfDay::Evening)
        .unwrap();

    for (after, before) in edited.scenes().iter().zip(session.scenes()) {
        if after.id == target {
            assert_eq!(after.location, "BASEMENT");
            assert_eq!(after.time_of_day, TimeOfDay::Evening);
            assert_eq!(after.heading, before.heading);
            assert_eq!(after.int_ext, before.int_ext);
            assert_eq!(after.scene_number, before.scene_number);
        } else {
            assert_eq!(after, before);
        }
    }
}

#[test]
fn committed_session_rejects_mutation() {
    let session = parse("five.fountain", FIVE_SCENES).commit().unwrap();
    let before = session.scenes().to_vec();
    let id = before[0].id;

    let attempts = [
        session.edit_scene(id, "ELSEWHERE", TimeOfDay::Night).unwrap_err(),
        session.delete_scene(id).unwrap_err(),
        session.start_edit(id).unwrap_err(),
        session.execute(&DeleteSceneCommand::new(id)).unwrap_err(),
        session.commit().unwrap_err(),
        session.parse().unwrap_err(),
    ];
    for err in attempts {
        assert!(matches!(
            err,
            EditorError::InvalidState {
                state: LifecycleState::Imported,
                ..
            }
        ));
    }

    let rejected = session.delete_scene(id).unwrap_err();
    assert!(rejected.is_post_commit_rejection());
    assert_eq!(session.scenes(), before.as_slice());
}

#[test]
fn rejected_transition_keeps_original_session() {
    let session = parse("heist.fountain", HEIST);
    let snapshot = session.clone();

    let missing = SceneId::new(42);
    assert_eq!(
        session.delete_scene(missing).unwrap_err(),
        EditorError::SceneNotFound { id: missing }
    );
    assert_eq!(session.scenes(), snapshot.scenes());
    assert_eq!(session.state(), snapshot.state());
}

#[test]
fn clear_from_every_state() {
    let loaded = ImportSession::new().load_text("heist.fountain", HEIST).unwrap();
    let parsed = loaded.parse().unwrap();
    let failed = parse("notes.txt", "nothing here");
    let imported = parsed.commit().unwrap();

    for session in [&loaded, &parsed, &failed, &imported] {
        let cleared = session.clear();
        assert_eq!(cleared.state(), LifecycleState::Empty);
        assert!(cleared.scenes().is_empty());
        assert!(cleared.source().is_none());
        assert!(cleared.error_message().is_none());

        // a cleared session accepts a new file
        let again = cleared.load_text("heist.fountain", HEIST).unwrap();
        assert_eq!(again.state(), LifecycleState::Loaded);
    }
}

#[test]
fn batch_command_through_session() {
    let session = parse("five.fountain", FIVE_SCENES);
    let ids: Vec<_> = session.scenes().iter().map(|s| s.id).collect();

    let batch = BatchCommand::new("Trim and rename")
        .add_command(Box::new(DeleteSceneCommand::new(ids[0])))
        .add_command(Box::new(DeleteSceneCommand::new(ids[4])))
        .add_command(Box::new(EditSceneCommand::new(ids[2], "CELLAR", TimeOfDay::Night)));

    let session = session.execute(&batch).unwrap();
    assert_eq!(
        numbered(&session),
        vec![
            (1, "TWO".to_string()),
            (2, "CELLAR".to_string()),
            (3, "FOUR".to_string()),
        ]
    );
}

#[test]
fn failing_batch_leaves_session_unchanged() {
    let session = parse("five.fountain", FIVE_SCENES);
    let first = session.scenes()[0].id;

    let batch = BatchCommand::new("Bad batch")
        .add_command(Box::new(DeleteSceneCommand::new(first)))
        .add_command(Box::new(EditSceneCommand::new(first, "GONE", TimeOfDay::Day)));

    let err = session.execute(&batch).unwrap_err();
    assert!(matches!(err, EditorError::CommandFailed { .. }));
    assert_eq!(session.scenes().len(), 5);
}

#[test]
fn breakdown_reflects_edits() {
    let session = parse("pilot.fdx", FDX_THREE_SCENES);
    let harbor = session.scenes()[0].id;

    let committed = session
        .start_edit(harbor)
        .unwrap()
        .update_draft("MARINA", TimeOfDay::Dusk)
        .unwrap()
        .save_edit()
        .unwrap()
        .commit()
        .unwrap();

    let breakdown = committed.breakdown().unwrap();
    assert_eq!(breakdown.source.format, ScriptFormat::Fdx);
    assert_eq!(breakdown.source.format_label(), "FDX");
    assert_eq!(breakdown.locations(), vec!["MARINA", "KITCHEN", "BEDROOM"]);
    assert_eq!(
        breakdown.count_by_int_ext(),
        vec![(IntExt::Int, 2), (IntExt::Ext, 1), (IntExt::IntExt, 0)]
    );
}

#[test]
fn open_path_detects_format_from_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.FDX");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FDX_THREE_SCENES.as_bytes()).unwrap();
    drop(file);

    let loaded = ImportSession::new().open_path(&path).unwrap();
    let source = loaded.source().unwrap();
    assert_eq!(source.name, "draft.FDX");
    assert_eq!(source.format, ScriptFormat::Fdx);
    assert_eq!(source.size_bytes, FDX_THREE_SCENES.len() as u64);

    let parsed = loaded.parse().unwrap();
    assert_eq!(parsed.scenes().len(), 3);
}

#[test]
fn open_path_respects_size_limit() {
    let mut file = tempfile::Builder::new()
        .suffix(".fountain")
        .tempfile()
        .unwrap();
    file.write_all(FIVE_SCENES.as_bytes()).unwrap();

    let session = ImportSession::with_config(ImportConfig {
        max_source_bytes: 16,
        ..ImportConfig::default()
    });
    let err = session.open_path(file.path()).unwrap_err();
    assert!(matches!(err, EditorError::FileTooLarge { limit: 16, .. }));
}

#[test]
fn reader_source_loads_into_session() {
    let mut reader = std::io::Cursor::new(HEIST.as_bytes());
    let loaded = read_source_from_reader("heist.txt", &mut reader, &ImportConfig::default()).unwrap();

    let session = ImportSession::new().load_source(loaded).unwrap().parse().unwrap();
    assert_eq!(session.source().map(SourceFile::format_label), Some("Plain Text"));
    assert_eq!(session.scenes().len(), 2);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn open_path_async_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heist.fountain");
    std::fs::write(&path, HEIST).unwrap();

    let session = ImportSession::new()
        .open_path_async(&path)
        .await
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(session.scenes().len(), 2);
}

#[cfg(feature = "serde")]
#[test]
fn breakdown_round_trips_through_json() {
    let committed = parse("heist.fountain", HEIST).commit().unwrap();
    let breakdown = committed.breakdown().unwrap();

    let json = serde_json::to_value(&breakdown).unwrap();
    assert_eq!(json["entries"][0]["time_of_day"], "NIGHT");
    assert_eq!(json["entries"][1]["int_ext"], "EXT");

    let back: SceneBreakdown = serde_json::from_value(json).unwrap();
    assert_eq!(back, breakdown);
}

#[cfg(feature = "serde")]
#[test]
fn import_config_loads_from_partial_json() {
    let config: ImportConfig = serde_json::from_str(r#"{ "strict_utf8": true }"#).unwrap();
    assert!(config.strict_utf8);
    assert_eq!(config.max_source_bytes, ImportConfig::default().max_source_bytes);
}
