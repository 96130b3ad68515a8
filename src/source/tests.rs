use super::*;
use crate::config::SourceSettings;
use crate::playlist::Locator;
use std::fs;
use tempfile::tempdir;

const BASE: &str = "https://example.net/music";

fn settings() -> SourceSettings {
    SourceSettings::default()
}

#[test]
fn parse_manifest_accepts_bare_array() {
    let tracks = parse_manifest(r#"["a.mp3", "b.mp3"]"#, BASE, &settings().extensions).unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "a");
    assert_eq!(
        tracks[0].locator,
        Locator::Remote("https://example.net/music/a.mp3".into())
    );
}

#[test]
fn parse_manifest_accepts_tracks_object() {
    let body = r#"{ "tracks": ["one.mp3"], "version": 3 }"#;
    let tracks = parse_manifest(body, BASE, &settings().extensions).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "one");
}

#[test]
fn parse_manifest_filters_extension_case_insensitively_in_order() {
    let body = r#"["a.mp3", "B.MP3", "x.txt"]"#;
    let tracks = parse_manifest(body, BASE, &settings().extensions).unwrap();
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "B"]);
}

#[test]
fn parse_manifest_skips_non_string_entries() {
    let body = r#"["a.mp3", 42, null, {"x": 1}]"#;
    let tracks = parse_manifest(body, BASE, &settings().extensions).unwrap();
    assert_eq!(tracks.len(), 1);
}

#[test]
fn parse_manifest_roots_entries_without_doubling_the_base_dir() {
    let body = r#"["music/a.mp3", "b.mp3"]"#;
    let tracks = parse_manifest(body, BASE, &settings().extensions).unwrap();
    assert_eq!(
        tracks[0].locator,
        Locator::Remote("https://example.net/music/a.mp3".into())
    );
    assert_eq!(
        tracks[1].locator,
        Locator::Remote("https://example.net/music/b.mp3".into())
    );
}

#[test]
fn parse_manifest_keeps_absolute_urls_and_decodes_names() {
    let body = r#"["https://cdn.example.net/My%20Song.mp3"]"#;
    let tracks = parse_manifest(body, BASE, &settings().extensions).unwrap();
    assert_eq!(tracks[0].name, "My Song");
    assert_eq!(
        tracks[0].locator,
        Locator::Remote("https://cdn.example.net/My%20Song.mp3".into())
    );
}

#[test]
fn parse_manifest_rejects_malformed_documents() {
    assert!(parse_manifest("not json", BASE, &settings().extensions).is_err());
    assert!(parse_manifest(r#"{"songs": []}"#, BASE, &settings().extensions).is_err());
    assert!(parse_manifest("42", BASE, &settings().extensions).is_err());
}

#[test]
fn scan_filters_and_sorts_by_case_folded_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = scan(dir.path(), &settings());
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "b"]);
}

#[test]
fn scan_skips_hidden_files_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let tracks = scan(dir.path(), &settings());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "visible");
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let shallow = SourceSettings {
        max_depth: Some(1),
        ..SourceSettings::default()
    };
    let tracks = scan(dir.path(), &shallow);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "root");

    let deep = SourceSettings {
        max_depth: None,
        ..SourceSettings::default()
    };
    assert_eq!(scan(dir.path(), &deep).len(), 2);
}
