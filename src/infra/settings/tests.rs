use super::*;
use crate::shared::fs::test_support::unique_tmp_dir;

fn sample_settings() -> AppSettings {
    AppSettings {
        auto_start: true,
        start_minimized: true,
        window_bounds: WindowBounds {
            width: 1024,
            height: 768,
            x: Some(-40),
            y: Some(12),
        },
        is_maximized: true,
        server_ip: "https://nvr.home.arpa:8971".to_string(),
    }
}

#[test]
fn missing_file_loads_exact_defaults() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");

    assert_eq!(read(&path).expect("read"), None);
    assert_eq!(load(&path), AppSettings::default());
    assert!(!path.exists(), "load must not create the file");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_then_load_round_trips() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    let settings = sample_settings();

    save(&path, &settings);
    assert_eq!(load(&path), settings);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn partial_file_keeps_defaults_for_other_fields() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{"serverIP":"http://x"}"#).expect("write");

    let loaded = load(&path);
    assert_eq!(
        loaded,
        AppSettings {
            server_ip: "http://x".to_string(),
            ..AppSettings::default()
        }
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");

    for content in ["{not json", "", "[1, 2, 3]", "\"http://x\"", "null"] {
        std::fs::write(&path, content).expect("write");
        assert!(read(&path).is_err(), "content {content:?} should not parse");
        assert_eq!(load(&path), AppSettings::default(), "content {content:?}");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mistyped_key_keeps_its_default_and_the_rest_of_the_record() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"autoStart":"yes","startMinimized":true,"isMaximized":null,"serverIP":"http://nvr:5000"}"#,
    )
    .expect("write");

    assert_eq!(
        load(&path),
        AppSettings {
            start_minimized: true,
            server_ip: "http://nvr:5000".to_string(),
            ..AppSettings::default()
        }
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn null_or_mistyped_bounds_keep_the_server_address() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");

    for bounds in ["null", "\"1280x800\"", "[900, 600]"] {
        std::fs::write(
            &path,
            format!(r#"{{"serverIP":"http://nvr:5000","windowBounds":{bounds}}}"#),
        )
        .expect("write");

        let loaded = load(&path);
        assert_eq!(loaded.server_ip, "http://nvr:5000", "bounds {bounds}");
        assert_eq!(loaded.window_bounds, WindowBounds::default(), "bounds {bounds}");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bounds_members_fall_back_individually() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"serverIP":"http://nvr:5000","windowBounds":{"width":900.5,"height":null,"x":-12.4,"y":"top"}}"#,
    )
    .expect("write");

    let loaded = load(&path);
    assert_eq!(loaded.server_ip, "http://nvr:5000");
    assert_eq!(
        loaded.window_bounds,
        WindowBounds {
            width: 901,
            height: DEFAULT_WINDOW_HEIGHT,
            x: Some(-12),
            y: None,
        }
    );

    std::fs::write(&path, r#"{"windowBounds":{"width":0,"height":-5,"x":1e12,"y":40}}"#)
        .expect("write");
    let bounds = load(&path).window_bounds;
    assert_eq!(bounds.size_or_default(), (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
    assert_eq!(bounds.x, None);
    assert_eq!(bounds.y, Some(40));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_keys_are_ignored() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"startMinimized":true,"theme":"dark","windowBounds":{"width":900,"height":600,"depth":3}}"#,
    )
    .expect("write");

    let loaded = load(&path);
    assert!(loaded.start_minimized);
    assert_eq!(loaded.window_bounds.size_or_default(), (900, 600));
    assert_eq!(loaded.server_ip, DEFAULT_SERVER_IP);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn saved_bounds_object_replaces_default_bounds_wholesale() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{"windowBounds":{"x":10,"y":20}}"#).expect("write");

    let bounds = load(&path).window_bounds;
    assert_eq!(bounds.position(), Some((10, 20)));
    assert_eq!(
        bounds.size_or_default(),
        (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_writes_pretty_json_with_wire_key_names() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");

    save(&path, &AppSettings::default());
    let content = std::fs::read_to_string(&path).expect("read");

    assert!(content.contains("\n  \"autoStart\": false"));
    assert!(content.contains("\"startMinimized\""));
    assert!(content.contains("\"isMaximized\""));
    assert!(content.contains("\"serverIP\": \"http://192.168.1.50:5000\""));
    assert!(!content.contains("\"x\""), "unknown position is omitted");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_overwrites_previous_contents_wholesale() {
    let dir = unique_tmp_dir("settings");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{"serverIP":"http://old","legacyKey":true}"#).expect("write");

    let mut settings = load(&path);
    settings.auto_start = true;
    save(&path, &settings);

    let content = std::fs::read_to_string(&path).expect("read");
    assert!(!content.contains("legacyKey"));
    assert_eq!(load(&path).server_ip, "http://old");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_failure_is_swallowed() {
    let dir = unique_tmp_dir("settings");
    // A directory in the way of the target file makes the final rename fail.
    let path = dir.join("config.json");
    std::fs::create_dir_all(path.join("occupied")).expect("create dir");

    assert!(write(&path, &sample_settings()).is_err());
    save(&path, &sample_settings());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_dimensions_fall_back_to_default_size() {
    let bounds = WindowBounds {
        width: 0,
        height: 600,
        x: Some(5),
        y: None,
    };
    assert_eq!(bounds.size_or_default(), (DEFAULT_WINDOW_WIDTH, 600));
    assert_eq!(bounds.position(), None);
}
