use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use yaml2ducky::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_tree(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    for dir in fs::read_dir(root).unwrap() {
        let dir = dir.unwrap().path();
        for file in fs::read_dir(&dir).unwrap() {
            let file = file.unwrap().path();
            let key = format!(
                "{}/{}",
                dir.file_name().unwrap().to_string_lossy(),
                file.file_name().unwrap().to_string_lossy()
            );
            files.insert(key, fs::read_to_string(&file).unwrap());
        }
    }
    files
}

fn generate_into(input: &Path, out: &Path) -> Result<GenerateReport> {
    let mut session = CompileSession::new();
    generate_profile(input, out, &mut session, None, false)
}

#[test]
fn test_foxhole_profile_set() {
    let out = TempDir::new().unwrap();
    let report = generate_into(&fixture("foxhole.yaml"), out.path()).expect("Failed to generate");

    assert_eq!(report.written.len(), 3);
    assert!(report.is_clean());

    let tree = read_tree(out.path());

    assert_eq!(
        tree["Foxhole/key1.txt"],
        "DEFAULTDELAY 0\nKEYDOWN CTRL\nGOTO_PROFILE Foxhole-Ctrl\n"
    );
    assert_eq!(tree["Foxhole/key1-release.txt"], "DEFAULTDELAY 0\nKEYUP CTRL\n");
    assert_eq!(tree["Foxhole/key2.txt"], "DEFAULTDELAY 0\nKEYDOWN w\n");
    assert_eq!(tree["Foxhole/key2-release.txt"], "DEFAULTDELAY 0\nKEYUP w\n");
    assert_eq!(tree["Foxhole/key6.txt"], "DEFAULTDELAY 0\nKEYDOWN q\n");
    assert_eq!(tree["Foxhole/key20.txt"], "DEFAULTDELAY 0\nSTRING gg wp\n");
    assert_eq!(tree["Foxhole/key22.txt"], "DEFAULTDELAY 0\nMK_MUTE\n");
    assert!(!tree.contains_key("Foxhole/key4.txt"));

    assert_eq!(
        tree["Foxhole/config.txt"],
        "\
z1 Ctrl
dr 1
z2 Fwd
z3 Run
z6 Lean
z20 GG
z21 Vol-
z22 Mute
z23 Vol+
BG_COLOR 20 20 20
IS_LANDSCAPE 0
SWCOLOR_1 128 0 255
DIM_UNUSED_KEYS 1
KEYDOWN_COLOR 255 255 255
ab 20
"
    );

    // The layer side of the Ctrl switcher
    assert_eq!(tree["Foxhole-Ctrl/key1.txt"], "DEFAULTDELAY 0\nKEYDOWN CTRL\n");
    assert_eq!(
        tree["Foxhole-Ctrl/key1-release.txt"],
        "DEFAULTDELAY 0\nKEYUP CTRL\nGOTO_PROFILE Foxhole\n"
    );
    assert_eq!(tree["Foxhole-Ctrl/key12.txt"], "DEFAULTDELAY 0\nCTRL s\n");
    assert_eq!(
        tree["Foxhole-Ctrl/key15.txt"],
        "DEFAULTDELAY 0\nGOTO_PROFILE Foxhole-Map\n"
    );
    assert!(tree["Foxhole-Ctrl/config.txt"].starts_with("z1 Ctrl\ndr 1\n"));
    assert!(tree["Foxhole-Ctrl/config.txt"].contains("BG_COLOR 60 0 90\n"));
    assert!(!tree["Foxhole-Ctrl/config.txt"].contains("DIM_UNUSED_KEYS"));

    // Map is entered by toggle from the Ctrl layer and uses the oriented template
    assert_eq!(
        tree["Foxhole-Map/key15.txt"],
        "DEFAULTDELAY 0\nGOTO_PROFILE Foxhole-Ctrl\n"
    );
    assert!(!tree.contains_key("Foxhole-Map/key15-release.txt"));
    assert_eq!(tree["Foxhole-Map/key2.txt"], "DEFAULTDELAY 0\nUP\n");
    assert_eq!(tree["Foxhole-Map/key6.txt"], "DEFAULTDELAY 0\nRIGHT\n");
    assert!(tree["Foxhole-Map/config.txt"].contains("z1 Close\n"));
}

#[test]
fn test_generation_is_idempotent() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    generate_into(&fixture("foxhole.yaml"), first.path()).unwrap();
    generate_into(&fixture("foxhole.yaml"), second.path()).unwrap();
    assert_eq!(read_tree(first.path()), read_tree(second.path()));

    // Regenerating over an existing tree replaces it with the same bytes
    generate_into(&fixture("foxhole.yaml"), first.path()).unwrap();
    assert_eq!(read_tree(first.path()), read_tree(second.path()));
}

#[test]
fn test_label_only_key_writes_empty_script() {
    let outputs = compile_profile_str(
        r#"
profile:
  name: Hints
  keys:
    1: { label: [Ctrl], color: [255, 0, 0] }
"#,
        None,
    )
    .unwrap();

    let files = outputs[0].files();
    assert_eq!(
        files,
        vec![
            ("config.txt".to_string(), "z1 Ctrl\nSWCOLOR_1 255 0 0\n".to_string()),
            ("key1.txt".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_validation_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("long.yaml");
    fs::write(
        &input,
        "profile:\n  name: Short\n  keys:\n    1: [A, \"TooLong\"]\n",
    )
    .unwrap();

    let out = dir.path().join("out");
    fs::create_dir_all(out.join("Short")).unwrap();
    fs::write(out.join("Short").join("key1.txt"), "old").unwrap();

    let result = generate_into(&input, &out);
    assert!(matches!(
        result,
        Err(CompileError::Validation(ValidationError::LabelLineTooLong { key: 1, .. }))
    ));

    let entries: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(out.join("Short").join("key1.txt")).unwrap(), "old");
}

#[test]
fn test_dry_run_writes_nothing() {
    let out = TempDir::new().unwrap();
    let mut session = CompileSession::new();
    let report =
        generate_profile(&fixture("foxhole.yaml"), out.path(), &mut session, None, true).unwrap();

    assert_eq!(report.outputs.len(), 3);
    assert!(report.written.is_empty());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_label_length_boundaries() {
    let compile = |orientation: &str, label: &str| {
        let yaml = format!(
            "profile:\n  name: L\n  config:\n    orientation: {}\n  keys:\n    1: [A, \"{}\"]\n",
            orientation, label
        );
        let outputs = compile_profile_str(&yaml, None).unwrap();
        validate::validate_outputs(&outputs, None)
    };

    assert!(compile("portrait", "Abcde").is_ok());
    assert!(matches!(
        compile("portrait", "Abcdef"),
        Err(ValidationError::LabelLineTooLong { len: 6, max: 5, .. })
    ));
    assert!(compile("landscape", "Abcd").is_ok());
    assert!(matches!(
        compile("landscape", "Abcde"),
        Err(ValidationError::LabelLineTooLong { len: 5, max: 4, .. })
    ));
}

#[test]
fn test_name_too_long() {
    let outputs = compile_profile_str(
        "profile:\n  name: ThisNameIsWayTooLong\n  keys:\n    1: A\n",
        None,
    )
    .unwrap();

    match validate::validate_outputs(&outputs, None) {
        Err(ValidationError::NameTooLong { name, len, max, .. }) => {
            assert_eq!(name, "ThisNameIsWayTooLong");
            assert_eq!(len, 20);
            assert_eq!(max, 16);
        }
        other => panic!("Expected NameTooLong, got {:?}", other),
    }
}

#[test]
fn test_duplicate_output_names() {
    let outputs = compile_profile_str(
        "profile:\n  name: Same\n  layers:\n    a:\n      name: Same\n",
        None,
    )
    .unwrap();

    assert_eq!(
        validate::validate_outputs(&outputs, None),
        Err(ValidationError::DuplicateName {
            name: "Same".to_string()
        })
    );
}

fn index_with(count: usize) -> ProfileIndex {
    let content: String = (1..=count).map(|n| format!("{} Existing{}\n", n, n)).collect();
    ProfileIndex::parse(&content)
}

#[test]
fn test_profile_count_boundary() {
    let full = index_with(64);
    assert_eq!(full.len(), 64);

    // Nothing new: every output is already on the card
    let existing = compile_profile_str("profile:\n  name: Existing7\n", None).unwrap();
    assert!(validate::validate_outputs(&existing, Some(&full)).is_ok());

    let fresh = compile_profile_str("profile:\n  name: Brand New\n", None).unwrap();
    assert_eq!(
        validate::validate_outputs(&fresh, Some(&full)),
        Err(ValidationError::ProfileCountExceeded {
            existing: 64,
            new: 1,
            max: 64,
        })
    );

    assert!(validate::validate_outputs(&fresh, Some(&index_with(63))).is_ok());
}

#[test]
fn test_unresolved_reference_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("refs.yaml");
    fs::write(
        &input,
        r#"
profile:
  name: Refs
  keys:
    1: { script: "GOTO_PROFILE Welcome" }
    2: { script: "GOTO_PROFILE Nowhere" }
    3: { layer: fn }
  layers:
    fn: {}
"#,
    )
    .unwrap();

    let index_path = dir.path().join("profile_info.txt");
    fs::write(&index_path, "1 Welcome\n2 Firefox\n").unwrap();

    let mut session = CompileSession::with_index_file(&index_path);
    let report =
        generate_profile(&input, &dir.path().join("out"), &mut session, None, false).unwrap();

    assert!(!report.is_clean());
    assert_eq!(
        report.unresolved,
        vec![UnresolvedReference {
            profile: "Refs".to_string(),
            file: "key2.txt".to_string(),
            name: "Nowhere".to_string(),
        }]
    );
    // Output is still written
    assert_eq!(report.written.len(), 2);
}

#[test]
fn test_directory_collision_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("slash.yaml");
    fs::write(
        &input,
        "profile:\n  name: A/B\n  keys:\n    1: A\n  layers:\n    x:\n      name: A_B\n",
    )
    .unwrap();

    let out = dir.path().join("out");
    match generate_into(&input, &out) {
        Err(CompileError::Validation(ValidationError::DirectoryCollision { first, second, dir })) => {
            assert_eq!(first, "A/B");
            assert_eq!(second, "A_B");
            assert_eq!(dir, "A_B");
        }
        other => panic!("Expected DirectoryCollision, got {:?}", other),
    }
    assert!(!out.exists());
}

#[test]
fn test_non_ascii_label_rejected() {
    let outputs = compile_profile_str(
        "profile:\n  name: U\n  keys:\n    1: [A, \"ÄÖÜ→✓\"]\n",
        None,
    )
    .unwrap();

    assert!(matches!(
        validate::validate_outputs(&outputs, None),
        Err(ValidationError::NonAsciiLabel { key: 1, .. })
    ));
}
