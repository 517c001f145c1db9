#![cfg(feature = "serde")]
use std::fs;
use std::path::PathBuf;

use parshift::config::{ConfigError, Entry, Registry};
use parshift::error::ErrorKind;
use parshift::mesh::MeshUnit;
use parshift::{Format, Parameter, Point, Transformer, TransformerBuilder};

const SEMIDYNA: &str = "\
SemiDynaEXE2023
\n\n\n\n\n\n\n\n\n\n\n\n\n
MeshCode dB(sec)  dL(sec) dH(m)
54401005  -0.00622   0.01516   0.09460
54401055  -0.00620   0.01529   0.08972
54401100  -0.00663   0.01492   0.10374
54401150  -0.00664   0.01506   0.10087
";

fn entry(key: &str, path: &str) -> Entry {
    Entry {
        key: key.to_string(),
        path: PathBuf::from(path),
        format: None,
        description: None,
    }
}

#[test]
fn test_missing_registry_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::load(dir.path().join("parshift.toml")).unwrap();
    assert!(registry.entries().is_empty());
    assert_eq!(registry.base(), dir.path());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parshift.toml");
    fs::write(dir.path().join("SemiDyna2023.par"), SEMIDYNA).unwrap();

    let mut registry = Registry::load(&path).unwrap();
    registry.add(entry("semidyna", "SemiDyna2023.par")).unwrap();
    registry
        .add(Entry {
            description: Some("my parameter".to_string()),
            ..entry("mine", "SemiDyna2023.par")
        })
        .unwrap();
    registry.save().unwrap();

    let registry = Registry::load(&path).unwrap();
    assert_eq!(registry.keys().collect::<Vec<_>>(), ["semidyna", "mine"]);

    let tf = registry.load_transformer("semidyna").unwrap();
    assert_eq!(tf.unit(), MeshUnit::Five);
    assert_eq!(tf.parameter().len(), 4);
    assert_eq!(
        tf.parameter().get(&54401055),
        Some(&Parameter::new(-0.0062, 0.01529, 0.08972))
    );
    assert!(tf.description().is_some_and(|s| s.starts_with("SemiDynaEXE2023\n")));

    let actual = tf
        .forward(&Point::new(36.10377479, 140.087855041, 2.34))
        .unwrap();
    assert_eq!(
        actual,
        Point::new(36.103773017086695, 140.08785924333452, 2.4363138578103)
    );

    let tf = registry.load_transformer("mine").unwrap();
    assert_eq!(tf.description(), Some("my parameter"));
}

#[test]
fn test_json_entry() {
    let dir = tempfile::tempdir().unwrap();
    let tf = TransformerBuilder::new(MeshUnit::One)
        .parameter(54401027, (1.0, 2.0, 3.0))
        .description("json")
        .build();
    fs::write(
        dir.path().join("parameter.json"),
        serde_json::to_string(&tf).unwrap(),
    )
    .unwrap();

    let mut registry = Registry::load(dir.path().join("parshift.toml")).unwrap();
    registry.add(entry("json", "parameter.json")).unwrap();

    assert_eq!(registry.load_transformer("json").unwrap(), tf);
}

#[test]
fn test_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parshift.toml");

    fs::write(&path, "[[file]]\nkey = 1\n").unwrap();
    assert!(matches!(
        Registry::load(&path),
        Err(ConfigError::Deserialize { .. })
    ));

    fs::write(dir.path().join("broken.par"), "header only\n").unwrap();
    let mut registry = Registry::load(dir.path().join("other.toml")).unwrap();
    registry
        .add(Entry {
            format: Some(Format::SemiDynaEXE),
            ..entry("broken", "broken.par")
        })
        .unwrap();
    registry.add(entry("absent", "absent.par")).unwrap();

    assert!(matches!(
        registry.load_transformer("broken"),
        Err(ConfigError::Par { .. })
    ));
    assert!(matches!(
        registry.load_transformer("absent"),
        Err(ConfigError::Io { .. })
    ));
    assert!(matches!(
        registry.load_transformer("unknown"),
        Err(ConfigError::KeyNotFound { .. })
    ));
}

/// Makes a registry of `semidyna` (the fixture), `shift` (constant correction
/// on the same cell) and `elsewhere` (a grid not covering the fixture cell).
fn transform_registry(dir: &tempfile::TempDir) -> Registry {
    fs::write(dir.path().join("SemiDyna2023.par"), SEMIDYNA).unwrap();

    let shift = TransformerBuilder::new(MeshUnit::Five)
        .parameters(
            [54401005_u32, 54401055, 54401100, 54401150].map(|code| (code, (0.1, 0.2, 0.3))),
        )
        .build();
    fs::write(
        dir.path().join("shift.json"),
        serde_json::to_string(&shift).unwrap(),
    )
    .unwrap();

    let elsewhere = TransformerBuilder::new(MeshUnit::Five)
        .parameter(36230600, (1.0, 1.0, 1.0))
        .build();
    fs::write(
        dir.path().join("elsewhere.json"),
        serde_json::to_string(&elsewhere).unwrap(),
    )
    .unwrap();

    let mut registry = Registry::load(dir.path().join("parshift.toml")).unwrap();
    registry.add(entry("semidyna", "SemiDyna2023.par")).unwrap();
    registry.add(entry("shift", "shift.json")).unwrap();
    registry.add(entry("elsewhere", "elsewhere.json")).unwrap();
    registry
}

fn load(registry: &Registry, key: &str) -> Transformer {
    registry.load_transformer(key).unwrap()
}

#[test]
fn test_transform_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let registry = transform_registry(&dir);
    let (semidyna, shift) = (load(&registry, "semidyna"), load(&registry, "shift"));

    let origin = Point::new(36.10377479, 140.087855041, 2.34);
    let keys = ["semidyna", "shift"];

    let result = registry.transform([origin], &keys, false, false).unwrap();
    let expected = shift.forward(&semidyna.forward(&origin).unwrap()).unwrap();
    assert_eq!(result.len(), 1);
    assert!(result[0].is_ok());
    assert_eq!(result[0].point, expected);

    // backward applies in reverse order
    let result = registry.transform([origin], &keys, true, false).unwrap();
    let expected = semidyna
        .backward(&shift.backward(&origin).unwrap())
        .unwrap();
    assert!(result[0].is_ok());
    assert_eq!(result[0].point, expected);

    let result = registry.transform([origin], &keys, true, true).unwrap();
    let expected = semidyna
        .backward_safe(&shift.backward_safe(&origin).unwrap())
        .unwrap();
    assert_eq!(result[0].point, expected);
}

#[test]
fn test_transform_failure() {
    let dir = tempfile::tempdir().unwrap();
    let registry = transform_registry(&dir);
    let semidyna = load(&registry, "semidyna");

    let inside = Point::new(36.10377479, 140.087855041, 2.34);
    let outside = Point::new(35.0, 135.0, 0.0);
    let points = [inside, outside, inside];
    let keys = ["semidyna", "elsewhere"];

    // fails at the second transformer, keeping the first result
    let result = registry.transform(points, &keys, false, false).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].point, semidyna.forward(&inside).unwrap());
    assert_eq!(result[0].error.len(), 1);
    assert_eq!(result[0].error[0].key, "elsewhere");
    assert!(!result[0].error[0].message.is_empty());

    // fails at the first transformer, and continues to the next point
    assert_eq!(result[1].point, outside);
    assert_eq!(result[1].error.len(), 1);
    assert_eq!(result[1].error[0].key, "semidyna");
    assert_eq!(
        result[1].error[0].message,
        semidyna.forward(&outside).unwrap_err().to_string()
    );
    assert_eq!(result[2], result[0]);

    // backward starts from the last key, the point stays untouched
    let result = registry.transform([inside], &keys, true, false).unwrap();
    assert_eq!(result[0].point, inside);
    assert_eq!(result[0].error[0].key, "elsewhere");
    assert_eq!(
        load(&registry, "elsewhere")
            .backward(&inside)
            .unwrap_err()
            .kind(),
        ErrorKind::ParameterNotFound
    );
}

#[test]
fn test_transform_json() {
    let dir = tempfile::tempdir().unwrap();
    let registry = transform_registry(&dir);

    let input: Vec<Point> =
        serde_json::from_str(r#"[{"latitude":35.0,"longitude":135.0,"altitude":1.5}]"#).unwrap();
    let result = registry.transform(input, &["semidyna"], false, false).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json[0]["latitude"], 35.0);
    assert_eq!(json[0]["longitude"], 135.0);
    assert_eq!(json[0]["altitude"], 1.5);
    assert_eq!(json[0]["error"][0]["key"], "semidyna");

    let inside = Point::new(36.10377479, 140.087855041, 2.34);
    let result = registry.transform([inside], &["semidyna"], false, false).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json[0].get("error").is_none());
    assert_eq!(json[0]["latitude"], 36.103773017086695);
}

#[test]
fn test_transform_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let registry = transform_registry(&dir);

    let origin = Point::new(36.10377479, 140.087855041, 2.34);
    assert!(matches!(
        registry.transform([origin], &["semidyna", "unknown"], false, false),
        Err(ConfigError::KeyNotFound { key }) if key == "unknown"
    ));
}
