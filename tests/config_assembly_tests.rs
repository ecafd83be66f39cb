//! Integration tests for settings assembly.
//!
//! Tests the full file pipeline through the public API:
//! - ConfigLoader::load() - interpolation, parsing, root discovery, path anchoring
//! - Configuration::from_map() - section merging and validation
//! - Configuration::settings_eq() - settings-only comparison

use retrosynth_config::config::{
    BondOperator, Collaborator, Collaborators, ConfigLoader, Configuration, DeferredScorers,
    DeferredSection,
};
use retrosynth_config::error::{ConfigError, ErrorCode};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A fake checkout: `<tmp>/.git` plus a nested working directory.
struct Repo {
    dir: TempDir,
}

impl Repo {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("runs").join("today")).unwrap();
        Self { dir }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    fn workdir(&self) -> PathBuf {
        self.dir.path().join("runs").join("today")
    }

    fn write_config(&self, content: &str) -> PathBuf {
        let path = self.workdir().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    fn loader(&self, vars: &[(&str, &str)]) -> ConfigLoader {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigLoader::new()
            .with_env(env)
            .with_start_dir(self.workdir())
    }
}

/// Settings file in the layout the planner documentation uses.
fn full_config_yaml() -> &'static str {
    r#"
expansion:
  uspto:
    - '\models\uspto_expansion.onnx'
    - '\models\uspto_templates.csv.gz'
filter:
  uspto: '\models\uspto_filter.onnx'
stock:
  zinc: '${STOCK_DIR}/zinc_stock.hdf5'
scorer:
  route cost:
    weight: 2
search:
  algorithm_config:
    C: 1.2
    time_window: 3
  max_transforms: 8
  time_limit: ${TIME_LIMIT}
  break_bonds: [[1, 2], [5, 6]]
  freeze_bonds: []
  break_bonds_operator: or
  return_first: ~
post_processing:
  max_routes: 10
  route_distance_model: '\models\route_dist.ckpt'
"#
}

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a mapping"),
    }
}

#[test]
fn test_full_file_pipeline() {
    let repo = Repo::new();
    let path = repo.write_config(full_config_yaml());
    let loader = repo.loader(&[("STOCK_DIR", "/data/stock"), ("TIME_LIMIT", "300")]);

    let config = loader.load(&path).expect("settings should load");
    let search = config.search();

    assert_eq!(search.max_transforms, 8);
    assert_eq!(search.time_limit, 300);
    assert_eq!(search.iteration_limit, 100);
    assert!(!search.return_first);
    assert_eq!(search.break_bonds, vec![[1, 2], [5, 6]]);
    assert!(search.freeze_bonds.is_empty());
    assert_eq!(search.break_bonds_operator, BondOperator::Or);
    assert_eq!(search.algorithm_config["C"], 1.2);
    assert_eq!(search.algorithm_config["time_window"], 3);
    assert_eq!(search.algorithm_config["search_reward"], "state score");

    let post = config.post_processing();
    assert_eq!(post.max_routes, 10);
    assert_eq!(post.min_routes, 5);
    let expected_model = repo.root().join("models\\route_dist.ckpt");
    assert_eq!(
        post.route_distance_model,
        Some(expected_model.to_string_lossy().into_owned())
    );

    let expansion = config.expansion_policy().snapshot();
    let expected = repo.root().join("models\\uspto_expansion.onnx");
    assert_eq!(expansion["uspto"][0], expected.to_string_lossy().into_owned());

    // Environment values are not path-anchored: they do not start with the sentinel.
    assert_eq!(config.stock().snapshot()["zinc"], "/data/stock/zinc_stock.hdf5");

    let scorers = config.scorers().snapshot();
    assert_eq!(scorers["scorers"].as_array().unwrap().len(), 5);
    assert_eq!(scorers["config"]["route cost"]["weight"], 2);
}

#[test]
fn test_missing_environment_variable_aborts() {
    let repo = Repo::new();
    let path = repo.write_config(full_config_yaml());
    let loader = repo.loader(&[("STOCK_DIR", "/data/stock")]);

    let err = loader.load(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingEnvironmentVariable);
    match err {
        ConfigError::MissingEnvironmentVariable { name } => assert_eq!(name, "TIME_LIMIT"),
        other => panic!("Expected MissingEnvironmentVariable, got {other:?}"),
    }
}

#[test]
fn test_null_search_value_keeps_default() {
    let config = Configuration::from_value(json!({"search": {"max_transforms": null}})).unwrap();
    assert_eq!(config.search().max_transforms, 6);
}

#[test]
fn test_unknown_search_setting_from_file() {
    let repo = Repo::new();
    let path = repo.write_config("search:\n  unknown_field: 5\n");
    let err = repo.loader(&[]).load(&path).unwrap_err();
    match err {
        ConfigError::UnknownSetting { key } => assert_eq!(key, "unknown_field"),
        other => panic!("Expected UnknownSetting, got {other:?}"),
    }
}

#[test]
fn test_algorithm_config_merge_never_replaces() {
    let config = Configuration::from_value(json!({
        "search": {"algorithm_config": {"C": 3.0, "new_param": "x"}}
    }))
    .unwrap();
    let params = &config.search().algorithm_config;
    assert_eq!(params.len(), 8);
    assert_eq!(params["C"], 3.0);
    assert_eq!(params["new_param"], "x");
    assert_eq!(params["use_prior"], true);
    assert_eq!(params["prune_cycles_in_search"], true);
    assert_eq!(params["immediate_instantiation"], json!([]));
}

#[test]
fn test_non_mapping_algorithm_config() {
    let err = Configuration::from_value(json!({"search": {"algorithm_config": "fast"}})).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidAlgorithmConfig);
}

#[test]
fn test_bond_pair_shapes() {
    let err = Configuration::from_value(json!({"search": {"break_bonds": [[1, 2, 3]]}})).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedBondPair { .. }));

    let ok = Configuration::from_value(json!({"search": {"break_bonds": [[1, 2]]}})).unwrap();
    assert_eq!(ok.search().break_bonds, vec![[1, 2]]);

    let empty = Configuration::from_value(json!({"search": {"freeze_bonds": []}})).unwrap();
    assert!(empty.search().freeze_bonds.is_empty());
}

#[test]
fn test_root_not_found_when_no_marker() {
    // A marker name nothing on the host uses, so the walk always runs out.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, "search: {}\n").unwrap();
    let loader = ConfigLoader::new()
        .with_env(HashMap::<String, String>::new())
        .with_start_dir(dir.path())
        .with_root_marker(".retrosynth-absent-marker");

    let err = loader.read_document(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RepositoryRootNotFound);
    match err {
        ConfigError::RepositoryRootNotFound { start } => assert_eq!(start, dir.path()),
        other => panic!("Expected RepositoryRootNotFound, got {other:?}"),
    }
}

#[test]
fn test_identical_dictionaries_are_settings_equal() {
    let doc = json!({
        "search": {"iteration_limit": 50, "break_bonds": [[3, 4]]},
        "post_processing": {"all_routes": true},
        "stock": {"zinc": "a.hdf5"}
    });
    let a = Configuration::from_map(map(doc.clone())).unwrap();

    let custom = Collaborators {
        stock: Box::new(DeferredSection::new("inventory")),
        expansion_policy: Box::new(DeferredSection::new("expansion")),
        filter_policy: Box::new(DeferredSection::new("filter")),
        scorers: Box::new(DeferredScorers::default()),
    };
    let b = Configuration::from_map_with(map(doc), custom).unwrap();

    assert!(a.settings_eq(&b));
    assert!(!a.settings_eq(&Configuration::default()));
}

#[test]
fn test_custom_collaborator_rejection_surfaces() {
    #[derive(Debug)]
    struct StrictStock;

    impl Collaborator for StrictStock {
        fn load_from_config(
            &mut self,
            section: Map<String, Value>,
        ) -> retrosynth_config::error::ConfigResult<()> {
            if section.is_empty() {
                return Err(ConfigError::collaborator("stock", "no stock configured"));
            }
            Ok(())
        }
    }

    let collaborators = Collaborators {
        stock: Box::new(StrictStock),
        ..Collaborators::deferred()
    };
    let err = Configuration::from_map_with(Map::new(), collaborators).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CollaboratorError);
    assert_eq!(err.to_string(), "Failed to load 'stock' section: no stock configured");
}
