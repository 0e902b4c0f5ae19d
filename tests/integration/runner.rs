use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use xdag::{load_dsl_file, CallKwargs, DagLayer, ModuleFactoryRegistry, RunOptions};

/// Contents of a case's `out.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExpectedOutput {
    /// Exact expected namespace (compared with float tolerance).
    pub namespace: Option<Value>,
    /// Key path → expected value.
    pub outputs: BTreeMap<String, Value>,
    /// Expected module names, in registry order.
    pub module_names: Option<Vec<String>>,
    /// Substring the run's error message must contain; the run must fail.
    pub error: Option<String>,
    /// Keyword arguments forwarded to every module.
    pub kwargs: Map<String, Value>,
}

pub fn run_case(case_dir: &Path) {
    let dag_path = find_dag_file(case_dir);
    let inputs: Map<String, Value> = read_json(case_dir.join("in.json"));
    let expected: ExpectedOutput = read_json(case_dir.join("out.json"));

    let factories = ModuleFactoryRegistry::with_builtins();
    let built =
        load_dsl_file(&dag_path).and_then(|schema| DagLayer::from_schema(schema, &factories));

    let result = built.and_then(|layer| {
        if let Some(names) = &expected.module_names {
            assert_eq!(layer.module_names(), names.as_slice(), "module names mismatch");
        }
        let options = RunOptions::from_config(layer.config())
            .kwargs(CallKwargs::from(expected.kwargs.clone()));
        layer.run_dag(inputs, &options)
    });

    match (&expected.error, result) {
        (Some(fragment), Err(e)) => {
            let msg = e.to_string();
            assert!(
                msg.contains(fragment.as_str()),
                "error '{}' does not contain '{}'",
                msg,
                fragment
            );
        }
        (Some(fragment), Ok(ns)) => {
            panic!(
                "expected error containing '{}', got outputs {}",
                fragment,
                ns.to_value()
            );
        }
        (None, Err(e)) => panic!("case {} failed: {}", case_dir.display(), e),
        (None, Ok(ns)) => {
            if let Some(namespace) = &expected.namespace {
                assert_values_match(&ns.to_value(), namespace, "<namespace>");
            }
            for (key, value) in &expected.outputs {
                let actual = ns
                    .lookup_str(key)
                    .unwrap_or_else(|e| panic!("lookup {} failed: {}", key, e));
                assert_values_match(actual, value, key);
            }
        }
    }
}

fn find_dag_file(case_dir: &Path) -> PathBuf {
    ["dag.yaml", "dag.json", "dag.toml"]
        .iter()
        .map(|name| case_dir.join(name))
        .find(|path| path.exists())
        .unwrap_or_else(|| panic!("no dag file in {}", case_dir.display()))
}

pub fn assert_values_match(actual: &Value, expected: &Value, path: &str) {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => {
            let (a, e) = (a.as_f64().unwrap(), e.as_f64().unwrap());
            assert!((a - e).abs() < 1e-9, "{}: expected {}, got {}", path, e, a);
        }
        (Value::Array(a), Value::Array(e)) => {
            assert_eq!(a.len(), e.len(), "{}: length mismatch", path);
            for (i, (av, ev)) in a.iter().zip(e).enumerate() {
                assert_values_match(av, ev, &format!("{}[{}]", path, i));
            }
        }
        (Value::Object(a), Value::Object(e)) => {
            let mut a_keys: Vec<&String> = a.keys().collect();
            let mut e_keys: Vec<&String> = e.keys().collect();
            a_keys.sort();
            e_keys.sort();
            assert_eq!(a_keys, e_keys, "{}: key mismatch", path);
            for (k, ev) in e {
                assert_values_match(&a[k], ev, &format!("{}/{}", path, k));
            }
        }
        _ => assert_eq!(actual, expected, "{}: value mismatch", path),
    }
}

fn read_to_string(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref()).unwrap_or_else(|e| {
        panic!("Failed to read {}: {}", path.as_ref().display(), e)
    })
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> T {
    let content = read_to_string(path.as_ref());
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.as_ref().display(), e)
    })
}
