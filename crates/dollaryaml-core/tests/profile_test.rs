//! Profile behavior against the real process environment

use std::collections::HashMap;
use std::env;

use dollaryaml_core::{ErrorKind, Profile, ProfileOptions};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serial_test::serial;

const TEST_YAML: &str = r#"
test:
  string: simple string
  env: ${DY_TEST_ENV:default}
  nested:
    value: ${DY_NESTED_VALUE:123}
    plain: plain text
"#;

/// Sets variables for the lifetime of the guard
struct EnvGuard(Vec<&'static str>);

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (k, v) in vars {
            env::set_var(k, v);
        }
        EnvGuard(vars.iter().map(|(k, _)| *k).collect())
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for k in &self.0 {
            env::remove_var(k);
        }
    }
}

#[test]
#[serial]
fn test_read_and_lookup() {
    let cases: Vec<(&str, Vec<(&'static str, &str)>, &str, &str)> = vec![
        ("simple string value", vec![], "test.string", "simple string"),
        ("env variable with default", vec![], "test.env", "default"),
        (
            "env variable with value",
            vec![("DY_TEST_ENV", "custom")],
            "test.env",
            "custom",
        ),
        ("nested env variable with default", vec![], "test.nested.value", "123"),
        ("nested plain value", vec![], "test.nested.plain", "plain text"),
    ];

    for (name, vars, path, want) in cases {
        let _guard = EnvGuard::set(&vars);
        let profile = Profile::from_yaml(TEST_YAML).unwrap();
        assert_eq!(profile.get_error(path).unwrap(), want, "{}", name);
    }
}

#[test]
#[serial]
fn test_lookup_errors() {
    let profile = Profile::from_yaml(TEST_YAML).unwrap();

    let err = profile.get_error("test.nonexistent").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NotFound {
            segment: "nonexistent".into()
        }
    );

    let err = profile.get_error("test.string.invalid").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LevelMismatch);

    let err = profile.get_error("test.nested").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
#[serial]
fn test_empty_variable_falls_back_to_default() {
    let _guard = EnvGuard::set(&[("DY_TEST_ENV", "")]);
    let profile = Profile::from_yaml(TEST_YAML).unwrap();
    assert_eq!(profile.get("test.env"), "default");
}

#[test]
#[serial]
fn test_token_without_default() {
    let profile = Profile::from_yaml("a:\n  b: ${DY_NO_DEFAULT}\n").unwrap();
    assert_eq!(profile.get_error("a.b").unwrap(), "");

    let _guard = EnvGuard::set(&[("DY_NO_DEFAULT", "set")]);
    assert_eq!(profile.get_error("a.b").unwrap(), "set");
}

#[test]
#[serial]
fn test_lookup_follows_environment_changes() {
    let profile = Profile::from_yaml(TEST_YAML).unwrap();
    assert_eq!(profile.get("test.env"), "default");

    let _guard = EnvGuard::set(&[("DY_TEST_ENV", "custom")]);
    let reloaded = Profile::from_yaml(TEST_YAML).unwrap();
    assert_eq!(reloaded.get("test.env"), "custom");
}

#[test]
#[serial]
fn test_read_from_path() {
    let temp_dir = env::temp_dir().join("dollaryaml_it_read_from_path");
    std::fs::create_dir_all(&temp_dir).unwrap();
    let file = temp_dir.join("test.yaml");
    std::fs::write(
        &file,
        "test:\n  value: test value\n  env: ${DY_TEST_FILE_ENV:file default}\n",
    )
    .unwrap();

    let mut profile = Profile::new();
    profile.read_from_path(&file).unwrap();
    assert_eq!(profile.get("test.value"), "test value");
    assert_eq!(profile.get("test.env"), "file default");

    {
        let _guard = EnvGuard::set(&[("DY_TEST_FILE_ENV", "custom file value")]);
        let mut profile = Profile::new();
        profile.read_from_path(&file).unwrap();
        assert_eq!(profile.get("test.env"), "custom file value");
    }

    std::fs::remove_dir_all(&temp_dir).ok();
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_utf8_variable_is_still_set() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    env::set_var("DY_RAW_BYTES", OsStr::from_bytes(b"caf\xe9"));
    let profile = Profile::from_yaml("name: ${DY_RAW_BYTES:fallback}\n").unwrap();
    let got = profile.get_error("name");
    env::remove_var("DY_RAW_BYTES");

    assert_eq!(got.unwrap(), "caf\u{FFFD}");
}

#[test]
fn test_large_unsigned_lookup_is_exact() {
    let profile = Profile::from_yaml("limits:\n  max: 18446744073709551615\n").unwrap();
    assert_eq!(profile.get_error("limits.max").unwrap(), "18446744073709551615");

    let limits: HashMap<String, HashMap<String, u64>> = profile.project().unwrap();
    assert_eq!(limits["limits"]["max"], u64::MAX);
}

#[test]
fn test_get_scalar_types() {
    let profile = Profile::from_yaml(
        r#"
values:
  string: simple string
  number: 123
  float: 123.456
  boolean: true
  list:
    - item1
    - item2
"#,
    )
    .unwrap();

    assert_eq!(profile.get("values.string"), "simple string");
    assert_eq!(profile.get("values.number"), "123");
    assert_eq!(profile.get("values.float"), "123.456");
    assert_eq!(profile.get("values.boolean"), "true");
    assert_eq!(profile.get("values.list"), "");
}

#[derive(Debug, Deserialize, PartialEq)]
struct Options {
    #[serde(rename = "maxConn")]
    max_conn: i64,
    tags: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Database {
    host: String,
    port: i64,
    user: String,
    password: String,
    options: Options,
}

#[derive(Debug, Deserialize, PartialEq)]
struct DatabaseConfig {
    database: Database,
}

const DATABASE_YAML: &str = r#"
database:
  host: ${DY_DB_HOST:localhost}
  port: 5432
  user: ${DY_DB_USER:admin}
  password: ${DY_DB_PASSWORD:secret}
  options:
    maxConn: 100
    tags:
      - ${DY_DB_TAG1:primary}
      - secondary
"#;

#[test]
#[serial]
fn test_project_defaults() {
    let options = ProfileOptions {
        debug: true,
        ..ProfileOptions::default()
    };
    let mut profile = Profile::with_options(options);
    profile.read(DATABASE_YAML.as_bytes()).unwrap();

    let config: DatabaseConfig = profile.project().unwrap();
    assert_eq!(
        config.database,
        Database {
            host: "localhost".into(),
            port: 5432,
            user: "admin".into(),
            password: "secret".into(),
            options: Options {
                max_conn: 100,
                tags: vec!["primary".into(), "secondary".into()],
            },
        }
    );
}

#[test]
#[serial]
fn test_project_environment_overrides() {
    let _guard = EnvGuard::set(&[
        ("DY_DB_HOST", "db.example.com"),
        ("DY_DB_USER", "custom_user"),
        ("DY_DB_PASSWORD", "custom_pass"),
        ("DY_DB_TAG1", "master"),
    ]);
    let profile = Profile::from_yaml(DATABASE_YAML).unwrap();

    let config: DatabaseConfig = profile.project().unwrap();
    assert_eq!(config.database.host, "db.example.com");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.database.user, "custom_user");
    assert_eq!(config.database.password, "custom_pass");
    assert_eq!(config.database.options.tags, vec!["master", "secondary"]);
}

#[derive(Debug, Deserialize)]
struct Duration {
    value: i64,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct Server {
    name: String,
    address: String,
    port: i64,
    enabled: bool,
    timeout: Duration,
    tags: Vec<String>,
    metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Cluster {
    master: Server,
    slaves: Vec<Server>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    name: String,
    description: String,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ComplexConfig {
    version: String,
    debug: bool,
    database: Cluster,
    cache: HashMap<String, Duration>,
    #[serde(rename = "rawConfigs")]
    raw_configs: HashMap<String, serde_yaml::Value>,
    features: Vec<Feature>,
}

const COMPLEX_YAML: &str = r#"
version: ${DY_APP_VERSION:1.0.0}
debug: ${DY_DEBUG_MODE:true}
database:
  master:
    name: main-db
    address: ${DY_DB_HOST:localhost}
    port: ${DY_DB_PORT:5432}
    enabled: true
    timeout:
      value: ${DY_DB_TIMEOUT:30}
      unit: seconds
    tags:
      - ${DY_DB_TAG1:primary}
      - master
      - ${DY_DB_TAG3:prod}
    metadata:
      region: ${DY_DB_REGION:us-east}
      tier: ${DY_DB_TIER:premium}
  slaves:
    - name: slave-1
      address: ${DY_SLAVE1_HOST:10.0.0.1}
      port: 5432
      enabled: true
      timeout:
        value: 15
        unit: seconds
      tags:
        - replica
        - ${DY_SLAVE1_TAG:backup}
      metadata:
        region: ${DY_SLAVE1_REGION:us-west}
        tier: standard
cache:
  memory:
    value: ${DY_MEMORY_CACHE_TTL:300}
    unit: seconds
  disk:
    value: ${DY_DISK_CACHE_TTL:3600}
    unit: seconds
rawConfigs:
  limits:
    cpu: ${DY_CPU_LIMIT:2}
    memory: ${DY_MEMORY_LIMIT:4096}
  flags:
    feature1: true
    feature2: false
features:
  - name: auth
    description: ${DY_AUTH_DESC:Authentication and Authorization}
    enabled: true
  - name: metrics
    description: ${DY_METRICS_DESC:System Metrics Collection}
    enabled: true
"#;

#[test]
#[serial]
fn test_project_complex_defaults() {
    let c: ComplexConfig = Profile::from_yaml(COMPLEX_YAML).unwrap().project().unwrap();

    assert_eq!(c.version, "1.0.0");
    assert!(c.debug);

    let master = &c.database.master;
    assert_eq!(master.name, "main-db");
    assert_eq!(master.address, "localhost");
    assert_eq!(master.port, 5432);
    assert!(master.enabled);
    assert_eq!(master.timeout.value, 30);
    assert_eq!(master.timeout.unit, "seconds");
    assert_eq!(master.tags, vec!["primary", "master", "prod"]);
    assert_eq!(master.metadata["region"], "us-east");
    assert_eq!(master.metadata["tier"], "premium");

    assert_eq!(c.database.slaves.len(), 1);
    assert_eq!(c.database.slaves[0].address, "10.0.0.1");
    assert!(c.database.slaves[0].enabled);
    assert_eq!(c.database.slaves[0].tags, vec!["replica", "backup"]);

    assert_eq!(c.cache["memory"].value, 300);
    assert_eq!(c.cache["disk"].value, 3600);

    assert_eq!(c.features.len(), 2);
    assert_eq!(c.features[0].name, "auth");
    assert_eq!(c.features[0].description, "Authentication and Authorization");
    assert!(c.features[1].enabled);

    let limits = &c.raw_configs["limits"];
    assert_eq!(limits["cpu"].as_i64(), Some(2));
    assert_eq!(limits["memory"].as_i64(), Some(4096));

    let flags = &c.raw_configs["flags"];
    assert_eq!(flags["feature1"].as_bool(), Some(true));
    assert_eq!(flags["feature2"].as_bool(), Some(false));
}

#[test]
#[serial]
fn test_project_complex_overrides() {
    let _guard = EnvGuard::set(&[
        ("DY_APP_VERSION", "2.0.0"),
        ("DY_DEBUG_MODE", "false"),
        ("DY_DB_HOST", "custom-db.example.com"),
        ("DY_DB_PORT", "6543"),
        ("DY_DB_TIMEOUT", "45"),
        ("DY_DB_TAG1", "custom-primary"),
        ("DY_DB_REGION", "eu-central"),
        ("DY_SLAVE1_HOST", "slave1.example.com"),
        ("DY_MEMORY_CACHE_TTL", "600"),
        ("DY_CPU_LIMIT", "4"),
        ("DY_METRICS_DESC", "Custom Metrics System"),
    ]);

    let c: ComplexConfig = Profile::from_yaml(COMPLEX_YAML).unwrap().project().unwrap();

    assert_eq!(c.version, "2.0.0");
    assert!(!c.debug);
    assert_eq!(c.database.master.address, "custom-db.example.com");
    assert_eq!(c.database.master.port, 6543);
    assert_eq!(c.database.master.timeout.value, 45);
    assert_eq!(c.database.master.tags[0], "custom-primary");
    assert_eq!(c.database.master.metadata["region"], "eu-central");
    assert_eq!(c.database.slaves[0].address, "slave1.example.com");
    assert_eq!(c.cache["memory"].value, 600);
    assert_eq!(c.raw_configs["limits"]["cpu"].as_i64(), Some(4));
    assert_eq!(c.features[1].description, "Custom Metrics System");
}
