use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use cma_engine::config::Config;

#[test]
fn test_config_round_trip_from_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("cma_engine.toml");
    fs::write(
        &path,
        r#"
[report]
pretty = false

[logging]
dir = "/var/log/cma"
filter = "cma_engine=debug"
"#,
    )?;

    let config = Config::load_from(&path)?;

    assert!(!config.report.pretty);
    assert_eq!(config.logging.dir, "/var/log/cma");
    assert_eq!(config.logging.filter, "cma_engine=debug");

    Ok(())
}
