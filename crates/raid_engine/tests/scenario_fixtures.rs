//! Data-driven battle scenarios.
//!
//! Uses `libtest-mimic` to generate one test per JSON file under
//! `tests/fixtures/`, so scenarios can be filtered by name:
//!   cargo test --test scenario_fixtures -- sash

mod common;

use common::fixtures::ScenarioFixture;
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn load_fixtures() -> Result<Vec<(String, ScenarioFixture)>, String> {
    let dir = fixture_dir();
    let entries = fs::read_dir(&dir).map_err(|e| format!("cannot read {}: {}", dir.display(), e))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut fixtures = Vec::new();
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("fixture")
            .to_string();
        let text = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let fixture: ScenarioFixture =
            serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
        fixtures.push((stem, fixture));
    }
    Ok(fixtures)
}

fn run_scenario(fixture: &ScenarioFixture) -> Result<(), Failed> {
    let result = fixture
        .script
        .run()
        .map_err(|e| Failed::from(format!("battle failed: {}", e)))?;

    let failures: Vec<String> = fixture
        .expect
        .iter()
        .filter_map(|expectation| expectation.check(&result).err())
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Failed::from(failures.join("\n")))
    }
}

fn main() {
    let args = Arguments::from_args();

    let fixtures = match load_fixtures() {
        Ok(fixtures) => fixtures,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let tests: Vec<Trial> = fixtures
        .into_iter()
        .map(|(stem, fixture)| {
            let test_name = format!("scenario::{}", stem);
            let ignored = fixture.skip;
            Trial::test(test_name, move || run_scenario(&fixture)).with_ignored_flag(ignored)
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}
