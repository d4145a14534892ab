//! Cross-process determinism for route reports.
//!
//! Spawns the `route_fixture` binary under several environment variants and
//! asserts that all produce identical output. Report digests must not depend
//! on cwd, locale, time zone, or hash-map iteration order.

use std::path::Path;
use std::process::Command;

use lock_tests::{fixture_path, load_fixture, report_lines, workspace_root};

const FIXTURES: [&str; 2] = ["grid_maze.json", "road_network.json"];

/// `cargo test` puts test binaries in `target/<profile>/deps/`; the
/// `route_fixture` binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("route_fixture");
    path.to_string_lossy().to_string()
}

fn run_variant(work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    for name in FIXTURES {
        command.arg(fixture_path(name));
    }
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!(
            "failed to spawn {bin} (work_dir={}, overrides={env_overrides:?}): {e}",
            work_dir.display()
        )
    });
    assert!(
        output.status.success(),
        "route_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_output_is_environment_independent() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);
    assert!(baseline.contains("report_digest=sha256:"));
    assert_eq!(baseline.matches("fixture=").count(), FIXTURES.len());

    let variant_cwd = run_variant(&std::env::temp_dir(), &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes");

    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        &root,
        &[
            ("WAYPOINT_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn crossproc_output_matches_in_process_run() {
    let output = run_variant(&workspace_root(), &[]);
    let mut expected = String::new();
    for name in FIXTURES {
        expected.push_str(&format!("fixture={name}\n"));
        expected.push_str(&report_lines(&load_fixture(&fixture_path(name)).run()));
    }
    assert_eq!(output, expected);
}
