//! Binary that runs a route fixture through `run_route` and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `route_fixture <fixture.json>...`
//!
//! Output: one `fixture=<file name>` line per fixture, followed by the
//! key=value lines of `lock_tests::report_lines`.

use std::path::Path;

use lock_tests::{load_fixture, report_lines};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    assert!(!args.is_empty(), "usage: route_fixture <fixture.json>...");
    for arg in &args {
        let path = Path::new(arg);
        let report = load_fixture(path).run();
        let name = path
            .file_name()
            .map_or_else(|| arg.clone(), |n| n.to_string_lossy().into_owned());
        println!("fixture={name}");
        print!("{}", report_lines(&report));
    }
}
