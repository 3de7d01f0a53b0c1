//! Record-replay round-trip integration test.
//!
//! 1. Run apply mode against a real scratch project through a recording context.
//! 2. Restore the original files, so nothing on disk reflects the run.
//! 3. Replay the cassette and assert the report matches the live run.
//! 4. Replay a second time and assert determinism.

use std::path::Path;

use namespacer::cassette::format::Cassette;
use namespacer::commands::apply::execute;
use namespacer::config::Config;
use namespacer::context::ServiceContext;
use namespacer::pipeline::ApplyOptions;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn setup(root: &Path) {
    write(root, "Shop/Shop.Core.csproj", "<Project />\n");
    write(root, "Shop/Orders/Order.cs", "namespace Legacy.Orders;\n\npublic class Order { }\n");
    write(
        root,
        "Shop/Orders/Checkout/Cart.cs",
        "using Legacy.Orders;\n\nnamespace Shop.Core.Orders.Checkout;\n",
    );
    write(root, "Shop/Readme.cs", "// no namespace here\n");
}

#[test]
fn record_then_replay_produces_identical_reports() {
    let dir = std::env::temp_dir().join("namespacer_record_replay_test");
    let _ = std::fs::remove_dir_all(&dir);
    let project = dir.join("project");
    setup(&project);
    let cassette_path = dir.join("apply.cassette.yaml");
    let config = Config { jobs: 4, ..Config::default() };

    // --- Phase 1: Record a live run ---
    let recorded = {
        let ctx = ServiceContext::recording(&cassette_path);
        execute(&ctx, &project, &config, ApplyOptions::default()).unwrap()
    };
    assert_eq!(recorded.renamed().count(), 1);
    assert_eq!(recorded.unchanged_count(), 1);
    assert_eq!(recorded.written.len(), 2);
    assert_eq!(
        std::fs::read_to_string(project.join("Shop/Orders/Checkout/Cart.cs")).unwrap(),
        "using Shop.Core.Orders;\n\nnamespace Shop.Core.Orders.Checkout;\n"
    );

    let cassette: Cassette =
        serde_yaml::from_str(&std::fs::read_to_string(&cassette_path).unwrap()).unwrap();
    let writes = cassette.interactions.iter().filter(|i| i.method == "write").count();
    assert_eq!(writes, 2);

    // --- Phase 2: Reset the disk ---
    let _ = std::fs::remove_dir_all(&project);
    setup(&project);

    // --- Phase 3: Replay and compare ---
    let ctx1 = ServiceContext::replaying(&cassette_path).unwrap();
    let replayed1 = execute(&ctx1, &project, &config, ApplyOptions::default()).unwrap();
    assert_eq!(replayed1, recorded);
    assert_eq!(
        std::fs::read_to_string(project.join("Shop/Orders/Order.cs")).unwrap(),
        "namespace Legacy.Orders;\n\npublic class Order { }\n",
        "replay must not touch the disk"
    );

    // --- Phase 4: Determinism ---
    let ctx2 = ServiceContext::replaying(&cassette_path).unwrap();
    let replayed2 = execute(&ctx2, &project, &config, ApplyOptions::default()).unwrap();
    assert_eq!(replayed1, replayed2);

    let _ = std::fs::remove_dir_all(&dir);
}
