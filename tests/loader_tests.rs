mod fixtures;

use std::collections::BTreeSet;

use fixtures::project::{SteeringFile, SteeringProjectBuilder, SteeringProjectFixture};
use steering::document::{InclusionMode, SteeringLoader};
use steering::error::SteeringError;
use steering::resolver::{InclusionResolver, TargetSet};

#[tokio::test]
async fn test_load_fixture_project() {
    let fixture = SteeringProjectFixture::python_project();
    let store = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap();

    assert_eq!(store.len(), 4);
    let ids: Vec<_> = store.all().iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["product", "python", "release", "testing"]);
    assert_eq!(store.get("release").unwrap().inclusion(), InclusionMode::Manual);
    assert_eq!(store.get("product").unwrap().body(), "# Product\nA task tracker.");
}

#[tokio::test]
async fn test_resolve_loaded_project() {
    let fixture = SteeringProjectFixture::python_project();
    let store = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap();
    let resolver = InclusionResolver::new(&store);

    let targets = TargetSet::new(["tests/services/test_auth.py"]).unwrap();
    let result = resolver.resolve(&targets, &BTreeSet::new());
    assert_eq!(result.ids(), vec!["product", "python", "testing"]);

    let targets = TargetSet::new(["README.md"]).unwrap();
    let manual: BTreeSet<String> = ["release".to_string()].into();
    let result = resolver.resolve(&targets, &manual);
    assert_eq!(result.ids(), vec!["product", "release"]);
}

#[tokio::test]
async fn test_single_string_pattern_and_plain_file() {
    let fixture = SteeringProjectBuilder::new()
        .steering(SteeringFile::new(
            "docs",
            "---\ninclusion: fileMatch\nfileMatchPattern: \"docs/**/*.md\"\n---\nWrite plainly.\n",
        ))
        .steering(SteeringFile::new("structure", "# Structure\nNo metadata here."))
        .build()
        .unwrap();

    let store = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap();
    assert_eq!(store.get("docs").unwrap().patterns()[0].as_str(), "docs/**/*.md");
    assert_eq!(store.get("structure").unwrap().inclusion(), InclusionMode::Always);
}

#[tokio::test]
async fn test_invalid_pattern_rejects_whole_directory() {
    let fixture = SteeringProjectBuilder::new()
        .steering(SteeringFile::always("product", "ok"))
        .steering(SteeringFile::file_match("bad", &["!*.py"], "negated"))
        .build()
        .unwrap();

    let err = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap_err();
    match err {
        SteeringError::MalformedPattern { document, pattern, .. } => {
            assert_eq!(document, "bad");
            assert_eq!(pattern, "!*.py");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_manual_with_patterns_rejected() {
    let fixture = SteeringProjectBuilder::new()
        .steering(SteeringFile::new(
            "release",
            "---\ninclusion: manual\nfileMatchPattern: \"*.md\"\n---\nBody\n",
        ))
        .build()
        .unwrap();

    let err = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap_err();
    assert!(matches!(err, SteeringError::UnexpectedPatterns { .. }));
}

#[tokio::test]
async fn test_nested_identity() {
    let fixture = SteeringProjectBuilder::new()
        .steering(SteeringFile::file_match("api/rest", &["src/api/**"], "REST"))
        .build()
        .unwrap();

    let store = SteeringLoader::new(fixture.steering_dir())
        .load_store()
        .await
        .unwrap();
    assert!(store.get("api/rest").is_some());
}
