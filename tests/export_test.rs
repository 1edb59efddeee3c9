//! Integration tests for the export and preview surfaces.

use conceptviz::export::{export_filename, write_artifact};
use conceptviz::models::VisualizationArtifact;
use conceptviz::preview::{wrapper_document, write_preview, SANDBOX_PERMISSIONS};

fn artifact(title: &str, html: &str) -> VisualizationArtifact {
    VisualizationArtifact::new(title.to_string(), "Explanation.".to_string(), html.to_string())
}

#[test]
fn test_filename_derivation_examples() {
    assert_eq!(export_filename("Fourier Series"), "fourier_series.html");
    assert_eq!(export_filename("  A  B "), "a_b.html");
    assert_eq!(
        export_filename("Pathfinding A* Algorithm"),
        "pathfinding_a*_algorithm.html"
    );
}

#[test]
fn test_export_content_is_byte_exact() {
    let html = "<!DOCTYPE html>\n<html>\n<body>\u{3c0} \u{2248} 3.14159</body>\n</html>\n";
    let a = artifact("Pi Approximation", html);
    let dir = tempfile::tempdir().unwrap();

    let path = write_artifact(&a, dir.path()).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, html.as_bytes());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "pi_approximation.html"
    );
}

#[test]
fn test_export_overwrites_previous_file_for_same_title() {
    let dir = tempfile::tempdir().unwrap();

    let first = artifact("Same Title", "<html>one</html>");
    let second = artifact("Same Title", "<html>two</html>");

    let path_a = write_artifact(&first, dir.path()).unwrap();
    let path_b = write_artifact(&second, dir.path()).unwrap();

    assert_eq!(path_a, path_b);
    assert_eq!(std::fs::read_to_string(&path_b).unwrap(), "<html>two</html>");
}

#[test]
fn test_preview_wrapper_embeds_artifact_with_sandbox() {
    let a = artifact("Double Pendulum", "<html><body>\"chaos\" & motion</body></html>");
    let doc = wrapper_document(&a);

    assert!(doc.contains(&format!(r#"sandbox="{}""#, SANDBOX_PERMISSIONS)));
    // Quotes and ampersands in the artifact survive as attribute escapes.
    assert!(doc.contains("&quot;chaos&quot; &amp; motion"));
}

#[test]
fn test_preview_context_is_recreated_per_artifact() {
    let first = artifact("One", "<html>1</html>");
    let second = artifact("Two", "<html>2</html>");

    // Each preview gets a fresh file, so a new artifact can never inherit
    // execution state from the previous one's browsing context.
    let path_a = write_preview(&first).unwrap();
    let path_b = write_preview(&second).unwrap();
    assert_ne!(path_a, path_b);

    let content_b = std::fs::read_to_string(&path_b).unwrap();
    assert!(content_b.contains("<html>2</html>"));
    assert!(!content_b.contains("<html>1</html>"));

    let _ = std::fs::remove_file(path_a);
    let _ = std::fs::remove_file(path_b);
}
