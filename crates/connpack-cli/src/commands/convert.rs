//! Convert command - render values and secret from an exported connections file

use connpack_core::build_metadata;
use connpack_engine::{Engine, ProcessingPlan};
use std::path::Path;

use crate::error::Result;

/// Build the metadata, render the standard plan under `root`, log the summary
///
/// Returns the names of the generated files.
pub fn run(namespace: &str, source: &Path, root: &Path) -> Result<Vec<String>> {
    let metadata = build_metadata(namespace, source)?;

    let plan = ProcessingPlan::standard(root);
    let generated = Engine::default().render_plan(&plan, &metadata)?;

    tracing::info!(
        "Connections successfully converted to {}",
        generated.join(", ")
    );

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::exit_codes;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();
        fs::write(
            templates.join("values.j2"),
            "ns: {{ namespace }}\n{% for c in connections %}- {{ c.env_name }}\n{% endfor %}",
        )
        .unwrap();
        fs::write(
            templates.join("connections.j2"),
            "{% for c in connections %}{{ c.env_name }}: {{ c.data }}\n{% endfor %}",
        )
        .unwrap();
        fs::write(
            dir.path().join("connections.yaml"),
            "postgres_default:\n  conn_type: postgres\n  host: db\n  port: 5432\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_run_generates_both_files() {
        let dir = setup();

        let generated = run(
            "airflow",
            &dir.path().join("connections.yaml"),
            dir.path(),
        )
        .unwrap();

        assert_eq!(generated, vec!["values.yaml", "secret.yaml"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("values.yaml")).unwrap(),
            "ns: airflow\n- AIRFLOW_CONN_POSTGRES_DEFAULT\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("secret.yaml")).unwrap(),
            "AIRFLOW_CONN_POSTGRES_DEFAULT: eyJjb25uX3R5cGUiOiJwb3N0Z3JlcyIsImhvc3QiOiJkYiIsInBvcnQiOjU0MzJ9\n"
        );
    }

    #[test]
    fn test_missing_source_leaves_outputs_untouched() {
        let dir = setup();
        fs::write(dir.path().join("values.yaml"), "previous").unwrap();

        let err = run("airflow", &dir.path().join("missing.yaml"), dir.path()).unwrap_err();

        assert!(matches!(err, CliError::Source { .. }));
        assert_eq!(err.exit_code(), exit_codes::SOURCE_ERROR);
        assert_eq!(
            fs::read_to_string(dir.path().join("values.yaml")).unwrap(),
            "previous"
        );
        assert!(!dir.path().join("secret.yaml").exists());
    }

    #[test]
    fn test_missing_template() {
        let dir = setup();
        fs::remove_file(dir.path().join("templates/values.j2")).unwrap();

        let err = run("airflow", &dir.path().join("connections.yaml"), dir.path()).unwrap_err();

        assert!(matches!(err, CliError::TemplateMissing { .. }));
        assert!(!dir.path().join("values.yaml").exists());
        assert!(!dir.path().join("secret.yaml").exists());
    }
}
