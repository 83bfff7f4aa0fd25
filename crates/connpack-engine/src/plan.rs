//! Template to output file pairings

use std::path::{Path, PathBuf};

/// Helm values template, relative to the program root
pub const VALUES_TEMPLATE: &str = "templates/values.j2";

/// Secret manifest template, relative to the program root
pub const CONNECTIONS_TEMPLATE: &str = "templates/connections.j2";

/// Rendered Helm values, relative to the program root
pub const VALUES_OUTPUT: &str = "values.yaml";

/// Rendered Secret manifest, relative to the program root
pub const SECRET_OUTPUT: &str = "secret.yaml";

/// One template rendered to one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingEntry {
    /// Template to read
    pub template: PathBuf,

    /// File the rendered template is written to
    pub output: PathBuf,
}

impl ProcessingEntry {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }

    /// Name used for the template in diagnostics
    pub fn template_name(&self) -> String {
        file_name(&self.template)
    }

    /// Base file name of the output
    pub fn output_name(&self) -> String {
        file_name(&self.output)
    }
}

/// Ordered list of entries; rendering follows declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingPlan {
    entries: Vec<ProcessingEntry>,
}

impl ProcessingPlan {
    pub fn new(entries: Vec<ProcessingEntry>) -> Self {
        Self { entries }
    }

    /// The values file and the connections secret, both under `root`
    pub fn standard(root: &Path) -> Self {
        Self::new(vec![
            ProcessingEntry::new(root.join(VALUES_TEMPLATE), root.join(VALUES_OUTPUT)),
            ProcessingEntry::new(root.join(CONNECTIONS_TEMPLATE), root.join(SECRET_OUTPUT)),
        ])
    }

    /// Append an entry
    pub fn with_entry(mut self, entry: ProcessingEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[ProcessingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProcessingPlan {
    type Item = &'a ProcessingEntry;
    type IntoIter = std::slice::Iter<'a, ProcessingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
