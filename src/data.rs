//! Reader for the whitespace-delimited data files written by the trace
//! analyzers.
//!
//! A data file starts with `#` comment lines (one of which names the node
//! the trace was collected on), followed by a header row of column names
//! and one row of numeric values per sampled time point:
//!
//! ```text
//! # Node: node3
//! # Time-series history of backlog for each active GRO core.
//!     Time   Back2   Back7
//!   1020.0     0.0    12.4
//!   1040.0     3.1    10.9
//! ```

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One tabular data file, fully loaded into memory.
#[derive(Debug)]
pub struct DataFile {
    path: PathBuf,
    /// Value of the `# Node:` comment, if the file carried one.
    node: Option<String>,
    names: Vec<String>,
    /// Column-major values; `columns[i]` holds the values of `names[i]`.
    columns: Vec<Vec<f64>>,
}

impl DataFile {
    /// Load and parse a data file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut node = None;
        let mut names: Vec<String> = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                if let Some(name) = comment.trim().strip_prefix("Node:") {
                    node = Some(name.trim().to_string());
                }
                continue;
            }
            if names.is_empty() {
                // First non-comment line is the header row.
                names = trimmed.split_whitespace().map(str::to_string).collect();
                columns = vec![Vec::new(); names.len()];
                continue;
            }
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != names.len() {
                bail!(
                    "{}:{}: expected {} values, found {}",
                    path.display(),
                    line_num + 1,
                    names.len(),
                    fields.len()
                );
            }
            for (column, field) in columns.iter_mut().zip(&fields) {
                let value: f64 = field.parse().with_context(|| {
                    format!(
                        "{}:{}: invalid number {:?}",
                        path.display(),
                        line_num + 1,
                        field
                    )
                })?;
                column.push(value);
            }
        }

        if names.is_empty() {
            bail!("{}: no header row found", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            node,
            names,
            columns,
        })
    }

    /// All values for one column, in row (time) order.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .with_context(|| format!("{}: no column named {:?}", self.path.display(), name))?;
        Ok(&self.columns[index])
    }

    /// Integer identifiers embedded in the file's column names, e.g. the
    /// 2 and 7 of `Back2`/`Back7` for prefix `Back`.
    pub fn ids(&self, prefix: &str) -> BTreeSet<u32> {
        ids_matching(self.names.iter().map(String::as_str), prefix)
    }

    /// Maximum value across the named columns. Returns 0.0 when no columns
    /// are named or every named column is empty.
    pub fn max_value(&self, names: &[String]) -> Result<f64> {
        let mut max = 0.0f64;
        for name in names {
            for &value in self.column(name)? {
                max = max.max(value);
            }
        }
        Ok(max)
    }

    /// Human-readable node name: the `# Node:` comment when present,
    /// otherwise the trailing `_`-separated component of the file stem
    /// (`net_backlog_node3.dat` -> `node3`).
    pub fn node_name(&self) -> String {
        if let Some(ref node) = self.node {
            return node.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match stem.rsplit('_').next() {
            Some(last) => last.to_string(),
            None => stem,
        }
    }
}

/// Scan column names for `<prefix><integer>` and collect the integers.
/// Names where the prefix is followed by anything but a bare integer do
/// not match.
pub fn ids_matching<'a>(names: impl Iterator<Item = &'a str>, prefix: &str) -> BTreeSet<u32> {
    names
        .filter_map(|name| name.strip_prefix(prefix))
        .filter_map(|rest| rest.parse().ok())
        .collect()
}
