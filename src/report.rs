//! Rendering of benchmark rows into the LaTeX comparison table.
//!
//! Each strategy gets a group of five columns (objective, bound, count
//! metric, status, time). Every cell goes through [`format_value`]; the
//! count metric is printed without decimals.

use crate::benchmark::InstanceRow;
use crate::format::{format_value, DEFAULT_PRECISION};
use crate::record::ResultRecord;
use crate::strategy::Strategy;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Caption of the generated table
pub const DEFAULT_CAPTION: &str = "MTZ vs CUT results (time limit 180 secondes)";

const COLUMNS_PER_STRATEGY: usize = 5;

/// Renders the comparison table
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    pub caption: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        ReportRenderer {
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption(caption: &str) -> Self {
        ReportRenderer {
            caption: caption.to_string(),
        }
    }

    /// Render the full LaTeX table, one row per instance.
    pub fn render(&self, strategies: &[Strategy], rows: &[InstanceRow]) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("\\begin{table}[H]".to_string());
        lines.push("\\centering".to_string());
        lines.push("\\small".to_string());
        lines.push("\\setlength{\\tabcolsep}{3pt}".to_string());
        lines.push("\\resizebox{\\textwidth}{!}{".to_string());

        let column_spec: String = strategies.iter().map(|_| " ccccc").collect();
        lines.push(format!("\\begin{{tabular}}{{l{}}}", column_spec));
        lines.push("\\toprule".to_string());

        let groups: Vec<String> = strategies
            .iter()
            .map(|s| format!("\\multicolumn{{{}}}{{c}}{{{}}}", COLUMNS_PER_STRATEGY, s.label))
            .collect();
        lines.push(format!(" & {} \\\\", groups.join(" & ")));

        let rules: String = (0..strategies.len())
            .map(|k| {
                let start = 2 + k * COLUMNS_PER_STRATEGY;
                format!("\\cmidrule(lr){{{}-{}}}", start, start + COLUMNS_PER_STRATEGY - 1)
            })
            .collect();
        lines.push(rules);

        let mut header = vec!["Instance".to_string()];
        for strategy in strategies {
            header.push("Obj".to_string());
            header.push("Bound".to_string());
            header.push(strategy.count_metric.header().to_string());
            header.push("Status".to_string());
            header.push("Time (s)".to_string());
        }
        lines.push(format!("{}\\\\", header.join(" & ")));
        lines.push("\\midrule".to_string());

        for row in rows {
            lines.push(self.render_row(strategies, row));
        }

        lines.push("\\bottomrule".to_string());
        lines.push("\\end{tabular}".to_string());
        lines.push("}".to_string());
        lines.push(format!("\\caption{{{}}}", self.caption));
        lines.push("\\end{table}".to_string());

        lines.join("\n") + "\n"
    }

    /// Render one table row (`name & cells... \\`).
    pub fn render_row(&self, strategies: &[Strategy], row: &InstanceRow) -> String {
        let mut cells = vec![escape_latex(&row.instance.name)];
        for (strategy, record) in strategies.iter().zip(row.records()) {
            cells.extend(strategy_cells(strategy, record).iter().map(|c| escape_latex(c)));
        }
        format!("{} \\\\", cells.join(" & "))
    }

    /// Plain-text overview printed to the terminal after a run.
    pub fn summary(&self, strategies: &[Strategy], rows: &[InstanceRow]) -> String {
        let mut report = String::new();
        let width = 20 + strategies.len() * 34;

        report.push_str(&format!("{:<20}", "Instance"));
        for strategy in strategies {
            report.push_str(&format!(" {:>12} {:>10} {:>10}", format!("{} obj", strategy.id), "status", "time"));
        }
        report.push('\n');
        report.push_str(&"-".repeat(width));
        report.push('\n');

        for row in rows {
            report.push_str(&format!("{:<20}", row.instance.name));
            for record in row.records() {
                report.push_str(&format!(
                    " {:>12} {:>10} {:>10}",
                    format_value(record.value_or_na("obj"), DEFAULT_PRECISION),
                    format_value(record.value_or_na("status"), DEFAULT_PRECISION),
                    format_value(record.value_or_na("time"), DEFAULT_PRECISION),
                ));
            }
            report.push('\n');
        }

        report
    }
}

fn strategy_cells(strategy: &Strategy, record: &ResultRecord) -> [String; COLUMNS_PER_STRATEGY] {
    [
        format_value(record.value_or_na("obj"), DEFAULT_PRECISION),
        format_value(record.value_or_na("bound"), DEFAULT_PRECISION),
        format_value(record.value_or_na(strategy.count_metric.key()), 0),
        format_value(record.value_or_na("status"), DEFAULT_PRECISION),
        format_value(record.value_or_na("time"), DEFAULT_PRECISION),
    ]
}

/// Escape every character LaTeX treats specially in text mode.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '_' | '&' | '%' | '#' | '$' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A file written next to its target, put in place by [`StagedWrite::commit`].
///
/// Dropping an uncommitted write removes the temporary file, leaving the
/// target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    pub fn new<P: AsRef<Path>>(path: P, contents: &[u8]) -> io::Result<Self> {
        let target = path.as_ref().to_path_buf();
        let staged = StagedWrite {
            tmp: temporary_path(&target),
            target,
            committed: false,
        };
        fs::write(&staged.tmp, contents)?;
        Ok(staged)
    }

    /// Replace the target with the staged contents in one rename.
    pub fn commit(mut self) -> io::Result<()> {
        fs::rename(&self.tmp, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Benchmark;
    use crate::error::Result;
    use crate::instance::Instance;
    use crate::strategy::CountMetric;

    fn rows_from(records: &[&[(&str, &str)]], names: &[&str]) -> Vec<InstanceRow> {
        let strategies = Strategy::default_set();
        let records: Vec<ResultRecord> = records
            .iter()
            .map(|pairs| pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
            .collect();
        let solver = move |_: &Instance, s: &Strategy| -> Result<ResultRecord> {
            let index = Strategy::default_set().iter().position(|d| d.id == s.id).unwrap();
            Ok(records[index].clone())
        };

        let instances: Vec<Instance> = names
            .iter()
            .map(|n| Instance::from_path(format!("data/{}", n)).unwrap())
            .collect();
        let mut benchmark = Benchmark::new(solver, strategies);
        benchmark.run_on_instances(&instances, |_, _| {}).unwrap();
        benchmark.into_rows()
    }

    const OPTIMAL: &[(&str, &str)] = &[
        ("obj", "39"),
        ("bound", "39.0000001"),
        ("nodes", "12"),
        ("cuts", "7"),
        ("status", "OPT"),
        ("time", "0.4567"),
    ];

    #[test]
    fn test_header_follows_strategies() {
        let renderer = ReportRenderer::new();
        let table = renderer.render(&Strategy::default_set(), &[]);

        assert!(table.starts_with("\\begin{table}[H]\n"));
        assert!(table.contains("\\begin{tabular}{l ccccc ccccc ccccc}\n"));
        assert!(table.contains(
            " & \\multicolumn{5}{c}{MTZ} & \\multicolumn{5}{c}{CUT (sol $\\in \\mathbb{N}$)} & \\multicolumn{5}{c}{CUT (sol $\\in \\mathbb{Q}$)} \\\\\n"
        ));
        assert!(table.contains("\\cmidrule(lr){2-6}\\cmidrule(lr){7-11}\\cmidrule(lr){12-16}\n"));
        assert!(table.contains(
            "Instance & Obj & Bound & Nodes & Status & Time (s) & Obj & Bound & Cuts & Status & Time (s) & Obj & Bound & Nodes & Status & Time (s)\\\\\n"
        ));
        assert!(table.ends_with("\\caption{MTZ vs CUT results (time limit 180 secondes)}\n\\end{table}\n"));
    }

    #[test]
    fn test_row_uses_strategy_count_metric() {
        let rows = rows_from(&[OPTIMAL, OPTIMAL, OPTIMAL], &["br17.atsp"]);
        let renderer = ReportRenderer::new();

        assert_eq!(
            renderer.render_row(&Strategy::default_set(), &rows[0]),
            "br17.atsp & 39 & 39 & 12 & OPT & 0.46 & 39 & 39 & 7 & OPT & 0.46 & 39 & 39 & 12 & OPT & 0.46 \\\\"
        );
    }

    #[test]
    fn test_missing_values_use_placeholder() {
        let partial: &[(&str, &str)] = &[("obj", "NA"), ("status", "TIME_LIMIT"), ("time", "180")];
        let rows = rows_from(&[partial, OPTIMAL, OPTIMAL], &["ftv33.atsp"]);
        let line = ReportRenderer::new().render_row(&Strategy::default_set(), &rows[0]);

        assert!(line.starts_with("ftv33.atsp & - & - & - & TIME\\_LIMIT & 180 & 39"));
    }

    #[test]
    fn test_instance_names_are_escaped() {
        assert_eq!(escape_latex("gr_17.tsp"), "gr\\_17.tsp");
        assert_eq!(escape_latex("a&b%c#d$e"), "a\\&b\\%c\\#d\\$e");
        assert_eq!(escape_latex("br17.atsp"), "br17.atsp");
    }

    #[test]
    fn test_braces_backslash_tilde_caret_are_escaped() {
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex("~run^2"), "\\textasciitilde{}run\\textasciicircum{}2");
    }

    #[test]
    fn test_single_strategy_layout() {
        let strategies = vec![Strategy::new("CUT", "CUT", CountMetric::Cuts)];
        let table = ReportRenderer::with_caption("Cuts only").render(&strategies, &[]);

        assert!(table.contains("\\begin{tabular}{l ccccc}\n"));
        assert!(table.contains("\\cmidrule(lr){2-6}\n"));
        assert!(table.contains("\\caption{Cuts only}"));
    }

    #[test]
    fn test_summary_lists_each_instance() {
        let rows = rows_from(&[OPTIMAL, OPTIMAL, OPTIMAL], &["br17.atsp", "gr24.tsp"]);
        let summary = ReportRenderer::new().summary(&Strategy::default_set(), &rows);

        assert_eq!(summary.lines().count(), 4);
        assert!(summary.lines().nth(2).unwrap().starts_with("br17.atsp"));
        assert!(summary.contains("MTZ obj"));
    }

    #[test]
    fn test_committed_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.tex");
        fs::write(&path, "old table that is much longer than the new one").unwrap();

        StagedWrite::new(&path, b"new\n").unwrap().commit().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!dir.path().join(".results.tex.tmp").exists());
    }

    #[test]
    fn test_dropped_staged_write_leaves_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.tex");
        fs::write(&path, "old\n").unwrap();

        let staged = StagedWrite::new(&path, b"new\n").unwrap();
        assert!(dir.path().join(".results.tex.tmp").exists());
        drop(staged);

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
        assert!(!dir.path().join(".results.tex.tmp").exists());
    }

    #[test]
    fn test_staged_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StagedWrite::new(dir.path().join("missing").join("r.csv"), b"x").is_err());
    }
}
