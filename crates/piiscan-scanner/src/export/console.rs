use super::ResultExporter;
use crate::error::ExportError;
use crate::stats::{AggregateStats, ScanRecord};
use piiscan_core::ScanMatches;
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::time::Duration;

/// Human-readable report, one block per file and a summary block at the end.
#[derive(Debug)]
pub struct ConsoleExporter<W: Write + Send = Stdout> {
    out: W,
}

impl ConsoleExporter<Stdout> {
    /// Report to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleExporter<W> {
    /// Report to an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_file(&mut self, path: &Path, matches: &ScanMatches, duration: Duration) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "================= Scan Report =================")?;
        writeln!(out, " File     : {}", path.display())?;
        writeln!(out, " Duration : {:.2}s", duration.as_secs_f64())?;

        if matches.is_empty() {
            writeln!(out, " Status   : No PII found.")?;
        } else {
            writeln!(out, " Status   : PII found!")?;
            writeln!(out, " Matches  :")?;
            for (category, found) in matches {
                writeln!(out, "  - {category} ({}):", found.len())?;
                for value in found {
                    writeln!(out, "       {value}")?;
                }
            }
        }

        writeln!(out, "==============================================")?;
        out.flush()
    }

    fn write_summary(&mut self, stats: &AggregateStats) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "============== FINAL SCAN SUMMARY ==============")?;
        writeln!(out, " Total files scanned : {}", stats.total_files)?;
        writeln!(out, " Total PII found     : {}", stats.total_matches)?;
        writeln!(
            out,
            " Total duration      : {:.2}s",
            stats.total_duration.as_secs_f64()
        )?;
        writeln!(
            out,
            " Avg duration/file   : {:.2}s",
            stats.average_duration.as_secs_f64()
        )?;

        if stats.per_category.is_empty() {
            writeln!(out, " No PII types detected.")?;
        } else {
            writeln!(out)?;
            writeln!(out, " PII found by type:")?;
            for (category, count) in &stats.per_category {
                writeln!(out, "  - {category}: {count}")?;
            }
        }

        writeln!(out, "=================================================")?;
        out.flush()
    }
}

impl<W: Write + Send> ResultExporter for ConsoleExporter<W> {
    fn name(&self) -> &'static str {
        "console"
    }

    fn on_file(&mut self, record: &ScanRecord, matches: &ScanMatches) -> Result<(), ExportError> {
        self.write_file(&record.path, matches, record.duration)
            .map_err(ExportError::Console)
    }

    fn on_finalize(&mut self, stats: &AggregateStats) -> Result<(), ExportError> {
        self.write_summary(stats).map_err(ExportError::Console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn render<F: FnOnce(&mut ConsoleExporter<Vec<u8>>)>(f: F) -> String {
        let mut exporter = ConsoleExporter::new(Vec::new());
        f(&mut exporter);
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn test_file_without_matches() {
        let output = render(|e| {
            let matches = ScanMatches::new();
            let record =
                ScanRecord::new(Path::new("notes.txt"), &matches, Duration::from_millis(1250));
            e.on_file(&record, &matches).unwrap();
        });

        assert!(output.contains(" File     : notes.txt\n"));
        assert!(output.contains(" Duration : 1.25s\n"));
        assert!(output.contains(" Status   : No PII found.\n"));
        assert!(!output.contains("Matches"));
    }

    #[test]
    fn test_file_with_matches() {
        let mut matches = ScanMatches::new();
        matches.insert("email".into(), vec!["a@b.com".into(), "c@d.org".into()]);

        let output = render(|e| {
            let record = ScanRecord::new(Path::new("mail.txt"), &matches, Duration::ZERO);
            e.on_file(&record, &matches).unwrap();
        });

        assert!(output.contains(" Status   : PII found!\n"));
        assert!(output.contains("  - email (2):\n       a@b.com\n       c@d.org\n"));
    }

    #[test]
    fn test_summary() {
        let stats = AggregateStats {
            total_files: 2,
            total_matches: 3,
            total_duration: Duration::from_millis(500),
            average_duration: Duration::from_millis(250),
            per_category: BTreeMap::from([("email".to_string(), 3)]),
        };

        let output = render(|e| e.on_finalize(&stats).unwrap());
        assert!(output.contains("FINAL SCAN SUMMARY"));
        assert!(output.contains(" Total files scanned : 2\n"));
        assert!(output.contains(" Total PII found     : 3\n"));
        assert!(output.contains(" Avg duration/file   : 0.25s\n"));
        assert!(output.contains("  - email: 3\n"));
    }

    #[test]
    fn test_summary_without_matches() {
        let output = render(|e| e.on_finalize(&AggregateStats::default()).unwrap());
        assert!(output.contains(" No PII types detected.\n"));
    }
}
