//! Development metrics read from a repository's history.
//!
//! The extractor shells out to `git`; every parser below works on the raw
//! command output so it can be tested without a repository.

use crate::error::{ArkifyError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;

const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const RECENT_MESSAGES: usize = 10;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChanges {
    pub added: u64,
    pub removed: u64,
}

impl LineChanges {
    pub fn net(&self) -> i64 {
        self.added as i64 - self.removed as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitStats {
    pub repo: PathBuf,
    pub first_commit: DateTime<FixedOffset>,
    pub latest_commit: DateTime<FixedOffset>,
    pub total_hours: f64,
    pub duration_days: i64,
    pub total_commits: u64,
    pub commits_by_author: BTreeMap<String, u64>,
    pub files_changed: usize,
    pub lines: LineChanges,
    pub recent_messages: Vec<String>,
    pub extracted_at: DateTime<Utc>,
}

/// Block that can be pasted into a project YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnippet {
    pub timeline: SnippetTimeline,
    pub git_stats: SnippetGitStats,
    pub reality_check: SnippetRealityCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetTimeline {
    pub start_date: String,
    pub end_date: String,
    pub total_hours: f64,
    pub duration_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetGitStats {
    pub total_commits: u64,
    pub files_changed: usize,
    pub lines_of_code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetRealityCheck {
    pub commits_per_hour: f64,
    pub lines_per_commit: f64,
}

impl GitStats {
    pub fn project_snippet(&self) -> ProjectSnippet {
        let net = self.lines.net();
        ProjectSnippet {
            timeline: SnippetTimeline {
                start_date: self.first_commit.format("%Y-%m-%d").to_string(),
                end_date: self.latest_commit.format("%Y-%m-%d").to_string(),
                total_hours: self.total_hours,
                duration_days: self.duration_days,
            },
            git_stats: SnippetGitStats {
                total_commits: self.total_commits,
                files_changed: self.files_changed,
                lines_of_code: net,
            },
            reality_check: SnippetRealityCheck {
                commits_per_hour: round1(self.total_commits as f64 / self.total_hours.max(0.1)),
                lines_per_commit: (net as f64 / self.total_commits.max(1) as f64).round(),
            },
        }
    }

    pub fn summary(&self) -> String {
        let authors = self
            .commits_by_author
            .iter()
            .map(|(a, c)| format!("{a} ({c})"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = String::new();
        out.push_str("Timeline:\n");
        out.push_str(&format!(
            "  Start:    {}\n",
            self.first_commit.format("%Y-%m-%d at %H:%M")
        ));
        out.push_str(&format!(
            "  End:      {}\n",
            self.latest_commit.format("%Y-%m-%d at %H:%M")
        ));
        out.push_str(&format!(
            "  Duration: {} hours ({} days)\n",
            self.total_hours, self.duration_days
        ));
        out.push_str("Commits:\n");
        out.push_str(&format!("  Total:    {}\n", self.total_commits));
        out.push_str(&format!("  Authors:  {authors}\n"));
        out.push_str("Code:\n");
        out.push_str(&format!("  Files:    {}\n", self.files_changed));
        out.push_str(&format!("  Added:    {}\n", self.lines.added));
        out.push_str(&format!("  Removed:  {}\n", self.lines.removed));
        out.push_str(&format!("  Net:      {}\n", self.lines.net()));
        if !self.recent_messages.is_empty() {
            out.push_str("Recent commits:\n");
            for msg in self.recent_messages.iter().take(5) {
                out.push_str(&format!("  - {msg}\n"));
            }
        }
        out
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

pub fn parse_git_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s.trim(), GIT_DATE_FORMAT)
        .map_err(|e| ArkifyError::GitParse(format!("timestamp '{}': {e}", s.trim())))
}

/// Sum `--numstat` output. Binary files (`-`) and malformed lines count as zero.
pub fn parse_numstat(output: &str) -> LineChanges {
    let mut changes = LineChanges::default();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut parts = line.split('\t');
        let (Some(added), Some(removed)) = (parts.next(), parts.next()) else {
            continue;
        };
        let (Ok(a), Ok(r)) = (parse_count(added), parse_count(removed)) else {
            continue;
        };
        changes.added += a;
        changes.removed += r;
    }
    changes
}

fn parse_count(field: &str) -> std::result::Result<u64, std::num::ParseIntError> {
    if field == "-" {
        Ok(0)
    } else {
        field.trim().parse()
    }
}

pub fn tally_authors(output: &str) -> BTreeMap<String, u64> {
    let mut authors = BTreeMap::new();
    for author in output.lines().filter(|l| !l.trim().is_empty()) {
        *authors.entry(author.to_string()).or_insert(0) += 1;
    }
    authors
}

pub fn count_unique_files(output: &str) -> usize {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// GitKpiExtractor
// ---------------------------------------------------------------------------

pub struct GitKpiExtractor {
    repo: PathBuf,
    git: PathBuf,
}

impl GitKpiExtractor {
    pub fn new(repo: &Path) -> Result<Self> {
        let git = which::which("git").map_err(|_| ArkifyError::GitNotInstalled)?;
        Ok(Self {
            repo: repo.to_path_buf(),
            git,
        })
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(repo = %self.repo.display(), ?args, "running git");
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|e| ArkifyError::GitFailed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArkifyError::GitFailed(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn first_commit_time(&self) -> Result<DateTime<FixedOffset>> {
        let out = self.run(&["log", "--all", "--pretty=format:%ai", "--reverse"])?;
        let first = out.lines().next().ok_or(ArkifyError::NoCommits)?;
        parse_git_timestamp(first)
    }

    pub fn latest_commit_time(&self) -> Result<DateTime<FixedOffset>> {
        let out = self.run(&["log", "--all", "--pretty=format:%ai", "-1"])?;
        let latest = out.lines().next().ok_or(ArkifyError::NoCommits)?;
        parse_git_timestamp(latest)
    }

    pub fn total_commits(&self) -> Result<u64> {
        let out = self.run(&["rev-list", "--all", "--count"])?;
        out.parse()
            .map_err(|_| ArkifyError::GitParse(format!("commit count '{out}'")))
    }

    pub fn commits_by_author(&self) -> Result<BTreeMap<String, u64>> {
        Ok(tally_authors(
            &self.run(&["log", "--all", "--pretty=format:%an"])?,
        ))
    }

    pub fn files_changed(&self) -> Result<usize> {
        Ok(count_unique_files(&self.run(&[
            "log",
            "--all",
            "--pretty=format:",
            "--name-only",
        ])?))
    }

    pub fn lines_added_removed(&self) -> Result<LineChanges> {
        Ok(parse_numstat(&self.run(&[
            "log",
            "--all",
            "--pretty=tformat:",
            "--numstat",
        ])?))
    }

    pub fn commit_messages(&self, limit: Option<usize>) -> Result<Vec<String>> {
        let limit_arg = limit.map(|n| format!("-{n}"));
        let mut args = vec!["log", "--all", "--pretty=format:%s"];
        if let Some(ref l) = limit_arg {
            args.push(l);
        }
        Ok(self
            .run(&args)?
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn collect(&self) -> Result<GitStats> {
        let first_commit = self.first_commit_time()?;
        let latest_commit = self.latest_commit_time()?;
        let span = latest_commit.signed_duration_since(first_commit);

        Ok(GitStats {
            repo: self.repo.clone(),
            first_commit,
            latest_commit,
            total_hours: round1(span.num_seconds() as f64 / 3600.0),
            duration_days: span.num_days(),
            total_commits: self.total_commits()?,
            commits_by_author: self.commits_by_author()?,
            files_changed: self.files_changed()?,
            lines: self.lines_added_removed()?,
            recent_messages: self.commit_messages(Some(RECENT_MESSAGES))?,
            extracted_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stats(hours: f64, commits: u64, added: u64, removed: u64) -> GitStats {
        let first = parse_git_timestamp("2025-01-10 09:00:00 +0100").unwrap();
        GitStats {
            repo: PathBuf::from("."),
            first_commit: first,
            latest_commit: parse_git_timestamp("2025-01-12 21:30:00 +0100").unwrap(),
            total_hours: hours,
            duration_days: 2,
            total_commits: commits,
            commits_by_author: BTreeMap::from([("Ada".to_string(), commits)]),
            files_changed: 12,
            lines: LineChanges { added, removed },
            recent_messages: vec!["Add panel grid".to_string()],
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn parses_git_iso_dates() {
        let ts = parse_git_timestamp("2025-01-10 09:15:42 +0100\n").unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "09:15");
        assert_eq!(ts.offset().local_minus_utc(), 3600);
        assert!(matches!(
            parse_git_timestamp("yesterday").unwrap_err(),
            ArkifyError::GitParse(_)
        ));
    }

    #[test]
    fn numstat_skips_binary_and_garbage() {
        let out = "10\t2\tsrc/lib.rs\n-\t-\tlogo.png\n\n3\t0\tREADME.md\nnot a stat line\n";
        assert_eq!(
            parse_numstat(out),
            LineChanges {
                added: 13,
                removed: 2
            }
        );
    }

    #[test]
    fn authors_are_tallied() {
        let authors = tally_authors("Ada\nGrace\nAda\n\n");
        assert_eq!(authors.get("Ada"), Some(&2));
        assert_eq!(authors.get("Grace"), Some(&1));
    }

    #[test]
    fn unique_files_dedupe() {
        assert_eq!(count_unique_files("a.rs\nb.rs\n\na.rs\n"), 2);
        assert_eq!(count_unique_files(""), 0);
    }

    #[test]
    fn snippet_rates() {
        let snippet = stats(36.5, 40, 2500, 300).project_snippet();
        assert_eq!(snippet.timeline.start_date, "2025-01-10");
        assert_eq!(snippet.timeline.end_date, "2025-01-12");
        assert_eq!(snippet.git_stats.lines_of_code, 2200);
        assert_eq!(snippet.reality_check.commits_per_hour, 1.1);
        assert_eq!(snippet.reality_check.lines_per_commit, 55.0);
    }

    #[test]
    fn snippet_guards_zero_hours_and_commits() {
        let snippet = stats(0.0, 0, 0, 0).project_snippet();
        assert_eq!(snippet.reality_check.commits_per_hour, 0.0);
        assert_eq!(snippet.reality_check.lines_per_commit, 0.0);
    }

    #[test]
    fn summary_mentions_totals() {
        let text = stats(36.5, 40, 2500, 300).summary();
        assert!(text.contains("Total:    40"));
        assert!(text.contains("Ada (40)"));
        assert!(text.contains("Net:      2200"));
        assert!(text.contains("- Add panel grid"));
    }

    fn git(dir: &Path, args: &[&str], date: &str) {
        let status = Command::new("git")
            .args([
                "-c",
                "user.name=Ada",
                "-c",
                "user.email=ada@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .output()
            .unwrap();
        assert!(status.status.success(), "git {args:?} failed");
    }

    #[test]
    fn collects_from_real_repository() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let date1 = "2025-03-01 10:00:00 +0000";
        let date2 = "2025-03-02 16:00:00 +0000";
        git(dir.path(), &["init", "-q"], date1);
        std::fs::write(dir.path().join("a.txt"), "one\ntwo\n").unwrap();
        git(dir.path(), &["add", "."], date1);
        git(dir.path(), &["commit", "-q", "-m", "First"], date1);
        std::fs::write(dir.path().join("a.txt"), "one\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "x\ny\nz\n").unwrap();
        git(dir.path(), &["add", "."], date2);
        git(dir.path(), &["commit", "-q", "-m", "Second"], date2);

        let stats = GitKpiExtractor::new(dir.path()).unwrap().collect().unwrap();
        assert_eq!(stats.total_commits, 2);
        assert_eq!(stats.total_hours, 30.0);
        assert_eq!(stats.duration_days, 1);
        assert_eq!(stats.files_changed, 2);
        assert_eq!(
            stats.lines,
            LineChanges {
                added: 5,
                removed: 1
            }
        );
        assert_eq!(stats.commits_by_author.get("Ada"), Some(&2));
        assert_eq!(stats.recent_messages, vec!["Second", "First"]);
    }

    #[test]
    fn non_repository_fails() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let err = GitKpiExtractor::new(dir.path())
            .unwrap()
            .collect()
            .unwrap_err();
        assert!(matches!(err, ArkifyError::GitFailed(_)));
    }
}
