//! Validating the dependencies recorded by the last compile.

use std::path::{Path, PathBuf};

use pch_common::{FileMetadata, FileSystem, TieBreak};
use pch_config::LimitsConfig;
use pch_depfile::DependencyList;

use crate::artifact::ArtifactSet;
use crate::report::{Event, Reporter};
use crate::verdict::{OutputKind, RebuildReason};

/// Reads and parses the dependency rule, then checks that no listed file is
/// newer than the rule's target, the precompiled header, or the rule file.
///
/// Returns `None` when every dependency is older (or, with
/// [`TieBreak::Fresh`], equally old).
pub(crate) fn check_dependencies(
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
    artifacts: &ArtifactSet,
    limits: &LimitsConfig,
    ties: TieBreak,
    depfile_meta: &FileMetadata,
    artifact_meta: &FileMetadata,
) -> Option<RebuildReason> {
    let depfile = &artifacts.depfile;
    reporter.emit(Event::ReadingDepfile(depfile.clone()));

    let text = match read_depfile(fs, reporter, depfile, depfile_meta.len(), limits) {
        Ok(text) => text,
        Err(reason) => return Some(reason),
    };

    reporter.emit(Event::ParsingDepfile {
        bytes: depfile_meta.len(),
    });
    let rule = match DependencyList::parse(&text, limits.max_token_len) {
        Ok(rule) => rule,
        Err(err) => {
            reporter.emit(Event::MalformedRule(err.clone()));
            return Some(RebuildReason::MalformedRule(err));
        }
    };

    let target = PathBuf::from(&rule.target);
    reporter.emit(Event::TargetFile(target.clone()));
    let Some(target_meta) = fs.metadata(&target) else {
        reporter.emit(Event::NoMetadata(target.clone()));
        return Some(RebuildReason::TargetUnresolvable(target));
    };

    let outputs = [
        (OutputKind::Target, target.as_path(), &target_meta),
        (OutputKind::Artifact, artifacts.artifact.as_path(), artifact_meta),
        (OutputKind::Depfile, depfile.as_path(), depfile_meta),
    ];

    for name in &rule.prerequisites {
        let dependency = PathBuf::from(name);
        reporter.emit(Event::DependencyFile(dependency.clone()));
        let Some(dep_meta) = fs.metadata(&dependency) else {
            reporter.emit(Event::NoMetadata(dependency.clone()));
            return Some(RebuildReason::DependencyUnresolvable(dependency));
        };
        for (kind, path, meta) in &outputs {
            if !ties.is_fresh(meta, &dep_meta) {
                reporter.emit(Event::DependencyNewer {
                    output: path.to_path_buf(),
                });
                return Some(RebuildReason::DependencyNewer {
                    dependency,
                    output: *kind,
                });
            }
        }
    }
    None
}

/// Loads the rule text, enforcing the size ceiling.
fn read_depfile(
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
    depfile: &Path,
    size: u64,
    limits: &LimitsConfig,
) -> Result<String, RebuildReason> {
    if size == 0 {
        reporter.emit(Event::DepfileEmpty(depfile.to_path_buf()));
        return Err(RebuildReason::DepfileEmpty);
    }
    if size > limits.max_depfile_bytes {
        reporter.emit(Event::DepfileTooLarge {
            path: depfile.to_path_buf(),
            size,
            limit: limits.max_depfile_bytes,
        });
        return Err(RebuildReason::DepfileTooLarge { size });
    }
    let data = fs.read_exact_len(depfile, size).map_err(|e| {
        reporter.emit(Event::DepfileUnreadable {
            path: depfile.to_path_buf(),
            reason: e.to_string(),
        });
        RebuildReason::DepfileUnreadable
    })?;
    String::from_utf8(data).map_err(|_| {
        reporter.emit(Event::DepfileNotUtf8(depfile.to_path_buf()));
        RebuildReason::DepfileNotUtf8
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use crate::testing::MemoryFs;
    use pch_config::LayoutConfig;
    use pch_depfile::RuleError;

    const DEPFILE: &str = "/dest/pch/Arduino.h.d";
    const GCH: &str = "/dest/pch/Arduino.h.gch";

    fn artifacts() -> ArtifactSet {
        ArtifactSet::new(
            Path::new("/src"),
            Path::new("/dest"),
            &LayoutConfig::default(),
        )
    }

    /// Target and outputs at t=200, headers at t=100.
    fn fixture(rule: &str) -> MemoryFs {
        let fs = MemoryFs::new();
        fs.file(DEPFILE, rule.as_bytes(), 200);
        fs.file(GCH, b"gch", 200);
        fs.file("/dest/pch/Arduino.h", b"h", 100);
        fs.file("/core/pins.h", b"p", 100);
        fs.file("/core/my lib.h", b"m", 100);
        fs
    }

    fn run(fs: &MemoryFs, ties: TieBreak, rec: &mut MemoryReporter) -> Option<RebuildReason> {
        run_with_limits(fs, ties, rec, &LimitsConfig::default())
    }

    fn run_with_limits(
        fs: &MemoryFs,
        ties: TieBreak,
        rec: &mut MemoryReporter,
        limits: &LimitsConfig,
    ) -> Option<RebuildReason> {
        let depfile_meta = fs.metadata(Path::new(DEPFILE)).unwrap();
        let artifact_meta = fs.metadata(Path::new(GCH)).unwrap();
        check_dependencies(
            fs,
            rec,
            &artifacts(),
            limits,
            ties,
            &depfile_meta,
            &artifact_meta,
        )
    }

    const GOOD_RULE: &str =
        "/dest/pch/Arduino.h.gch: /dest/pch/Arduino.h \\\n /core/pins.h /core/my\\ lib.h\n";

    #[test]
    fn all_older_passes() {
        let fs = fixture(GOOD_RULE);
        let mut rec = MemoryReporter::new();
        assert_eq!(run(&fs, TieBreak::Fresh, &mut rec), None);
        let msgs = rec.messages();
        assert!(msgs.contains(&"target file: /dest/pch/Arduino.h.gch".to_string()));
        assert!(msgs.contains(&" dep file: /core/my lib.h".to_string()));
    }

    #[test]
    fn dependency_newer_than_target() {
        let fs = fixture(GOOD_RULE);
        fs.file("/core/pins.h", b"p", 300);
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DependencyNewer {
                dependency: PathBuf::from("/core/pins.h"),
                output: OutputKind::Target,
            })
        );
    }

    #[test]
    fn dependency_newer_than_artifact_only() {
        // Target is an unrelated file that is newer than everything.
        let rule = "/core/stamp: /core/pins.h\n";
        let fs = fixture(rule);
        fs.file("/core/stamp", b"s", 1000);
        fs.file(GCH, b"gch", 50);
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DependencyNewer {
                dependency: PathBuf::from("/core/pins.h"),
                output: OutputKind::Artifact,
            })
        );
    }

    #[test]
    fn dependency_newer_than_depfile_only() {
        let rule = "/core/stamp: /core/pins.h\n";
        let fs = fixture(rule);
        fs.file("/core/stamp", b"s", 1000);
        fs.file(GCH, b"gch", 1000);
        fs.file(DEPFILE, rule.as_bytes(), 50);
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DependencyNewer {
                dependency: PathBuf::from("/core/pins.h"),
                output: OutputKind::Depfile,
            })
        );
    }

    #[test]
    fn equal_times_follow_tie_policy() {
        let fs = fixture(GOOD_RULE);
        fs.file("/core/pins.h", b"p", 200);
        let mut rec = MemoryReporter::new();
        assert_eq!(run(&fs, TieBreak::Fresh, &mut rec), None);
        assert!(matches!(
            run(&fs, TieBreak::Stale, &mut rec),
            Some(RebuildReason::DependencyNewer { .. })
        ));
    }

    #[test]
    fn missing_dependency() {
        let fs = fixture("/dest/pch/Arduino.h.gch: /core/gone.h\n");
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DependencyUnresolvable(PathBuf::from(
                "/core/gone.h"
            )))
        );
        assert!(rec
            .messages()
            .contains(&"  can't get info for /core/gone.h".to_string()));
    }

    #[test]
    fn missing_target() {
        let fs = fixture("/elsewhere/x.gch: /core/pins.h\n");
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::TargetUnresolvable(PathBuf::from(
                "/elsewhere/x.gch"
            )))
        );
    }

    #[test]
    fn target_without_colon() {
        let fs = fixture("/dest/pch/Arduino.h.gch /core/pins.h\n");
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::MalformedRule(RuleError::TargetMissingColon(
                "/dest/pch/Arduino.h.gch".to_string()
            )))
        );
    }

    #[test]
    fn whitespace_only_rule() {
        let fs = fixture("   \n");
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::MalformedRule(RuleError::Empty))
        );
    }

    #[test]
    fn empty_depfile_warns() {
        let fs = fixture("");
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DepfileEmpty)
        );
        assert_eq!(rec.warnings().len(), 1);
    }

    #[test]
    fn oversized_depfile_warns() {
        let fs = fixture(GOOD_RULE);
        let mut rec = MemoryReporter::new();
        let limits = LimitsConfig {
            max_depfile_bytes: 10,
            ..LimitsConfig::default()
        };
        let reason = run_with_limits(&fs, TieBreak::Fresh, &mut rec, &limits);
        assert_eq!(
            reason,
            Some(RebuildReason::DepfileTooLarge {
                size: GOOD_RULE.len() as u64
            })
        );
        assert_eq!(rec.warnings().len(), 1);
    }

    #[test]
    fn non_utf8_depfile_warns() {
        let fs = MemoryFs::new();
        fs.file(DEPFILE, &[0xff, 0xfe, b':', b' ', b'a'], 200);
        fs.file(GCH, b"gch", 200);
        let mut rec = MemoryReporter::new();
        assert_eq!(
            run(&fs, TieBreak::Fresh, &mut rec),
            Some(RebuildReason::DepfileNotUtf8)
        );
    }

    #[test]
    fn depfile_changed_size_since_stat_is_unreadable() {
        let fs = fixture(GOOD_RULE);
        let depfile_meta = fs.metadata(Path::new(DEPFILE)).unwrap();
        let artifact_meta = fs.metadata(Path::new(GCH)).unwrap();
        fs.file(DEPFILE, b"shorter", 200);
        let mut rec = MemoryReporter::new();
        let reason = check_dependencies(
            &fs,
            &mut rec,
            &artifacts(),
            &LimitsConfig::default(),
            TieBreak::Fresh,
            &depfile_meta,
            &artifact_meta,
        );
        assert_eq!(reason, Some(RebuildReason::DepfileUnreadable));
    }

    #[test]
    fn stops_at_first_stale_dependency() {
        let fs = fixture(GOOD_RULE);
        fs.file("/core/pins.h", b"p", 300);
        let mut rec = MemoryReporter::new();
        run(&fs, TieBreak::Fresh, &mut rec);
        assert!(!rec
            .messages()
            .contains(&" dep file: /core/my lib.h".to_string()));
    }
}
