//! Paths of the files the helper manages.

use std::path::{Path, PathBuf};

use pch_config::LayoutConfig;

/// The fixed set of paths involved in one decision.
///
/// With the default layout:
///
/// ```text
/// <src>/Arduino.h              reference header
/// <dest>/pch/                  cache directory
/// <dest>/pch/Arduino.h         cached copy of the reference header
/// <dest>/pch/Arduino.h.d       dependency rule from the last compile
/// <dest>/pch/Arduino.h.gch     precompiled header from the last compile
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactSet {
    /// Folder holding the reference header.
    pub source_dir: PathBuf,
    /// Build output folder.
    pub dest_dir: PathBuf,
    /// Cache subdirectory of `dest_dir`.
    pub cache_dir: PathBuf,
    /// The reference header.
    pub source_header: PathBuf,
    /// The cached copy of the reference header.
    pub cached_header: PathBuf,
    /// The dependency rule file.
    pub depfile: PathBuf,
    /// The precompiled header.
    pub artifact: PathBuf,
}

impl ArtifactSet {
    /// Lays out the managed files for the given folders.
    pub fn new(source_dir: &Path, dest_dir: &Path, layout: &LayoutConfig) -> Self {
        let cache_dir = dest_dir.join(&layout.cache_dir);
        Self {
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            source_header: source_dir.join(&layout.header),
            cached_header: cache_dir.join(&layout.header),
            depfile: cache_dir.join(layout.depfile_name()),
            artifact: cache_dir.join(layout.artifact_name()),
            cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let set = ArtifactSet::new(
            Path::new("/cores/teensy4"),
            Path::new("/tmp/build"),
            &LayoutConfig::default(),
        );
        assert_eq!(set.source_header, PathBuf::from("/cores/teensy4/Arduino.h"));
        assert_eq!(set.cache_dir, PathBuf::from("/tmp/build/pch"));
        assert_eq!(set.cached_header, PathBuf::from("/tmp/build/pch/Arduino.h"));
        assert_eq!(set.depfile, PathBuf::from("/tmp/build/pch/Arduino.h.d"));
        assert_eq!(set.artifact, PathBuf::from("/tmp/build/pch/Arduino.h.gch"));
    }

    #[test]
    fn custom_layout() {
        let layout = LayoutConfig {
            header: "WProgram.h".to_string(),
            cache_dir: "precompiled".to_string(),
        };
        let set = ArtifactSet::new(Path::new("src"), Path::new("out"), &layout);
        assert_eq!(set.cached_header, PathBuf::from("out/precompiled/WProgram.h"));
        assert_eq!(set.artifact, PathBuf::from("out/precompiled/WProgram.h.gch"));
    }
}
