//! Runner directory environment.

use std::path::{Path, PathBuf};

/// Directory layout for a benchmark run.
#[derive(Debug, Clone)]
pub struct RunEnv {
    /// Persisted score collections
    pub scoredir: PathBuf,
    /// Prepared reference files
    pub refdir: PathBuf,
    /// Decoded intermediates, encoder outputs and progress reports
    pub tmpdir: PathBuf,
}

impl RunEnv {
    /// Standard layout under a base directory.
    pub fn under(basedir: impl AsRef<Path>) -> Self {
        let basedir = basedir.as_ref();
        Self {
            scoredir: basedir.join("scores"),
            refdir: basedir.join("references"),
            tmpdir: basedir.join("tmp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let env = RunEnv::under("/data/bench");
        assert_eq!(env.scoredir, Path::new("/data/bench/scores"));
        assert_eq!(env.refdir, Path::new("/data/bench/references"));
        assert_eq!(env.tmpdir, Path::new("/data/bench/tmp"));
    }
}
