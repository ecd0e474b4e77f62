//! Execution context for tangle passes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::{Result, TangleError};
use crate::io::{FileCache, RealFileCache};

/// Configuration, file system access and the directory everything is relative to.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// File cache for reading source documents.
    pub file_cache: Arc<dyn FileCache>,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a context reading from the real file system under `base_dir`.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let file_cache = Arc::new(RealFileCache::new(base_dir.clone()));
        Self {
            config,
            file_cache,
            base_dir,
        }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context from the current directory and the nearest config file.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Replaces the file cache.
    #[must_use]
    pub fn with_file_cache(mut self, file_cache: Arc<dyn FileCache>) -> Self {
        self.file_cache = file_cache;
        self
    }

    /// Returns source file paths matching the configured patterns, sorted.
    ///
    /// Paths matching an `exclude` pattern are left out.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let exclude = self
            .config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut files = Vec::new();
        for pattern in &self.config.source_patterns {
            files.extend(
                self.file_cache
                    .glob(pattern)?
                    .into_iter()
                    .filter(|path| !is_excluded(path, &exclude)),
            );
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Returns the given files, checking that each is a known source file.
    ///
    /// Paths may be absolute or relative to `base_dir`.
    pub fn source_files_filtered(&self, filter: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let all_files = self.source_files()?;

        let mut result = Vec::new();
        for path in filter {
            let relative = self.relative_path(path);
            if !all_files.contains(&relative) {
                return Err(TangleError::Config(format!(
                    "File {} is not a source file (does not match source_patterns)",
                    path.display()
                )));
            }
            result.push(relative);
        }

        result.sort();
        result.dedup();
        Ok(result)
    }

    /// Returns source files matching any of the given glob patterns.
    ///
    /// Fails if a pattern matches no source file.
    pub fn source_files_glob(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let all_files = self.source_files()?;

        let mut matched = Vec::new();
        for pattern in patterns {
            let before = matched.len();
            matched.extend(
                self.file_cache
                    .glob(pattern)?
                    .into_iter()
                    .filter(|p| all_files.contains(p)),
            );
            if matched.len() == before {
                return Err(TangleError::Config(format!(
                    "Glob pattern '{}' matched no source files",
                    pattern
                )));
            }
        }

        matched.sort();
        matched.dedup();
        Ok(matched)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Returns where the generated file `name` is written.
    pub fn output_path(&self, name: &str) -> PathBuf {
        match self.config.output_dir() {
            Some(dir) => self.resolve_path(&dir.join(name)),
            None => self.resolve_path(Path::new(name)),
        }
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.base_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Exclude patterns match whole path components: `*` stops at `/`.
fn is_excluded(path: &Path, exclude: &[glob::Pattern]) -> bool {
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    exclude
        .iter()
        .any(|pattern| pattern.matches_path_with(path, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::VirtualFS;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn virtual_context(files: &[&str]) -> Context {
        let mut vfs = VirtualFS::new();
        for file in files {
            vfs.add_file(*file, "");
        }
        let config = Config {
            source_patterns: vec!["*.md".to_string()],
            ..Config::default()
        };
        Context::new(config, PathBuf::from("/project")).with_file_cache(Arc::new(vfs))
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        assert_eq!(
            ctx.resolve_path(Path::new("src/main.js")),
            dir.path().join("src/main.js")
        );
        let absolute = dir.path().join("absolute/path");
        assert_eq!(ctx.resolve_path(&absolute), absolute);
    }

    #[test]
    fn test_output_path() {
        let mut ctx = Context::default_for_dir(PathBuf::from("/project"));
        assert_eq!(ctx.output_path("math.js"), PathBuf::from("/project/math.js"));

        ctx.config.output_dir = Some(PathBuf::from("build"));
        assert_eq!(
            ctx.output_path("lib/math.js"),
            PathBuf::from("/project/build/lib/math.js")
        );
    }

    #[test]
    fn test_source_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("test.md"), "# Test").unwrap();
        std::fs::write(dir.path().join("other.txt"), "text").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        assert_eq!(ctx.source_files().unwrap(), vec![PathBuf::from("test.md")]);
    }

    #[test]
    fn test_vendored_markdown_is_not_a_source() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.js"), "real project code").unwrap();
        std::fs::write(dir.path().join("README.md"), "```bash\nnpm install\n```\n").unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
        std::fs::write(
            dir.path().join("node_modules/dep/README.md"),
            "```js\nrequire('dep')\n```\n",
        )
        .unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        assert_eq!(ctx.source_files().unwrap(), vec![PathBuf::from("README.md")]);
    }

    #[test]
    fn test_default_excludes() {
        let mut vfs = VirtualFS::new();
        for file in [
            "README.md",
            "docs.v2/guide.md",
            "packages/app/node_modules/dep/README.md",
            "target/doc/notes.md",
            ".github/ISSUE_TEMPLATE.md",
            "docs/.drafts/wip.md",
        ] {
            vfs.add_file(file, "");
        }
        let ctx = Context::default_for_dir(PathBuf::from("/project")).with_file_cache(Arc::new(vfs));

        assert_eq!(
            ctx.source_files().unwrap(),
            vec![PathBuf::from("README.md"), PathBuf::from("docs.v2/guide.md")]
        );
    }

    #[test]
    fn test_empty_exclude_reads_everything() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("node_modules/dep/README.md", "");
        let mut ctx = Context::default_for_dir(PathBuf::from("/project")).with_file_cache(Arc::new(vfs));
        ctx.config.exclude.clear();

        assert_eq!(
            ctx.source_files().unwrap(),
            vec![PathBuf::from("node_modules/dep/README.md")]
        );
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let mut ctx = virtual_context(&["a.md"]);
        ctx.config.exclude = vec!["[".to_string()];
        assert!(matches!(ctx.source_files(), Err(TangleError::GlobPattern(_))));
    }

    #[test]
    fn test_source_files_filtered() {
        let ctx = virtual_context(&["a.md", "docs/b.md"]);

        let files = ctx
            .source_files_filtered(&[PathBuf::from("/project/docs/b.md")])
            .unwrap();
        assert_eq!(files, vec![PathBuf::from("docs/b.md")]);

        let result = ctx.source_files_filtered(&[PathBuf::from("c.md")]);
        assert!(matches!(result, Err(TangleError::Config(_))));
    }

    #[test]
    fn test_source_files_glob() {
        let ctx = virtual_context(&["a.md", "docs/b.md", "docs/c.md"]);

        let files = ctx.source_files_glob(&["docs/*.md".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("docs/b.md"), PathBuf::from("docs/c.md")]);

        let result = ctx.source_files_glob(&["nothing/*.md".to_string()]);
        assert!(matches!(result, Err(TangleError::Config(_))));
    }
}
