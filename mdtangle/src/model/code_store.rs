//! The code store: registry of output files built from annotated blocks.

use indexmap::IndexMap;

use super::annotation::DEFAULT_FILENAME;
use super::block::Block;
use super::code_file::CodeFile;
use super::scanner::scan_block_with_default;
use super::tangle::tangle_file;
use crate::config::{Config, FilePolicy};
use crate::errors::{Result, TangleError};

/// Registry of code files, in creation order.
///
/// Blocks are fed in with [`add_node`](Self::add_node); output text is
/// produced on demand with [`generate_source`](Self::generate_source).
#[derive(Debug, Clone)]
pub struct CodeStore {
    files: IndexMap<String, CodeFile>,
    policy: FilePolicy,
    default_filename: String,
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeStore {
    /// Creates an empty store that auto-creates files named by blocks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: IndexMap::new(),
            policy: FilePolicy::default(),
            default_filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Creates an empty store using the configured policy and default filename.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_policy(config.file_policy)
            .with_default_filename(config.default_filename.clone())
    }

    /// Sets how blocks naming an unregistered file are handled.
    #[must_use]
    pub fn with_policy(mut self, policy: FilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the filename used for blocks whose annotation names none.
    #[must_use]
    pub fn with_default_filename(mut self, name: impl Into<String>) -> Self {
        self.default_filename = name.into();
        self
    }

    pub fn policy(&self) -> FilePolicy {
        self.policy
    }

    pub fn default_filename(&self) -> &str {
        &self.default_filename
    }

    /// Registers a new code file, `None` meaning the default filename.
    ///
    /// Fails with [`TangleError::DuplicateFile`] if the name is taken; the
    /// store is left unchanged in that case.
    pub fn add_code_file(&mut self, name: Option<&str>) -> Result<&CodeFile> {
        let name = name.unwrap_or(&self.default_filename).to_string();
        if self.files.contains_key(&name) {
            return Err(TangleError::DuplicateFile(name));
        }

        tracing::debug!("Adding code file {}", name);
        let (index, _) = self.files.insert_full(name.clone(), CodeFile::new(name));
        Ok(&self.files[index])
    }

    /// Looks up a code file by exact name.
    pub fn find_code_file_by_name(&self, name: &str) -> Option<&CodeFile> {
        self.files.get(name)
    }

    /// Returns all code files in creation order.
    pub fn files(&self) -> impl Iterator<Item = &CodeFile> {
        self.files.values()
    }

    /// Returns all code file names in creation order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Returns the number of code files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no code file exists.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Adds a block to the section its annotation names.
    ///
    /// The target file and section are created when missing (files only
    /// under [`FilePolicy::AutoCreate`]). The block text is appended to the
    /// section and the sections it references are recorded as children.
    pub fn add_node(&mut self, block: Block) -> Result<()> {
        let scanned = scan_block_with_default(&block, &self.default_filename)?;

        tracing::debug!(
            "Block for {}{} ({} references)",
            scanned.filename,
            scanned.section,
            scanned.child_sections.len()
        );

        let file = self.file_mut(&scanned.filename)?;
        let section = file.section_mut(scanned.section);
        section.push_chunk(block.text);
        for child in scanned.child_sections {
            section.add_child(child);
        }

        Ok(())
    }

    /// Adds blocks in order, stopping at the first error.
    pub fn add_nodes<I>(&mut self, blocks: I) -> Result<()>
    where
        I: IntoIterator<Item = Block>,
    {
        for block in blocks {
            self.add_node(block)?;
        }
        Ok(())
    }

    /// Renders the complete text of one code file.
    pub fn generate_source(&self, filename: &str) -> Result<String> {
        let file = self
            .find_code_file_by_name(filename)
            .ok_or_else(|| TangleError::MissingFile(filename.to_string()))?;
        tangle_file(file)
    }

    /// Renders every code file, keyed by name in creation order.
    pub fn generate_all(&self) -> Result<IndexMap<String, String>> {
        self.files
            .values()
            .map(|file| Ok((file.name().to_string(), tangle_file(file)?)))
            .collect()
    }

    fn file_mut(&mut self, name: &str) -> Result<&mut CodeFile> {
        if !self.files.contains_key(name) {
            if !self.policy.auto_creates() {
                return Err(TangleError::UnregisteredFile(name.to_string()));
            }
            tracing::debug!("Creating code file {}", name);
            self.files.insert(name.to_string(), CodeFile::new(name));
        }
        self.files
            .get_mut(name)
            .ok_or_else(|| TangleError::MissingFile(name.to_string()))
    }
}
