//! Output files and their sections.

use indexmap::IndexMap;

use super::code_section::CodeSection;
use super::section_name::SectionName;

/// One output source file.
///
/// Sections are kept in creation order and indexed by name. The `root`
/// section exists from the moment the file is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFile {
    name: String,
    sections: IndexMap<SectionName, CodeSection>,
}

impl CodeFile {
    /// Creates a file holding an empty `root` section.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut sections = IndexMap::new();
        sections.insert(SectionName::root(), CodeSection::new(SectionName::root(), &name));
        Self { name, sections }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a section by its exact (normalized) name, e.g. `root` or `#greet`.
    pub fn find_code_section_by_name(&self, name: &str) -> Option<&CodeSection> {
        self.sections.get(name)
    }

    pub fn root(&self) -> &CodeSection {
        // Inserted in `new` and never removed.
        &self.sections[0]
    }

    /// Returns all sections in creation order.
    pub fn sections(&self) -> impl Iterator<Item = &CodeSection> {
        self.sections.values()
    }

    /// Returns the number of sections, `root` included.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the named section, creating it empty if needed.
    pub(crate) fn section_mut(&mut self, name: SectionName) -> &mut CodeSection {
        let file = &self.name;
        self.sections
            .entry(name)
            .or_insert_with_key(|key| CodeSection::new(key.clone(), file.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_has_root() {
        let file = CodeFile::new("utils.js");
        assert_eq!(file.name(), "utils.js");
        assert_eq!(file.section_count(), 1);
        assert!(file.root().name().is_root());
        assert!(file.root().is_empty());
        assert_eq!(file.root().file_name(), "utils.js");
    }

    #[test]
    fn test_find_code_section_by_name() {
        let mut file = CodeFile::new("index.js");
        file.section_mut(SectionName::new("greet"))
            .push_chunk("hi".to_string());

        assert!(file.find_code_section_by_name("root").is_some());
        assert_eq!(
            file.find_code_section_by_name("#greet").unwrap().chunks(),
            &["hi"]
        );
        assert!(file.find_code_section_by_name("#missing").is_none());
        // Lookup is exact: the bare name is not normalized.
        assert!(file.find_code_section_by_name("greet").is_none());
    }

    #[test]
    fn test_section_mut_reuses_existing() {
        let mut file = CodeFile::new("index.js");
        file.section_mut(SectionName::new("a")).push_chunk("1".to_string());
        file.section_mut(SectionName::new("#a")).push_chunk("2".to_string());
        file.section_mut(SectionName::root()).push_chunk("r".to_string());

        assert_eq!(file.section_count(), 2);
        let names: Vec<_> = file.sections().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["root", "#a"]);
        assert_eq!(file.find_code_section_by_name("#a").unwrap().chunks(), &["1", "2"]);
    }
}
