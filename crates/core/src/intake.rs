use crate::project::UploadedFile;

/// Ordered set of uploaded context files, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSet {
    files: Vec<UploadedFile>,
}

impl UploadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every file whose name is not already present.
    ///
    /// A later file sharing a name with an existing entry (or with an earlier
    /// file of the same batch) is dropped. Returns how many files were added.
    pub fn merge(&mut self, incoming: Vec<UploadedFile>) -> usize {
        let before = self.files.len();

        for file in incoming {
            if !self.contains(&file.name) {
                self.files.push(file);
            }
        }

        self.files.len() - before
    }

    /// Remove the entry named `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.files.iter().position(|file| file.name == name) {
            Some(index) => {
                self.files.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.name == name)
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Hand the files over and leave the set empty.
    pub fn take(&mut self) -> Vec<UploadedFile> {
        std::mem::take(&mut self.files)
    }
}

impl From<Vec<UploadedFile>> for UploadSet {
    fn from(files: Vec<UploadedFile>) -> Self {
        let mut set = Self::new();
        set.merge(files);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_of_duplicate_names() {
        let mut set = UploadSet::new();
        let added = set.merge(vec![
            UploadedFile::new("notes.md", "first"),
            UploadedFile::new("notes.md", "second"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.files()[0].content, "first");
    }

    #[test]
    fn test_merge_drops_names_already_in_set() {
        let mut set = UploadSet::from(vec![UploadedFile::new("a.txt", "old")]);
        let added = set.merge(vec![
            UploadedFile::new("a.txt", "new"),
            UploadedFile::new("b.txt", "b"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
        assert_eq!(set.files()[0].content, "old");
    }

    #[test]
    fn test_remove_only_touches_named_entry() {
        let mut set = UploadSet::from(vec![
            UploadedFile::new("a.txt", "a"),
            UploadedFile::new("b.txt", "b"),
            UploadedFile::new("c.txt", "c"),
        ]);

        assert!(set.remove("b.txt"));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_remove_unknown_name_is_noop() {
        let mut set = UploadSet::from(vec![UploadedFile::new("a.txt", "a")]);
        assert!(!set.remove("z.txt"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_take_empties_the_set() {
        let mut set = UploadSet::from(vec![UploadedFile::new("a.txt", "a")]);
        let files = set.take();

        assert_eq!(files.len(), 1);
        assert!(set.is_empty());
    }
}
