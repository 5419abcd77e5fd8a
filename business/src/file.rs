use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq)]
enum Source {
    Memory(Arc<[u8]>),
    /// Contents stay on disk until [`PickedFile::read`].
    Disk(PathBuf),
}

/// A file chosen from local storage.
///
/// The size is known up front so the limit can be checked without loading
/// the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct PickedFile {
    name: String,
    size: u64,
    source: Source,
}

/// Ordered selection produced by one picker invocation.
pub type FileSet = Vec<PickedFile>;

impl PickedFile {
    /// A file whose contents are already in memory.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into().into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: Source::Memory(bytes),
        }
    }

    /// A file on disk, sized from its metadata.
    pub fn from_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            size,
            source: Source::Disk(path),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Location on disk, if the contents have not been loaded.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Disk(path) => Some(path),
            Source::Memory(_) => None,
        }
    }

    /// Loads the contents. Disk-backed files are read on every call.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            Source::Memory(bytes) => Ok(bytes.to_vec()),
            Source::Disk(path) => std::fs::read(path),
        }
    }
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("path", &self.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn in_memory_file_reports_its_length() {
        let file = PickedFile::new("a.txt", "hello");
        assert_eq!(file.size(), 5);
        assert_eq!(file.path(), None);
        assert_eq!(file.read().unwrap(), b"hello");
    }

    #[test]
    fn disk_file_is_sized_from_metadata() {
        let mut temp = tempfile::NamedTempFile::new().expect("temp file");
        temp.write_all(&[7u8; 2048]).expect("write temp file");

        let file = PickedFile::from_path(temp.path()).unwrap();
        assert_eq!(file.size(), 2048);
        assert_eq!(file.path(), Some(temp.path()));
        assert_eq!(
            file.name(),
            temp.path().file_name().unwrap().to_string_lossy()
        );
        assert_eq!(file.read().unwrap(), vec![7u8; 2048]);
    }

    #[test]
    fn disk_file_contents_are_read_lazily() {
        let mut temp = tempfile::NamedTempFile::new().expect("temp file");
        temp.write_all(b"first").expect("write temp file");
        let file = PickedFile::from_path(temp.path()).unwrap();

        temp.as_file_mut().set_len(0).expect("truncate");
        temp.write_all(b"second").expect("rewrite temp file");
        temp.flush().expect("flush");

        assert_eq!(file.size(), 5, "size is taken when picked");
        assert!(file.read().unwrap().ends_with(b"second"));
    }

    #[test]
    fn missing_file_cannot_be_picked() {
        assert!(PickedFile::from_path("/non/existent/upload.png").is_err());
    }
}
