//! Filesystem-backed document hierarchy.
//!
//! A page `guide.md` owns the pages in the sibling directory `guide/`:
//!
//! ```text
//! wiki/
//! ├── guide.md
//! └── guide/
//!     ├── install.md
//!     ├── install/
//!     │   └── linux.md
//!     └── faq.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use wm_macros::{ArticleNode, DocumentSource};

/// Markdown file on disk, as seen by macro handlers.
pub(crate) struct FsDocument {
    path: PathBuf,
    root: PathBuf,
    title: String,
}

impl FsDocument {
    /// Open a document. Links are built relative to `root`.
    pub(crate) fn new(path: &Path, root: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
            title: title_from_content(content).unwrap_or_else(|| file_title(path)),
        }
    }

    fn articles_below(&self, page: &Path, depth: usize) -> Vec<ArticleNode> {
        if depth == 0 {
            return Vec::new();
        }

        let dir = page.with_extension("");
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
                return Vec::new();
            }
        };

        let mut pages: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        pages.sort();

        pages
            .iter()
            .map(|child| {
                ArticleNode::new(read_title(child), self.url_for(child))
                    .with_children(self.articles_below(child, depth - 1))
            })
            .collect()
    }

    /// Root-relative URL without the `.md` extension: `/guide/install`.
    fn url_for(&self, page: &Path) -> String {
        let relative = page.strip_prefix(&self.root).unwrap_or(page);
        let parts: Vec<String> = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("/{}", parts.join("/"))
    }
}

impl DocumentSource for FsDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn children(&self, depth: usize) -> Vec<ArticleNode> {
        self.articles_below(&self.path, depth)
    }
}

/// Title of a page: its first `# ` heading, otherwise the file name.
fn read_title(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => title_from_content(&content).unwrap_or_else(|| file_title(path)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read page");
            file_title(path)
        }
    }
}

fn title_from_content(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_owned())
        .filter(|title| !title.is_empty())
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_default()
}
