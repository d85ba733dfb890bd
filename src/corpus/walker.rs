use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extensions accepted as manual sources by the corpus loader.
const MANUAL_EXTENSIONS: &[&str] = &["txt", "md"];

pub fn is_manual_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MANUAL_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively collects manual files under `dir`, sorted by path so uploads
/// happen in a stable order.
pub fn collect_manual_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_manual_file(path))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_and_markdown_only() {
        assert!(is_manual_file(Path::new("manuals/elephants.txt")));
        assert!(is_manual_file(Path::new("manuals/contacts.MD")));
        assert!(!is_manual_file(Path::new("manuals/scan.pdf")));
        assert!(!is_manual_file(Path::new("manuals/README")));
    }
}
