//! Supplementary free-text context (`~/.claudy-prompt`).

use std::path::Path;

use super::Enrichment;

/// Read the supplementary context file, trimmed. The text is otherwise used verbatim.
pub fn load_supplement(path: &Path) -> Enrichment<String> {
    let loaded = Enrichment::from_io(std::fs::read_to_string(path))
        .map(|text| text.trim().to_string());

    match &loaded {
        Enrichment::Loaded(text) => {
            tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded supplementary context")
        }
        Enrichment::Missing => {}
        Enrichment::Unreadable(reason) => {
            tracing::debug!(path = %path.display(), %reason, "Supplementary context unreadable")
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".claudy-prompt");
        std::fs::write(&path, "\n  I use fish and GNU coreutils.\n\n").unwrap();

        assert_eq!(
            load_supplement(&path),
            Enrichment::Loaded("I use fish and GNU coreutils.".to_string())
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_supplement(&dir.path().join("nope")), Enrichment::Missing);
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".claudy-prompt");
        std::fs::write(&path, b"\xff\xfe").unwrap();
        assert!(matches!(load_supplement(&path), Enrichment::Unreadable(_)));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_supplement(dir.path()).is_loaded());
    }
}
