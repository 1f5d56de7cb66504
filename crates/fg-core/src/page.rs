/// The two generation pages, each backed by its own controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Single,
    Grid,
}

impl Page {
    /// Page name for display in UI
    pub fn name(&self) -> &str {
        match self {
            Self::Single => "Single Face",
            Self::Grid => "Style-Mix Grid",
        }
    }

    /// Stable id used in logs and egui ids
    pub fn id(&self) -> &str {
        match self {
            Self::Single => "single",
            Self::Grid => "grid",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            Self::Single => "Generate one face from an optional seed",
            Self::Grid => "Mix row and column seeds into an R×C grid of faces",
        }
    }

    /// UI icon
    pub fn icon(&self) -> &str {
        match self {
            Self::Single => "🙂",
            Self::Grid => "▦",
        }
    }

    /// All available pages, in tab order
    pub fn all() -> [Page; 2] {
        [Self::Single, Self::Grid]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert_eq!(Page::Single.id(), "single");
        assert_eq!(Page::Grid.id(), "grid");
    }

    #[test]
    fn test_default_page() {
        assert_eq!(Page::default(), Page::Single);
    }

    #[test]
    fn test_all_pages() {
        assert_eq!(Page::all().len(), 2);
    }
}
