/// Extension-to-category classification.
///
/// Maps file extensions to the fixed set of destination buckets used when
/// sorting a directory. The taxonomy is a compile-time constant; changing it
/// is a code change, not configuration.
///
/// # Examples
///
/// ```
/// use sweepdir::category::{Category, CategoryMap};
///
/// let map = CategoryMap::new();
/// assert_eq!(map.category_of(".jpg"), Category::Images);
/// assert_eq!(map.category_of(".ZIP"), Category::Archives);
/// assert_eq!(map.category_of(".xyz"), Category::Other);
/// ```
use std::collections::HashMap;

/// A destination bucket for sorted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raster and vector images.
    Images,
    /// Video containers.
    Video,
    /// Office documents and plain text.
    Documents,
    /// Audio files.
    Audio,
    /// Archives eligible for expansion.
    Archives,
    /// Fallback for anything unmatched, including extensionless files.
    Other,
}

impl Category {
    /// Every category in declaration order, `Other` last.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Video,
        Category::Documents,
        Category::Audio,
        Category::Archives,
        Category::Other,
    ];

    /// The subdirectory name this category sorts into.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Video => "video",
            Category::Documents => "documents",
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Other => "other",
        }
    }

    /// The extensions this category claims, dotted and lower-case.
    ///
    /// The lists are disjoint across categories; `Other` claims nothing
    /// explicitly and matches whatever is left over.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Images => &[".jpeg", ".png", ".jpg", ".svg", ".gif"],
            Category::Video => &[".avi", ".mp4", ".mov", ".mkv", ".wmv"],
            Category::Documents => &[
                ".doc", ".docx", ".txt", ".pdf", ".xlsx", ".xls", ".pptx", ".ppt", ".csv", ".odt",
                ".ods",
            ],
            Category::Audio => &[".mp3", ".ogg", ".wav", ".amr"],
            Category::Archives => &[".zip", ".gz", ".tar"],
            Category::Other => &[],
        }
    }
}

/// Case-insensitive extension lookup across all categories.
///
/// Built once per run; the underlying table never changes. Lookups take the
/// dotted extension form (`".jpg"`).
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extension_map: HashMap<&'static str, Category>,
}

impl CategoryMap {
    /// Builds the lookup table from the per-category extension lists.
    ///
    /// Categories are inserted in declaration order; since the lists are
    /// disjoint the order never decides a lookup, it only keeps construction
    /// reproducible.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();
        for category in Category::ALL {
            for extension in category.extensions() {
                extension_map.insert(*extension, category);
            }
        }
        Self { extension_map }
    }

    /// Returns the category owning `extension`, or `Other` if none does.
    ///
    /// Matching is case-insensitive; the empty extension (a file without one)
    /// is `Other`.
    pub fn category_of(&self, extension: &str) -> Category {
        if extension.is_empty() {
            return Category::Other;
        }
        self.extension_map
            .get(extension.to_lowercase().as_str())
            .copied()
            .unwrap_or(Category::Other)
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}
