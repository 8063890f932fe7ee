use std::fmt;

/// Supported citation benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitationDataset {
    /// 2,708 machine-learning papers in seven classes.
    Cora,
    /// 3,312 papers in six classes; its citation file references papers
    /// missing from the content file.
    CiteSeer,
}

impl CitationDataset {
    /// Every supported dataset.
    pub const ALL: [Self; 2] = [Self::Cora, Self::CiteSeer];

    /// Lower-case name, also used as the file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cora => "cora",
            Self::CiteSeer => "citeseer",
        }
    }

    /// Paper table file name.
    #[must_use]
    pub fn content_file(self) -> String {
        format!("{}.content", self.as_str())
    }

    /// Citation list file name.
    #[must_use]
    pub fn cites_file(self) -> String {
        format!("{}.cites", self.as_str())
    }

    /// Gzipped tarball holding both files.
    #[must_use]
    pub fn archive_file(self) -> String {
        format!("{}.tgz", self.as_str())
    }
}

impl fmt::Display for CitationDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
