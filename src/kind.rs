use std::fmt;

/// What the caller is looking for on LinkedIn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityKind {
    Company,
    Person,
}

impl EntityKind {
    /// Path marker a LinkedIn URL must contain to be a page of this kind.
    pub fn path_marker(self) -> &'static str {
        match self {
            EntityKind::Company => "linkedin.com/company/",
            EntityKind::Person => "linkedin.com/in/",
        }
    }

    /// Site restriction appended to search queries.
    pub fn site_filter(self) -> &'static str {
        match self {
            EntityKind::Company => "site:linkedin.com/company",
            EntityKind::Person => "site:linkedin.com/in",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Company => f.write_str("company"),
            EntityKind::Person => f.write_str("person"),
        }
    }
}
