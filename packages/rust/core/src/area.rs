//! ISBD area classification.
//!
//! Maps an element's label to one of the nine ISBD description areas by
//! keyword lookup. The table is fixed domain knowledge; rules are tested in
//! order and the first match wins, falling back to the general folder.

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

/// One of the ISBD description areas, plus a general fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// Content form and media type.
    Area0,
    /// Title and statement of responsibility.
    Area1,
    /// Edition.
    Area2,
    /// Material or type-of-resource specific.
    Area3,
    /// Publication, production, distribution.
    Area4,
    /// Material description.
    Area5,
    /// Series and multipart monographic resources.
    Area6,
    /// Notes.
    Area7,
    /// Resource identifier and terms of availability.
    Area8,
    /// Anything that matches no area keyword.
    General,
}

impl Area {
    /// Output folder name for this area.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Area0 => "area0",
            Self::Area1 => "area1",
            Self::Area2 => "area2",
            Self::Area3 => "area3",
            Self::Area4 => "area4",
            Self::Area5 => "area5",
            Self::Area6 => "area6",
            Self::Area7 => "area7",
            Self::Area8 => "area8",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.folder())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Keyword table, in priority order. First rule with a matching keyword
/// wins.
const RULES: &[(Area, &[&str])] = &[
    (
        Area::Area0,
        &[
            "content form",
            "media type",
            "production process",
            "content qualification",
        ],
    ),
    (
        Area::Area1,
        &[
            "title",
            "statement of responsibility",
            "parallel title",
            "other title",
        ],
    ),
    (Area::Area2, &["edition", "draft", "version"]),
    (
        Area::Area3,
        &[
            "mathematical data",
            "music format",
            "numbering",
            "unpublished statement",
            "cartographic",
            "serial",
        ],
    ),
    (
        Area::Area4,
        &[
            "publication",
            "production",
            "distribution",
            "publisher",
            "place of",
            "date of",
        ],
    ),
    (
        Area::Area5,
        &["extent", "physical", "dimension", "accompanying material"],
    ),
    (Area::Area6, &["series", "multipart monographic"]),
    (Area::Area7, &["note"]),
    (
        Area::Area8,
        &["identifier", "isbn", "issn", "ismn", "terms of availability"],
    ),
];

/// Classify an element label into its ISBD area.
///
/// Pure function: substring test against the lower-cased label, first
/// matching area wins, `Area::General` otherwise.
pub fn classify(label: &str) -> Area {
    let label = label.to_lowercase();
    for (area, keywords) in RULES {
        if keywords.iter().any(|keyword| label.contains(keyword)) {
            return *area;
        }
    }
    Area::General
}
