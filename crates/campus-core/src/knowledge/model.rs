use serde::{Deserialize, Serialize};

/// Placeholder rendered wherever a knowledge base field is missing.
pub const NOT_AVAILABLE: &str = "Not available";

/// Top-level knowledge base document. Missing keys deserialize to empty sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    /// Absent when the document carries no college metadata at all; the website
    /// resolver only answers when this is present.
    pub college_info: Option<CollegeInfo>,
    pub faqs: Vec<Faq>,
    pub admissions: Admissions,
    pub exams: Exams,
    pub placements: Placements,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegeInfo {
    pub name: Option<String>,
    pub website: Option<String>,
    pub admissions_url: Option<String>,
    pub courses_url: Option<String>,
    pub contact_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Admissions {
    pub process: Option<String>,
    pub requirements: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exams {
    pub schedule: Option<String>,
    pub rules: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placements {
    pub companies: Option<String>,
    pub stats: Option<String>,
}

/// Non-empty value or `None`; empty strings in the document count as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CollegeInfo {
    pub fn website(&self) -> Option<&str> {
        present(&self.website)
    }

    pub fn admissions_url(&self) -> Option<&str> {
        present(&self.admissions_url)
    }

    pub fn courses_url(&self) -> Option<&str> {
        present(&self.courses_url)
    }

    pub fn contact_url(&self) -> Option<&str> {
        present(&self.contact_url)
    }

    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }
}

impl Admissions {
    pub fn process(&self) -> Option<&str> {
        present(&self.process)
    }

    pub fn requirements(&self) -> Option<&str> {
        present(&self.requirements)
    }

    pub fn deadline(&self) -> Option<&str> {
        present(&self.deadline)
    }

    /// One-line summary for the generation context.
    pub fn summary(&self) -> String {
        format!(
            "Process: {}; Requirements: {}; Deadline: {}",
            self.process().unwrap_or(NOT_AVAILABLE),
            self.requirements().unwrap_or(NOT_AVAILABLE),
            self.deadline().unwrap_or(NOT_AVAILABLE)
        )
    }
}

impl Exams {
    pub fn schedule(&self) -> Option<&str> {
        present(&self.schedule)
    }

    pub fn rules(&self) -> Option<&str> {
        present(&self.rules)
    }

    pub fn summary(&self) -> String {
        format!(
            "Schedule: {}; Rules: {}",
            self.schedule().unwrap_or(NOT_AVAILABLE),
            self.rules().unwrap_or(NOT_AVAILABLE)
        )
    }
}

impl Placements {
    pub fn companies(&self) -> Option<&str> {
        present(&self.companies)
    }

    pub fn stats(&self) -> Option<&str> {
        present(&self.stats)
    }

    pub fn summary(&self) -> String {
        format!(
            "Companies: {}; Statistics: {}",
            self.companies().unwrap_or(NOT_AVAILABLE),
            self.stats().unwrap_or(NOT_AVAILABLE)
        )
    }
}

impl KnowledgeBase {
    /// True when the document carries no usable section at all (e.g. `{}`).
    pub fn is_empty(&self) -> bool {
        self.college_info.is_none()
            && self.faqs.is_empty()
            && self.admissions == Admissions::default()
            && self.exams == Exams::default()
            && self.placements == Placements::default()
    }

    /// Generic website URL, if the document has one.
    pub fn website(&self) -> Option<&str> {
        self.college_info.as_ref().and_then(CollegeInfo::website)
    }

    /// Plain-text summary handed to the generative model as context.
    pub fn context_summary(&self) -> String {
        format!(
            "College Website: {}\nAdmissions: {}\nExams: {}\nPlacements: {}",
            self.website().unwrap_or(NOT_AVAILABLE),
            self.admissions.summary(),
            self.exams.summary(),
            self.placements.summary()
        )
    }
}
