//! Decides whether a query is about the college and should prefer local knowledge.

use super::matching::{contains_any, MatchMode};

/// Domain keywords; a query mentioning any of them is college-specific.
pub const COLLEGE_KEYWORDS: [&str; 20] = [
    "admission",
    "fee",
    "exam",
    "placement",
    "course",
    "eligibility",
    "sit",
    "college",
    "university",
    "semester",
    "hostel",
    "faculty",
    "b.tech",
    "engineering",
    "deadline",
    "requirement",
    "scholarship",
    "website",
    "contact",
    "about college",
];

pub fn is_college_specific(query: &str, mode: MatchMode) -> bool {
    contains_any(&query.to_lowercase(), &COLLEGE_KEYWORDS, mode)
}
