//! Keyword search over FAQs, falling back to templated answers from the structured sections.

use super::matching::{contains_any, contains_term, MatchMode};
use crate::knowledge::{CollegeInfo, KnowledgeBase, NOT_AVAILABLE};

const STOP_WORDS: [&str; 18] = [
    "the", "is", "at", "which", "on", "what", "how", "can", "i", "you", "a", "an", "and", "or",
    "but", "in", "with", "to",
];

/// Minimum share of query words an FAQ question must contain to count as a match.
const FAQ_SCORE_THRESHOLD: f64 = 0.3;

const INFORMATION_NOT_AVAILABLE: &str = "Information not available";

const MORE_INFO_TERMS: [&str; 3] = ["more info", "detail", "website"];
const ADMISSION_TERMS: [&str; 6] = ["admission", "apply", "eligibility", "requirement", "join", "enroll"];
const EXAM_TERMS: [&str; 6] = ["exam", "test", "schedule", "midterm", "final", "examination"];
const PLACEMENT_TERMS: [&str; 7] = ["placement", "job", "company", "salary", "package", "career", "employment"];

const PROCESS_TERMS: [&str; 3] = ["process", "how", "step"];
const REQUIREMENT_TERMS: [&str; 3] = ["requirement", "eligibility", "criteria"];
const DEADLINE_TERMS: [&str; 3] = ["deadline", "last date", "when"];

/// Structured section a query is routed to when no FAQ matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Admissions,
    Exams,
    Placements,
}

/// Scores queries against the knowledge base.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeSearcher {
    mode: MatchMode,
}

impl KnowledgeSearcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Lowercased, whitespace-split query with stop words and tokens of two characters or fewer removed.
    pub fn query_words(query: &str) -> Vec<String> {
        query
            .to_lowercase()
            .split_whitespace()
            .filter(|w| !STOP_WORDS.contains(w) && w.chars().count() > 2)
            .map(str::to_string)
            .collect()
    }

    /// Share of `query_words` found in `question`; 0 when there are no query words.
    pub fn score(&self, query_words: &[String], question: &str) -> f64 {
        if query_words.is_empty() {
            return 0.0;
        }
        let question = question.to_lowercase();
        let matches = query_words
            .iter()
            .filter(|w| contains_term(&question, w, self.mode))
            .count();
        matches as f64 / query_words.len() as f64
    }

    /// Best FAQ answer for `query`, or a templated section answer, or `None`.
    pub fn search(&self, query: &str, kb: &KnowledgeBase) -> Option<String> {
        let query_lower = query.trim().to_lowercase();
        if let Some(answer) = self.best_faq(query, kb) {
            let mut answer = answer.to_string();
            if !answer.to_lowercase().contains("website")
                && contains_any(&query_lower, &MORE_INFO_TERMS, self.mode)
            {
                if let Some(website) = kb.website() {
                    answer.push_str(&format!("\n\nFor more information, visit: {}", website));
                }
            }
            return Some(answer);
        }

        let section = self.classify_section(&query_lower)?;
        let college_info = kb.college_info.clone().unwrap_or_default();
        Some(match section {
            Section::Admissions => self.admissions_answer(&query_lower, kb, &college_info),
            Section::Exams => exams_answer(kb, &college_info),
            Section::Placements => placements_answer(kb, &college_info),
        })
    }

    /// Scans FAQs in order; the first FAQ with the strictly highest score at or above the threshold wins.
    fn best_faq<'a>(&self, query: &str, kb: &'a KnowledgeBase) -> Option<&'a str> {
        let query_words = Self::query_words(query);
        let mut best: Option<(&str, f64)> = None;
        for faq in &kb.faqs {
            let score = self.score(&query_words, &faq.question);
            if score < FAQ_SCORE_THRESHOLD {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((faq.answer.as_str(), score));
            }
        }
        best.map(|(answer, _)| answer).filter(|a| !a.is_empty())
    }

    fn classify_section(&self, query_lower: &str) -> Option<Section> {
        if contains_any(query_lower, &ADMISSION_TERMS, self.mode) {
            Some(Section::Admissions)
        } else if contains_any(query_lower, &EXAM_TERMS, self.mode) {
            Some(Section::Exams)
        } else if contains_any(query_lower, &PLACEMENT_TERMS, self.mode) {
            Some(Section::Placements)
        } else {
            None
        }
    }

    fn admissions_answer(&self, query_lower: &str, kb: &KnowledgeBase, info: &CollegeInfo) -> String {
        let admissions = &kb.admissions;
        let mut response = if contains_any(query_lower, &PROCESS_TERMS, self.mode) {
            format!(
                "Admission Process:\n{}",
                admissions.process().unwrap_or(INFORMATION_NOT_AVAILABLE)
            )
        } else if contains_any(query_lower, &REQUIREMENT_TERMS, self.mode) {
            format!(
                "Admission Requirements:\n{}",
                admissions.requirements().unwrap_or(INFORMATION_NOT_AVAILABLE)
            )
        } else if contains_any(query_lower, &DEADLINE_TERMS, self.mode) {
            format!(
                "Admission Deadline:\n{}",
                admissions.deadline().unwrap_or(INFORMATION_NOT_AVAILABLE)
            )
        } else {
            format!(
                "Admission Information:\n\nProcess: {}\n\nRequirements: {}\n\nDeadline: {}",
                admissions.process().unwrap_or(NOT_AVAILABLE),
                admissions.requirements().unwrap_or(NOT_AVAILABLE),
                admissions.deadline().unwrap_or(NOT_AVAILABLE)
            )
        };

        if let Some(url) = info.admissions_url() {
            response.push_str(&format!(
                "\n\n🌐 For detailed admission information, visit: {}",
                url
            ));
        } else if let Some(website) = info.website() {
            response.push_str(&format!("\n\n🌐 For more details, visit: {}", website));
        }
        response
    }
}

fn exams_answer(kb: &KnowledgeBase, info: &CollegeInfo) -> String {
    let mut response = format!(
        "Exam Information:\n\nSchedule: {}\n\nRules: {}",
        kb.exams.schedule().unwrap_or(NOT_AVAILABLE),
        kb.exams.rules().unwrap_or(NOT_AVAILABLE)
    );
    if let Some(website) = info.website() {
        response.push_str(&format!("\n\n🌐 For more exam details, visit: {}", website));
    }
    response
}

fn placements_answer(kb: &KnowledgeBase, info: &CollegeInfo) -> String {
    let mut response = format!(
        "Placement Information:\n\nCompanies: {}\n\nStatistics: {}",
        kb.placements.companies().unwrap_or(NOT_AVAILABLE),
        kb.placements.stats().unwrap_or(NOT_AVAILABLE)
    );
    if let Some(website) = info.website() {
        response.push_str(&format!(
            "\n\n🌐 For detailed placement reports, visit: {}",
            website
        ));
    }
    response
}
