//! College knowledge base: typed document model and the read-only store built from it.
//!
//! ## Document layout
//!
//! | Key            | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | `college_info` | name, website, admissions/courses/contact URLs          |
//! | `faqs`         | ordered `{question, answer}` pairs                       |
//! | `admissions`   | process, requirements, deadline                          |
//! | `exams`        | schedule, rules                                          |
//! | `placements`   | companies, stats                                         |
//!
//! Every key is optional; missing values render as [`NOT_AVAILABLE`] where they are used.

mod model;
mod store;

pub use model::{Admissions, CollegeInfo, Exams, Faq, KnowledgeBase, Placements, NOT_AVAILABLE};
pub use store::{KnowledgeError, KnowledgeStore};
