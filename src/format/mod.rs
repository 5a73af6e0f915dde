//! Structure detection for extracted text lines.
//!
//! A [`Classifier`] walks an ordered rule table (all-caps heading, colon
//! heading, keyword heading, list item, paragraph) and stops at the first
//! rule that matches. Domain terms from the [`Vocabulary`] are then set in
//! bold by the [`Emphasizer`].

mod classifier;
mod emphasis;
mod rules;
mod text;
mod vocabulary;

pub use classifier::Classifier;
pub use emphasis::Emphasizer;
pub use rules::{list_content, rule_table, Rule, RuleContext, BULLET_GLYPHS, DASHES};
pub use text::{is_all_caps, normalize_line, title_case, word_count};
pub use vocabulary::Vocabulary;
