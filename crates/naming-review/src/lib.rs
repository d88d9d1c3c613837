//! Naming review: split identifiers into words, classify them against a
//! frozen part-of-speech dictionary, and report names that break the
//! grammatical naming rules.
//!
//! ```rust
//! use naming_dict::Dictionary;
//! use naming_review::{Grammar, review};
//! use naming_types::{Identifier, TypeCategory};
//!
//! let grammar = Grammar::with_dictionary(Dictionary::empty());
//! let id = Identifier::variable("item", Some(TypeCategory::DynamicArray));
//! let findings = review(&grammar, &id);
//! assert_eq!(findings.len(), 1);
//! ```

pub mod check;
pub mod grammar;
pub mod handlers;
pub mod rules;
pub mod tokenize;

pub use check::{CheckReport, check_file};
pub use grammar::{Grammar, WordProfile};
pub use handlers::{AppState, router};
pub use rules::{is_exempt, review, review_all};
pub use tokenize::split_words;
