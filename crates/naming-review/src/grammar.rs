//! Part-of-speech and number judgements over a frozen dictionary.
//!
//! [`Grammar`] answers two families of questions about a single word:
//!
//! - number: is it plural, is it singular? An explicit `pl`/`s` dictionary
//!   tag settles the question; otherwise the algorithmic pluralizer decides.
//! - part of speech: is it a noun, verb, verb bare form, adjective? Plural
//!   words are classified by their singular form. Words the dictionary does
//!   not know satisfy every part-of-speech query, so vocabulary gaps never
//!   produce findings.

use std::borrow::Cow;

use naming_dict::Dictionary;
use naming_morphy::Pluralizer;
use naming_types::Tag;
use serde::Serialize;

/// Read-only view combining the merged dictionary and the pluralizer.
///
/// Built once per run and shared; every method takes `&self`.
#[derive(Clone, Debug)]
pub struct Grammar {
    dict: Dictionary,
    pluralizer: Pluralizer,
}

/// Everything [`Grammar`] can say about one word.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WordProfile {
    pub word: String,
    pub base_form: String,
    pub known: bool,
    pub tags: Vec<String>,
    pub noun: bool,
    pub verb: bool,
    pub verb_bare_form: bool,
    pub adjective: bool,
    pub plural: bool,
    pub singular: bool,
}

impl Grammar {
    pub fn new(dict: Dictionary, pluralizer: Pluralizer) -> Self {
        Self { dict, pluralizer }
    }

    /// Grammar over `dict` with the built-in pluralizer tables.
    pub fn with_dictionary(dict: Dictionary) -> Self {
        Self::new(dict, Pluralizer::new())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn pluralizer(&self) -> &Pluralizer {
        &self.pluralizer
    }

    pub fn is_plural(&self, word: &str) -> bool {
        if self.dict.has_tag(word, Tag::Plural) == Some(true) {
            return true;
        }
        self.pluralizer.is_plural(word)
    }

    pub fn is_singular(&self, word: &str) -> bool {
        if self.dict.has_tag(word, Tag::Singular) == Some(true) {
            return true;
        }
        self.pluralizer.is_singular(word)
    }

    /// The form used for classification: the singular of a plural word,
    /// otherwise the word itself.
    pub fn base_form<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.is_plural(word) {
            Cow::Owned(self.pluralizer.singularize(word))
        } else {
            Cow::Borrowed(word)
        }
    }

    /// Whether `word` carries `tag`; unknown words carry every tag.
    pub fn has_tag(&self, word: &str, tag: Tag) -> bool {
        let base = self.base_form(word);
        self.dict.has_tag(&base, tag).unwrap_or(true)
    }

    pub fn is_noun(&self, word: &str) -> bool {
        self.has_tag(word, Tag::Noun)
    }

    pub fn is_verb(&self, word: &str) -> bool {
        self.has_tag(word, Tag::Verb)
    }

    pub fn is_verb_bare_form(&self, word: &str) -> bool {
        self.has_tag(word, Tag::VerbBareForm)
    }

    /// Adjectives, plus bare-form verbs which act as modifiers ("update").
    pub fn is_adjective(&self, word: &str) -> bool {
        self.has_tag(word, Tag::Adjective) || self.is_verb_bare_form(word)
    }

    pub fn profile(&self, word: &str) -> WordProfile {
        let base = self.base_form(word);
        let tags = self.dict.tags(&base);
        WordProfile {
            word: word.to_string(),
            base_form: base.to_string(),
            known: tags.is_some(),
            tags: tags
                .map(|t| t.iter().map(|tag| tag.to_string()).collect())
                .unwrap_or_default(),
            noun: self.is_noun(word),
            verb: self.is_verb(word),
            verb_bare_form: self.is_verb_bare_form(word),
            adjective: self.is_adjective(word),
            plural: self.is_plural(word),
            singular: self.is_singular(word),
        }
    }
}
