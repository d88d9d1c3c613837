//! English number inflection for identifier words.
//!
//! [`Pluralizer`] layers two override tables on top of the `Inflector`
//! crate's rule set:
//!
//! 1. Irregular pairs (`goose`/`geese`, `this`/`these`, `datum`/`data`, plus
//!    extra pairs from an exception file) are looked up in both directions.
//! 2. Uncountable words are both singular and plural; they never change form.
//! 3. Everything else goes to [`Inflector::to_plural`] /
//!    [`Inflector::to_singular`]. A singular form is only accepted when
//!    pluralizing it gives the word back; otherwise a plain `s`/`es` suffix
//!    is stripped if that round-trips, and failing both the word is left as is.
//!
//! The crate knows nothing about dictionaries; callers that have explicit
//! plural/singular facts consult those first and fall back to
//! [`Pluralizer::is_plural`] / [`Pluralizer::is_singular`].
//!
//! A word is plural when pluralizing it leaves it unchanged, and singular when
//! singularizing it leaves it unchanged. The two tests are independent; a
//! word can satisfy both.
//!
//! # Example
//! ```
//! use naming_morphy::Pluralizer;
//!
//! let pluralizer = Pluralizer::new();
//! assert!(pluralizer.is_plural("apples"));
//! assert!(!pluralizer.is_plural("apple"));
//! assert_eq!(pluralizer.singularize("children"), "child");
//! assert_eq!(pluralizer.pluralize("category"), "categories");
//! ```
//!
//! For a runnable demo, see `cargo run -p naming-morphy --example inflect -- <word>...`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use inflector::Inflector;

/// Grammatical number requested from [`Pluralizer::inflect`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Number {
    Singular,
    Plural,
}

/// Where an inflected form came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InflectionSource {
    Uncountable,
    Irregular,
    /// The `Inflector` rule set.
    Rules,
    /// A bare `s`/`es` suffix, used when the rule set's singular does not
    /// pluralize back to the input.
    Suffix,
    /// Already in the requested number.
    Unchanged,
}

/// An inflected form paired with its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Inflection {
    pub form: String,
    pub source: InflectionSource,
}

impl Inflection {
    fn new(form: String, source: InflectionSource) -> Self {
        Self { form, source }
    }
}

/// Pluralizer over the built-in tables plus optional exception pairs.
#[derive(Clone, Debug)]
pub struct Pluralizer {
    // singular -> plural
    plurals: HashMap<String, String>,
    // plural -> singular
    singulars: HashMap<String, String>,
}

impl Default for Pluralizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pluralizer {
    /// Pluralizer with the built-in irregular pairs only.
    pub fn new() -> Self {
        let mut pluralizer = Self {
            plurals: HashMap::new(),
            singulars: HashMap::new(),
        };
        for (singular, plural) in IRREGULARS {
            pluralizer.add_irregular(singular, plural);
        }
        pluralizer
    }

    /// Built-in pairs plus an exception file of `plural singular` lines (the
    /// WordNet `noun.exc` layout).
    ///
    /// The file is optional; a missing one yields the built-in tables.
    pub fn load(exceptions: impl AsRef<Path>) -> Result<Self> {
        let mut pluralizer = Self::new();
        let path = exceptions.as_ref();
        if !path.exists() {
            return Ok(pluralizer);
        }
        let file =
            File::open(path).with_context(|| format!("open exception file {}", path.display()))?;
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
            let mut parts = line.split_whitespace();
            if let (Some(plural), Some(singular)) = (parts.next(), parts.next()) {
                pluralizer.add_irregular(&normalize(singular), &normalize(plural));
            }
        }
        Ok(pluralizer)
    }

    /// Register an irregular pair. Later registrations win.
    pub fn add_irregular(&mut self, singular: &str, plural: &str) {
        self.plurals.insert(singular.to_string(), plural.to_string());
        self.singulars.insert(plural.to_string(), singular.to_string());
    }

    /// Number of irregular pairs known.
    pub fn irregular_count(&self) -> usize {
        self.plurals.len()
    }

    /// Inflect `word` into the requested number, keeping provenance.
    pub fn inflect(&self, word: &str, number: Number) -> Inflection {
        let word = normalize(word);
        if word.is_empty() {
            return Inflection::new(word, InflectionSource::Unchanged);
        }

        let (same, other) = match number {
            Number::Plural => (&self.singulars, &self.plurals),
            Number::Singular => (&self.plurals, &self.singulars),
        };
        if same.contains_key(&word) {
            return Inflection::new(word, InflectionSource::Irregular);
        }
        if let Some(form) = other.get(&word) {
            return Inflection::new(form.clone(), InflectionSource::Irregular);
        }
        if UNCOUNTABLE.binary_search(&word.as_str()).is_ok() {
            return Inflection::new(word, InflectionSource::Uncountable);
        }

        match number {
            Number::Plural => {
                let form = word.to_plural();
                if form == word {
                    Inflection::new(word, InflectionSource::Unchanged)
                } else {
                    Inflection::new(form, InflectionSource::Rules)
                }
            }
            Number::Singular => singular_of(word),
        }
    }

    pub fn pluralize(&self, word: &str) -> String {
        self.inflect(word, Number::Plural).form
    }

    pub fn singularize(&self, word: &str) -> String {
        self.inflect(word, Number::Singular).form
    }

    /// True when `word` is already plural.
    pub fn is_plural(&self, word: &str) -> bool {
        self.pluralize(word) == normalize(word)
    }

    /// True when `word` is already singular.
    pub fn is_singular(&self, word: &str) -> bool {
        self.singularize(word) == normalize(word)
    }
}

fn singular_of(word: String) -> Inflection {
    let form = word.to_singular();
    if form == word {
        return Inflection::new(word, InflectionSource::Unchanged);
    }
    if form.to_plural() == word {
        return Inflection::new(form, InflectionSource::Rules);
    }
    for suffix in ["s", "es"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if !stem.is_empty() && stem.to_plural() == word {
                return Inflection::new(stem.to_string(), InflectionSource::Suffix);
            }
        }
    }
    Inflection::new(word, InflectionSource::Unchanged)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

const IRREGULARS: &[(&str, &str)] = &[
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("quiz", "quizzes"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("self", "selves"),
    ("shelf", "shelves"),
    ("elf", "elves"),
    ("wolf", "wolves"),
    ("calf", "calves"),
    ("loaf", "loaves"),
    ("thief", "thieves"),
    ("hero", "heroes"),
    ("echo", "echoes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("volcano", "volcanoes"),
    ("torpedo", "torpedoes"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("diagnosis", "diagnoses"),
    ("hypothesis", "hypotheses"),
    ("thesis", "theses"),
    ("phenomenon", "phenomena"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("appendix", "appendices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("cactus", "cacti"),
    ("genus", "genera"),
    ("schema", "schemata"),
    ("gas", "gases"),
    ("atlas", "atlases"),
    ("slice", "slices"),
    ("splice", "splices"),
    ("accomplice", "accomplices"),
    ("proof", "proofs"),
    ("valve", "valves"),
    ("groove", "grooves"),
    ("movie", "movies"),
];

// Uncountables the rule set misses. Sorted for binary search.
const UNCOUNTABLE: &[&str] = &[
    "ammo",
    "analytics",
    "audio",
    "bison",
    "chassis",
    "clothing",
    "commerce",
    "corps",
    "debris",
    "expertise",
    "firmware",
    "fish",
    "headquarters",
    "kudos",
    "mail",
    "malice",
    "metadata",
    "moose",
    "police",
    "premises",
    "salmon",
    "scissors",
    "sewage",
    "staff",
    "swine",
    "trout",
];
