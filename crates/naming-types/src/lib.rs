//! Shared vocabulary for naming review: grammatical tags, type categories,
//! identifier roles, and the findings the rule engine hands back.
//!
//! The goal is a dependency-free crate that both the dictionary loader and the
//! rule engine can key on. Tags mirror the short codes used by dictionary
//! files (`n`, `v`, `vb`, `a`, `pl`, `s`); [`TagSet`] is the per-word set a
//! merged dictionary stores.
//!
//! ```rust
//! use naming_types::{Tag, TagSet, TypeCategory};
//!
//! let mut tags = TagSet::new();
//! tags.insert(Tag::from_code("v").unwrap());
//! assert!(tags.contains(Tag::Verb));
//! assert!(!tags.contains(Tag::Noun));
//! assert_eq!(TypeCategory::from_name("slice"), Some(TypeCategory::DynamicArray));
//! ```

use std::fmt;

/// Grammatical tag attachable to a dictionary word.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Noun,
    Verb,
    VerbBareForm,
    Adjective,
    Plural,
    Singular,
}

impl Tag {
    pub const ALL: [Tag; 6] = [
        Tag::Noun,
        Tag::Verb,
        Tag::VerbBareForm,
        Tag::Adjective,
        Tag::Plural,
        Tag::Singular,
    ];

    /// Parse a dictionary tag code into an enum.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "n" => Some(Tag::Noun),
            "v" => Some(Tag::Verb),
            "vb" => Some(Tag::VerbBareForm),
            "a" => Some(Tag::Adjective),
            "pl" => Some(Tag::Plural),
            "s" => Some(Tag::Singular),
            _ => None,
        }
    }

    /// Emit the code used in dictionary files.
    pub fn code(self) -> &'static str {
        match self {
            Tag::Noun => "n",
            Tag::Verb => "v",
            Tag::VerbBareForm => "vb",
            Tag::Adjective => "a",
            Tag::Plural => "pl",
            Tag::Singular => "s",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tag::Noun => "noun",
            Tag::Verb => "verb",
            Tag::VerbBareForm => "verb-bare-form",
            Tag::Adjective => "adjective",
            Tag::Plural => "explicit-plural",
            Tag::Singular => "explicit-singular",
        })
    }
}

/// Set of tags recorded for one word. Presence means the tag holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TagSet(u8);

impl TagSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, tag: Tag) {
        self.0 |= tag.bit();
    }

    pub fn remove(&mut self, tag: Tag) {
        self.0 &= !tag.bit();
    }

    pub fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Tags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Coarse classification of a declared type, as far as naming cares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TypeCategory {
    Bool,
    FixedArray,
    DynamicArray,
    Map,
    Other,
}

impl TypeCategory {
    /// Parse the category names used by source inspectors.
    ///
    /// `unknown` is deliberately not accepted here; callers model an unknown
    /// type as `Option::None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(TypeCategory::Bool),
            "fixed-array" | "array" => Some(TypeCategory::FixedArray),
            "dynamic-array" | "slice" => Some(TypeCategory::DynamicArray),
            "map" => Some(TypeCategory::Map),
            "other" => Some(TypeCategory::Other),
            _ => None,
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, TypeCategory::FixedArray | TypeCategory::DynamicArray)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeCategory::Bool => "bool",
            TypeCategory::FixedArray => "fixed-array",
            TypeCategory::DynamicArray => "dynamic-array",
            TypeCategory::Map => "map",
            TypeCategory::Other => "other",
        })
    }
}

/// Opaque source location. The engine never interprets it, only copies it
/// onto findings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// What kind of declaration an identifier names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Variable,
    Type,
    Parameter,
    /// A function together with the parameters declared in its signature.
    Function { params: Vec<Identifier> },
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Variable => "variable",
            Role::Type => "type",
            Role::Parameter => "parameter",
            Role::Function { .. } => "function",
        }
    }
}

/// A named program entity under review.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub role: Role,
    /// `None` when the source inspector could not determine the type.
    pub category: Option<TypeCategory>,
    pub position: Position,
}

impl Identifier {
    pub fn variable(name: impl Into<String>, category: Option<TypeCategory>) -> Self {
        Self {
            name: name.into(),
            role: Role::Variable,
            category,
            position: Position::default(),
        }
    }

    /// A named type declaration. Its own category is a named type, which is
    /// never a collection, so it is reviewed as a scalar.
    pub fn type_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Type,
            category: Some(TypeCategory::Other),
            position: Position::default(),
        }
    }

    pub fn parameter(name: impl Into<String>, category: Option<TypeCategory>) -> Self {
        Self {
            name: name.into(),
            role: Role::Parameter,
            category,
            position: Position::default(),
        }
    }

    pub fn function(name: impl Into<String>, params: Vec<Identifier>) -> Self {
        Self {
            name: name.into(),
            role: Role::Function { params },
            category: None,
            position: Position::default(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// The naming rules, in evaluation order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rule {
    BooleanVerb,
    LeadingNounOrAdjective,
    ContainsNoun,
    CollectionPlural,
    ScalarSingular,
    FunctionVerb,
}

impl Rule {
    /// Diagnostic wording reported for a violation.
    pub fn message(self) -> &'static str {
        match self {
            Rule::BooleanVerb => {
                "boolean name should contain/start with a verb (ex. selected->isSelected, updatable->canUpdate)"
            }
            Rule::LeadingNounOrAdjective => "name should start with a noun or adjective",
            Rule::ContainsNoun => "name should contain at least one noun",
            Rule::CollectionPlural => {
                "final noun in an array/slice name must be plural (or list/array/slice)"
            }
            Rule::ScalarSingular => "final noun in a non-collection name must be singular",
            Rule::FunctionVerb => "function name should start with a verb",
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Rule::BooleanVerb => "boolean-verb",
            Rule::LeadingNounOrAdjective => "leading-noun-or-adjective",
            Rule::ContainsNoun => "contains-noun",
            Rule::CollectionPlural => "collection-plural",
            Rule::ScalarSingular => "scalar-singular",
            Rule::FunctionVerb => "function-verb",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One reported naming-rule violation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finding {
    pub position: Position,
    pub name: String,
    pub rule: Rule,
    pub message: String,
}

impl Finding {
    pub fn new(identifier: &Identifier, rule: Rule) -> Self {
        Self {
            position: identifier.position.clone(),
            name: identifier.name.clone(),
            rule,
            message: rule.message().to_string(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_codes_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(Tag::from_code("x"), None);
        assert_eq!(Tag::VerbBareForm.to_string(), "verb-bare-form");
    }

    #[test]
    fn tag_set_tracks_membership() {
        let mut tags: TagSet = [Tag::Noun, Tag::Verb].into_iter().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(Tag::Noun));
        tags.remove(Tag::Noun);
        assert!(!tags.contains(Tag::Noun));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec![Tag::Verb]);
        tags.remove(Tag::Verb);
        assert!(tags.is_empty());
    }

    #[test]
    fn parses_type_categories() {
        assert_eq!(TypeCategory::from_name("bool"), Some(TypeCategory::Bool));
        assert_eq!(TypeCategory::from_name("array"), Some(TypeCategory::FixedArray));
        assert_eq!(
            TypeCategory::from_name("dynamic-array"),
            Some(TypeCategory::DynamicArray)
        );
        assert_eq!(TypeCategory::from_name("unknown"), None);
        assert!(TypeCategory::FixedArray.is_collection());
        assert!(!TypeCategory::Map.is_collection());
    }

    #[test]
    fn type_names_are_scalar() {
        let id = Identifier::type_name("UserList");
        assert_eq!(id.role, Role::Type);
        assert_eq!(id.category, Some(TypeCategory::Other));
    }

    #[test]
    fn finding_copies_identifier_position() {
        let pos = Position {
            file: Some("main.go".into()),
            line: 3,
            column: 7,
        };
        let id = Identifier::variable("item", Some(TypeCategory::DynamicArray)).at(pos);
        let finding = Finding::new(&id, Rule::CollectionPlural);
        assert_eq!(finding.position.line, 3);
        assert_eq!(finding.message, Rule::CollectionPlural.message());
        assert_eq!(
            finding.to_string(),
            "main.go:3:7: item: final noun in an array/slice name must be plural (or list/array/slice)"
        );
    }
}
