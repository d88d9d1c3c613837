//! The naming rule engine.
//!
//! Each identifier is walked through an ordered list of checks and stops at
//! the first one that fails, so a value name yields at most one [`Finding`].
//! Functions are checked for a leading verb and then have every parameter
//! reviewed as a value name in its own right.

use naming_types::{Finding, Identifier, Role, Rule, TypeCategory};
use tracing::debug;

use crate::grammar::Grammar;
use crate::tokenize::split_words;

/// Nouns accepted as the final word of a collection name in either number.
pub const COLLECTION_NOUNS: [&str; 3] = ["list", "array", "slice"];

/// Function names that are never reviewed.
pub const EXEMPT_FUNCTIONS: [&str; 2] = ["main", "init"];

/// Whether `identifier` is skipped without running any rule.
pub fn is_exempt(identifier: &Identifier) -> bool {
    let name = identifier.name.as_str();
    if name.is_empty() || name == "_" {
        return true;
    }
    matches!(identifier.role, Role::Function { .. }) && EXEMPT_FUNCTIONS.contains(&name)
}

/// Review one identifier, returning its findings in report order.
pub fn review(grammar: &Grammar, identifier: &Identifier) -> Vec<Finding> {
    let mut findings = Vec::new();
    review_into(grammar, identifier, &mut findings);
    findings
}

/// Review a batch, keeping input order.
pub fn review_all<'a, I>(grammar: &Grammar, identifiers: I) -> Vec<Finding>
where
    I: IntoIterator<Item = &'a Identifier>,
{
    let mut findings = Vec::new();
    for identifier in identifiers {
        review_into(grammar, identifier, &mut findings);
    }
    findings
}

fn review_into(grammar: &Grammar, identifier: &Identifier, findings: &mut Vec<Finding>) {
    if is_exempt(identifier) {
        return;
    }
    match &identifier.role {
        Role::Function { params } => {
            if let Some(rule) = check_function_name(grammar, &identifier.name) {
                report(identifier, rule, findings);
            }
            for param in params {
                if is_exempt(param) {
                    continue;
                }
                if let Some(rule) = check_value_name(grammar, &param.name, param.category) {
                    report(param, rule, findings);
                }
            }
        }
        Role::Variable | Role::Type | Role::Parameter => {
            if let Some(rule) = check_value_name(grammar, &identifier.name, identifier.category) {
                report(identifier, rule, findings);
            }
        }
    }
}

fn report(identifier: &Identifier, rule: Rule, findings: &mut Vec<Finding>) {
    let finding = Finding::new(identifier, rule);
    debug!(
        "{} {} '{}' at {}: {}",
        identifier.role.name(),
        rule.code(),
        finding.name,
        finding.position,
        finding.message
    );
    findings.push(finding);
}

/// First failing rule for a function name.
pub fn check_function_name(grammar: &Grammar, name: &str) -> Option<Rule> {
    let words = split_words(name);
    let first = words.first()?;
    (!grammar.is_verb(first)).then_some(Rule::FunctionVerb)
}

/// First failing rule for a variable, type or parameter name.
pub fn check_value_name(
    grammar: &Grammar,
    name: &str,
    category: Option<TypeCategory>,
) -> Option<Rule> {
    let words = split_words(name);
    let first = words.first()?;

    if category == Some(TypeCategory::Bool) {
        let has_verb = words.iter().any(|word| grammar.is_verb(word));
        return (!has_verb).then_some(Rule::BooleanVerb);
    }

    if !(grammar.is_noun(first) || grammar.is_adjective(first)) {
        return Some(Rule::LeadingNounOrAdjective);
    }

    let Some(final_noun) = words.iter().rev().find(|word| grammar.is_noun(word)) else {
        return Some(Rule::ContainsNoun);
    };

    if name.chars().count() <= 1 {
        return None;
    }
    match category {
        None | Some(TypeCategory::Map) => None,
        Some(TypeCategory::FixedArray | TypeCategory::DynamicArray) => {
            let ok = COLLECTION_NOUNS.contains(&final_noun.as_str()) || grammar.is_plural(final_noun);
            (!ok).then_some(Rule::CollectionPlural)
        }
        Some(TypeCategory::Bool | TypeCategory::Other) => {
            let ok = !COLLECTION_NOUNS.contains(&final_noun.as_str())
                && grammar.is_singular(final_noun);
            (!ok).then_some(Rule::ScalarSingular)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naming_dict::{Dictionary, RawLayer};
    use naming_types::Position;

    const VOCABULARY: &str = r#"{
        "count": {"n": true, "v": true, "vb": true},
        "item": {"n": true},
        "name": {"n": true, "v": true, "vb": true},
        "id": {"n": true},
        "get": {"v": true, "vb": true},
        "is": {"v": true},
        "can": {"v": true, "n": true},
        "update": {"v": true, "vb": true, "n": true},
        "updatable": {"vb": true},
        "selected": {"a": true},
        "enabled": {"a": true, "v": true},
        "user": {"n": true},
        "list": {"n": true},
        "quickly": {},
        "the": {},
        "understand": {"v": true}
    }"#;

    fn grammar() -> Grammar {
        let layer: RawLayer = serde_json::from_str(VOCABULARY).unwrap();
        Grammar::with_dictionary(Dictionary::from_layers([layer]))
    }

    fn rules(findings: &[Finding]) -> Vec<Rule> {
        findings.iter().map(|f| f.rule).collect()
    }

    #[test]
    fn scalar_noun_passes() {
        let g = grammar();
        let id = Identifier::variable("count", Some(TypeCategory::Other));
        assert!(review(&g, &id).is_empty());
    }

    #[test]
    fn plural_collection_passes() {
        let g = grammar();
        let id = Identifier::variable("items", Some(TypeCategory::DynamicArray));
        assert!(review(&g, &id).is_empty());
        let id = Identifier::variable("userList", Some(TypeCategory::FixedArray));
        assert!(review(&g, &id).is_empty());
    }

    #[test]
    fn singular_collection_is_reported() {
        let g = grammar();
        let id = Identifier::variable("item", Some(TypeCategory::DynamicArray));
        let findings = review(&g, &id);
        assert_eq!(rules(&findings), vec![Rule::CollectionPlural]);
        assert_eq!(
            findings[0].message,
            "final noun in an array/slice name must be plural (or list/array/slice)"
        );
    }

    #[test]
    fn scalar_names_must_be_singular() {
        let g = grammar();
        let plural = Identifier::variable("users", Some(TypeCategory::Other));
        assert_eq!(rules(&review(&g, &plural)), vec![Rule::ScalarSingular]);
        let generic = Identifier::variable("userList", Some(TypeCategory::Other));
        assert_eq!(rules(&review(&g, &generic)), vec![Rule::ScalarSingular]);
    }

    #[test]
    fn type_names_must_be_singular() {
        let g = grammar();
        let users = Identifier::type_name("Users");
        assert_eq!(rules(&review(&g, &users)), vec![Rule::ScalarSingular]);
        let user_list = Identifier::type_name("UserList");
        assert_eq!(rules(&review(&g, &user_list)), vec![Rule::ScalarSingular]);
        assert!(review(&g, &Identifier::type_name("UserAccount")).is_empty());
    }

    #[test]
    fn maps_and_unknown_types_skip_agreement() {
        let g = grammar();
        assert!(review(&g, &Identifier::variable("users", Some(TypeCategory::Map))).is_empty());
        assert!(review(&g, &Identifier::variable("users", None)).is_empty());
        assert!(review(&g, &Identifier::variable("item", None)).is_empty());
    }

    #[test]
    fn single_letter_names_skip_agreement() {
        let g = grammar();
        let id = Identifier::variable("x", Some(TypeCategory::DynamicArray));
        assert!(review(&g, &id).is_empty());
    }

    #[test]
    fn boolean_names_need_a_verb() {
        let g = grammar();
        let selected = Identifier::variable("selected", Some(TypeCategory::Bool));
        let findings = review(&g, &selected);
        assert_eq!(rules(&findings), vec![Rule::BooleanVerb]);
        assert!(findings[0].message.contains("selected->isSelected"));

        let is_selected = Identifier::variable("isSelected", Some(TypeCategory::Bool));
        assert!(review(&g, &is_selected).is_empty());
        let enabled = Identifier::variable("enabled", Some(TypeCategory::Bool));
        assert!(review(&g, &enabled).is_empty());
    }

    #[test]
    fn bare_form_only_boolean_is_reported() {
        let g = grammar();
        let updatable = Identifier::variable("updatable", Some(TypeCategory::Bool));
        assert_eq!(rules(&review(&g, &updatable)), vec![Rule::BooleanVerb]);
        let can_update = Identifier::variable("canUpdate", Some(TypeCategory::Bool));
        assert!(review(&g, &can_update).is_empty());
    }

    #[test]
    fn bare_form_verbs_may_lead_value_names() {
        let g = grammar();
        let id = Identifier::variable("updatable", Some(TypeCategory::Other));
        // leads as an adjective but has no noun
        assert_eq!(rules(&review(&g, &id)), vec![Rule::ContainsNoun]);
    }

    #[test]
    fn first_word_must_be_noun_or_adjective() {
        let g = grammar();
        let id = Identifier::variable("understandUser", Some(TypeCategory::Other));
        assert_eq!(rules(&review(&g, &id)), vec![Rule::LeadingNounOrAdjective]);
    }

    #[test]
    fn only_first_failing_rule_is_reported() {
        let g = grammar();
        let id = Identifier::variable("theQuickly", Some(TypeCategory::DynamicArray));
        assert_eq!(rules(&review(&g, &id)), vec![Rule::LeadingNounOrAdjective]);
    }

    #[test]
    fn unknown_vocabulary_never_reports() {
        let g = grammar();
        let id = Identifier::variable("zzzqxFrobnicator", Some(TypeCategory::Other));
        assert!(review(&g, &id).is_empty());
        let f = Identifier::function("zzzqx", vec![]);
        assert!(review(&g, &f).is_empty());
    }

    #[test]
    fn function_with_verb_and_good_params_passes() {
        let g = grammar();
        let f = Identifier::function(
            "getName",
            vec![Identifier::parameter("id", Some(TypeCategory::Other))],
        );
        assert!(review(&g, &f).is_empty());
    }

    #[test]
    fn function_name_and_params_report_separately() {
        let g = grammar();
        let param_pos = Position {
            file: Some("user.go".into()),
            line: 4,
            column: 14,
        };
        let f = Identifier::function(
            "userName",
            vec![
                Identifier::parameter("item", Some(TypeCategory::DynamicArray)).at(param_pos.clone()),
                Identifier::parameter("_", Some(TypeCategory::DynamicArray)),
                Identifier::parameter("count", Some(TypeCategory::Other)),
            ],
        )
        .at(Position {
            file: Some("user.go".into()),
            line: 4,
            column: 6,
        });
        let findings = review(&g, &f);
        assert_eq!(rules(&findings), vec![Rule::FunctionVerb, Rule::CollectionPlural]);
        assert_eq!(findings[0].name, "userName");
        assert_eq!(findings[1].name, "item");
        assert_eq!(findings[1].position, param_pos);
    }

    #[test]
    fn exempt_identifiers_are_skipped() {
        let g = grammar();
        for category in [None, Some(TypeCategory::Bool), Some(TypeCategory::DynamicArray)] {
            assert!(review(&g, &Identifier::variable("_", category)).is_empty());
            assert!(review(&g, &Identifier::parameter("", category)).is_empty());
        }
        assert!(review(&g, &Identifier::type_name("_")).is_empty());
        let main = Identifier::function(
            "main",
            vec![Identifier::parameter("item", Some(TypeCategory::DynamicArray))],
        );
        assert!(review(&g, &main).is_empty());
        assert!(review(&g, &Identifier::function("init", vec![])).is_empty());
        // only functions are exempt by name
        let var = Identifier::variable("main", Some(TypeCategory::DynamicArray));
        assert_eq!(rules(&review(&g, &var)), vec![Rule::CollectionPlural]);
    }

    #[test]
    fn review_all_keeps_input_order() {
        let g = grammar();
        let batch = vec![
            Identifier::variable("item", Some(TypeCategory::DynamicArray)),
            Identifier::variable("count", Some(TypeCategory::Other)),
            Identifier::variable("selected", Some(TypeCategory::Bool)),
        ];
        let findings = review_all(&g, &batch);
        assert_eq!(rules(&findings), vec![Rule::CollectionPlural, Rule::BooleanVerb]);
    }

    #[test]
    fn reviewing_is_repeatable() {
        let g = grammar();
        let id = Identifier::variable("item", Some(TypeCategory::DynamicArray));
        assert_eq!(review(&g, &id), review(&g, &id));
    }
}
