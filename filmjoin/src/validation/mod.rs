use crate::dataset::Dataset;
use crate::error::{FilmJoinError, Result};
use crate::summary::summarize;

/// Result of validating a raw dataset document
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

struct FieldRule {
    name: &'static str,
    required: bool,
}

struct TableShape {
    table: &'static str,
    fields: &'static [FieldRule],
}

const fn required(name: &'static str) -> FieldRule {
    FieldRule { name, required: true }
}

const fn optional(name: &'static str) -> FieldRule {
    FieldRule { name, required: false }
}

const TABLES: [TableShape; 3] = [
    TableShape {
        table: "genres",
        fields: &[required("id"), required("description")],
    },
    TableShape {
        table: "films",
        fields: &[required("genre"), required("title"), required("description")],
    },
    TableShape {
        table: "cast",
        fields: &[
            required("filmId"),
            required("name"),
            required("actor"),
            optional("born"),
            optional("nationality"),
            optional("biography"),
        ],
    },
];

/// Validate the shape of a raw dataset document before it is turned into
/// typed records.
///
/// Missing or mistyped fields are always errors. Unknown keys are errors in
/// strict mode and warnings otherwise. A null document or a null table counts
/// as empty.
pub fn validate_dataset(data: &serde_yaml::Value, strict: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    let mapping = match data {
        serde_yaml::Value::Null => return result,
        serde_yaml::Value::Mapping(m) => m,
        other => {
            result.errors.push(format!(
                "Dataset must be a mapping with 'genres', 'films' and 'cast' tables, got {}",
                type_name(other)
            ));
            return result;
        }
    };

    for key in mapping.keys() {
        let known = key
            .as_str()
            .map(|k| TABLES.iter().any(|t| t.table == k))
            .unwrap_or(false);
        if !known {
            add_issue(
                &mut result,
                strict,
                format!("Unexpected top-level key {}", describe_key(key)),
            );
        }
    }

    for shape in &TABLES {
        match mapping.get(shape.table) {
            None | Some(serde_yaml::Value::Null) => {}
            Some(serde_yaml::Value::Sequence(records)) => {
                for (index, record) in records.iter().enumerate() {
                    validate_record(shape, index, record, strict, &mut result);
                }
            }
            Some(other) => result.errors.push(format!(
                "Table '{}' expected list, got {}",
                shape.table,
                type_name(other)
            )),
        }
    }

    result
}

fn validate_record(
    shape: &TableShape,
    index: usize,
    record: &serde_yaml::Value,
    strict: bool,
    result: &mut ValidationResult,
) {
    let table = shape.table;
    let mapping = match record.as_mapping() {
        Some(m) => m,
        None => {
            result.errors.push(format!(
                "{table}[{index}]: expected object, got {}",
                type_name(record)
            ));
            return;
        }
    };

    for rule in shape.fields {
        match mapping.get(rule.name) {
            None | Some(serde_yaml::Value::Null) => {
                if rule.required {
                    result.errors.push(format!(
                        "{table}[{index}]: required field '{}' is missing",
                        rule.name
                    ));
                }
            }
            Some(value) if !value.is_string() => result.errors.push(format!(
                "{table}[{index}]: field '{}' expected string, got {}",
                rule.name,
                type_name(value)
            )),
            Some(_) => {}
        }
    }

    for key in mapping.keys() {
        let known = key
            .as_str()
            .map(|k| shape.fields.iter().any(|f| f.name == k))
            .unwrap_or(false);
        if !known {
            add_issue(
                result,
                strict,
                format!("{table}[{index}]: unexpected field {}", describe_key(key)),
            );
        }
    }
}

/// Validate a raw document. Returns `InvalidInput` listing every error, or
/// the warnings when the document is usable.
pub fn validate_and_prepare(data: &serde_yaml::Value, strict: bool) -> Result<Vec<String>> {
    let result = validate_dataset(data, strict);

    if !result.is_ok() {
        return Err(FilmJoinError::InvalidInput(format!(
            "Dataset validation failed:\n  - {}",
            result.errors.join("\n  - ")
        )));
    }

    Ok(result.warnings)
}

/// Report dangling foreign keys and duplicate natural keys.
///
/// These are data conditions, not errors: the join drops dangling rows and
/// fans duplicates out to every match.
pub fn check_references(dataset: &Dataset) -> Vec<String> {
    let summary = summarize(dataset);
    let mut warnings = Vec::new();

    for title in &summary.orphan_films {
        warnings.push(format!("Film '{title}' has no matching genre and will be dropped"));
    }
    for orphan in &summary.orphan_cast {
        warnings.push(format!(
            "Cast member '{}' refers to unknown film '{}' and will be dropped",
            orphan.name, orphan.film_id
        ));
    }
    for id in &summary.duplicate_genre_ids {
        warnings.push(format!(
            "Genre id '{id}' appears more than once; each copy receives every matching film"
        ));
    }
    for title in &summary.duplicate_film_titles {
        warnings.push(format!(
            "Film title '{title}' appears more than once; each copy receives the full cast"
        ));
    }

    warnings
}

fn add_issue(result: &mut ValidationResult, strict: bool, message: String) {
    if strict {
        result.errors.push(message);
    } else {
        result.warnings.push(message);
    }
}

fn describe_key(key: &serde_yaml::Value) -> String {
    match key.as_str() {
        Some(s) => format!("'{s}'"),
        None => format!("of type {}", type_name(key)),
    }
}

fn type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "list",
        serde_yaml::Value::Mapping(_) => "object",
        serde_yaml::Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CastMember, Film, Genre};

    fn yaml(text: &str) -> serde_yaml::Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_valid_dataset() {
        let data = yaml(
            r#"
genres:
  - { id: Horror, description: Scary }
films:
  - { genre: Horror, title: Alien, description: In space }
cast:
  - { filmId: Alien, name: Ripley, actor: Sigourney Weaver, born: ~ }
"#,
        );

        let result = validate_dataset(&data, true);
        assert!(result.is_ok(), "Errors: {:?}", result.errors);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_empty_document_is_valid() {
        let result = validate_dataset(&serde_yaml::Value::Null, true);
        assert!(result.is_ok());

        let result = validate_dataset(&yaml("genres:\nfilms: []"), true);
        assert!(result.is_ok(), "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_non_mapping_document() {
        let result = validate_dataset(&yaml("- a\n- b"), false);
        assert!(!result.is_ok());
        assert!(result.errors[0].contains("got list"));
    }

    #[test]
    fn test_table_must_be_a_list() {
        let result = validate_dataset(&yaml("films: not-a-list"), false);
        assert!(!result.is_ok());
        assert!(result.errors.iter().any(|e| e.contains("'films' expected list")));
    }

    #[test]
    fn test_missing_required_field() {
        let data = yaml("films:\n  - { genre: Horror, description: Untitled }");
        let result = validate_dataset(&data, false);
        assert_eq!(
            result.errors,
            vec!["films[0]: required field 'title' is missing".to_string()]
        );
    }

    #[test]
    fn test_null_required_field() {
        let data = yaml("genres:\n  - { id: ~, description: Nothing }");
        let result = validate_dataset(&data, false);
        assert!(result.errors.iter().any(|e| e.contains("'id' is missing")));
    }

    #[test]
    fn test_type_mismatch() {
        let data = yaml(
            "cast:\n  - { filmId: Alien, name: Ripley, actor: Sigourney Weaver, born: 1949 }",
        );
        let result = validate_dataset(&data, false);
        assert!(!result.is_ok());
        assert!(result.errors[0].contains("cast[0]: field 'born' expected string, got number"));
    }

    #[test]
    fn test_record_must_be_mapping() {
        let result = validate_dataset(&yaml("genres:\n  - Horror"), false);
        assert!(result.errors[0].starts_with("genres[0]: expected object"));
    }

    #[test]
    fn test_unknown_field_warns_when_not_strict() {
        let data = yaml("genres:\n  - { id: Horror, description: Scary, rating: 5 }");

        let result = validate_dataset(&data, false);
        assert!(result.is_ok());
        assert!(result.warnings[0].contains("unexpected field 'rating'"));

        let result = validate_dataset(&data, true);
        assert!(!result.is_ok());
        assert!(result.errors[0].contains("rating"));
    }

    #[test]
    fn test_unknown_top_level_key() {
        let data = yaml("directors: []");
        assert!(validate_dataset(&data, false).has_warnings());
        assert!(!validate_dataset(&data, true).is_ok());
    }

    #[test]
    fn test_validate_and_prepare_collects_all_errors() {
        let data = yaml(
            "genres:\n  - { description: Scary }\nfilms:\n  - { genre: Horror, title: 7 }",
        );
        let err = validate_and_prepare(&data, false).unwrap_err();
        match err {
            FilmJoinError::InvalidInput(msg) => {
                assert!(msg.contains("genres[0]: required field 'id' is missing"));
                assert!(msg.contains("films[0]: field 'title' expected string"));
                assert!(msg.contains("films[0]: required field 'description' is missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_and_prepare_returns_warnings() {
        let data = yaml("genres:\n  - { id: Horror, description: Scary, extra: x }");
        let warnings = validate_and_prepare(&data, false).unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_check_references() {
        let dataset = Dataset {
            genres: vec![Genre::new("Horror", "Scary"), Genre::new("Horror", "Again")],
            films: vec![
                Film::new("Horror", "Alien", "In space"),
                Film::new("Western", "Unforgiven", "Dusty"),
            ],
            cast: vec![CastMember::new("Aliens", "Hicks", "Michael Biehn")],
        };

        let warnings = check_references(&dataset);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("'Unforgiven' has no matching genre"));
        assert!(warnings[1].contains("unknown film 'Aliens'"));
        assert!(warnings[2].contains("Genre id 'Horror'"));
    }

    #[test]
    fn test_check_references_clean_dataset() {
        let dataset = Dataset::demo().unwrap();
        assert!(check_references(&dataset).is_empty());
    }
}
