use serde::{Deserialize, Serialize};

/// A category record. `id` is the key films refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub description: String,
}

/// A film record, foreign-keyed to a genre by `genre == Genre::id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub genre: String,
    pub title: String,
    pub description: String,
}

/// A person appearing in a film.
///
/// `film_id` holds the film's *title*, not a surrogate id. Films that share a
/// title therefore share their cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub film_id: String,
    pub name: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
}

/// One genre with every film that belongs to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreGroup {
    pub genre: String,
    pub films: Vec<FilmView>,
}

/// A film without its genre key, carrying its cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmView {
    pub title: String,
    pub description: String,
    pub cast: Vec<CastView>,
}

/// A cast member without its `filmId` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastView {
    pub name: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
}

impl Genre {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Genre {
            id: id.into(),
            description: description.into(),
        }
    }
}

impl Film {
    pub fn new(
        genre: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Film {
            genre: genre.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

impl CastMember {
    /// A cast member with none of the optional biographical fields set
    pub fn new(
        film_id: impl Into<String>,
        name: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        CastMember {
            film_id: film_id.into(),
            name: name.into(),
            actor: actor.into(),
            born: None,
            nationality: None,
            biography: None,
        }
    }
}

impl From<&Film> for FilmView {
    fn from(film: &Film) -> Self {
        FilmView {
            title: film.title.clone(),
            description: film.description.clone(),
            cast: Vec::new(),
        }
    }
}

impl From<&CastMember> for CastView {
    fn from(member: &CastMember) -> Self {
        CastView {
            name: member.name.clone(),
            actor: member.actor.clone(),
            born: member.born.clone(),
            nationality: member.nationality.clone(),
            biography: member.biography.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_member_uses_camel_case_film_id() {
        let member: CastMember = serde_yaml::from_str(
            "filmId: Star Wars\nname: Luke Skywalker\nactor: Mark Hamill",
        )
        .unwrap();
        assert_eq!(member.film_id, "Star Wars");
        assert_eq!(member.born, None);

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["filmId"], "Star Wars");
        assert!(json.get("film_id").is_none());
    }

    #[test]
    fn test_absent_optional_fields_are_not_serialized() {
        let view = CastView::from(&CastMember::new("Alien", "Ripley", "Sigourney Weaver"));
        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(!obj.contains_key("born"));
        assert!(!obj.contains_key("filmId"));
    }

    #[test]
    fn test_film_view_drops_genre() {
        let film = Film::new("Space", "Star Wars", "A long time ago");
        let json = serde_json::to_value(FilmView::from(&film)).unwrap();
        assert!(json.get("genre").is_none());
        assert_eq!(json["title"], "Star Wars");
        assert_eq!(json["cast"], serde_json::json!([]));
    }

    #[test]
    fn test_cast_view_keeps_biography() {
        let mut member = CastMember::new("Nightmare On Elm Street", "Fredy Kreuger", "Robert Englund");
        member.born = Some("6th June 1947".into());
        member.biography = Some("Slasher".into());

        let view = CastView::from(&member);
        assert_eq!(view.born.as_deref(), Some("6th June 1947"));
        assert_eq!(view.nationality, None);
        assert_eq!(view.biography.as_deref(), Some("Slasher"));
    }
}
