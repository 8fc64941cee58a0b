use crate::model::{CastMember, CastView, Film, FilmView, Genre, GenreGroup};
use std::collections::HashMap;

/// Nest the genre, film and cast tables into one group per genre.
///
/// Every input genre yields exactly one group, in input order, even when no
/// film matches it. Films are matched on `film.genre == genre.id` and cast on
/// `member.film_id == film.title`, both keeping their input order. Rows whose
/// key matches nothing are dropped. Duplicate keys are not collapsed: each
/// duplicate genre gets every matching film and each duplicate title gets the
/// whole matching cast.
///
/// The inputs are only borrowed; the output is built from fresh copies.
pub fn transform(genres: &[Genre], films: &[Film], cast: &[CastMember]) -> Vec<GenreGroup> {
    let films_by_genre = index_by(films, |f| f.genre.as_str());
    let cast_by_title = index_by(cast, |c| c.film_id.as_str());

    let groups: Vec<GenreGroup> = genres
        .iter()
        .map(|genre| {
            let mut views = group_films(&films_by_genre, genre);
            for view in &mut views {
                attach_cast(&cast_by_title, view);
            }
            GenreGroup {
                genre: genre.id.clone(),
                films: views,
            }
        })
        .collect();

    log::debug!(
        "Joined {} genres, {} films, {} cast members into {} groups",
        genres.len(),
        films.len(),
        cast.len(),
        groups.len()
    );

    groups
}

/// Films of one genre, stripped of their genre key, with an empty cast
fn group_films(films_by_genre: &HashMap<&str, Vec<&Film>>, genre: &Genre) -> Vec<FilmView> {
    films_by_genre
        .get(genre.id.as_str())
        .map(|films| films.iter().map(|f| FilmView::from(*f)).collect())
        .unwrap_or_default()
}

fn attach_cast(cast_by_title: &HashMap<&str, Vec<&CastMember>>, view: &mut FilmView) {
    view.cast = cast_by_title
        .get(view.title.as_str())
        .map(|members| members.iter().map(|m| CastView::from(*m)).collect())
        .unwrap_or_default();
}

/// Bucket rows by key. Each bucket keeps the rows' input order.
fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut index: HashMap<&str, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}
