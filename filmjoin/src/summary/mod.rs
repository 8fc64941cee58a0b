use crate::dataset::Dataset;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Table sizes plus the rows the join will drop or fan out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub genres: usize,
    pub films: usize,
    pub cast: usize,
    /// Titles of films whose genre matches no genre id
    pub orphan_films: Vec<String>,
    /// Cast rows whose filmId matches no film title
    pub orphan_cast: Vec<OrphanCast>,
    pub duplicate_genre_ids: Vec<String>,
    pub duplicate_film_titles: Vec<String>,
    /// Genre ids no film refers to
    pub empty_genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanCast {
    pub film_id: String,
    pub name: String,
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let genre_ids: HashSet<&str> = dataset.genres.iter().map(|g| g.id.as_str()).collect();
    let film_titles: HashSet<&str> = dataset.films.iter().map(|f| f.title.as_str()).collect();
    let used_genres: HashSet<&str> = dataset.films.iter().map(|f| f.genre.as_str()).collect();

    let orphan_films = dedup(
        dataset
            .films
            .iter()
            .filter(|f| !genre_ids.contains(f.genre.as_str()))
            .map(|f| f.title.as_str()),
    );

    let mut seen_cast = HashSet::new();
    let orphan_cast = dataset
        .cast
        .iter()
        .filter(|c| !film_titles.contains(c.film_id.as_str()))
        .filter(|c| seen_cast.insert((c.film_id.as_str(), c.name.as_str())))
        .map(|c| OrphanCast {
            film_id: c.film_id.clone(),
            name: c.name.clone(),
        })
        .collect();

    let empty_genres = dedup(
        dataset
            .genres
            .iter()
            .filter(|g| !used_genres.contains(g.id.as_str()))
            .map(|g| g.id.as_str()),
    );

    DatasetSummary {
        genres: dataset.genres.len(),
        films: dataset.films.len(),
        cast: dataset.cast.len(),
        orphan_films,
        orphan_cast,
        duplicate_genre_ids: duplicates(dataset.genres.iter().map(|g| g.id.as_str())),
        duplicate_film_titles: duplicates(dataset.films.iter().map(|f| f.title.as_str())),
        empty_genres,
    }
}

/// Keys that occur more than once, in order of first occurrence
fn duplicates<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let keys: Vec<&str> = keys.collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        *counts.entry(*key).or_insert(0) += 1;
    }
    dedup(keys.into_iter().filter(|k| counts[k] > 1))
}

fn dedup<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.filter(|k| seen.insert(*k)).map(String::from).collect()
}
