//! Normalization of raw catalog JSON into records.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::FetchError;
use crate::state::{AnimeRecord, CatalogRecord, CharacterRecord, ListKind};

/// `{ "name": ... }` entries used for genres, themes and demographics.
#[derive(Deserialize)]
struct Named {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct ImageSet {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    large_image_url: Option<String>,
}

#[derive(Deserialize, Default)]
struct Images {
    #[serde(default)]
    jpg: Option<ImageSet>,
}

#[derive(Deserialize)]
struct DatePart {
    #[serde(default)]
    year: Option<i32>,
}

#[derive(Deserialize)]
struct AiredProp {
    #[serde(default)]
    from: Option<DatePart>,
}

#[derive(Deserialize)]
struct Aired {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    prop: Option<AiredProp>,
}

#[derive(Deserialize)]
struct Trailer {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct RawAnime {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    title_english: Option<String>,
    #[serde(default)]
    synopsis: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    episodes: Option<u32>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    aired: Option<Aired>,
    #[serde(default)]
    images: Option<Images>,
    #[serde(default)]
    genres: Option<Vec<Named>>,
    #[serde(default)]
    themes: Option<Vec<Named>>,
    #[serde(default)]
    demographics: Option<Vec<Named>>,
    #[serde(default)]
    trailer: Option<Trailer>,
}

#[derive(Deserialize)]
struct RawCharacter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    name_kanji: Option<String>,
    #[serde(default)]
    favorites: Option<u64>,
    #[serde(default)]
    images: Option<Images>,
}

/// Keep only present, non-blank strings.
fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn names(list: Option<Vec<Named>>) -> Vec<String> {
    list.unwrap_or_default()
        .into_iter()
        .filter_map(|n| non_empty(n.name))
        .collect()
}

fn jpg(images: Option<Images>) -> ImageSet {
    images.and_then(|i| i.jpg).unwrap_or_default()
}

impl RawAnime {
    fn normalize(self) -> Option<AnimeRecord> {
        let title = non_empty(self.title)?;
        let jpg = jpg(self.images);
        let image_url = non_empty(jpg.large_image_url).or_else(|| non_empty(jpg.image_url))?;
        let (aired_from, aired_from_year) = match self.aired {
            Some(a) => (
                non_empty(a.from),
                a.prop.and_then(|p| p.from).and_then(|d| d.year),
            ),
            None => (None, None),
        };
        Some(AnimeRecord {
            title,
            title_english: non_empty(self.title_english),
            synopsis: non_empty(self.synopsis),
            score: self.score,
            episodes: self.episodes,
            year: self.year,
            aired_from,
            aired_from_year,
            image_url,
            genres: names(self.genres),
            themes: names(self.themes),
            demographics: names(self.demographics),
            trailer_url: non_empty(self.trailer.and_then(|t| t.url)),
        })
    }
}

impl RawCharacter {
    fn normalize(self) -> Option<CharacterRecord> {
        let name = non_empty(self.name)?;
        let image_url = non_empty(jpg(self.images).image_url)?;
        Some(CharacterRecord {
            name,
            name_kanji: non_empty(self.name_kanji),
            image_url,
            favorites: self.favorites,
        })
    }
}

/// What: Convert one element of the `data` array into a record.
///
/// Output:
/// - `None` when the element lacks a required field (title/name or image).
fn normalize_entry(kind: ListKind, entry: &Value) -> Option<CatalogRecord> {
    match kind {
        ListKind::TopAnime => serde_json::from_value::<RawAnime>(entry.clone())
            .ok()?
            .normalize()
            .map(CatalogRecord::Anime),
        ListKind::TopCharacters => serde_json::from_value::<RawCharacter>(entry.clone())
            .ok()?
            .normalize()
            .map(CatalogRecord::Character),
    }
}

/// What: Extract and normalize the records of a catalog envelope.
///
/// Inputs:
/// - `kind`: Listing the envelope was fetched from; selects the record shape.
/// - `envelope`: Parsed response body.
///
/// Output:
/// - Records in catalog order; entries missing required fields are skipped.
///
/// # Errors
/// - `FetchError::Malformed` when the envelope has no `data` array.
pub fn parse_envelope(kind: ListKind, envelope: &Value) -> Result<Vec<CatalogRecord>, FetchError> {
    let data = envelope
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Malformed("missing `data` array".to_string()))?;
    let mut out = Vec::with_capacity(data.len());
    for (idx, entry) in data.iter().enumerate() {
        match normalize_entry(kind, entry) {
            Some(rec) => out.push(rec),
            None => debug!(%kind, index = idx, "skipping catalog entry without required fields"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// What: Full anime entry maps every field
    fn parses_complete_anime_entry() {
        let env = json!({"data": [{
            "title": "Shingeki no Kyojin",
            "title_english": "Attack on Titan",
            "synopsis": "Humans fight titans.",
            "score": 8.54,
            "episodes": 25,
            "year": 2013,
            "aired": {"from": "2013-04-07T00:00:00+00:00", "prop": {"from": {"year": 2013}}},
            "images": {"jpg": {"image_url": "small.jpg", "large_image_url": "large.jpg"}},
            "genres": [{"name": "Action"}, {"name": "Drama"}],
            "themes": [{"name": "Gore"}],
            "demographics": [{"name": "Shounen"}],
            "trailer": {"url": "https://youtube.test/watch?v=1"}
        }]});
        let recs = parse_envelope(ListKind::TopAnime, &env).expect("envelope parses");
        assert_eq!(recs.len(), 1);
        let a = recs[0].as_anime().expect("anime record");
        assert_eq!(a.title_english.as_deref(), Some("Attack on Titan"));
        assert_eq!(a.image_url, "large.jpg");
        assert_eq!(a.genres, vec!["Action", "Drama"]);
        assert_eq!(a.demographics, vec!["Shounen"]);
        assert_eq!(a.aired_from_year, Some(2013));
        assert_eq!(a.trailer_url.as_deref(), Some("https://youtube.test/watch?v=1"));
    }

    #[test]
    /// What: Nulls and absent optional fields degrade to `None`/empty
    fn tolerates_missing_optional_fields() {
        let env = json!({"data": [{
            "title": "Bleach",
            "synopsis": null,
            "episodes": null,
            "genres": null,
            "images": {"jpg": {"image_url": "b.jpg"}},
            "trailer": {"url": null}
        }]});
        let recs = parse_envelope(ListKind::TopAnime, &env).expect("envelope parses");
        let a = recs[0].as_anime().expect("anime record");
        assert!(a.synopsis.is_none());
        assert!(a.episodes.is_none());
        assert!(a.genres.is_empty());
        assert!(a.trailer_url.is_none());
        assert_eq!(a.image_url, "b.jpg");
    }

    #[test]
    /// What: Entries without title or image are dropped, not errors
    fn skips_entries_missing_required_fields() {
        let env = json!({"data": [
            {"title": "No image"},
            {"images": {"jpg": {"image_url": "x.jpg"}}},
            {"title": "Ok", "images": {"jpg": {"large_image_url": "ok.jpg"}}},
            "not an object"
        ]});
        let recs = parse_envelope(ListKind::TopAnime, &env).expect("envelope parses");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title(), "Ok");
    }

    #[test]
    fn parses_characters() {
        let env = json!({"data": [{
            "name": "Lelouch Lamperouge",
            "name_kanji": "ルルーシュ",
            "favorites": 170_000,
            "images": {"jpg": {"image_url": "lelouch.jpg"}}
        }]});
        let recs = parse_envelope(ListKind::TopCharacters, &env).expect("envelope parses");
        match &recs[0] {
            CatalogRecord::Character(c) => {
                assert_eq!(c.name, "Lelouch Lamperouge");
                assert_eq!(c.favorites, Some(170_000));
                assert_eq!(c.image_url, "lelouch.jpg");
            }
            CatalogRecord::Anime(_) => panic!("expected a character"),
        }
    }

    #[test]
    fn missing_data_array_is_malformed() {
        let err = parse_envelope(ListKind::TopAnime, &json!({"status": 500}))
            .expect_err("envelope without data");
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
