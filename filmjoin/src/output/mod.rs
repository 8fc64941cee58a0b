use crate::error::Result;
use crate::model::GenreGroup;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    /// Indented plain text, one line per genre, film and cast member
    Outline,
}

/// Render the joined view in the given format
pub fn render(groups: &[GenreGroup], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(groups)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(groups)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Outline => Ok(render_outline(groups)),
    }
}

/// Render and write the joined view to `path`, creating parent directories
pub fn write_output(path: &Path, groups: &[GenreGroup], format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let text = render(groups, format)?;
    std::fs::write(path, text)?;
    log::debug!("Wrote {} genre groups to {}", groups.len(), path.display());
    Ok(())
}

fn render_outline(groups: &[GenreGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{}\n", group.genre));
        if group.films.is_empty() {
            out.push_str("  (no films)\n");
        }
        for film in &group.films {
            out.push_str(&format!("  {}: {}\n", film.title, film.description));
            for member in &film.cast {
                out.push_str(&format!("    {} ({})\n", member.name, member.actor));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::model::{CastMember, Film, Genre};
    use crate::join::transform;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<GenreGroup> {
        transform(
            &[Genre::new("Horror", "Scary"), Genre::new("Western", "Dusty")],
            &[Film::new("Horror", "Alien", "In space")],
            &[CastMember::new("Alien", "Ripley", "Sigourney Weaver")],
        )
    }

    #[test]
    fn test_render_outline() {
        let text = render(&sample(), OutputFormat::Outline).unwrap();
        assert_eq!(
            text,
            "Horror\n  Alien: In space\n    Ripley (Sigourney Weaver)\nWestern\n  (no films)\n"
        );
    }

    #[test]
    fn test_render_json() {
        let text = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "genre": "Horror",
                    "films": [{
                        "title": "Alien",
                        "description": "In space",
                        "cast": [{ "name": "Ripley", "actor": "Sigourney Weaver" }]
                    }]
                },
                { "genre": "Western", "films": [] }
            ])
        );
    }

    #[test]
    fn test_render_yaml_parses_back() {
        let groups = Dataset::demo().unwrap().transform();
        let text = render(&groups, OutputFormat::Yaml).unwrap();
        assert!(text.contains("genre: Horror"));
        assert!(!text.contains("filmId"));

        let parsed: Vec<GenreGroup> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, groups);
    }

    #[test]
    fn test_write_output_creates_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("views").join("films.json");

        write_output(&path, &sample(), OutputFormat::Json).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Ripley\""));
    }
}
