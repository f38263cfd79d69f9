//! Front-matter extraction.
//!
//! Two block styles are accepted at the top of a post:
//!
//! ```text
//! ---                              +++
//! title: Hello                     title = "Hello"
//! tag: rust                        tag = "rust"
//! date: 2023-06-01                 date = 2023-06-01
//! description: "Hi: there"         description = "Hi: there"
//! translations: zh_CN              translations = ["zh_CN"]
//! ---                              +++
//! ```
//!
//! The `---` style is a flat `key: value` subset of YAML. Unknown keys are
//! ignored in both styles.

use std::collections::BTreeSet;

use super::error::FrontMatterError;
use super::{PostMeta, is_valid_lang};
use crate::utils::date::DateTimeUtc;

/// Raw front-matter values, before required fields are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub tag: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub translations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split `content` into front-matter and body, parsing the front-matter.
///
/// The returned body is always a suffix of `content`.
pub fn extract(content: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let (block, body, format) = detect(content)?;
    let front = match format {
        Format::Yaml => parse_yaml_like(block)?,
        Format::Toml => parse_toml(block)?,
    };
    Ok((front, body))
}

/// Locate the front-matter block. Returns `(block, body, format)`.
fn detect(content: &str) -> Result<(&str, &str, Format), FrontMatterError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    let format = if trimmed.starts_with("---") {
        Format::Yaml
    } else if trimmed.starts_with("+++") {
        Format::Toml
    } else {
        return Err(FrontMatterError::Missing);
    };
    let delimiter = format.delimiter();

    // Opening delimiter must stand on its own line
    let after_open = &trimmed[delimiter.len()..];
    let (first_line, rest) = after_open.split_once('\n').unwrap_or((after_open, ""));
    if !first_line.trim().is_empty() {
        return Err(FrontMatterError::Missing);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let block = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok((block, body, format));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Parse `key: value` lines.
fn parse_yaml_like(block: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut front = FrontMatter::default();

    for (idx, line) in block.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(FrontMatterError::Syntax {
                // +2: 1-based, and the opening delimiter is line 1
                line: idx + 2,
                text: line.to_string(),
            });
        };
        let value = unquote(value.trim());

        match key.trim().to_ascii_lowercase().as_str() {
            "title" => front.title = Some(value),
            "tag" => front.tag = Some(value),
            "date" => front.date = Some(value),
            "description" => front.description = Some(value),
            "translations" | "translation" => front.translations = parse_list(&value),
            _ => {}
        }
    }

    Ok(front)
}

fn parse_toml(block: &str) -> Result<FrontMatter, FrontMatterError> {
    let table: toml::Table = block.parse()?;

    let date = match table.get("date") {
        None => None,
        Some(toml::Value::String(s)) => Some(s.clone()),
        // Bare TOML dates: `Datetime` displays as written
        Some(toml::Value::Datetime(dt)) => Some(dt.to_string()),
        Some(_) => return Err(FrontMatterError::FieldType("date", "a string or date")),
    };

    let translations = match table.get("translations").or_else(|| table.get("translation")) {
        None => Vec::new(),
        Some(toml::Value::String(s)) => parse_list(s),
        Some(toml::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(_) => {
            return Err(FrontMatterError::FieldType("translations", "a string or array"));
        }
    };

    Ok(FrontMatter {
        title: toml_string(&table, "title")?,
        tag: toml_string(&table, "tag")?,
        date,
        description: toml_string(&table, "description")?,
        translations,
    })
}

fn toml_string(
    table: &toml::Table,
    field: &'static str,
) -> Result<Option<String>, FrontMatterError> {
    match table.get(field) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FrontMatterError::FieldType(field, "a string")),
    }
}

/// Strip one level of matching `"` or `'` quotes.
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            let inner = &value[1..value.len() - 1];
            return if first == b'"' {
                inner.replace("\\\"", "\"")
            } else {
                inner.replace("''", "'")
            };
        }
    }
    value.to_string()
}

/// Parse `a, b` or `[a, "b"]` into a list.
fn parse_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    value
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

impl FrontMatter {
    /// Check required fields and build the post metadata for `slug`.
    pub fn into_meta(self, slug: &str) -> Result<PostMeta, FrontMatterError> {
        let title = required(self.title, "title")?;
        let tag = required(self.tag, "tag")?;
        let date_str = required(self.date, "date")?;
        let description = required(self.description, "description")?;

        let date =
            DateTimeUtc::parse(&date_str).ok_or(FrontMatterError::InvalidDate(date_str))?;

        let mut translations = BTreeSet::new();
        for lang in self.translations {
            if !is_valid_lang(&lang) {
                return Err(FrontMatterError::InvalidTranslation(lang));
            }
            translations.insert(lang);
        }

        Ok(PostMeta {
            slug: slug.to_string(),
            title,
            tag,
            date,
            description,
            translations,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FrontMatterError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(FrontMatterError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML_POST: &str = "---\ntitle: Hello\ntag: rust\ndate: 2023-06-01\ndescription: \"First: post\"\ntranslations: zh_CN\n---\n\n# Body\n";

    #[test]
    fn test_yaml_frontmatter() {
        let (front, body) = extract(YAML_POST).unwrap();
        assert_eq!(front.title.as_deref(), Some("Hello"));
        assert_eq!(front.tag.as_deref(), Some("rust"));
        assert_eq!(front.date.as_deref(), Some("2023-06-01"));
        assert_eq!(front.description.as_deref(), Some("First: post"));
        assert_eq!(front.translations, vec!["zh_CN"]);
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_body_is_suffix_of_content() {
        let (_, body) = extract(YAML_POST).unwrap();
        assert!(YAML_POST.ends_with(body));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntag = \"rust\"\ndate = 2023-06-01\ndescription = \"d\"\ntranslations = [\"zh_CN\", \"ja\"]\n+++\nBody";
        let (front, body) = extract(content).unwrap();
        assert_eq!(front.title.as_deref(), Some("Hello"));
        assert_eq!(front.date.as_deref(), Some("2023-06-01"));
        assert_eq!(front.translations, vec!["zh_CN", "ja"]);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_toml_bare_datetime_into_meta() {
        let content = "+++\ntitle = \"a\"\ntag = \"b\"\ndescription = \"d\"\ndate = 2023-06-01T10:00:00Z\n+++\nbody";
        let (front, _) = extract(content).unwrap();
        let meta = front.into_meta("x").unwrap();
        assert_eq!(meta.date, DateTimeUtc::new(2023, 6, 1, 10, 0, 0));

        let (front, _) = extract(
            "+++\ntitle = \"a\"\ntag = \"b\"\ndescription = \"d\"\ndate = 2023-06-01\n+++\n",
        )
        .unwrap();
        assert_eq!(
            front.into_meta("x").unwrap().date,
            DateTimeUtc::from_ymd(2023, 6, 1)
        );
    }

    #[test]
    fn test_toml_wrong_field_type() {
        assert!(matches!(
            extract("+++\ntitle = 3\n+++\n"),
            Err(FrontMatterError::FieldType("title", _))
        ));
    }

    #[test]
    fn test_toml_quoted_date() {
        let content = "+++\ndate = \"2023-06-01T10:00:00Z\"\n+++\n";
        let (front, _) = extract(content).unwrap();
        assert_eq!(front.date.as_deref(), Some("2023-06-01T10:00:00Z"));
    }

    #[test]
    fn test_yaml_time_keeps_colons() {
        let content = "---\ndate: 2023-06-01T10:00:00Z\n---\n";
        let (front, _) = extract(content).unwrap();
        assert_eq!(front.date.as_deref(), Some("2023-06-01T10:00:00Z"));
    }

    #[test]
    fn test_quoted_values_and_lists() {
        assert_eq!(unquote("'it''s'"), "it's");
        assert_eq!(unquote("\"say \\\"hi\\\"\""), "say \"hi\"");
        assert_eq!(unquote("\"unbalanced"), "\"unbalanced");
        assert_eq!(parse_list("[zh_CN, 'ja']"), vec!["zh_CN", "ja"]);
        assert_eq!(parse_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_missing_frontmatter() {
        assert!(matches!(
            extract("# Just content"),
            Err(FrontMatterError::Missing)
        ));
        assert!(matches!(
            extract("--- title: inline\n---\n"),
            Err(FrontMatterError::Missing)
        ));
    }

    #[test]
    fn test_unterminated_frontmatter() {
        assert!(matches!(
            extract("---\ntitle: Hello\n# Body"),
            Err(FrontMatterError::Unterminated)
        ));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = extract("---\ntitle: Hello\nnot a pair\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Syntax { line: 3, .. }));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            extract("+++\ntitle = \n+++\n"),
            Err(FrontMatterError::Toml(_))
        ));
    }

    #[test]
    fn test_into_meta() {
        let (front, _) = extract(YAML_POST).unwrap();
        let meta = front.into_meta("hello").unwrap();
        assert_eq!(meta.slug, "hello");
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.date, DateTimeUtc::from_ymd(2023, 6, 1));
        assert!(meta.translations.contains("zh_CN"));
    }

    #[test]
    fn test_into_meta_missing_field() {
        let (front, _) = extract("---\ntitle: Hello\ntag: rust\ndate: 2023-06-01\n---\n").unwrap();
        assert!(matches!(
            front.into_meta("hello"),
            Err(FrontMatterError::MissingField("description"))
        ));
    }

    #[test]
    fn test_into_meta_blank_field_is_missing() {
        let (front, _) =
            extract("---\ntitle: \"\"\ntag: rust\ndate: 2023-06-01\ndescription: d\n---\n")
                .unwrap();
        assert!(matches!(
            front.into_meta("hello"),
            Err(FrontMatterError::MissingField("title"))
        ));
    }

    #[test]
    fn test_into_meta_invalid_date() {
        let (front, _) =
            extract("---\ntitle: a\ntag: b\ndate: 2023-02-30\ndescription: d\n---\n").unwrap();
        assert!(matches!(
            front.into_meta("hello"),
            Err(FrontMatterError::InvalidDate(d)) if d == "2023-02-30"
        ));
    }

    #[test]
    fn test_into_meta_invalid_translation() {
        let (front, _) = extract(
            "---\ntitle: a\ntag: b\ndate: 2023-02-03\ndescription: d\ntranslations: ../x\n---\n",
        )
        .unwrap();
        assert!(matches!(
            front.into_meta("hello"),
            Err(FrontMatterError::InvalidTranslation(_))
        ));
    }
}
