//! `{{field}}` placeholder substitution for store item descriptions.
//!
//! Field values come from a lookup closure, so the renderer does not know
//! about store items at all. [`render`] is strict; [`render_or_blank`] never
//! fails and turns unknown fields into empty strings.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template field `{0}`")]
    UnknownField(String),
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Text(&'a str),
    Field(&'a str),
}

/// Split a template into literal text and trimmed field names.
/// An unterminated `{{` is kept as literal text; its byte offset is returned.
fn split(template: &str) -> (Vec<Piece<'_>>, Option<usize>) {
    let mut pieces = Vec::new();
    let mut pos = 0;
    while let Some(open) = template[pos..].find("{{") {
        let open = pos + open;
        let Some(len) = template[open + 2..].find("}}") else {
            pieces.push(Piece::Text(&template[pos..]));
            return (pieces, Some(open));
        };
        if open > pos {
            pieces.push(Piece::Text(&template[pos..open]));
        }
        pieces.push(Piece::Field(template[open + 2..open + 2 + len].trim()));
        pos = open + 2 + len + 2;
    }
    if pos < template.len() {
        pieces.push(Piece::Text(&template[pos..]));
    }
    (pieces, None)
}

/// Names of every placeholder in `template`, in order of appearance.
pub fn fields(template: &str) -> Result<Vec<&str>, TemplateError> {
    let (pieces, unterminated) = split(template);
    if let Some(at) = unterminated {
        return Err(TemplateError::Unterminated(at));
    }
    Ok(pieces
        .into_iter()
        .filter_map(|p| match p {
            Piece::Field(name) => Some(name),
            Piece::Text(_) => None,
        })
        .collect())
}

/// Substitute every placeholder, failing on the first field `lookup` does
/// not know.
pub fn render<F>(template: &str, lookup: F) -> Result<String, TemplateError>
where
    F: Fn(&str) -> Option<String>,
{
    let (pieces, unterminated) = split(template);
    if let Some(at) = unterminated {
        return Err(TemplateError::Unterminated(at));
    }
    let mut out = String::with_capacity(template.len());
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Field(name) => {
                let value = lookup(name).ok_or_else(|| TemplateError::UnknownField(name.into()))?;
                out.push_str(&value);
            }
        }
    }
    Ok(out)
}

/// Substitute every placeholder; unknown fields render as `""` and an
/// unterminated `{{` is left as written. Returns the names that were blanked.
pub fn render_or_blank<F>(template: &str, lookup: F) -> (String, Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let (pieces, _) = split(template);
    let mut out = String::with_capacity(template.len());
    let mut missing = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Field(name) => match lookup(name) {
                Some(value) => out.push_str(&value),
                None => missing.push(name.to_string()),
            },
        }
    }
    (out, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "cpsAdder" => Some("4".into()),
            "name" => Some("Developer".into()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_fields() {
        assert_eq!(render("+ {{cpsAdder}}/s", lookup).unwrap(), "+ 4/s");
        assert_eq!(
            render("{{name}}: {{ cpsAdder }}", lookup).unwrap(),
            "Developer: 4"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("no placeholders", lookup).unwrap(), "no placeholders");
        assert_eq!(render("", lookup).unwrap(), "");
        assert_eq!(render("single { brace }", lookup).unwrap(), "single { brace }");
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert_eq!(
            render("+ {{bogus}}", lookup),
            Err(TemplateError::UnknownField("bogus".into()))
        );
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        assert_eq!(render("ab {{cpsAdder", lookup), Err(TemplateError::Unterminated(3)));
    }

    #[test]
    fn blank_mode_drops_unknown_fields() {
        let (text, missing) = render_or_blank("[{{bogus}}] {{cpsAdder}}", lookup);
        assert_eq!(text, "[] 4");
        assert_eq!(missing, vec!["bogus".to_string()]);
    }

    #[test]
    fn blank_mode_keeps_unterminated_text() {
        let (text, missing) = render_or_blank("{{cpsAdder}} and {{oops", lookup);
        assert_eq!(text, "4 and {{oops");
        assert!(missing.is_empty());
    }

    #[test]
    fn lists_fields_in_order() {
        assert_eq!(
            fields("{{a}} x {{ b }}{{c}}").unwrap(),
            vec!["a", "b", "c"]
        );
        assert!(fields("{{a").is_err());
    }
}
