use std::fmt;

use serde_json::Value;

const CODE_FENCE: &str = "```";

/// A slice of model output that parses as exactly one JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedJson(String);

impl ExtractedJson {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ExtractedJson {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractedJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locates the JSON object inside a free-form model answer.
///
/// A leading markdown fence is stripped first. The remaining text is scanned
/// for the first balanced object, tracking string literals and escapes so
/// braces inside values do not count. Candidates that balance but do not parse
/// are skipped. When an object never closes, the first `{` to last `}` slice is
/// tried before giving up.
pub fn extract(raw: &str) -> Option<ExtractedJson> {
    let body = strip_code_fence(raw);

    match find_balanced_object(body) {
        Scan::Found(candidate) => Some(ExtractedJson(candidate.to_string())),
        Scan::Unclosed | Scan::NotFound => naive_slice(body)
            .filter(|candidate| is_json_object(candidate))
            .map(|candidate| ExtractedJson(candidate.to_string())),
    }
}

enum Scan<'a> {
    Found(&'a str),
    Unclosed,
    NotFound,
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with(CODE_FENCE) {
        return trimmed;
    }

    // first line carries the language tag
    let inner = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => &trimmed[CODE_FENCE.len()..],
    };

    match inner.rfind(CODE_FENCE) {
        Some(closing) => inner[..closing].trim(),
        None => inner.trim(),
    }
}

fn find_balanced_object(text: &str) -> Scan<'_> {
    let mut offset = 0;

    while let Some(relative) = text[offset..].find('{') {
        let start = offset + relative;
        match closing_brace(&text[start..]) {
            Some(end) => {
                let candidate = &text[start..=start + end];
                if is_json_object(candidate) {
                    return Scan::Found(candidate);
                }
                offset = start + end + 1;
            }
            None => return Scan::Unclosed,
        }
    }

    Scan::NotFound
}

/// Byte offset of the brace closing the object that opens at `text[0]`.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}

fn naive_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn is_json_object(candidate: &str) -> bool {
    matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(raw: &str) -> Option<String> {
        extract(raw).map(ExtractedJson::into_inner)
    }

    #[test]
    fn test_extracts_object_from_inline_fence_in_prose() {
        let raw = "Sure! ```json\n{\"a\":1}\n``` enjoy";
        assert_eq!(extracted(raw), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_ignores_trailing_malformed_fragment() {
        let raw = "{\"diets\":{\"Monday\":{}}}  random trailing {not json";
        assert_eq!(extracted(raw), Some("{\"diets\":{\"Monday\":{}}}".to_string()));
    }

    #[test]
    fn test_strips_leading_fence_with_language_tag() {
        let raw = "```json\n{\"label\":\"athletic\"}\n```\nLet me know if you need more.";
        assert_eq!(extracted(raw), Some("{\"label\":\"athletic\"}".to_string()));
    }

    #[test]
    fn test_strips_fence_without_newline() {
        let raw = "```{\"a\":[1,2]}```";
        assert_eq!(extracted(raw), Some("{\"a\":[1,2]}".to_string()));
    }

    #[test]
    fn test_braces_inside_strings_do_not_close_object() {
        let raw = r#"Here you go: {"reason":"contains a brace } inside a string"} thanks"#;
        assert_eq!(
            extracted(raw),
            Some(r#"{"reason":"contains a brace } inside a string"}"#.to_string())
        );
    }

    #[test]
    fn test_escaped_quotes_keep_string_state() {
        let raw = r#"prefix {"tip":"say \"hi {\" twice","n":2} suffix }"#;
        assert_eq!(
            extracted(raw),
            Some(r#"{"tip":"say \"hi {\" twice","n":2}"#.to_string())
        );
    }

    #[test]
    fn test_nested_objects_are_kept_whole() {
        let raw = "result: {\"workouts\":{\"Monday\":[{\"name\":\"squat\"}]}} done";
        assert_eq!(
            extracted(raw),
            Some("{\"workouts\":{\"Monday\":[{\"name\":\"squat\"}]}}".to_string())
        );
    }

    #[test]
    fn test_skips_balanced_non_json_candidate() {
        let raw = "Format {like this} is expected: {\"a\":true}";
        assert_eq!(extracted(raw), Some("{\"a\":true}".to_string()));
    }

    #[test]
    fn test_returns_none_without_object() {
        assert_eq!(extracted("I cannot help with that."), None);
        assert_eq!(extracted(""), None);
        assert_eq!(extracted("[1, 2, 3]"), None);
    }

    #[test]
    fn test_returns_none_for_truncated_object() {
        let raw = "{\"diets\":{\"Monday\":{\"breakfast\":{\"name\":\"oat";
        assert_eq!(extracted(raw), None);
    }

    #[test]
    fn test_unclosed_string_fails_even_after_naive_slice() {
        let unclosed = "{ \"note\": \"never closed {\"a\":1}";
        assert_eq!(extracted(unclosed), None);
    }

    #[test]
    fn test_same_result_regardless_of_prefix_and_suffix() {
        let object = r#"{"label":"balanced","score":{"value":71}}"#;
        for (prefix, suffix) in [
            ("", ""),
            ("Here is the analysis:\n", "\nHope this helps!"),
            ("{ not json } ", " trailing } brace"),
            ("```json\n", "\n```"),
        ] {
            let raw = format!("{prefix}{object}{suffix}");
            assert_eq!(extracted(&raw), Some(object.to_string()), "raw: {raw}");
        }
    }
}
