//! Line-oriented frontmatter parsing and translation
//!
//! The metadata header grammar is constrained (scalar fields plus small
//! tool arrays), so parsing stays a line-oriented scan. Parse and
//! serialize share one intermediate representation, an ordered field list,
//! and the translation rules never operate on raw header text.

use super::map_tool_name;

/// Named agent colors and their hexadecimal form.
/// Unrecognized named colors are dropped; hex values pass through.
pub const COLOR_MAP: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("blue", "#0000FF"),
    ("cyan", "#00FFFF"),
    ("gray", "#808080"),
    ("green", "#00FF00"),
    ("magenta", "#FF00FF"),
    ("orange", "#FFA500"),
    ("pink", "#FFC0CB"),
    ("purple", "#800080"),
    ("red", "#FF0000"),
    ("white", "#FFFFFF"),
    ("yellow", "#FFFF00"),
];

/// One header field: its key and the original header lines that form it
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub lines: Vec<String>,
}

impl Field {
    fn scalar(key: &str, rendered: String) -> Self {
        Self {
            key: key.to_string(),
            lines: vec![rendered],
        }
    }

    /// Interpret the field's value as YAML (inline arrays, block lists,
    /// mappings). None when the raw lines are not well-formed YAML.
    fn value(&self) -> Option<serde_yaml::Value> {
        let doc: serde_yaml::Value = serde_yaml::from_str(&self.lines.join("\n")).ok()?;
        let mapping = doc.as_mapping()?;
        mapping
            .get(serde_yaml::Value::String(self.key.clone()))
            .cloned()
    }
}

/// A parsed document: ordered header fields plus the untouched body
#[derive(Debug)]
pub struct Document {
    pub fields: Vec<Field>,
    pub body: String,
}

/// Parse content into header fields and body.
/// Returns `None` when there is no well-formed delimited header.
pub fn parse(content: &str) -> Option<Document> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != "---" {
        return None;
    }
    let end = lines[1..].iter().position(|l| l.trim() == "---")? + 1;

    let mut fields: Vec<Field> = Vec::new();
    for line in &lines[1..end] {
        if let Some(field) = start_of_field(line) {
            fields.push(field);
        } else if let Some(last) = fields.last_mut() {
            last.lines.push((*line).to_string());
        }
    }

    let body = lines[end + 1..].join("\n");
    Some(Document { fields, body })
}

fn start_of_field(line: &str) -> Option<Field> {
    if line.starts_with(' ') || line.starts_with('\t') {
        return None;
    }
    let (key, _) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(' ') {
        return None;
    }
    Some(Field {
        key: key.to_string(),
        lines: vec![line.to_string()],
    })
}

/// Serialize a document back to text.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::from("---\n");
    for field in &doc.fields {
        for line in &field.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("---\n");
    out.push_str(&doc.body);
    out
}

/// Translate a document's header to the OpenCode shape. Content without a
/// well-formed header passes through unchanged.
pub fn translate(content: &str) -> String {
    let Some(doc) = parse(content) else {
        return content.to_string();
    };
    let mut out = serialize(&translate_document(doc));
    if content.ends_with('\n') && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn translate_document(doc: Document) -> Document {
    let tools = collect_tools(&doc.fields);
    let mut fields = Vec::new();
    let mut tools_written = false;

    for field in doc.fields {
        match field.key.as_str() {
            // the destination derives the name from the file name
            "name" => {}
            "allowed-tools" | "tools" => {
                if !tools_written && !tools.is_empty() {
                    fields.push(tools_field(&tools));
                    tools_written = true;
                }
            }
            "color" => {
                if let Some(converted) = translate_color(&field) {
                    fields.push(converted);
                }
            }
            _ => fields.push(field),
        }
    }

    Document {
        fields,
        body: doc.body,
    }
}

/// Collect every granted tool from `allowed-tools` arrays, inline `tools`
/// strings and already-normalized `tools` mappings, in first-seen order.
fn collect_tools(fields: &[Field]) -> Vec<String> {
    let mut tools = Vec::new();
    for field in fields {
        if field.key != "allowed-tools" && field.key != "tools" {
            continue;
        }
        let Some(value) = field.value() else {
            continue;
        };
        match value {
            serde_yaml::Value::Sequence(items) => {
                for item in &items {
                    if let Some(name) = item.as_str() {
                        push_tool(&mut tools, name);
                    }
                }
            }
            serde_yaml::Value::String(inline) => {
                for name in inline.split(',') {
                    let name = name.trim();
                    if !name.is_empty() {
                        push_tool(&mut tools, name);
                    }
                }
            }
            serde_yaml::Value::Mapping(map) => {
                for (key, enabled) in &map {
                    if enabled.as_bool() == Some(true) {
                        if let Some(name) = key.as_str() {
                            push_tool(&mut tools, name);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    tools
}

fn push_tool(tools: &mut Vec<String>, name: &str) {
    let mapped = map_tool_name(name);
    if !tools.contains(&mapped) {
        tools.push(mapped);
    }
}

fn tools_field(tools: &[String]) -> Field {
    let mut lines = vec!["tools:".to_string()];
    for tool in tools {
        lines.push(format!("  {tool}: true"));
    }
    Field {
        key: "tools".to_string(),
        lines,
    }
}

fn translate_color(field: &Field) -> Option<Field> {
    let value = field.value()?;
    let color = value.as_str()?.trim().to_string();
    if color.starts_with('#') {
        return Some(Field::scalar("color", format!("color: \"{color}\"")));
    }
    let lowered = color.to_ascii_lowercase();
    COLOR_MAP
        .iter()
        .find(|(name, _)| *name == lowered.as_str())
        .map(|(_, hex)| Field::scalar("color", format!("color: \"{hex}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_frontmatter() {
        assert!(parse("just body\nno delimiters").is_none());
    }

    #[test]
    fn test_parse_fields_and_body() {
        let doc = parse("---\ndescription: hello\ncolor: red\n---\n\nbody here").unwrap();
        assert_eq!(doc.fields.len(), 2);
        assert_eq!(doc.fields[0].key, "description");
        assert_eq!(doc.fields[1].key, "color");
        assert_eq!(doc.body.trim(), "body here");
    }

    #[test]
    fn test_parse_block_list_continuation() {
        let doc = parse("---\nallowed-tools:\n  - Read\n  - Write\n---\nbody").unwrap();
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields[0].lines.len(), 3);
    }

    #[test]
    fn test_serialize_round_trips_untouched_header() {
        let content = "---\ndescription: hello\nmodel: sonnet\n---\n\nbody\n";
        let doc = parse(content).unwrap();
        assert_eq!(format!("{}\n", serialize(&doc).trim_end()), content.to_string());
    }

    #[test]
    fn test_translate_allowed_tools_to_mapping() {
        let out = translate("---\nallowed-tools: [\"AskUserQuestion\", \"WebFetch\"]\n---\nbody\n");
        assert!(out.contains("tools:"));
        assert!(out.contains("  question: true"));
        assert!(out.contains("  webfetch: true"));
        assert!(!out.contains("allowed-tools"));
    }

    #[test]
    fn test_translate_merges_inline_tools() {
        let out = translate("---\nallowed-tools:\n  - Read\ntools: Bash, Grep\n---\nbody\n");
        assert_eq!(out.matches("tools:").count(), 1);
        assert!(out.contains("  read: true"));
        assert!(out.contains("  bash: true"));
        assert!(out.contains("  grep: true"));
    }

    #[test]
    fn test_translate_drops_name() {
        let out = translate("---\nname: gsd-planner\ndescription: plans work\n---\nbody\n");
        assert!(!out.contains("name:"));
        assert!(out.contains("description: plans work"));
    }

    #[test]
    fn test_translate_named_color() {
        let out = translate("---\ncolor: cyan\n---\nbody\n");
        assert!(out.contains("color: \"#00FFFF\""));
    }

    #[test]
    fn test_translate_hex_color_passes_through() {
        let out = translate("---\ncolor: \"#123456\"\n---\nbody\n");
        assert!(out.contains("color: \"#123456\""));
    }

    #[test]
    fn test_translate_unknown_color_is_dropped() {
        let out = translate("---\ncolor: mauve\ndescription: d\n---\nbody\n");
        assert!(!out.contains("color"));
        assert!(out.contains("description: d"));
    }

    #[test]
    fn test_translate_preserves_unknown_fields_in_order() {
        let out = translate("---\nmodel: sonnet\ntemperature: 0.2\n---\nbody\n");
        let model = out.find("model: sonnet").unwrap();
        let temperature = out.find("temperature: 0.2").unwrap();
        assert!(model < temperature);
    }

    #[test]
    fn test_translate_is_idempotent() {
        let content =
            "---\nname: gsd-x\nallowed-tools: [Read, AskUserQuestion]\ncolor: cyan\nmodel: sonnet\n---\nbody\n";
        let once = translate(content);
        let twice = translate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_translate_without_header_passes_through() {
        let content = "no header at all\n";
        assert_eq!(translate(content), content);
    }
}
