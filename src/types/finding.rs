use serde::Deserialize;
use serde_json::Value;

/// The linter's JSON report. `--format=json1` wraps the findings in a
/// `comments` object; the plain json format emits a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinterReport {
    Keyed { comments: Vec<Value> },
    Flat(Vec<Value>),
}

impl LinterReport {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Keyed { comments } => comments,
            Self::Flat(entries) => entries,
        }
    }
}

/// One linter diagnostic. Position fields are kept loosely typed because
/// the report schema does not guarantee well-formed numbers; they are
/// validated through the accessors below.
#[derive(Debug, Clone, Deserialize)]
pub struct Finding {
    pub file: String,
    #[serde(default)]
    pub line: Option<Value>,
    #[serde(default)]
    pub column: Option<Value>,
    #[serde(default, rename = "endLine")]
    pub end_line: Option<Value>,
    #[serde(default, rename = "endColumn")]
    pub end_column: Option<Value>,
    pub code: u64,
    pub message: String,
    #[serde(default)]
    pub fix: Option<FindingFix>,
}

impl Finding {
    pub fn start_line(&self) -> u64 {
        position(self.line.as_ref()).unwrap_or(1)
    }

    pub fn start_column(&self) -> u64 {
        position(self.column.as_ref()).unwrap_or(1)
    }

    pub fn end_line(&self) -> u64 {
        position(self.end_line.as_ref()).unwrap_or_else(|| self.start_line())
    }

    pub fn end_column(&self) -> u64 {
        position(self.end_column.as_ref()).unwrap_or_else(|| self.start_column())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindingFix {
    #[serde(default)]
    pub replacements: Vec<FixReplacement>,
}

/// One span-replace operation suggested by the linter.
#[derive(Debug, Clone, Deserialize)]
pub struct FixReplacement {
    #[serde(default)]
    pub line: Option<Value>,
    #[serde(default)]
    pub column: Option<Value>,
    #[serde(default, rename = "endLine")]
    pub end_line: Option<Value>,
    #[serde(default, rename = "endColumn")]
    pub end_column: Option<Value>,
    #[serde(default)]
    pub replacement: String,
}

impl FixReplacement {
    pub fn start_line(&self) -> u64 {
        position(self.line.as_ref()).unwrap_or(1)
    }

    pub fn start_column(&self) -> u64 {
        position(self.column.as_ref()).unwrap_or(1)
    }

    pub fn end_line(&self) -> u64 {
        position(self.end_line.as_ref()).unwrap_or_else(|| self.start_line())
    }

    pub fn end_column(&self) -> u64 {
        position(self.end_column.as_ref()).unwrap_or_else(|| self.start_column())
    }
}

/// Validate a 1-based position. Missing or non-numeric values yield `None`
/// so the caller can pick its default; numeric values below 1 clamp to 1.
fn position(value: Option<&Value>) -> Option<u64> {
    let number = value?.as_f64()?;
    if number < 1.0 {
        Some(1)
    } else {
        Some(number as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_parses_both_output_shapes() {
        let keyed: LinterReport =
            serde_json::from_value(json!({"comments": [{"file": "a.sh"}]}))
                .expect("keyed report should parse");
        assert_eq!(keyed.into_entries().len(), 1);

        let flat: LinterReport = serde_json::from_value(json!([{"file": "a.sh"}, {}]))
            .expect("flat report should parse");
        assert_eq!(flat.into_entries().len(), 2);
    }

    #[test]
    fn positions_clamp_to_one() {
        let finding: Finding = serde_json::from_value(json!({
            "file": "a.sh",
            "line": 0,
            "column": -3,
            "code": 2086,
            "message": "msg",
        }))
        .expect("finding should parse");

        assert_eq!(finding.start_line(), 1);
        assert_eq!(finding.start_column(), 1);
    }

    #[test]
    fn non_numeric_positions_default_to_one() {
        let finding: Finding = serde_json::from_value(json!({
            "file": "a.sh",
            "line": "seven",
            "code": 1090,
            "message": "msg",
        }))
        .expect("finding should parse");

        assert_eq!(finding.start_line(), 1);
        assert_eq!(finding.start_column(), 1);
    }

    #[test]
    fn end_positions_default_to_start() {
        let finding: Finding = serde_json::from_value(json!({
            "file": "a.sh",
            "line": 4,
            "column": 7,
            "code": 2086,
            "message": "msg",
        }))
        .expect("finding should parse");

        assert_eq!(finding.end_line(), 4);
        assert_eq!(finding.end_column(), 7);
    }

    #[test]
    fn finding_requires_file_code_and_message() {
        let missing_message = serde_json::from_value::<Finding>(json!({
            "file": "a.sh",
            "code": 2086,
        }));
        assert!(missing_message.is_err());

        let string_code = serde_json::from_value::<Finding>(json!({
            "file": "a.sh",
            "code": "SC2086",
            "message": "msg",
        }));
        assert!(string_code.is_err());
    }

    #[test]
    fn fix_replacements_parse_with_defaults() {
        let fix: FindingFix = serde_json::from_value(json!({
            "replacements": [
                {"line": 2, "column": 5, "endLine": 2, "endColumn": 9, "replacement": "\"$1\""}
            ]
        }))
        .expect("fix should parse");

        assert_eq!(fix.replacements.len(), 1);
        assert_eq!(fix.replacements[0].start_column(), 5);
        assert_eq!(fix.replacements[0].replacement, "\"$1\"");
    }
}
