//! Variables preamble injected at the top of every bundle.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::report::Reporter;

/// Values emitted unquoted in stylesheets: lengths and colors.
static BARE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(px|em|pt)$|^#").expect("valid regex"));

/// Script preamble: one assignment of the whole variables map.
///
/// ```text
/// var Bunch = Bunch || {};
/// Bunch.variables = {"width":"10px"};
/// ```
pub fn script_preamble(variables: &IndexMap<String, Value>) -> String {
    let json = serde_json::to_string(variables).unwrap_or_else(|_| "{}".to_string());
    format!("var Bunch = Bunch || {{}};\nBunch.variables = {json};\n")
}

/// Stylesheet preamble: one `@name: value;` declaration per variable.
///
/// Unsupported kinds (objects, arrays, booleans, null) are reported and
/// skipped.
pub fn stylesheet_preamble(variables: &IndexMap<String, Value>, reporter: &dyn Reporter) -> String {
    let mut out = String::new();
    for (name, value) in variables {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                reporter.report(&[
                    "variables:",
                    &format!(
                        "`{name}` is {}; only strings and numbers are supported in stylesheets",
                        kind_name(other)
                    ),
                ]);
                continue;
            }
        };

        if BARE_VALUE.is_match(&text) {
            out.push_str(&format!("@{name}: {text};\n"));
        } else {
            out.push_str(&format!("@{name}: \"{}\";\n", text.replace('"', "\\\"")));
        }
    }
    out
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
        Value::String(_) | Value::Number(_) => "a scalar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use serde_json::json;

    fn vars(value: Value) -> IndexMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_script_preamble_empty() {
        assert_eq!(
            script_preamble(&IndexMap::new()),
            "var Bunch = Bunch || {};\nBunch.variables = {};\n"
        );
    }

    #[test]
    fn test_script_preamble_serializes_in_order() {
        let variables = vars(json!({ "width": "10px", "count": 3, "theme": { "dark": true } }));
        assert_eq!(
            script_preamble(&variables),
            "var Bunch = Bunch || {};\nBunch.variables = {\"width\":\"10px\",\"count\":3,\"theme\":{\"dark\":true}};\n"
        );
    }

    #[test]
    fn test_stylesheet_preamble_quoting() {
        let reporter = MemoryReporter::new();
        let variables = vars(json!({
            "width": "10px",
            "size": "1.5em",
            "gap": "12pt",
            "brand": "#ff0066",
            "font": "Helvetica",
            "columns": 12
        }));

        assert_eq!(
            stylesheet_preamble(&variables, &reporter),
            "@width: 10px;\n@size: 1.5em;\n@gap: 12pt;\n@brand: #ff0066;\n@font: \"Helvetica\";\n@columns: \"12\";\n"
        );
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn test_stylesheet_preamble_skips_unsupported_kinds() {
        let reporter = MemoryReporter::new();
        let variables = vars(json!({
            "nested": { "a": 1 },
            "list": [1, 2],
            "flag": true,
            "width": "3px"
        }));

        assert_eq!(stylesheet_preamble(&variables, &reporter), "@width: 3px;\n");
        let lines = reporter.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("`nested` is an object"));
        assert!(lines[1].contains("`list` is an array"));
        assert!(lines[2].contains("`flag` is a boolean"));
    }

    #[test]
    fn test_stylesheet_preamble_escapes_quotes() {
        let reporter = MemoryReporter::new();
        let variables = vars(json!({ "quote": "say \"hi\"" }));
        assert_eq!(
            stylesheet_preamble(&variables, &reporter),
            "@quote: \"say \\\"hi\\\"\";\n"
        );
    }
}
