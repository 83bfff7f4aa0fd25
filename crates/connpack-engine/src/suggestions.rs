//! Fuzzy matching suggestions for template errors
//!
//! Templates only ever see `namespace` and `connections`, so most mistakes are
//! typos against a handful of known names. Levenshtein distance picks the closest.

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Filters available in templates
pub const AVAILABLE_FILTERS: &[&str] = &[
    // Custom connpack filters
    "toyaml",
    "tojson",
    "b64encode",
    "b64decode",
    "quote",
    "squote",
    "nindent",
    "required",
    // Built-in MiniJinja filters
    "default",
    "indent",
    "upper",
    "lower",
    "title",
    "capitalize",
    "replace",
    "trim",
    "join",
    "first",
    "last",
    "length",
    "reverse",
    "sort",
    "unique",
    "map",
    "select",
    "reject",
    "selectattr",
    "rejectattr",
    "batch",
    "slice",
    "dictsort",
    "items",
    "attr",
    "int",
    "float",
    "string",
    "list",
    "bool",
    "safe",
    "escape",
    "urlencode",
];

/// Top-level variables in every template context
pub const CONTEXT_VARIABLES: &[&str] = &["namespace", "connections"];

/// Attributes of each item in `connections`
pub const CONNECTION_FIELDS: &[&str] = &["name", "env_name", "data"];

/// Closest candidate to `input`, if any is within the distance limit
pub fn closest_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, strsim::levenshtein(input, c)))
        .filter(|(_, d)| *d > 0 && *d <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Suggest a fix for an undefined expression such as `namepsace` or `conn.env_nam`
pub fn suggest_undefined_variable(expr: &str) -> Option<String> {
    let parts: Vec<&str> = expr.split('.').map(str::trim).collect();

    match parts.as_slice() {
        [name] => match closest_match(name, CONTEXT_VARIABLES) {
            Some(candidate) => Some(format!("Did you mean `{}`?", candidate)),
            None => Some(format!(
                "`{}` is not defined. Available variables: {}",
                name,
                CONTEXT_VARIABLES.join(", ")
            )),
        },
        [.., field] => {
            let field = *field;
            let fixed = closest_match(field, CONNECTION_FIELDS)?;
            let prefix = &expr[..expr.len() - field.len()];
            Some(format!(
                "Did you mean `{}{}`? Connections expose {}",
                prefix,
                fixed,
                CONNECTION_FIELDS.join(", ")
            ))
        }
        [] => None,
    }
}

/// Suggest a filter for an unknown filter name
pub fn suggest_unknown_filter(name: &str) -> Option<String> {
    match closest_match(name, AVAILABLE_FILTERS) {
        Some(candidate) => Some(format!("Did you mean `{}`?", candidate)),
        None => Some(format!(
            "Unknown filter `{}`. Available: {}",
            name,
            AVAILABLE_FILTERS.join(", ")
        )),
    }
}

/// First `{{ ... }}` expression on a line, without filters
pub fn extract_expression(line: &str) -> Option<String> {
    let start = line.find("{{")?;
    let end = line[start..].find("}}")?;
    let expr = line[start + 2..start + end].trim();
    let head = expr.split('|').next().unwrap_or(expr).trim();
    (!head.is_empty()).then(|| head.to_string())
}

/// Name of the last filter applied in the first `{{ ... }}` on a line
pub fn extract_filter(line: &str) -> Option<String> {
    let start = line.find("{{")?;
    let end = line[start..].find("}}")?;
    let expr = &line[start + 2..start + end];
    let pipe = expr.rfind('|')?;
    let name = expr[pipe + 1..]
        .trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_match() {
        assert_eq!(closest_match("namepsace", CONTEXT_VARIABLES), Some("namespace"));
        assert_eq!(closest_match("conections", CONTEXT_VARIABLES), Some("connections"));
        assert_eq!(closest_match("completely_off", CONTEXT_VARIABLES), None);
        assert_eq!(closest_match("namespace", CONTEXT_VARIABLES), None);
    }

    #[test]
    fn test_suggest_top_level() {
        assert_eq!(
            suggest_undefined_variable("namspace").as_deref(),
            Some("Did you mean `namespace`?")
        );
        let msg = suggest_undefined_variable("release").unwrap();
        assert!(msg.contains("namespace, connections"));
    }

    #[test]
    fn test_suggest_connection_field() {
        let msg = suggest_undefined_variable("connection.env_nme").unwrap();
        assert!(msg.starts_with("Did you mean `connection.env_name`?"));
        assert_eq!(suggest_undefined_variable("connection.zzzzzzzz"), None);
    }

    #[test]
    fn test_suggest_filter() {
        assert_eq!(
            suggest_unknown_filter("b64encod").as_deref(),
            Some("Did you mean `b64encode`?")
        );
        assert!(suggest_unknown_filter("xyzzyplugh").unwrap().contains("toyaml"));
    }

    #[test]
    fn test_extract_expression() {
        assert_eq!(
            extract_expression("  {{ connection.env_name }}: {{ connection.data }}").as_deref(),
            Some("connection.env_name")
        );
        assert_eq!(
            extract_expression("ns: {{ namespace | quote }}").as_deref(),
            Some("namespace")
        );
        assert_eq!(extract_expression("no expression here"), None);
    }

    #[test]
    fn test_extract_filter() {
        assert_eq!(
            extract_filter("ns: {{ namespace | upper | quot }}").as_deref(),
            Some("quot")
        );
        assert_eq!(
            extract_filter("x: {{ data | nindnt(4) }}").as_deref(),
            Some("nindnt")
        );
        assert_eq!(extract_filter("ns: {{ namespace }}"), None);
    }
}
