//! Dependency specifier parsing shared by every Python source.
//!
//! Only an exact `==` pin yields a version; ranges, carets, wildcards and
//! bare names resolve to "unknown".

/// Name and optional exact version taken from a dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub name: String,
    pub version: Option<String>,
}

impl Specifier {
    pub fn new(name: &str, version: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            version: version.map(str::to_string),
        }
    }
}

/// Parses `name[extras] <comparator> <version> ; <markers>`.
///
/// `django==1.11.29` gives `("django", Some("1.11.29"))` and `flask>=2.0`
/// gives `("flask", None)`. Returns `None` when no name can be read.
pub fn parse_specifier(spec: &str) -> Option<Specifier> {
    let spec = strip_markers(spec.trim().trim_matches(|c| c == '"' || c == '\''));
    let (name, rest) = split_name(spec)?;

    let rest = skip_extras(rest.trim_start()).trim_start();
    let rest = rest.trim_start_matches('(').trim_start();
    Some(Specifier {
        name: name.to_string(),
        version: exact_pin(rest),
    })
}

/// Parses one line of a requirements-format file.
///
/// Blank lines, comments and option lines (`-r`, `-e`, `--hash`, ...) yield
/// `None`. URL and VCS references keep the whole reference as the name.
pub fn parse_requirement_line(line: &str) -> Option<Specifier> {
    let line = strip_inline_comment(line.trim());
    let line = line.trim_end_matches('\\').trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
        return None;
    }

    if line.contains('@') && line.contains("://") {
        let reference = strip_markers(line);
        return (!reference.is_empty()).then(|| Specifier::new(reference, None));
    }

    let line = strip_markers(line);
    if let Some((left, right)) = line.split_once("==") {
        let (name, _) = split_name(left.trim())?;
        let version = right
            .trim_start_matches('=')
            .split(|c: char| c.is_whitespace() || c == ',' || c == ')')
            .next()
            .filter(|v| !v.is_empty() && !v.contains('*'));
        return Some(Specifier::new(name, version));
    }

    parse_specifier(line)
}

/// PEP 503 normalization: lowercase, with runs of `-`, `_` and `.` folded to `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn split_name(spec: &str) -> Option<(&str, &str)> {
    let end = spec.find(|c: char| !is_name_char(c)).unwrap_or(spec.len());
    let name = &spec[..end];
    (!name.is_empty()).then(|| (name, &spec[end..]))
}

fn skip_extras(rest: &str) -> &str {
    match rest.strip_prefix('[') {
        Some(inner) => inner.find(']').map_or("", |end| &inner[end + 1..]),
        None => rest,
    }
}

fn exact_pin(rest: &str) -> Option<String> {
    let version = rest
        .strip_prefix("===")
        .or_else(|| rest.strip_prefix("=="))?
        .trim_start();
    let version = version
        .split(|c: char| c.is_whitespace() || c == ',' || c == ')')
        .next()
        .unwrap_or_default();
    (!version.is_empty() && !version.contains('*')).then(|| version.to_string())
}

fn strip_markers(spec: &str) -> &str {
    spec.split(';').next().unwrap_or_default().trim()
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(index) => &line[..index],
        None => line,
    }
}
