//! Minimal JavaScript expression tree for emitting the webpack config module
//!
//! Strings and keys go through `serde_json` so that every literal is valid
//! JavaScript. `Raw` is emitted verbatim and must only carry expressions
//! built by this crate.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Js {
    Null,
    Bool(bool),
    Number(String),
    Str(String),
    /// Regex literal body, without the surrounding slashes
    Regex(String),
    Array(Vec<Js>),
    Object(Vec<(String, Js)>),
    /// `new <constructor>(<args>)`
    New(String, Vec<Js>),
    Raw(String),
}

impl Js {
    pub fn str(s: impl Into<String>) -> Self {
        Js::Str(s.into())
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Js)>) -> Self {
        Js::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array(items: impl IntoIterator<Item = Js>) -> Self {
        Js::Array(items.into_iter().collect())
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Js::Null,
            Value::Bool(b) => Js::Bool(*b),
            Value::Number(n) => Js::Number(n.to_string()),
            Value::String(s) => Js::Str(s.clone()),
            Value::Array(items) => Js::Array(items.iter().map(Js::from_json).collect()),
            Value::Object(map) => Js::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Js::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Look up a field of an object literal
    pub fn get(&self, key: &str) -> Option<&Js> {
        match self {
            Js::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, indent: usize) {
        match self {
            Js::Null => out.push_str("null"),
            Js::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Js::Number(n) => out.push_str(n),
            Js::Str(s) => out.push_str(&quote(s)),
            Js::Regex(body) => {
                out.push('/');
                out.push_str(&body.replace('/', "\\/"));
                out.push('/');
            }
            Js::Raw(expr) => out.push_str(expr),
            Js::New(ctor, args) => {
                out.push_str("new ");
                out.push_str(ctor);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write(out, indent);
                }
                out.push(')');
            }
            Js::Array(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push_str("[\n");
                for item in items {
                    pad(out, indent + 1);
                    item.write(out, indent + 1);
                    out.push_str(",\n");
                }
                pad(out, indent);
                out.push(']');
            }
            Js::Object(fields) => {
                if fields.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{\n");
                for (key, value) in fields {
                    pad(out, indent + 1);
                    out.push_str(&quote(key));
                    out.push_str(": ");
                    value.write(out, indent + 1);
                    out.push_str(",\n");
                }
                pad(out, indent);
                out.push('}');
            }
        }
    }
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_nested_literals() {
        let js = Js::object([
            ("mode", Js::str("development")),
            ("devtool", Js::Bool(false)),
            ("extensions", Js::array([Js::str(".js"), Js::str(".jsx")])),
        ]);

        assert_eq!(
            js.render(),
            "{\n  \"mode\": \"development\",\n  \"devtool\": false,\n  \"extensions\": [\n    \".js\",\n    \".jsx\",\n  ],\n}"
        );
    }

    #[test]
    fn escapes_strings_and_regex_slashes() {
        assert_eq!(Js::str("C:\\assets\\\"x\"").render(), r#""C:\\assets\\\"x\"""#);
        assert_eq!(Js::Regex(r"node_modules/".to_string()).render(), r"/node_modules\//");
    }

    #[test]
    fn renders_constructor_calls() {
        let js = Js::New(
            "MiniCssExtractPlugin".to_string(),
            vec![Js::object([("filename", Js::str("[name].css"))])],
        );
        assert_eq!(
            js.render(),
            "new MiniCssExtractPlugin({\n  \"filename\": \"[name].css\",\n})"
        );
    }

    #[test]
    fn converts_json_values() {
        let js = Js::from_json(&json!({"importLoaders": 1, "modules": {"auto": true}}));
        assert_eq!(js.get("importLoaders"), Some(&Js::Number("1".to_string())));
        assert_eq!(
            js.get("modules").and_then(|m| m.get("auto")),
            Some(&Js::Bool(true))
        );
    }

    #[test]
    fn empty_collections_render_inline() {
        assert_eq!(Js::Array(vec![]).render(), "[]");
        assert_eq!(Js::Object(vec![]).render(), "{}");
    }
}
