use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = flatten(&map)
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

/// One row per item; nested objects (a view's `doubt` or `answer`) become
/// dotted columns such as `doubt.status`.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    let flattened = items
        .iter()
        .filter_map(Value::as_object)
        .map(flatten)
        .collect::<Vec<_>>();

    // Column order follows field order of the first row that has each key.
    let mut headers = Vec::<String>::new();
    for row in &flattened {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    // A null `answer` in one row must not add a column beside `answer.*`.
    let nested = headers
        .iter()
        .filter_map(|h| h.split_once('.').map(|(prefix, _)| prefix.to_string()))
        .collect::<Vec<_>>();
    headers.retain(|h| !nested.contains(h));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = flattened
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, value)| value_to_cell(value))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                for (inner_key, inner_value) in inner {
                    out.push((format!("{key}.{inner_key}"), inner_value.clone()));
                }
            }
            other => out.push((key.clone(), other.clone())),
        }
    }
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        points: u32,
    }

    #[derive(Serialize)]
    struct Inner {
        status: &'static str,
    }

    #[derive(Serialize)]
    struct Nested {
        doubt: Inner,
        answer: Option<Inner>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "usr-1", points: 100 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "usr-1");
        assert_eq!(parsed["points"], 100);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "usr-1", points: 100 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "usr-1", points: 100 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("points"));
    }

    #[test]
    fn table_render_flattens_nested_views() {
        let rows = vec![
            Nested {
                doubt: Inner { status: "answered" },
                answer: Some(Inner { status: "x" }),
            },
            Nested {
                doubt: Inner { status: "pending" },
                answer: None,
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap();
        assert!(header.contains("doubt.status"));
        assert!(header.contains("answer.status"));
        assert!(out.contains("pending"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Example> = Vec::new();
        let out = render(&rows, OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["id", "status", "question"];
        let rows = vec![
            vec!["dbt-1".to_string(), "pending".to_string(), "short".to_string()],
            vec![
                "dbt-200".to_string(),
                "answered".to_string(),
                "a much longer question".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines.len() >= 4);
        assert!(lines[0].contains("status"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
