//! # Rendering
//!
//! Pure views over an [`AnalysisResult`]. Nothing here touches the network
//! or the controller state, callers pass the result in.
//!
//! ## Cells
//! - `null` or missing: `N/A`
//! - strings as is, numbers the way a browser prints them (`1.0` shows as `1`,
//!   `-0.0` as `0`, `1e21` as `1e+21`)
//! - anything nested falls back to compact JSON
//!
//! ## Tables
//! Both tables have five fixed columns. Rows shorter than that are padded
//! with `N/A`, longer rows keep their extra cells.
use std::fmt::Write;

use serde_json::Value;

use crate::{
    error::RenderError,
    result::{AnalysisResult, Phase},
};

pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub headers: [&'static str; 5],
    pub empty_message: &'static str,
}

pub const TEMPORAL: TableSpec = TableSpec {
    name: "temporal",
    headers: ["Description", "Unit", "Side", "Pre", "Post"],
    empty_message: "No temporal data available",
};

pub const KINEMATIC: TableSpec = TableSpec {
    name: "kinematic",
    headers: ["Joint", "Pre Min", "Pre Max", "Post Min", "Post Max"],
    empty_message: "No kinematic data available",
};

#[derive(Debug, Clone, PartialEq)]
pub enum PatientView {
    Missing,
    Details(Vec<(String, String)>),
}

impl PatientView {
    pub const MISSING_MESSAGE: &'static str = "No patient data available";

    /// One `label: value` line per field.
    pub fn lines(&self) -> Vec<String> {
        match self {
            PatientView::Missing => vec![Self::MISSING_MESSAGE.to_string()],
            PatientView::Details(pairs) => pairs
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            PatientView::Missing => format!("<p>{}</p>", Self::MISSING_MESSAGE),
            PatientView::Details(pairs) => pairs.iter().fold(String::new(), |mut html, (k, v)| {
                let _ = write!(html, "<p><b>{}</b>: {}</p>", escape(k), escape(v));
                html
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Placeholder(&'static str),
    Rows(Vec<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub spec: TableSpec,
    pub body: TableBody,
}

impl Table {
    pub fn headers(&self) -> &[&'static str] {
        &self.spec.headers
    }

    pub fn columns(&self) -> usize {
        self.spec.headers.len()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<tr>");
        for header in self.headers() {
            let _ = write!(html, "<th>{header}</th>");
        }
        html.push_str("</tr>");

        match &self.body {
            TableBody::Placeholder(message) => {
                let _ = write!(
                    html,
                    "<tr><td colspan=\"{}\">{message}</td></tr>",
                    self.columns()
                );
            }
            TableBody::Rows(rows) => {
                for row in rows {
                    html.push_str("<tr>");
                    for cell in row {
                        let _ = write!(html, "<td>{}</td>", escape(cell));
                    }
                    html.push_str("</tr>");
                }
            }
        }

        html
    }

    /// Tab separated, header first.
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.headers().join("\t")];

        match &self.body {
            TableBody::Placeholder(message) => lines.push(message.to_string()),
            TableBody::Rows(rows) => lines.extend(rows.iter().map(|row| row.join("\t"))),
        }

        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub phase: Phase,
    pub patient: PatientView,
    pub temporal: Table,
    pub kinematic: Table,
}

pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => float_text(f),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Shortest round-trip digits laid out like `Number.prototype.toString`:
/// plain notation for decimal exponents in `-6..21`, `e+`/`e-` outside it.
fn float_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    let point = exp + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if exp >= 0 { '+' } else { '-' };
        if rest.is_empty() {
            format!("{first}e{sign}{}", exp.unsigned_abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exp.unsigned_abs())
        }
    };

    if f < 0.0 { format!("-{body}") } else { body }
}

pub fn patient_view(result: &AnalysisResult, phase: Phase) -> PatientView {
    match result.patient(phase) {
        None => PatientView::Missing,
        Some(patient) => PatientView::Details(
            patient
                .iter()
                .map(|(label, value)| (label.clone(), cell_text(Some(value))))
                .collect(),
        ),
    }
}

pub fn render_table(spec: TableSpec, rows: Option<&Value>) -> Result<Table, RenderError> {
    let rows = match rows.and_then(Value::as_array) {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            return Ok(Table {
                spec,
                body: TableBody::Placeholder(spec.empty_message),
            });
        }
    };

    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| -> Result<Vec<String>, RenderError> {
            let cells = row.as_array().ok_or(RenderError::MalformedRow {
                table: spec.name,
                index,
            })?;

            let width = cells.len().max(spec.headers.len());
            Ok((0..width).map(|i| cell_text(cells.get(i))).collect())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table {
        spec,
        body: TableBody::Rows(rows),
    })
}

pub fn temporal_table(result: &AnalysisResult) -> Result<Table, RenderError> {
    render_table(TEMPORAL, result.temporal.as_ref())
}

pub fn kinematic_table(result: &AnalysisResult) -> Result<Table, RenderError> {
    render_table(KINEMATIC, result.kinematic.as_ref())
}

pub fn render(result: &AnalysisResult, phase: Phase) -> Result<ResultView, RenderError> {
    Ok(ResultView {
        phase,
        patient: patient_view(result, phase),
        temporal: temporal_table(result)?,
        kinematic: kinematic_table(result)?,
    })
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> AnalysisResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_patient_lines_in_mapping_order() {
        let result = parse(json!({ "pre_patient": { "age": 45, "gender": "M" } }));

        let view = patient_view(&result, Phase::Pre);
        assert_eq!(view.lines(), ["age: 45", "gender: M"]);
        assert_eq!(view.to_html(), "<p><b>age</b>: 45</p><p><b>gender</b>: M</p>");
    }

    #[test]
    fn test_patient_null_is_placeholder() {
        let result = parse(json!({ "post_patient": { "Name": null, "Age": "39" } }));

        let view = patient_view(&result, Phase::Post);
        assert_eq!(view.lines(), ["Name: N/A", "Age: 39"]);
    }

    #[test]
    fn test_missing_patient() {
        let result = parse(json!({ "pre_patient": { "age": 45 } }));

        let view = patient_view(&result, Phase::Post);
        assert_eq!(view, PatientView::Missing);
        assert_eq!(view.to_html(), "<p>No patient data available</p>");
    }

    #[test]
    fn test_empty_or_absent_table_is_single_placeholder_row() {
        for result in [parse(json!({ "temporal": [] })), parse(json!({}))] {
            let table = temporal_table(&result).unwrap();
            assert_eq!(table.body, TableBody::Placeholder("No temporal data available"));
            assert_eq!(
                table.to_html(),
                "<tr><th>Description</th><th>Unit</th><th>Side</th><th>Pre</th><th>Post</th></tr>\
                 <tr><td colspan=\"5\">No temporal data available</td></tr>"
            );
        }
    }

    #[test]
    fn test_non_array_table_is_placeholder() {
        let result = parse(json!({ "kinematic": { "rows": 1 } }));
        let table = kinematic_table(&result).unwrap();
        assert_eq!(table.body, TableBody::Placeholder("No kinematic data available"));
    }

    #[test]
    fn test_single_temporal_row() {
        let result = parse(json!({ "temporal": [["Stride Time", "s", "L", 1.2, 1.1]] }));

        let table = temporal_table(&result).unwrap();
        assert_eq!(
            table.body,
            TableBody::Rows(vec![vec![
                "Stride Time".to_string(),
                "s".to_string(),
                "L".to_string(),
                "1.2".to_string(),
                "1.1".to_string(),
            ]])
        );
        assert_eq!(
            table.to_html(),
            "<tr><th>Description</th><th>Unit</th><th>Side</th><th>Pre</th><th>Post</th></tr>\
             <tr><td>Stride Time</td><td>s</td><td>L</td><td>1.2</td><td>1.1</td></tr>"
        );
    }

    #[test]
    fn test_null_and_missing_cells_are_placeholders() {
        let result = parse(json!({ "kinematic": [["LHipAngles_Sag_Z", null, 40.5]] }));

        let table = kinematic_table(&result).unwrap();
        assert_eq!(
            table.body,
            TableBody::Rows(vec![vec![
                "LHipAngles_Sag_Z".to_string(),
                "N/A".to_string(),
                "40.5".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
            ]])
        );
    }

    #[test]
    fn test_malformed_row_fails_whole_table() {
        let result = parse(json!({ "temporal": [["Cadence"], "oops"] }));

        match temporal_table(&result) {
            Err(RenderError::MalformedRow { table, index }) => {
                assert_eq!(table, "temporal");
                assert_eq!(index, 1);
            }
            other => panic!("expected malformed row, got {other:?}"),
        }
        assert!(render(&result, Phase::Pre).is_err());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "N/A");
        assert_eq!(cell_text(Some(&json!(null))), "N/A");
        assert_eq!(cell_text(Some(&json!(45))), "45");
        assert_eq!(cell_text(Some(&json!(-3))), "-3");
        assert_eq!(cell_text(Some(&json!(1.0))), "1");
        assert_eq!(cell_text(Some(&json!(0.25))), "0.25");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(Some(&json!(""))), "");
        assert_eq!(cell_text(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn test_float_cells_match_browser_formatting() {
        assert_eq!(cell_text(Some(&json!(-0.0))), "0");
        assert_eq!(cell_text(Some(&json!(-2.0))), "-2");
        assert_eq!(cell_text(Some(&json!(123.456))), "123.456");
        assert_eq!(cell_text(Some(&json!(1e16))), "10000000000000000");
        assert_eq!(cell_text(Some(&json!(1e21))), "1e+21");
        assert_eq!(cell_text(Some(&json!(-1.5e300))), "-1.5e+300");
        assert_eq!(cell_text(Some(&json!(0.000001))), "0.000001");
        assert_eq!(cell_text(Some(&json!(1.5e-7))), "1.5e-7");
    }

    #[test]
    fn test_html_is_escaped() {
        let result = parse(json!({
            "pre_patient": { "Diagnosis": "<script>x</script>" },
            "temporal": [["a & b", "s", "L", 1, 2]],
        }));

        let view = render(&result, Phase::Pre).unwrap();
        assert_eq!(
            view.patient.to_html(),
            "<p><b>Diagnosis</b>: &lt;script&gt;x&lt;/script&gt;</p>"
        );
        assert!(view.temporal.to_html().contains("<td>a &amp; b</td>"));
    }

    #[test]
    fn test_text_table() {
        let result = parse(json!({ "temporal": [["Speed", "m/s", "-", 1.2, null]] }));

        assert_eq!(
            temporal_table(&result).unwrap().to_text(),
            "Description\tUnit\tSide\tPre\tPost\nSpeed\tm/s\t-\t1.2\tN/A"
        );
        assert_eq!(
            kinematic_table(&result).unwrap().to_text(),
            "Joint\tPre Min\tPre Max\tPost Min\tPost Max\nNo kinematic data available"
        );
    }
}
