//! HTML form page

use data_validator::{default_player, FieldBounds};
use feature_engine::StatField;
use inference_engine::PredictionReport;
use std::collections::HashMap;

/// What to show under the form
pub enum Outcome<'a> {
    Prediction(&'a PredictionReport),
    Error(&'a str),
}

/// Form values in `StatField::ALL` order
pub type FormValues = [String; 11];

/// Values pre-filled on first load
pub fn default_values() -> FormValues {
    let player = default_player();
    StatField::ALL.map(|field| player.get(field).to_string())
}

/// Echo back what the user submitted, so a rejected form keeps its input
pub fn submitted_values(form: &HashMap<String, String>) -> FormValues {
    StatField::ALL.map(|field| form.get(field.key()).cloned().unwrap_or_default())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(values: &FormValues, outcome: Option<Outcome<'_>>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>NBA Career Predictor</title>\n</head>\n<body>\n\
         <h1>NBA Career Predictor</h1>\n\
         <p>Predicts whether a player's career will last more than five years from their per-game statistics.</p>\n\
         <form method=\"post\" action=\"/predict\">\n",
    );

    for (field, value) in StatField::ALL.iter().zip(values) {
        let bounds = FieldBounds::for_field(*field);
        html.push_str(&format!(
            "<label>{label} ({key}) <input type=\"number\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required></label><br>\n",
            label = field.label(),
            key = escape(field.key()),
            min = bounds.min,
            max = bounds.max,
            step = bounds.step,
            value = escape(value),
        ));
    }
    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n");

    match outcome {
        Some(Outcome::Prediction(report)) => {
            html.push_str(&format!(
                "<h2 class=\"prediction\">The player will have a {}",
                escape(report.result.outlook.headline())
            ));
            if let Some(p) = report.result.probability {
                html.push_str(&format!(" (probability of a long career: {:.1}%)", p * 100.0));
            }
            html.push_str("</h2>\n<table class=\"advanced-stats\">\n");
            for (label, value) in report.advanced.display_rows() {
                html.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, escape(&value)));
            }
            html.push_str("</table>\n");
        }
        Some(Outcome::Error(message)) => {
            html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_has_all_inputs() {
        let html = render(&default_values(), None);
        for field in StatField::ALL {
            assert!(html.contains(&format!("name=\"{}\"", field.key())));
        }
        assert!(html.contains("value=\"70\""));
        assert!(html.contains("value=\"1.5\""));
        assert!(!html.contains("class=\"prediction\""));
    }

    #[test]
    fn test_error_is_escaped() {
        let mut form = HashMap::new();
        form.insert("PTS".to_string(), "<script>".to_string());
        let values = submitted_values(&form);

        let html = render(&values, Some(Outcome::Error("PTS must be a number, got \"<script>\"")));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("class=\"error\""));
    }
}
