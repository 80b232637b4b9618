//! Turns an inferred field schema (`{"field_name": "description", ...}`) into
//! per-field grading rules for recorded answers.
//!
//! Field names are matched by substring, in a fixed order; the first rule that
//! matches wins. Anything unrecognised falls back to an LLM judge with the
//! description as its accepted value.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::error::{RespondError, Result};

const WEATHER_CONDITIONS: &[&str] = &[
    "sunny",
    "cloudy",
    "partly cloudy",
    "rainy",
    "showers",
    "clear",
    "overcast",
    "stormy",
    "snowy",
    "foggy",
    "misty",
];

const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const PRECIPITATION_DETAILS: &[&str] = &[
    "none",
    "light rain",
    "moderate rain",
    "heavy rain",
    "light showers",
    "showers",
    "heavy showers",
    "drizzle",
    "light snow",
    "snow",
    "heavy snow",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationType {
    LlmJudge,
    NumberMatch,
    StringMatch,
    BooleanMatch,
}

impl EvaluationType {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationType::LlmJudge => "llm_judge",
            EvaluationType::NumberMatch => "number_match",
            EvaluationType::StringMatch => "string_match",
            EvaluationType::BooleanMatch => "boolean_match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiHint {
    TextInput,
    NumberInput,
    RangeSlider,
    Dropdown,
    Checkbox,
}

impl UiHint {
    pub fn as_str(self) -> &'static str {
        match self {
            UiHint::TextInput => "text_input",
            UiHint::NumberInput => "number_input",
            UiHint::RangeSlider => "range_slider",
            UiHint::Dropdown => "dropdown",
            UiHint::Checkbox => "checkbox",
        }
    }
}

/// Grading rule for one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvaluation {
    pub evaluation_type: EvaluationType,
    pub accepted_values: Value,
    pub ui_hint: UiHint,
    pub optional: bool,
}

impl FieldEvaluation {
    pub fn classify(field_name: &str, description: &Value) -> Self {
        let field = field_name.to_lowercase();
        let desc = match description {
            Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };

        if field.contains("temperature") {
            Self::number(
                json!([-50, 50]),
                UiHint::NumberInput,
                desc.contains("if specified") || desc.contains("when available"),
            )
        } else if field.contains("wind_speed") {
            Self::number(
                json!([0, 200]),
                UiHint::NumberInput,
                desc.contains("if specified"),
            )
        } else if field.contains("precipitation_chance") {
            Self::number(
                json!([0, 100]),
                UiHint::RangeSlider,
                desc.contains("if mentioned"),
            )
        } else if field.contains("weather_condition") {
            Self::dropdown(WEATHER_CONDITIONS, false)
        } else if field.contains("day") {
            Self::dropdown(WEEKDAYS, false)
        } else if field.contains("warning") {
            Self {
                evaluation_type: EvaluationType::BooleanMatch,
                accepted_values: json!([true, false]),
                ui_hint: UiHint::Checkbox,
                optional: true,
            }
        } else if field.contains("precipitation_details") {
            Self::dropdown(PRECIPITATION_DETAILS, true)
        } else {
            Self {
                evaluation_type: EvaluationType::LlmJudge,
                accepted_values: description.clone(),
                ui_hint: UiHint::TextInput,
                optional: false,
            }
        }
    }

    fn number(range: Value, ui_hint: UiHint, optional: bool) -> Self {
        Self {
            evaluation_type: EvaluationType::NumberMatch,
            accepted_values: range,
            ui_hint,
            optional,
        }
    }

    fn dropdown(choices: &[&str], optional: bool) -> Self {
        Self {
            evaluation_type: EvaluationType::StringMatch,
            accepted_values: json!(choices),
            ui_hint: UiHint::Dropdown,
            optional,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "evaluation_type": self.evaluation_type.as_str(),
            "accepted_values": self.accepted_values,
            "ui_hint": self.ui_hint.as_str(),
            "optional": self.optional,
        })
    }
}

/// Derives the evaluation config for every field, keeping schema order.
pub fn evaluation_config(schema: &Map<String, Value>) -> Map<String, Value> {
    schema
        .iter()
        .map(|(name, description)| {
            (
                name.clone(),
                FieldEvaluation::classify(name, description).to_json(),
            )
        })
        .collect()
}

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\r?\n(.*?)\r?\n```").expect("fence pattern is valid")
    })
}

/// Strips a surrounding Markdown code fence (```` ```json ```` or bare ```` ``` ````), if any.
pub fn extract_json_block(text: &str) -> &str {
    if text.contains("```") {
        if let Some(inner) = fence_pattern().captures(text).and_then(|c| c.get(1)) {
            return inner.as_str().trim();
        }
    }
    text.trim()
}

/// Parses a schema that may arrive fenced, as model output usually does.
pub fn parse_schema(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(extract_json_block(text))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RespondError::UnexpectedType {
            field: "schema",
            expected: "an object",
        }),
    }
}
