//! Structured-output schema shared by both bridge operations.
//!
//! Every property is optional: the reply is a partial report.

use serde_json::{Map, Value, json};

fn tally_items(key: &str, possible: &str, achieved: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(key.to_string(), json!({ "type": "STRING" }));
    properties.insert(possible.to_string(), json!({ "type": "NUMBER" }));
    properties.insert(achieved.to_string(), json!({ "type": "NUMBER" }));
    json!({ "type": "OBJECT", "properties": properties })
}

/// Schema describing a partial report in the Gemini schema dialect.
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "examTitle": { "type": "STRING" },
            "studentName": { "type": "STRING" },
            "score": { "type": "NUMBER" },
            "examDate": { "type": "STRING" },
            "summary": {
                "type": "STRING",
                "description": "A detailed paragraph summarizing performance in Korean (approx. 5-6 sentences)."
            },
            "difficultyAnalysis": {
                "type": "STRING",
                "description": "A paragraph analyzing the OBJECTIVE difficulty of the exam paper itself compared to regional standards. Do NOT mention how the student performed here. Focus on question complexity, trickiness, and curriculum depth."
            },
            "radarAnalysis": {
                "type": "STRING",
                "description": "A specific analysis paragraph (3-4 sentences) based on the radar stats (5 core competencies). Explain which skills are strong and which need balance."
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 3-5 specific strengths in Korean."
            },
            "weaknesses": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 2-3 areas for improvement in Korean."
            },
            "parentMessage": {
                "type": "STRING",
                "description": "A polite, encouraging letter to parents in Korean."
            },
            "difficultyStats": {
                "type": "ARRAY",
                "items": tally_items("label", "total", "correct")
            },
            "questionTypeStats": {
                "type": "ARRAY",
                "items": tally_items("label", "total", "correct")
            },
            "assessmentStats": {
                "type": "ARRAY",
                "items": tally_items("name", "maxScore", "earnedScore"),
                "description": "Score breakdown by unit/chapter."
            },
            "radarStats": {
                "type": "ARRAY",
                "items": tally_items("subject", "fullMark", "student")
            },
            "incorrectAnswers": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "questionNumber": { "type": "STRING" },
                        "topic": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "solution": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_every_report_field() {
        let schema = report_schema();
        let props = schema["properties"].as_object().unwrap();
        assert_eq!(props.len(), 15);
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_tally_items() {
        let schema = report_schema();
        let items = &schema["properties"]["assessmentStats"]["items"]["properties"];
        assert_eq!(items["name"]["type"], "STRING");
        assert_eq!(items["maxScore"]["type"], "NUMBER");
        assert_eq!(items["earnedScore"]["type"], "NUMBER");
    }
}
