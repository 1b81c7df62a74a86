//! Prompt text for the two bridge operations.

use serde::Serialize;

use crate::request::AnalysisInput;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// Prompt for narrative generation from existing stats.
pub fn analysis_prompt(input: &AnalysisInput) -> String {
    format!(
        "You are an expert academic advisor. Generate a detailed student report card analysis based on the provided data.
The output must be in Korean.

IMPORTANT REQUIREMENTS:
1. **Exam Summary (시험 총평)**: Summarize the student's performance.
2. **Difficulty Analysis (시험 난이도 분석)**: Analyze the **OBJECTIVE difficulty** of the exam paper itself.
3. **Radar Analysis (5대 역량 분석)**: Write a specific analysis based on the 'Radar Stats'. Highlight the highest scores as strengths and lowest as areas to improve. Suggest how to balance them.
4. **Parent Message (부모님께)**: Encouraging letter.

Student Data:
Name: {name}
Score: {score}
Assessment/Topic Stats: {assessment}
Difficulty Stats: {difficulty}
Question Type Stats: {question_type}
Radar Stats: {radar}
Incorrect Answers: {incorrect}
",
        name = input.student_name,
        score = input.score,
        assessment = to_json(&input.assessment_stats),
        difficulty = to_json(&input.difficulty_stats),
        question_type = to_json(&input.question_type_stats),
        radar = to_json(&input.radar_stats),
        incorrect = to_json(&input.incorrect_answers),
    )
}

/// Prompt accompanying an uploaded exam document.
pub fn document_prompt(context: &str) -> String {
    format!(
        "Analyze this exam paper (image or document) and generate a structured report.
The output must be in Korean.

Tasks:
1. Identify Student Info & Score.
2. **Difficulty Analysis**: Estimate the OBJECTIVE difficulty of the exam questions.
3. Assessment Stats: Breakdown by Unit/Topic.
4. **Question Type Stats**: Breakdown by Objective (객관식) vs Subjective (서술형) questions.
5. Radar Stats: Evaluate student skills (0-100) in 5 areas (e.g. Calculation, Logic).
6. **Radar Analysis**: Provide a specific commentary on the student's 5 core competencies based on your evaluation.

Context from user: {context}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_types::ReportData;

    #[test]
    fn test_analysis_prompt_embeds_stats() {
        let prompt = analysis_prompt(&AnalysisInput::from_report(&ReportData::seed()));
        assert!(prompt.contains("Name: 김단우"));
        assert!(prompt.contains("Score: 88"));
        assert!(prompt.contains(r#"{"label":"중","total":7,"correct":6}"#));
    }

    #[test]
    fn test_document_prompt_embeds_context() {
        let prompt = document_prompt("중간고사 2회차");
        assert!(prompt.ends_with("Context from user: 중간고사 2회차\n"));
    }
}
