//! Merge policies for AI replies.
//!
//! The two analysis paths treat an absent key differently:
//!
//! | reply key absent | text analysis ([`sparse_merge`]) | document analysis ([`wide_merge`]) |
//! |---|---|---|
//! | narrative text | keep | keep |
//! | strengths / weaknesses | keep | reset to empty |
//! | stat collections, incorrect answers | never touched | reset to empty |
//!
//! Both merges derive from whatever state is current when the reply is
//! applied, not from the state the request was built from.

use reportgen_types::{ReportData, ReportPatch};

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.is_empty())
}

/// Merge a text-analysis reply: only narrative fields, only where present.
///
/// An empty string counts as absent. A present list, even an empty one,
/// replaces the current list.
pub fn sparse_merge(current: &ReportData, reply: &ReportPatch) -> ReportData {
    let mut next = current.clone();
    if let Some(v) = non_empty(&reply.summary) {
        next.summary = v.clone();
    }
    if let Some(v) = non_empty(&reply.difficulty_analysis) {
        next.difficulty_analysis = v.clone();
    }
    if let Some(v) = non_empty(&reply.radar_analysis) {
        next.radar_analysis = v.clone();
    }
    if let Some(v) = &reply.strengths {
        next.strengths = v.clone();
    }
    if let Some(v) = &reply.weaknesses {
        next.weaknesses = v.clone();
    }
    if let Some(v) = non_empty(&reply.parent_message) {
        next.parent_message = v.clone();
    }
    next
}

/// Merge a document-analysis reply: regenerate structure from scratch.
///
/// Present scalars replace (radar commentary only when non-empty). Every
/// list is the reply's list or empty.
pub fn wide_merge(current: &ReportData, reply: &ReportPatch) -> ReportData {
    let mut next = current.clone();

    if let Some(v) = &reply.exam_title {
        next.exam_title = v.clone();
    }
    if let Some(v) = &reply.student_name {
        next.student_name = v.clone();
    }
    if let Some(v) = reply.score {
        next.score = v;
    }
    if let Some(v) = &reply.exam_date {
        next.exam_date = v.clone();
    }
    if let Some(v) = &reply.summary {
        next.summary = v.clone();
    }
    if let Some(v) = &reply.difficulty_analysis {
        next.difficulty_analysis = v.clone();
    }
    if let Some(v) = non_empty(&reply.radar_analysis) {
        next.radar_analysis = v.clone();
    }
    if let Some(v) = &reply.parent_message {
        next.parent_message = v.clone();
    }

    next.strengths = reply.strengths.clone().unwrap_or_default();
    next.weaknesses = reply.weaknesses.clone().unwrap_or_default();
    next.difficulty_stats = reply.difficulty_stats.clone().unwrap_or_default();
    next.question_type_stats = reply.question_type_stats.clone().unwrap_or_default();
    next.assessment_stats = reply.assessment_stats.clone().unwrap_or_default();
    next.radar_stats = reply.radar_stats.clone().unwrap_or_default();
    next.incorrect_answers = reply.incorrect_answers.clone().unwrap_or_default();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reportgen_types::{DifficultyStat, RadarStat};

    fn text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[가-힣a-z ]{0,12}")
    }

    fn list() -> impl Strategy<Value = Option<Vec<String>>> {
        proptest::option::of(proptest::collection::vec("[a-z]{0,6}", 0..4))
    }

    fn narrative_patch() -> impl Strategy<Value = ReportPatch> {
        (text(), text(), text(), list(), list(), text(), proptest::option::of(0u32..150))
            .prop_map(
                |(summary, difficulty, radar, strengths, weaknesses, parent, score)| ReportPatch {
                    summary,
                    difficulty_analysis: difficulty,
                    radar_analysis: radar,
                    strengths,
                    weaknesses,
                    parent_message: parent,
                    score,
                    ..Default::default()
                },
            )
    }

    #[test]
    fn test_sparse_merge_keeps_absent() {
        let seed = ReportData::seed();
        let reply = ReportPatch {
            summary: Some("새 총평".to_string()),
            ..Default::default()
        };
        let merged = sparse_merge(&seed, &reply);
        assert_eq!(merged.summary, "새 총평");
        assert_eq!(merged.parent_message, seed.parent_message);
        assert_eq!(merged.strengths, seed.strengths);
    }

    #[test]
    fn test_sparse_merge_empty_string_is_no_change() {
        let seed = ReportData::seed();
        let reply = ReportPatch {
            summary: Some(String::new()),
            weaknesses: Some(vec![]),
            ..Default::default()
        };
        let merged = sparse_merge(&seed, &reply);
        assert_eq!(merged.summary, seed.summary);
        assert!(merged.weaknesses.is_empty());
    }

    #[test]
    fn test_sparse_merge_ignores_stats_and_identity() {
        let seed = ReportData::seed();
        let reply = ReportPatch {
            student_name: Some("다른 학생".to_string()),
            score: Some(12),
            difficulty_stats: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(sparse_merge(&seed, &reply), seed);
    }

    #[test]
    fn test_wide_merge_resets_absent_collections() {
        let seed = ReportData::seed();
        let reply = ReportPatch {
            difficulty_stats: Some(vec![DifficultyStat::new("상", 5, 5)]),
            ..Default::default()
        };
        let merged = wide_merge(&seed, &reply);
        assert_eq!(merged.difficulty_stats, vec![DifficultyStat::new("상", 5, 5)]);
        assert!(merged.question_type_stats.is_empty());
        assert!(merged.assessment_stats.is_empty());
        assert!(merged.radar_stats.is_empty());
        assert!(merged.incorrect_answers.is_empty());
        assert!(merged.strengths.is_empty());
        assert!(merged.weaknesses.is_empty());
        assert_eq!(merged.summary, seed.summary);
        assert_eq!(merged.exam_title, seed.exam_title);
    }

    #[test]
    fn test_wide_merge_replaces_present_scalars() {
        let seed = ReportData::seed();
        let reply = ReportPatch {
            student_name: Some("박지민".to_string()),
            score: Some(0),
            summary: Some(String::new()),
            radar_analysis: Some(String::new()),
            radar_stats: Some(vec![RadarStat::new("계산력", 70)]),
            ..Default::default()
        };
        let merged = wide_merge(&seed, &reply);
        assert_eq!(merged.student_name, "박지민");
        assert_eq!(merged.score, 0);
        assert_eq!(merged.summary, "");
        assert_eq!(merged.radar_analysis, seed.radar_analysis);
        assert_eq!(merged.radar_stats.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_sparse_merge_absent_key_unchanged(reply in narrative_patch()) {
            let seed = ReportData::seed();
            let merged = sparse_merge(&seed, &reply);
            if reply.summary.as_deref().unwrap_or("").is_empty() {
                prop_assert_eq!(&merged.summary, &seed.summary);
            }
            if reply.strengths.is_none() {
                prop_assert_eq!(&merged.strengths, &seed.strengths);
            }
            if reply.parent_message.as_deref().unwrap_or("").is_empty() {
                prop_assert_eq!(&merged.parent_message, &seed.parent_message);
            }
            prop_assert_eq!(merged.score, seed.score);
            prop_assert_eq!(&merged.difficulty_stats, &seed.difficulty_stats);
            prop_assert_eq!(&merged.incorrect_answers, &seed.incorrect_answers);
        }

        #[test]
        fn prop_wide_merge_never_keeps_prior_stats(
            reply in narrative_patch(),
            keep_difficulty in any::<bool>(),
        ) {
            let seed = ReportData::seed();
            let mut reply = reply;
            if keep_difficulty {
                reply.difficulty_stats = Some(vec![DifficultyStat::new("하", 1, 1)]);
            }
            let merged = wide_merge(&seed, &reply);
            prop_assert_eq!(
                merged.difficulty_stats,
                reply.difficulty_stats.clone().unwrap_or_default()
            );
            prop_assert!(merged.question_type_stats.is_empty());
            prop_assert!(merged.assessment_stats.is_empty());
            prop_assert!(merged.radar_stats.is_empty());
        }
    }
}
