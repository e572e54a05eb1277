use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Paper {
    pub arxiv_id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub problem_summary: Option<String>,
    #[serde(default)]
    pub solution_summary: Option<String>,
    #[serde(default)]
    pub effect_summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breakthrough_label: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breakthrough_score: f64,
    #[serde(default)]
    pub breakthrough_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KeywordStat {
    pub keyword: String,
    #[serde(default)]
    pub paper_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SubscribeRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

/// Everything one dashboard render needs, fetched together.
#[derive(Debug, Clone, Default)]
pub struct DashboardPayload {
    pub papers: Vec<Paper>,
    pub breakthroughs: Vec<Paper>,
    pub keyword_stats: Vec<KeywordStat>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_tolerates_nulls_and_extra_fields() {
        let paper: Paper = serde_json::from_value(serde_json::json!({
            "id": 7,
            "arxiv_id": "2401.00001",
            "title": "Sparse Mixtures",
            "authors": null,
            "institutions": ["ai2"],
            "problem_summary": null,
            "breakthrough_label": null,
            "breakthrough_score": null,
            "findings": []
        }))
        .unwrap();

        assert!(paper.authors.is_empty());
        assert!(!paper.breakthrough_label);
        assert_eq!(paper.breakthrough_score, 0.0);
        assert_eq!(paper.problem_summary, None);
    }

    #[test]
    fn keyword_stat_ignores_last_seen() {
        let stat: KeywordStat = serde_json::from_value(serde_json::json!({
            "keyword": "rlhf",
            "paper_count": 4,
            "last_seen_at": "2024-05-01T00:00:00"
        }))
        .unwrap();
        assert_eq!(stat.keyword, "rlhf");
        assert_eq!(stat.paper_count, 4);
    }
}
