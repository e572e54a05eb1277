//! Pure view models for the dashboard. Nothing here knows about HTML.

use crate::chart::ChartSpec;
use crate::models::{KeywordStat, Paper};
use serde::Serialize;

pub const PENDING_SUMMARY: &str = "Pending analysis.";
/// "No paper summaries for this date."
pub const NO_PAPERS_PLACEHOLDER: &str = "该日期暂无论文摘要。";
pub const NO_BREAKTHROUGHS_PLACEHOLDER: &str = "No breakthrough papers flagged today.";
pub const KEYWORD_LIST_LIMIT: usize = 12;
pub const KEYWORD_CHART_LIMIT: usize = 10;
pub const CHART_DATASET_LABEL: &str = "Mentions";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperCard {
    pub title: String,
    pub authors: String,
    pub badge: Option<String>,
    pub reason: Option<String>,
    pub summaries: [SummaryBlock; 3],
    pub arxiv_url: String,
    pub hf_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CardList {
    Empty(&'static str),
    Cards(Vec<PaperCard>),
}

impl CardList {
    pub fn cards(&self) -> &[PaperCard] {
        match self {
            CardList::Cards(cards) => cards,
            CardList::Empty(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperLists {
    pub papers: CardList,
    pub breakthroughs: CardList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRow {
    pub keyword: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordPanel {
    pub rows: Vec<KeywordRow>,
    pub chart: ChartSpec,
}

/// One full render of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub lists: PaperLists,
    pub keywords: KeywordPanel,
}

impl Dashboard {
    pub fn build(papers: &[Paper], breakthroughs: &[Paper], stats: &[KeywordStat]) -> Self {
        Self {
            lists: render_lists(papers, breakthroughs),
            keywords: render_keyword_stats(stats),
        }
    }
}

pub fn render_paper_card(paper: &Paper) -> PaperCard {
    let mut authors = paper
        .authors
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if paper.authors.len() > 3 {
        authors.push_str(" et al.");
    }

    let badge = paper
        .breakthrough_label
        .then(|| format!("Breakthrough • {}%", percent(paper.breakthrough_score)));
    let reason = paper
        .breakthrough_reason
        .as_deref()
        .filter(|reason| !reason.is_empty())
        .map(|reason| format!("理由：{reason}"));

    PaperCard {
        title: paper.title.clone(),
        authors,
        badge,
        reason,
        summaries: [
            summary("Problem", paper.problem_summary.as_deref()),
            summary("Solution", paper.solution_summary.as_deref()),
            summary("Effect", paper.effect_summary.as_deref()),
        ],
        arxiv_url: format!("https://arxiv.org/abs/{}", paper.arxiv_id),
        hf_url: format!("https://huggingface.co/papers/{}", paper.arxiv_id),
    }
}

pub fn render_lists(papers: &[Paper], breakthroughs: &[Paper]) -> PaperLists {
    PaperLists {
        papers: card_list(papers, NO_PAPERS_PLACEHOLDER),
        breakthroughs: card_list(breakthroughs, NO_BREAKTHROUGHS_PLACEHOLDER),
    }
}

pub fn render_keyword_stats(stats: &[KeywordStat]) -> KeywordPanel {
    let rows = stats
        .iter()
        .take(KEYWORD_LIST_LIMIT)
        .map(|stat| KeywordRow {
            keyword: stat.keyword.clone(),
            count: stat.paper_count,
        })
        .collect();
    let top = &stats[..stats.len().min(KEYWORD_CHART_LIMIT)];
    KeywordPanel {
        rows,
        chart: ChartSpec {
            labels: top.iter().map(|stat| stat.keyword.clone()).collect(),
            dataset_label: CHART_DATASET_LABEL.to_string(),
            data: top.iter().map(|stat| stat.paper_count).collect(),
        },
    }
}

fn card_list(papers: &[Paper], placeholder: &'static str) -> CardList {
    if papers.is_empty() {
        CardList::Empty(placeholder)
    } else {
        CardList::Cards(papers.iter().map(render_paper_card).collect())
    }
}

fn summary(label: &'static str, text: Option<&str>) -> SummaryBlock {
    let text = match text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PENDING_SUMMARY.to_string(),
    };
    SummaryBlock { label, text }
}

fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}
