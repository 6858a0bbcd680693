//! Data-to-display mapping
//!
//! Pure functions from API data to the structured fragments the display
//! layer paints. Nothing here touches the DOM, so every rule (placeholders,
//! difficulty classes, rank medals) is testable natively.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use crate::models::{DashboardData, Difficulty, LeaderboardEntry, Problem, User};

pub const EMPTY_PROBLEMS_MESSAGE: &str = "No problems solved yet. Add your first problem!";
pub const EMPTY_LEADERBOARD_MESSAGE: &str = "No users found";

/// Rank, user, score, solved, easy, medium, hard
pub const LEADERBOARD_COLUMNS: usize = 7;

/// One numeric tile on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCounter {
    /// Element id the value is written to
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemItem {
    pub title: String,
    pub solved_on: String,
    pub link: Option<String>,
    pub difficulty: Difficulty,
    pub item_class: String,
    pub badge_class: String,
    pub points_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentProblems {
    Placeholder(&'static str),
    Items(Vec<ProblemItem>),
}

impl RecentProblems {
    pub fn items(&self) -> &[ProblemItem] {
        match self {
            RecentProblems::Placeholder(_) => &[],
            RecentProblems::Items(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub username: String,
    pub stats: Vec<StatCounter>,
    pub recent: RecentProblems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub rank_label: String,
    pub rank_class: String,
    pub medal: Option<Medal>,
    pub username: String,
    pub total_score: i64,
    pub problems_solved: u32,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardView {
    Placeholder {
        message: &'static str,
        colspan: usize,
    },
    Rows(Vec<LeaderboardRow>),
}

impl LeaderboardView {
    /// Table rows the view produces, the placeholder included
    pub fn row_count(&self) -> usize {
        match self {
            LeaderboardView::Placeholder { .. } => 1,
            LeaderboardView::Rows(rows) => rows.len(),
        }
    }
}

/// `M/D/YYYY` in the given zone
pub fn format_solved_date<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

pub fn stat_counters(user: &User) -> Vec<StatCounter> {
    vec![
        StatCounter {
            id: "total-score",
            label: "Total Score",
            value: user.total_score.to_string(),
        },
        StatCounter {
            id: "problems-solved",
            label: "Problems Solved",
            value: user.problems_solved.to_string(),
        },
        StatCounter {
            id: "easy-count",
            label: "Easy",
            value: user.easy_count.to_string(),
        },
        StatCounter {
            id: "medium-count",
            label: "Medium",
            value: user.medium_count.to_string(),
        },
        StatCounter {
            id: "hard-count",
            label: "Hard",
            value: user.hard_count.to_string(),
        },
    ]
}

pub fn problem_item<Tz>(problem: &Problem, tz: &Tz) -> ProblemItem
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let class = problem.difficulty.css_class();
    ProblemItem {
        title: problem.title.clone(),
        solved_on: format!("Solved on {}", format_solved_date(&problem.solved_at, tz)),
        link: problem.external_link().map(str::to_string),
        difficulty: problem.difficulty,
        item_class: format!("problem-item {}", class),
        badge_class: format!("difficulty-badge {}", class),
        points_label: format!("+{} pts", problem.points),
    }
}

/// Dashboard with dates in the browser's (or host's) local zone
pub fn render_dashboard(data: &DashboardData) -> DashboardView {
    render_dashboard_in(data, &Local)
}

pub fn render_dashboard_in<Tz>(data: &DashboardData, tz: &Tz) -> DashboardView
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let recent = if data.recent_problems.is_empty() {
        RecentProblems::Placeholder(EMPTY_PROBLEMS_MESSAGE)
    } else {
        RecentProblems::Items(
            data.recent_problems
                .iter()
                .map(|p| problem_item(p, tz))
                .collect(),
        )
    };

    DashboardView {
        username: data.user.username.clone(),
        stats: stat_counters(&data.user),
        recent,
    }
}

/// Rows in received order; the server's order is the ranking.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> LeaderboardView {
    if entries.is_empty() {
        return LeaderboardView::Placeholder {
            message: EMPTY_LEADERBOARD_MESSAGE,
            colspan: LEADERBOARD_COLUMNS,
        };
    }

    let rows = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rank = index + 1;
            let medal = Medal::for_rank(rank);
            let rank_class = match medal {
                Some(m) => format!("rank {}", m.css_class()),
                None => "rank".to_string(),
            };
            LeaderboardRow {
                rank,
                rank_label: format!("#{}", rank),
                rank_class,
                medal,
                username: entry.username.clone(),
                total_score: entry.total_score,
                problems_solved: entry.problems_solved,
                easy_count: entry.easy_count,
                medium_count: entry.medium_count,
                hard_count: entry.hard_count,
            }
        })
        .collect();

    LeaderboardView::Rows(rows)
}
