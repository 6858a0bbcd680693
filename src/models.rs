//! Wire types
//!
//! Request and response shapes of the tracker API. Field names are
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's profile and score summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub total_score: i64,
    #[serde(default)]
    pub problems_solved: u32,
    #[serde(default)]
    pub easy_count: u32,
    #[serde(default)]
    pub medium_count: u32,
    #[serde(default)]
    pub hard_count: u32,
}

/// Leaderboard rows carry the same summary as the profile
pub type LeaderboardEntry = User;

/// Problem difficulty
///
/// Serialized as `Easy`, `Medium` or `Hard`. Decoding goes through
/// [`FromStr`], so any casing the server stored is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Label as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Lower-cased label used for styling
    pub fn css_class(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other:?}")),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A solved problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub points: i64,
    pub solved_at: DateTime<Utc>,
}

impl Problem {
    /// The link, ignoring empty strings
    pub fn external_link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }
}

/// `GET /dashboard` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub user: User,
    #[serde(default)]
    pub recent_problems: Vec<Problem>,
}

/// `POST /login` and `POST /register` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `POST /problems` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddProblemResponse {
    pub problem: Problem,
}

/// `POST /login` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /register` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /problems` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProblem {
    pub title: String,
    pub difficulty: Difficulty,
    /// Sent as entered; may be empty
    #[serde(default)]
    pub link: String,
}

impl NewProblem {
    pub fn new(title: impl Into<String>, difficulty: Difficulty, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            difficulty,
            link: link.into(),
        }
    }
}

/// Failure payload returned by the server
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_decodes_camel_case() {
        let json = r#"{
            "user": {
                "username": "ada",
                "totalScore": 45,
                "problemsSolved": 3,
                "easyCount": 1,
                "mediumCount": 1,
                "hardCount": 1
            },
            "recentProblems": [{
                "title": "Two Sum",
                "difficulty": "Easy",
                "link": "https://leetcode.com/problems/two-sum",
                "points": 10,
                "solvedAt": "2024-03-05T12:00:00.000Z"
            }]
        }"#;

        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.user.username, "ada");
        assert_eq!(data.user.total_score, 45);
        assert_eq!(data.user.hard_count, 1);
        assert_eq!(data.recent_problems.len(), 1);
        assert_eq!(data.recent_problems[0].difficulty, Difficulty::Easy);
        assert_eq!(data.recent_problems[0].points, 10);
    }

    #[test]
    fn test_user_extra_fields_ignored() {
        let json = r#"{"_id": "x1", "username": "bob", "email": "b@x.io", "totalScore": 0}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.problems_solved, 0);
    }

    #[test]
    fn test_external_link_ignores_empty() {
        let mut problem = Problem {
            title: "LRU Cache".to_string(),
            difficulty: Difficulty::Medium,
            link: Some(String::new()),
            points: 20,
            solved_at: Utc::now(),
        };
        assert_eq!(problem.external_link(), None);

        problem.link = None;
        assert_eq!(problem.external_link(), None);

        problem.link = Some("https://leetcode.com/problems/lru-cache".to_string());
        assert_eq!(
            problem.external_link(),
            Some("https://leetcode.com/problems/lru-cache")
        );
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.css_class(), "hard");
    }

    #[test]
    fn test_difficulty_decodes_any_case() {
        let problems: Vec<Problem> = serde_json::from_value(serde_json::json!([
            {"title": "Two Sum", "difficulty": "easy", "points": 1, "solvedAt": "2024-03-05T10:00:00Z"},
            {"title": "N-Queens", "difficulty": "HARD", "points": 3, "solvedAt": "2024-03-06T10:00:00Z"}
        ]))
        .unwrap();
        assert_eq!(problems[0].difficulty, Difficulty::Easy);
        assert_eq!(problems[1].difficulty, Difficulty::Hard);

        let err = serde_json::from_value::<Difficulty>(serde_json::json!("Extreme")).unwrap_err();
        assert!(err.to_string().contains("unknown difficulty"));
    }

    #[test]
    fn test_new_problem_body() {
        let body = serde_json::to_value(NewProblem::new("Two Sum", Difficulty::Easy, "")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Two Sum", "difficulty": "Easy", "link": ""})
        );
    }
}
