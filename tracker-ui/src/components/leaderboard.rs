//! Leaderboard Screen

use leptos::*;

use dsa_tracker::{LeaderboardRow, LeaderboardView, Medal};

use crate::state::use_app;

#[component]
pub fn LeaderboardScreen() -> impl IntoView {
    let snapshot = use_app().snapshot;
    let board = create_memo(move |_| snapshot.with(|s| s.leaderboard.clone()));

    view! {
        <div class="card leaderboard">
            <h2>
                <i class="fas fa-trophy"></i>
                " Leaderboard"
            </h2>
            <table class="leaderboard-table">
                <thead>
                    <tr>
                        <th>"Rank"</th>
                        <th>"User"</th>
                        <th>"Score"</th>
                        <th>"Solved"</th>
                        <th>"Easy"</th>
                        <th>"Medium"</th>
                        <th>"Hard"</th>
                    </tr>
                </thead>
                <tbody id="leaderboard-body">
                    {move || board.get().map(|rendered| match rendered {
                        LeaderboardView::Placeholder { message, colspan } => view! {
                            <tr>
                                <td colspan=colspan.to_string() class="empty-state">{message}</td>
                            </tr>
                        }
                        .into_view(),
                        LeaderboardView::Rows(rows) => rows
                            .into_iter()
                            .map(|row| view! { <RankRow row=row /> })
                            .collect_view(),
                    })}
                </tbody>
            </table>
        </div>
    }
}

fn medal_icon(medal: Medal) -> &'static str {
    match medal {
        Medal::Gold => "🥇",
        Medal::Silver => "🥈",
        Medal::Bronze => "🥉",
    }
}

#[component]
fn RankRow(row: LeaderboardRow) -> impl IntoView {
    view! {
        <tr>
            <td class=row.rank_class>
                {row.medal.map(medal_icon)}
                {row.rank_label}
            </td>
            <td>{row.username}</td>
            <td>{row.total_score}</td>
            <td>{row.problems_solved}</td>
            <td class="easy">{row.easy_count}</td>
            <td class="medium">{row.medium_count}</td>
            <td class="hard">{row.hard_count}</td>
        </tr>
    }
}
