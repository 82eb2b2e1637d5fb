// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};

use crate::{
    api::{analysis, Executor as _},
    error::Result,
    model::{AnalysisResult, TraitScores, TripRecommendation, UserAnswer, UserPreferences},
};

use super::{print_table, read_json, write_json, Context};

/// Generations as the backend names them.
#[derive(Debug, Args)]
pub(crate) struct Generations {
    /// Your generation, e.g. "20대".
    #[arg(long)]
    user_generation: String,

    /// Your companion's generation, e.g. "50대+".
    #[arg(long)]
    companion_generation: String,
}

/// Analyze the difference between you and a companion from diagnosis answers.
#[derive(Debug, Parser)]
pub(crate) struct Analyze {
    #[command(flatten)]
    generations: Generations,

    /// Write the full analysis as JSON to this file, for use with `plan`.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// A JSON file containing an array of `{"questionId": .., "value": ..}`
    /// answers.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    answers: PathBuf,
}

#[async_trait]
impl super::Command for Analyze {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let _ = ctx.clients.session.require_identity().await?;
        let answers: Vec<UserAnswer> = read_json(&self.answers).await?;

        let analysis = analysis::AnalyzeDifference {
            user_answers: answers,
            user_generation: self.generations.user_generation,
            companion_generation: self.generations.companion_generation,
        }
        .execute(&ctx.clients.api)
        .await?;

        println!("{}", analysis.summary);
        print_table(scores_rows(&analysis));
        if let Some(path) = self.save {
            write_json(path, &analysis).await?;
        }
        Ok(())
    }
}

#[derive(tabled::Tabled)]
struct ScoreRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(inline)]
    scores: TraitScores,
}

fn scores_rows(analysis: &AnalysisResult) -> [ScoreRow; 3] {
    [
        ScoreRow {
            label: "You",
            scores: analysis.user_profile,
        },
        ScoreRow {
            label: "Companion",
            scores: analysis.companion_profile,
        },
        ScoreRow {
            label: "Difference",
            scores: analysis.differences,
        },
    ]
}

/// Generate a trip plan from a saved analysis.
#[derive(Debug, Parser)]
pub(crate) struct Plan {
    #[command(flatten)]
    generations: Generations,

    /// Travel purposes, e.g. "사진" (may be repeated).
    #[arg(long = "purpose")]
    purposes: Vec<String>,

    /// Budget per person, e.g. "5~10만원".
    #[arg(long)]
    budget: Option<String>,

    /// Preferred travel style.
    #[arg(long)]
    travel_style: Option<String>,

    /// Write the recommendation as JSON to this file, for use with
    /// `talking-guide`.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// The analysis file written by `analyze --save`.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    analysis: PathBuf,
}

#[async_trait]
impl super::Command for Plan {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let _ = ctx.clients.session.require_identity().await?;
        let analysis: AnalysisResult = read_json(&self.analysis).await?;

        let plan = analysis::RecommendTrip {
            user_generation: self.generations.user_generation,
            companion_generation: self.generations.companion_generation,
            preferences: UserPreferences {
                purposes: (!self.purposes.is_empty()).then_some(self.purposes),
                budget: self.budget.clone(),
                ..UserPreferences::default()
            },
            analysis,
            budget: self.budget,
            travel_style: self.travel_style,
        }
        .execute(&ctx.clients.api)
        .await?;

        print_plan(&plan);
        if let Some(path) = self.save {
            write_json(path, &plan).await?;
        }
        Ok(())
    }
}

fn print_plan(plan: &TripRecommendation) {
    println!("{} ({})", plan.title, plan.for_generation);
    println!("{}", plan.course.join(" → "));
    println!("{}", plan.why);
    for (name, value) in &plan.options {
        println!("  {name}: {value}");
    }
    println!("Tip: {}", plan.talking_tip);
}

/// Get conversation suggestions for a planned trip.
#[derive(Debug, Parser)]
pub(crate) struct TalkingGuide {
    #[command(flatten)]
    generations: Generations,

    /// The recommendation file written by `plan --save`.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    recommendation: PathBuf,
}

#[async_trait]
impl super::Command for TalkingGuide {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let _ = ctx.clients.session.require_identity().await?;
        let recommendation: TripRecommendation = read_json(&self.recommendation).await?;

        let guide = analysis::GetTalkingGuide {
            user_generation: self.generations.user_generation,
            companion_generation: self.generations.companion_generation,
            recommendation,
        }
        .execute(&ctx.clients.api)
        .await?;

        for (heading, items) in [
            ("Suggestions", &guide.suggestions),
            ("Tips", &guide.tips),
            ("Topics", &guide.topics),
        ] {
            if !items.is_empty() {
                println!("{heading}:");
                for item in items {
                    println!("  • {item}");
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum Feed {
    /// Recommendations for you.
    Personal,
    /// Recommendations for everyone in a room.
    Room {
        #[clap()]
        room_id: String,
    },
}

/// Show generated trip recommendations.
#[derive(Debug, Parser)]
pub(crate) struct Recommend {
    #[command(subcommand)]
    feed: Feed,
}

#[async_trait]
impl super::Command for Recommend {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let identity = ctx.clients.session.require_identity().await?;
        let recs = match self.feed {
            Feed::Personal => {
                analysis::GetPersonalRecommendations {
                    user_id: identity.id,
                }
                .execute(&ctx.clients.api)
                .await?
            }
            Feed::Room { room_id } => {
                analysis::GetRoomRecommendations { room_id }
                    .execute(&ctx.clients.api)
                    .await?
            }
        };

        if recs.0.is_empty() {
            println!("No recommendations yet. Try again in a moment.");
        } else {
            for rec in &recs.0 {
                println!("{}: {}", rec.title, rec.summary());
            }
            print_table(recs.0);
        }
        Ok(())
    }
}
