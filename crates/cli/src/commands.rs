// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use clap::Subcommand;
use color_eyre::Result;
use quotedesk_api::{ApiError, DisputeCapabilities, GateDenial, Marketplace, QuoteCapabilities};
use quotedesk_domain::{DisplayStatus, ProjectionMode, Quote, Rating, Role};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::render::{render_board, render_dispute, render_quote, render_transition, render_user};
use crate::widget::TerminalWidget;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in user
    Whoami {
        /// Ask the server even if the cached session is still fresh
        #[arg(long)]
        refresh: bool,
        #[arg(long)]
        json: bool,
    },

    /// Choose whether you sell (artist) or buy (customer)
    SetRole { role: Role },

    /// End the session and forget it locally
    Logout,

    /// List your quotes with their dashboard status
    #[command(visible_alias = "ls")]
    Quotes {
        /// Dashboard to load; defaults to your role
        #[arg(long = "as")]
        role: Option<Role>,
        #[arg(long)]
        json: bool,
    },

    /// Show one quote and what you can do with it
    Show {
        quote_id: String,
        #[arg(long)]
        json: bool,
    },

    /// Accept a pending quote and pay for it
    Accept { quote_id: String },

    /// Mark a booked quote as completed
    Complete { quote_id: String },

    /// Cancel a quote
    Cancel { quote_id: String },

    /// Raise, inspect or withdraw disputes
    #[command(subcommand)]
    Dispute(DisputeCommand),

    /// Rate a completed quote
    #[command(subcommand)]
    Review(ReviewCommand),
}

#[derive(Clone, Debug, Subcommand)]
pub enum DisputeCommand {
    /// Raise a dispute against a quote
    Raise {
        quote_id: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        details: Option<String>,
    },
    /// Close a dispute you raised
    Close { dispute_id: String },
    /// Delete an open or closed dispute you raised
    Delete { dispute_id: String },
    /// Show a dispute with its quote and parties
    Show {
        dispute_id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommand {
    /// Create or replace your review
    Submit {
        quote_id: String,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        rating: i64,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete your review
    Delete { quote_id: String },
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `show --json` output: the quote plus everything the text view derives.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteDocument<'a> {
    quote: &'a Quote,
    display_status: DisplayStatus,
    capabilities: QuoteCapabilities,
    /// Keyed by dispute id.
    dispute_capabilities: BTreeMap<String, DisputeCapabilities>,
}

impl Command {
    pub async fn run(self, market: &Marketplace, today: NaiveDate) -> Result<()> {
        match self {
            Self::Whoami { refresh, json } => {
                let user = if refresh {
                    market
                        .session()
                        .refresh(true)
                        .await?
                        .map(|s| s.user)
                        .ok_or_else(|| ApiError::Unauthorized {
                            message: String::from("not signed in"),
                        })?
                } else {
                    market.current_user().await?
                };
                if json {
                    print_json(&user)?;
                } else {
                    println!("{}", render_user(&user));
                }
            }
            Self::SetRole { role } => {
                let user = market.set_role(role).await?;
                println!("{}", render_user(&user));
            }
            Self::Logout => {
                market.session().logout().await?;
                println!("Signed out.");
            }
            Self::Quotes { role, json } => {
                let role = match role {
                    Some(role) => role,
                    None => market
                        .current_user()
                        .await?
                        .role
                        .ok_or(ApiError::ActionDenied(GateDenial::NoRole))?,
                };
                let board = market.load_quotes(role).await?;
                if json {
                    print_json(board.quotes())?;
                } else {
                    let views = board.views(ProjectionMode::Dashboard, today);
                    println!("{}", render_board(&views, &board.summary(today)));
                }
            }
            Self::Show { quote_id, json } => {
                let quote = market.load_quote(&quote_id).await?;
                let status = quote.display_status(ProjectionMode::Detail, today);
                let capabilities = market.capabilities(&quote).await?;
                let dispute_caps = market.dispute_capabilities(&quote).await?;
                if json {
                    print_json(&QuoteDocument {
                        quote: &quote,
                        display_status: status,
                        capabilities,
                        dispute_capabilities: dispute_caps.into_iter().collect(),
                    })?;
                } else {
                    println!(
                        "{}",
                        render_quote(&quote, status, &capabilities, &dispute_caps)
                    );
                }
            }
            Self::Accept { quote_id } => {
                let result = market.accept_and_pay(&quote_id, &TerminalWidget).await?;
                println!("{}", render_transition(&result));
            }
            Self::Complete { quote_id } => {
                println!("{}", render_transition(&market.complete(&quote_id).await?));
            }
            Self::Cancel { quote_id } => {
                println!("{}", render_transition(&market.cancel(&quote_id).await?));
            }
            Self::Dispute(command) => command.run(market).await?,
            Self::Review(command) => command.run(market).await?,
        }
        Ok(())
    }
}

impl DisputeCommand {
    async fn run(self, market: &Marketplace) -> Result<()> {
        match self {
            Self::Raise {
                quote_id,
                reason,
                details,
            } => {
                let result = market.raise_dispute(&quote_id, &reason, details).await?;
                println!("{}", render_transition(&result));
            }
            Self::Close { dispute_id } => {
                let result = market.close_dispute(&dispute_id).await?;
                println!("Dispute {dispute_id} closed.");
                println!("{}", render_transition(&result));
            }
            Self::Delete { dispute_id } => {
                let result = market.delete_dispute(&dispute_id).await?;
                println!("Dispute {dispute_id} deleted.");
                println!("{}", render_transition(&result));
            }
            Self::Show { dispute_id, json } => {
                let detail = market.dispute_detail(&dispute_id).await?;
                if json {
                    print_json(&detail)?;
                } else {
                    println!("{}", render_dispute(&detail));
                }
            }
        }
        Ok(())
    }
}

impl ReviewCommand {
    async fn run(self, market: &Marketplace) -> Result<()> {
        match self {
            Self::Submit {
                quote_id,
                rating,
                comment,
            } => {
                let rating = Rating::new(rating).map_err(ApiError::from)?;
                market.submit_review(&quote_id, rating, comment).await?;
                println!("Review saved for quote {quote_id}.");
            }
            Self::Delete { quote_id } => {
                market.delete_review(&quote_id).await?;
                println!("Review deleted from quote {quote_id}.");
            }
        }
        Ok(())
    }
}
