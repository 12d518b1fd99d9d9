//! Subcommands and their execution against a [`ReferralSession`].

use std::fmt::Write as _;
use std::time::Duration;

use andi_core::{FeedFilter, Opportunity, OpportunitySource, ReferralSession};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use tracing::info;

/// Referral engine commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show dashboard counters
    Stats,

    /// List the partner directory
    Partners,

    /// List open opportunities, newest first
    Feed {
        /// Only show one network (facebook, instagram, linkedin, nextdoor, alignable)
        #[arg(short, long)]
        source: Option<OpportunitySource>,
        /// Number of opportunities to show (defaults to the configured feed limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Include unlisted opportunities and ignore the limit
        #[arg(long)]
        all: bool,
    },

    /// Show the best match and draft recommendation for an opportunity
    Preview {
        /// Opportunity ID
        id: String,
        /// Recommend this partner instead of the best match
        #[arg(short, long)]
        partner: Option<String>,
    },

    /// Post a referral on an opportunity
    Post {
        /// Opportunity ID
        id: String,
        /// Recommend this partner instead of the best match
        #[arg(short, long)]
        partner: Option<String>,
        /// Post this text instead of the generated draft
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List opportunities you have referred
    Given,

    /// List referrals received from partners
    Received,
}

fn opportunity_line(opportunity: &Opportunity, now: DateTime<Utc>) -> String {
    format!(
        "[{}] {:<9} {:>8}  {}",
        opportunity.id,
        opportunity.source.as_str(),
        andi_core::time::relative_label(opportunity.posted_at, now),
        opportunity.content
    )
}

/// Run one command and render its output.
pub async fn execute_command(
    session: &mut ReferralSession,
    command: Commands,
    json: bool,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let mut out = String::new();

    match command {
        Commands::Stats => {
            let summary = session.summary();
            if json {
                return Ok(serde_json::to_string_pretty(&summary)?);
            }
            writeln!(out, "Referrals given:     {}", summary.referrals_given)?;
            writeln!(out, "Referrals received:  {}", summary.referrals_received)?;
            writeln!(out, "Open opportunities:  {}", summary.open_opportunities)?;
            write!(
                out,
                "Partner slots:       {}/{}",
                summary.used_slots, summary.max_partners
            )?;
        }

        Commands::Partners => {
            let partners = session.directory().all();
            if json {
                return Ok(serde_json::to_string_pretty(partners)?);
            }
            for partner in partners {
                writeln!(
                    out,
                    "[{}] {} - {} ({}){}",
                    partner.id,
                    partner.name,
                    partner.business,
                    partner.category,
                    if partner.is_available() { "" } else { " [unavailable]" }
                )?;
            }
            write!(
                out,
                "{}/{} slots used",
                session.directory().used_slots(),
                session.directory().max_partners()
            )?;
        }

        Commands::Feed { source, limit, all } => {
            let filter = FeedFilter {
                source,
                listed_only: !all,
                limit: if all {
                    None
                } else {
                    Some(limit.unwrap_or(session.config().feed_limit))
                },
            };
            let feed = session.open_feed(&filter);
            if json {
                return Ok(serde_json::to_string_pretty(&feed)?);
            }
            if feed.is_empty() {
                out.push_str("No open opportunities");
            }
            let lines: Vec<String> = feed.iter().map(|o| opportunity_line(o, now)).collect();
            out.push_str(&lines.join("\n"));
        }

        Commands::Preview { id, partner } => {
            let preview = session.preview(&id, partner.as_deref())?;
            if json {
                return Ok(serde_json::to_string_pretty(&preview)?);
            }
            match (&preview.partner, &preview.draft) {
                (Some(partner), Some(draft)) => {
                    writeln!(
                        out,
                        "Best match ({}% Match): {} - {}",
                        preview.match_badge_percent, partner.name, partner.category
                    )?;
                    write!(out, "\n{draft}")?;
                }
                _ => out.push_str("No available partners. Import your member directory first."),
            }
            if preview.already_referred {
                out.push_str("\n\nYou have already referred this opportunity.");
            }
        }

        Commands::Post {
            id,
            partner,
            message,
        } => {
            let delay = session.config().posting_delay_ms;
            if delay > 0 {
                info!(delay_ms = delay, "Posting referral");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let comment = session.post_referral(&id, partner.as_deref(), message, now)?;
            if json {
                return Ok(serde_json::to_string_pretty(&comment)?);
            }
            writeln!(out, "Referral posted on opportunity {id}:")?;
            write!(out, "{}", comment.content)?;
            if let Some(next) = session.next_opportunity(&id) {
                write!(out, "\n\nNext up: {}", opportunity_line(next, now))?;
            }
        }

        Commands::Given => {
            let given = session.given_referrals();
            if json {
                return Ok(serde_json::to_string_pretty(&given)?);
            }
            if given.is_empty() {
                out.push_str("No referrals given yet");
            }
            let lines: Vec<String> = given.iter().map(|o| opportunity_line(o, now)).collect();
            out.push_str(&lines.join("\n"));
        }

        Commands::Received => {
            let views = session.received_views();
            if json {
                return Ok(serde_json::to_string_pretty(&views)?);
            }
            let mut lines: Vec<String> = views
                .iter()
                .map(|v| {
                    format!(
                        "{}  from {} ({})  on [{}] {}",
                        v.referral.date,
                        v.partner.name,
                        v.partner.business,
                        v.opportunity.id,
                        v.referral.status.as_str()
                    )
                })
                .collect();
            lines.extend(session.unresolved_received().iter().map(|r| {
                format!(
                    "{}  from partner {}  on [{}] {} (post unavailable)",
                    r.date,
                    r.partner_id,
                    r.opportunity_id.as_deref().unwrap_or("-"),
                    r.status.as_str()
                )
            }));
            write!(
                out,
                "{}\n{} received in total",
                lines.join("\n"),
                session.referrals_received()
            )?;
        }
    }

    Ok(out)
}
