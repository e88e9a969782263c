//! Terminal shell: tab navigation and plain-text rendering of the views.
//!
//! The shell owns nothing but the input loop; everything it shows is a pure
//! function of store state read through the command layer. Advisory calls
//! run on a spawned task so a turn in flight never blocks switching tabs —
//! the session's busy state is local to the advisor view.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::advisor::prompts::SUGGESTED_PROMPTS;
use crate::advisor::{AdvisorProvider, AdvisorSession, SubmitOutcome};
use crate::commands;
use crate::services::directory::{DirectoryFilter, NeighborAction};
use crate::state::AppState;
use crate::types::{ChatRole, ContactStatus, PetitionStatus, ViewTab};

const HELP: &str = "\
Commands:
  dashboard | roadmap | community [all|signed|non_resident|missing_contact] | advisor
  sign <id>      record a signature        oppose <id>   record opposition
  contact <id>   mark contact details collected
  add <unit>     add a neighbor record (starts pending, contact missing)
  ask <text>     ask the advisor (or just type while on the advisor tab)
  help | quit";

/// Render the active view. Exhaustive over `ViewTab`: adding a view is a
/// compile-checked change.
pub fn render(state: &AppState, session: &AdvisorSession) -> String {
    match commands::get_active_tab(state) {
        ViewTab::Dashboard => render_dashboard(state),
        ViewTab::Roadmap => render_roadmap(),
        ViewTab::Community => render_community(state, DirectoryFilter::All),
        ViewTab::Advisor => render_advisor(session),
    }
}

fn render_dashboard(state: &AppState) -> String {
    let data = commands::get_dashboard_data(state);
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", data.building_name);
    let _ = writeln!(
        out,
        "Commitment: {}% signed ({} of {} units, target {} units / {}%)",
        data.signed_percent,
        data.stats.signed_units,
        data.stats.total_units,
        data.stats.target_units,
        data.target_percent
    );
    let _ = writeln!(
        out,
        "Freeholder: {} | Agent: {} | Annual fees: {}",
        data.facts.freeholder_name, data.facts.managing_agent, data.facts.annual_fees
    );
    let _ = writeln!(
        out,
        "Ownership mix: {} residents, {} off-site",
        data.ownership_mix.residents, data.ownership_mix.off_site
    );

    let _ = writeln!(out, "\nPriority actions:");
    for action in &data.priority_actions {
        let marker = if action.in_progress { "*" } else { "-" };
        let _ = writeln!(out, "  {} {}: {}", marker, action.title, action.detail);
    }
    if let Some(blocker) = &data.blocker {
        let _ = writeln!(out, "  ! Blocker: {}", blocker);
    }

    if !data.recent_activity.is_empty() {
        let _ = writeln!(out, "\nRecent activity:");
        for entry in &data.recent_activity {
            let _ = writeln!(
                out,
                "  {} {}",
                entry.occurred_at.format("%H:%M"),
                entry.message
            );
        }
    }

    out
}

fn render_roadmap() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Project Roadmap ==");

    for step in commands::get_roadmap() {
        let marker = if step.is_completed { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{} {}. {} ({}, {:?} risk)",
            marker, step.id, step.title, step.estimated_time, step.risk_level
        );
        let _ = writeln!(out, "      {}", step.description);
    }

    out
}

fn render_community(state: &AppState, filter: DirectoryFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Neighbor Directory ({}) ==", filter.as_str());

    for card in commands::get_directory(state, filter) {
        let n = &card.neighbor;
        let mut flags = Vec::new();
        if !n.is_resident {
            flags.push("non-resident");
        }
        if n.contact_status == ContactStatus::Missing {
            flags.push("contact missing");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        let actions: Vec<&str> = card
            .actions
            .iter()
            .map(|a| match a {
                NeighborAction::Message => "message",
                NeighborAction::Remind => "remind",
                NeighborAction::AddDetails => "add details",
            })
            .collect();

        let _ = writeln!(
            out,
            "  {:>2}. {} — {} ({}){} -> {}",
            n.id,
            n.unit,
            n.name,
            n.status.as_str(),
            flags,
            actions.join(" / ")
        );
    }

    out
}

fn render_advisor(session: &AdvisorSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Common Home Advisor ==");

    for turn in session.transcript() {
        let speaker = match turn.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "advisor",
        };
        let _ = writeln!(out, "[{}] {}", speaker, turn.content);
    }

    if !session.phase().accepts_input() {
        let _ = writeln!(out, "(advisor is typing...)");
    }

    let _ = writeln!(out, "\nSuggestions: {}", SUGGESTED_PROMPTS.join(" | "));
    out
}

/// Kick off one advisory turn. The outbound call runs on its own task so
/// the input loop keeps serving the other views while it is in flight.
async fn handle_ask(
    session: &Arc<Mutex<AdvisorSession>>,
    provider: &Arc<dyn AdvisorProvider>,
    text: &str,
) {
    let outcome = {
        let mut guard = session.lock().await;
        guard.set_input(text);
        guard.begin_submit()
    };

    match outcome {
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Busy => {
            println!("The advisor is still answering; try again in a moment.")
        }
        SubmitOutcome::Dispatched(turns) => {
            println!("Advisor is thinking...");
            let session = Arc::clone(session);
            let provider = Arc::clone(provider);
            tokio::spawn(async move {
                let result = provider.generate(&turns).await;
                let reply = session.lock().await.resolve(result);
                println!("\n[advisor] {}", reply.content);
            });
        }
    }
}

/// Line-based input loop. Returns on EOF or `quit`.
pub async fn run(
    state: &AppState,
    session: Arc<Mutex<AdvisorSession>>,
    provider: Arc<dyn AdvisorProvider>,
) -> io::Result<()> {
    println!("{}", render(state, &*session.lock().await));
    println!("{}", HELP);

    let stdin = io::stdin();
    loop {
        print!("{}> ", commands::get_active_tab(state).as_str());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "dashboard" => {
                commands::set_active_tab(state, ViewTab::Dashboard);
                println!("{}", render(state, &*session.lock().await));
            }
            "roadmap" => {
                commands::set_active_tab(state, ViewTab::Roadmap);
                println!("{}", render(state, &*session.lock().await));
            }
            "community" => {
                commands::set_active_tab(state, ViewTab::Community);
                match DirectoryFilter::parse(if rest.is_empty() { "all" } else { rest }) {
                    Some(filter) => println!("{}", render_community(state, filter)),
                    None => println!(
                        "Unknown filter '{}'. Use all, signed, non_resident or missing_contact.",
                        rest
                    ),
                }
            }
            "advisor" => {
                commands::set_active_tab(state, ViewTab::Advisor);
                println!("{}", render(state, &*session.lock().await));
            }
            "sign" => report(commands::set_neighbor_status(
                state,
                rest,
                PetitionStatus::Signed,
            )),
            "oppose" => report(commands::set_neighbor_status(
                state,
                rest,
                PetitionStatus::Opposed,
            )),
            "contact" => match commands::add_contact_details(state, rest) {
                Ok(neighbor) => println!("Contact details recorded for {}", neighbor.unit),
                Err(message) => println!("{}", message),
            },
            "add" => {
                if rest.is_empty() {
                    println!("Usage: add <unit>");
                } else {
                    let added = commands::add_neighbor(state, rest, "", true);
                    println!("Added {} ({})", added.unit, added.id);
                }
            }
            "ask" => handle_ask(&session, &provider, rest).await,
            _ if commands::get_active_tab(state) == ViewTab::Advisor => {
                handle_ask(&session, &provider, line).await
            }
            _ => println!("Unknown command '{}'. Type help for the list.", command),
        }
    }

    Ok(())
}

fn report(result: Result<crate::types::Neighbor, String>) {
    match result {
        Ok(neighbor) => println!("{} is now {}", neighbor.unit, neighbor.status.as_str()),
        Err(message) => println!("{}", message),
    }
}
