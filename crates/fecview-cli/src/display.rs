//! Text card display for composed pages.
//!
//! Only `Ready` sections are printed; empty and failed ones leave no trace,
//! the same way a browser page hides their containers.

use fecview_compose::entity::{CandidateView, CommitteeView, CounterpartyRow, IndividualView};
use fecview_compose::rankings::{Panel, RankingSegment};
use fecview_compose::search::SearchHit;
use fecview_compose::totals::YearTotalsView;
use fecview_compose::{EntityView, PageOutcome, PageView, RoleSection, SearchResultSet, Section};
use fecview_core::{format_count, format_usd};

// ── Public API ──

pub fn print_outcome(outcome: &PageOutcome) {
    match outcome {
        PageOutcome::Rendered(view) => print_page(view),
        PageOutcome::Failed { reason } => eprintln!("Unable to load page: {reason}"),
        PageOutcome::Stale => {}
    }
}

fn print_page(view: &PageView) {
    match view {
        PageView::Home { year, panels } => {
            println!("=== Top of {year} ===");
            println!();
            print_panels(panels);
        }
        PageView::Rankings { title, panels, .. } => {
            println!("=== {title} ===");
            println!();
            print_panels(panels);
        }
        PageView::RankingsList { title, content } => {
            println!("=== {title} ===");
            println!();
            if let Section::Ready(segment) = content {
                print_segment(segment);
            }
        }
        PageView::Totals(totals) => print_totals(totals),
        PageView::Search { query, results } => print_search(query, results),
        PageView::Entity(entity) => print_entity(entity),
    }
}

// ── Rankings ──

fn print_panels(panels: &[Panel]) {
    for panel in panels {
        let Section::Ready(segment) = &panel.content else {
            continue;
        };
        if let Some(heading) = &panel.heading {
            println!("{heading}");
        }
        print_segment(segment);
        if let Some(link) = &panel.more_link {
            println!("  more: {link}");
        }
        println!();
    }
}

fn print_segment(segment: &RankingSegment) {
    for entry in &segment.entries {
        println!(
            "  {:>3}. {:<60} {:>16}",
            entry.rank,
            entry.display_line(),
            format_usd(entry.amount)
        );
    }
}

fn print_totals(totals: &YearTotalsView) {
    println!("=== {} ===", totals.heading);
    for row in &totals.rows {
        println!("  {:>3}. {:<26} {}", row.rank, row.label, format_usd(row.total));
    }
}

// ── Search ──

fn print_search(query: &str, results: &SearchResultSet) {
    println!("=== Search: {query} ===");
    match results {
        SearchResultSet::Results { hits } => {
            for hit in hits {
                print_hit(hit);
            }
        }
        other => {
            if let Some(message) = other.message() {
                println!("{message}");
            }
        }
    }
}

fn print_hit(hit: &SearchHit) {
    println!("  {:>3}. {}", hit.rank, hit.line);
    let years: Vec<&str> = hit.years.iter().map(|y| y.year.as_str()).collect();
    if !years.is_empty() {
        println!("       years: {}", years.join(", "));
    }
}

// ── Entities ──

fn print_entity(entity: &EntityView) {
    println!("=== {} ({}) ===", entity.title(), entity.year());
    let years: Vec<&str> = entity.year_links().iter().map(|y| y.year.as_str()).collect();
    if !years.is_empty() {
        println!("Available years: {}", years.join(", "));
    }
    println!();

    match entity {
        EntityView::Individual(v) => print_individual(v),
        EntityView::Committee(v) => print_committee(v),
        EntityView::Candidate(v) => print_candidate(v),
    }

    for section in entity.sections() {
        print_role(section);
    }
}

fn print_individual(v: &IndividualView) {
    let s = &v.summary;
    println!("Profile");
    field("location", &format!("{}, {}", s.city, s.state));
    opt_field("occupation", s.occupation.as_deref());
    opt_field("employer", s.employer.as_deref());
    println!();

    println!("Activity");
    flow("outgoing", s.total_out_amt, s.total_out_txs, s.avg_tx_out);
    flow("incoming", s.total_in_amt, s.total_in_txs, s.avg_tx_in);
    field("net balance", &format_usd(s.net_balance));
    println!();
}

fn print_committee(v: &CommitteeView) {
    let c = &v.committee;
    println!("Profile");
    opt_field("treasurer", c.tres_name.as_deref());
    field("location", &format!("{}, {}", c.city, c.state));
    opt_field("designation", c.designation.as_deref());
    opt_field("type", c.cmte_type.as_deref());
    if !c.party.is_empty() {
        field("party", &c.party);
    }
    opt_field("connected org", c.connected_org.as_deref());
    opt_field("candidate", c.cand_id.as_deref());
    println!();

    let t = &v.tx;
    println!("Activity");
    flow("contributions", t.contributions_in_amt, t.contributions_in_txs, t.avg_contribution_in);
    flow("other receipts", t.other_receipts_in_amt, t.other_receipts_in_txs, t.avg_other_in);
    flow("total incoming", t.total_incoming_amt, t.total_incoming_txs, t.avg_incoming);
    flow("transfers", t.transfers_amt, t.transfers_txs, t.avg_transfer);
    flow("expenditures", t.expenditures_amt, t.expenditures_txs, t.avg_expenditure);
    flow("total outgoing", t.total_outgoing_amt, t.total_outgoing_txs, t.avg_outgoing);
    field("net balance", &format_usd(t.net_balance));
    println!();
}

fn print_candidate(v: &CandidateView) {
    let s = &v.summary;
    println!("Profile");
    field("party", &s.party);
    field("office", &s.office);
    field("campaign committee", &s.pcc);
    field("location", &format!("{}, {}", s.city, s.state));
    println!();

    println!("Direct activity");
    flow("incoming", s.total_direct_in_amt, s.total_direct_in_txs, s.avg_direct_in);
    flow("outgoing", s.total_direct_out_amt, s.total_direct_out_txs, s.avg_direct_out);
    field("net balance", &format_usd(s.net_balance_direct_tx));
    println!();
}

fn print_role(section: &RoleSection) {
    let Section::Ready(rows) = &section.content else {
        return;
    };
    println!("{}", section.heading);
    for row in rows {
        println!("{}", counterparty_line(row));
    }
    println!();
}

fn counterparty_line(row: &CounterpartyRow) -> String {
    format!(
        "  {:>3}. {} | {} over {} txs (avg {})",
        row.entry.rank,
        row.line,
        format_usd(row.entry.total),
        format_count(row.entry.tx_count),
        format_usd(row.entry.average)
    )
}

// ── Fields ──

fn field(label: &str, value: &str) {
    println!("  {:<26} {}", label, value);
}

fn opt_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

fn flow(label: &str, amount: f64, txs: u64, average: f64) {
    println!(
        "  {:<26} {} ({} txs, avg {})",
        label,
        format_usd(amount),
        format_count(txs),
        format_usd(average)
    );
}
