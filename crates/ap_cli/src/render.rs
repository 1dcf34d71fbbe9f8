// crates/ap_cli/src/render.rs
//
// Plain-text report for an outcome. Column widths are fixed; everything
// printed comes from the outcome document, so the text is as deterministic
// as the JSON.

use std::io::{self, Write};

use ap_algo::{ElectionKind, SeatMargin, SeatStatus};
use ap_io::scenario::ScenarioKind;
use ap_pipeline::Outcome;

pub fn write_text<W: Write>(w: &mut W, outcome: &Outcome) -> io::Result<()> {
    let body = &outcome.body;

    if let Some(s) = &body.scenario {
        writeln!(w, "Scenario: {} ({}, {})", s.name, s.id, kind_label(s.kind))?;
        if let Some(d) = &s.description {
            writeln!(w, "  {d}")?;
        }
    }
    let c = &body.config;
    writeln!(
        w,
        "Quotient {}  Seats {}  Party threshold {}  Candidate threshold {}",
        c.quotient, c.seats, c.party_threshold, c.candidate_threshold
    )?;

    // Allocation
    writeln!(w)?;
    writeln!(
        w,
        "{:<20} {:>12} {:>8} {:>7} {:>10} {:>6}",
        "PARTY", "VOTES", "ELIGIBLE", "DIRECT", "REMAINDER", "TOTAL"
    )?;
    for p in &body.allocation.parties {
        writeln!(
            w,
            "{:<20} {:>12} {:>8} {:>7} {:>10} {:>6}",
            p.party.as_str(),
            p.votes,
            if p.eligible { "yes" } else { "no" },
            p.direct_seats,
            p.remainder_seats,
            p.total_seats
        )?;
    }
    writeln!(w, "Status: {}", status_label(&body.allocation.status))?;

    if !body.allocation.rounds.is_empty() {
        writeln!(w)?;
        writeln!(w, "Remainder rounds")?;
        for r in &body.allocation.rounds {
            let runner_up = match &r.runner_up {
                Some(ru) => format!("  runner-up {} {} (/{})", ru.party, ru.quotient, ru.divisor),
                None => String::new(),
            };
            writeln!(
                w,
                "  round {:>3}  seat {:>4}  {:<20} {:>14} (/{}){}",
                r.round,
                r.seat_number,
                r.party.as_str(),
                r.quotient.to_string(),
                r.divisor,
                runner_up
            )?;
        }
    }

    // Elected candidates
    if !body.selections.is_empty() {
        writeln!(w)?;
        writeln!(w, "Elected")?;
    }
    for s in &body.selections {
        writeln!(w, "{} ({} seat(s))", s.party, s.seats)?;
        for e in &s.elected {
            writeln!(
                w,
                "  {:>3}. {:<28} {:>12}  {:<9}{}",
                e.position,
                e.name,
                e.votes,
                kind_label_seat(e.kind),
                if e.met_threshold { "" } else { "  below 0.2Q" }
            )?;
        }
        if s.shortfall > 0 {
            writeln!(w, "  !! {} seat(s) without a candidate", s.shortfall)?;
        }
    }

    // Remainder standings
    writeln!(w)?;
    writeln!(w, "Remainder standings")?;
    writeln!(
        w,
        "{:<20} {:>12} {:>7} {:>10} {:>14}",
        "PARTY", "VOTES", "DIRECT", "VOTES/Q", "QUOTIENT"
    )?;
    for row in &body.standings.rows {
        let quotient = if row.eligible { row.quotient.to_string() } else { "-".to_string() };
        writeln!(
            w,
            "{:<20} {:>12} {:>7} {:>10} {:>14}",
            row.party.as_str(),
            row.votes,
            row.direct_seats,
            row.projected_elected,
            quotient
        )?;
    }
    writeln!(w, "Largest quotient: {}", body.standings.largest_quotient)?;

    // Competitive risk
    if let Some(risk) = &body.risk {
        writeln!(w)?;
        writeln!(w, "Risk for {}: {}", risk.focus.party, risk.focus.conclusion)?;
        writeln!(w, "Seat margin: {}", margin_label(&risk.focus.seat_margin))?;
        writeln!(
            w,
            "{:<20} {:>12} {:>12} {:>12} {:>12}",
            "RIVAL", "VOTES", "TO_DIRECT", "TO_OVERTAKE", "MINIMUM"
        )?;
        for r in &risk.rivals {
            writeln!(
                w,
                "{:<20} {:>12} {:>12} {:>12} {:>12}",
                r.party.as_str(),
                r.votes,
                r.to_direct.to_string(),
                r.to_overtake.to_string(),
                r.minimum.to_string()
            )?;
        }
    }

    if let Some(r) = &body.ranking {
        writeln!(w)?;
        writeln!(
            w,
            "Expected {} votes: position {} against {} candidate(s)",
            r.expected_votes, r.position, r.total_candidates
        )?;
    }

    writeln!(w)?;
    writeln!(w, "Outcome {}", outcome.id)
}

fn margin_label(margin: &SeatMargin) -> String {
    match margin {
        SeatMargin::Ahead { round, competitor: Some(c), margin, competitor_needs, .. } => {
            format!("ahead of {c} in round {round} by {margin} vote(s); {c} needs {competitor_needs} more")
        }
        SeatMargin::Ahead { round, competitor: None, .. } => format!("round {round} won unopposed"),
        SeatMargin::Behind { round, competitor, shortfall, .. } => {
            format!("{shortfall} vote(s) short of beating {competitor} in round {round}")
        }
        SeatMargin::Uncontested => "no remainder round to contest".to_string(),
    }
}

fn kind_label(kind: ScenarioKind) -> &'static str {
    match kind {
        ScenarioKind::Base => "base",
        ScenarioKind::Simulation => "simulation",
    }
}

fn kind_label_seat(kind: ElectionKind) -> &'static str {
    match kind {
        ElectionKind::Direct => "direct",
        ElectionKind::Remainder => "remainder",
    }
}

fn status_label(status: &SeatStatus) -> String {
    match status {
        SeatStatus::Complete => "complete".to_string(),
        SeatStatus::Unfilled { unfilled } => format!("{unfilled} seat(s) unfilled (no eligible party)"),
        SeatStatus::Oversubscribed { excess } => {
            format!("oversubscribed: direct seats exceed the total by {excess}")
        }
    }
}
