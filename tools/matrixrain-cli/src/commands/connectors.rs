//! Print the connector rating table.

use matrixrain_connector::{connector_map, Side, CONNECTOR_VARIANTS};
use serde::Serialize;

#[derive(Serialize)]
struct LetterRow {
    letter: char,
    rating_left: [u8; CONNECTOR_VARIANTS],
    rating_right: [u8; CONNECTOR_VARIANTS],
    relevant_left: [bool; CONNECTOR_VARIANTS],
    relevant_right: [bool; CONNECTOR_VARIANTS],
}

#[derive(Serialize)]
struct Report<'a> {
    letters: Vec<LetterRow>,
    statistics: &'a matrixrain_connector::AggregateStatistics,
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let map = connector_map();
    let letters: Vec<LetterRow> = map
        .profiles()
        .iter()
        .map(|p| LetterRow {
            letter: p.letter(),
            rating_left: *p.ratings(Side::Left),
            rating_right: *p.ratings(Side::Right),
            relevant_left: *p.relevancy(Side::Left),
            relevant_right: *p.relevancy(Side::Right),
        })
        .collect();

    if json {
        let report = Report {
            letters,
            statistics: map.statistics(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Connector Ratings");
    println!("{}", "=".repeat(50));
    println!("letter  left     right    relevant (l / r)");
    for row in &letters {
        println!(
            "  {}     {}    {}    {} / {}",
            row.letter,
            ratings(&row.rating_left),
            ratings(&row.rating_right),
            flags(&row.relevant_left),
            flags(&row.relevant_right),
        );
    }

    let stats = map.statistics();
    println!();
    println!("Statistics:");
    println!("  Viable entries: {}", stats.viable_entries);
    println!("  Median variant: {:.4}", stats.median);
    for (i, p) in stats.probabilities.iter().enumerate() {
        println!("  P(variant {}): {:.4}", i + 1, p);
    }

    Ok(())
}

fn ratings(values: &[u8; CONNECTOR_VARIANTS]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn flags(values: &[bool; CONNECTOR_VARIANTS]) -> String {
    values.iter().map(|v| if *v { 'x' } else { '.' }).collect()
}
