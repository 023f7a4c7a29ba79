use crate::*;

fn validate_line(t: &TableCheck) -> String {
    let rows = t
        .rows
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!("{}\t{}\t{}\t{}", t.table, t.used_by, t.status, rows);
    if !t.required {
        line.push_str("\toptional");
    }
    if !t.missing_columns.is_empty() {
        line.push_str(&format!("\tmissing: {}", t.missing_columns.join(", ")));
    }
    line
}

pub fn handle_inspect_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Show { command } => match command {
            ShowCommands::Governance { country } => {
                let rows =
                    filter_governance(read_governance_flags(&cli.data_dir), country.as_deref());
                print_out(cli.json, GOVERNANCE_OUTPUT_COLUMNS, &rows, |r| {
                    format!("{}\t{}\t{}", r.country, r.year, r.governance_flag.as_str())
                })?;
            }
            ShowCommands::Scores { country, sector } => {
                let rows = filter_scores(
                    read_opportunity_scores(&cli.data_dir),
                    country.as_deref(),
                    sector.as_deref(),
                );
                print_out(cli.json, OPPORTUNITY_OUTPUT_COLUMNS, &rows, |r| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        r.country, r.year, r.sector, r.procurement_readiness_score
                    )
                })?;
            }
        },
        Commands::Summary { country } => {
            let report = summarize(SummaryInputs::read(&cli.data_dir), country.as_deref());
            print_one(cli.json, report, |r| {
                let mut lines = vec![
                    format!("country: {}", r.country),
                    format!("passengers: {}", r.total_passengers),
                    format!("cargo_tonnage: {}", r.total_cargo),
                    format!("inbound_tourists: {}", r.total_inbound_tourists),
                    format!("governance: high={} low={}", r.high_count, r.low_count),
                ];
                for s in &r.sector_readiness {
                    lines.push(format!(
                        "readiness\t{}\t{:.1}\t{} rows",
                        s.sector, s.mean_score, s.rows
                    ));
                }
                if !r.countries.is_empty() {
                    lines.push(format!("countries: {}", r.countries.join(", ")));
                }
                lines.join("\n")
            })?;
        }
        Commands::Validate => {
            let report = validate_inputs(&cli.data_dir);
            print_one(cli.json, report, |r| {
                let mut lines: Vec<String> = r.tables.iter().map(validate_line).collect();
                lines.push(format!("validate: run={} index={}", r.overall, r.index));
                lines.join("\n")
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
