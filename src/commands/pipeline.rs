use crate::*;

pub fn handle_pipeline_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Run { ai_index } => {
            let config = load_config(&cli.data_dir, cli.config.as_deref())?;
            let run = ScoringPipeline::new(&cli.data_dir, config)
                .with_ai_index(ai_index.clone())
                .run()?;
            print_one(cli.json, run.report(), |r| {
                let median = r
                    .median_passenger_volume
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                let mut lines = vec![format!(
                    "merged={} median_passenger_volume={} high={} low={}",
                    r.merged_rows, median, r.high_count, r.low_count
                )];
                if let Some(src) = &r.ai_index_source {
                    lines.push(format!("ai_index: {}", src));
                }
                lines.extend(
                    r.outputs
                        .iter()
                        .map(|a| format!("{}\t{}\t{}", a.path, a.rows, a.sha256)),
                );
                lines.join("\n")
            })?;
        }
        Commands::Index => {
            let config = load_config(&cli.data_dir, cli.config.as_deref())?;
            let scorer = GovernanceScorer::from_config(&config)?;
            let report = compute_ai_index(&cli.data_dir, &scorer)?;
            print_one(cli.json, report, |r| {
                r.entries
                    .iter()
                    .map(|e| {
                        format!(
                            "{}\t{}\t{}\t{}",
                            e.table, e.country, e.sector, e.ai_procurement_index
                        )
                    })
                    .chain(
                        r.outputs
                            .iter()
                            .map(|a| format!("wrote {} ({} rows)", a.path, a.rows)),
                    )
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
