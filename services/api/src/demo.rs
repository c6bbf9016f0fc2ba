use crate::infra::{load_catalog, ScriptedExtractor};
use clap::Args;
use pim_match::analysis::{analyze_extraction, Analysis, AnalysisSession};
use pim_match::catalog::CatalogImporter;
use pim_match::config::AppConfig;
use pim_match::error::AppError;
use std::io::Cursor;
use std::path::PathBuf;

const DEMO_CATALOG: &str = "part_name,part_id\n\
Widget A,100\n\
Widget B,200\n\
Hex Bolt M8,1005\n\
Hex Bolt M10,1010\n\
Hydraulic Pump HP-20,2020\n\
Flange Adapter,0300\n";

const DEMO_MESSAGE: &str = "Hi, this is Dana Ruiz from Ruiz Fabrication. We need 3 widget a, \
a box of hex bolts (50 pcs), part 2020 x1 and a couple of gadgets. \
Acme quoted us 10% off last month.";

const DEMO_EXTRACTION: &str = r#"{
  "customer_name": "Dana Ruiz",
  "company_name": "Ruiz Fabrication",
  "company_address": "",
  "products": [
    {"part_name": "widgeta", "part_id": "", "quantity": "3"},
    {"part_name": "hexbolt", "part_id": "", "quantity": "50 pcs"},
    {"part_name": "", "part_id": "2020", "quantity": "1"},
    {"part_name": "gadget", "part_id": "", "quantity": "2"}
  ],
  "competitor_name": "Acme",
  "discount_mentioned": true
}"#;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Catalog CSV export (`part_name,part_id` with a header row)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// File holding the extraction output (JSON object with a `products` array)
    #[arg(long)]
    pub(crate) mentions: PathBuf,
    /// Print the structured report as JSON instead of the text artifacts
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Use this catalog CSV instead of the built-in sample.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skip the rejected-batch portion of the demo.
    #[arg(long)]
    pub(crate) skip_rejection: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        catalog,
        mentions,
        json,
    } = args;

    let catalog = load_catalog(Some(catalog.as_path()))?;
    let raw = std::fs::read_to_string(mentions)?;
    let analysis = analyze_extraction(&raw, &catalog)?;

    if json {
        match serde_json::to_string_pretty(&analysis.report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        render_analysis(&analysis);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        skip_rejection,
    } = args;

    let catalog = match catalog {
        Some(path) => load_catalog(Some(path.as_path()))?,
        None => CatalogImporter::from_reader(Cursor::new(DEMO_CATALOG))?,
    };
    let extraction_config = AppConfig::load()?.extraction;
    let extractor = ScriptedExtractor::new(DEMO_EXTRACTION);
    let mut session = AnalysisSession::new();

    println!("Part matching demo");
    println!("Catalog: {} entries", catalog.len());
    println!("\nInput text:\n{DEMO_MESSAGE}");

    let analysis =
        session.analyze_text(DEMO_MESSAGE, &extractor, &extraction_config, &catalog)?;
    println!("\nExtracted information:\n{DEMO_EXTRACTION}");
    render_context(analysis);
    render_analysis(analysis);

    if skip_rejection {
        return Ok(());
    }

    println!("\nSubmitting a malformed extraction result");
    match session.apply_extraction("Sorry, I could not find any products.", &catalog) {
        Ok(_) => println!("  Unexpectedly accepted"),
        Err(err) => println!("  Rejected: {err}"),
    }
    if let Some(last) = session.last() {
        println!(
            "  Previous report kept ({} table rows, {} ledger lines)",
            last.report.rows.len(),
            last.report.exact_matches.len()
        );
    }

    Ok(())
}

fn render_context(analysis: &Analysis) {
    let extraction = &analysis.extraction;
    for (label, key) in [
        ("Customer", "customer_name"),
        ("Company", "company_name"),
        ("Competitor", "competitor_name"),
    ] {
        if let Some(value) = extraction.context_text(key) {
            println!("{label}: {value}");
        }
    }
    if extraction.discount_mentioned() {
        println!("Discount mentioned: yes");
    }
}

fn render_analysis(analysis: &Analysis) {
    let report = &analysis.report;
    println!("\nProduct table:\n{}", report.table);
    println!(
        "\n{} exact, {} possible, {} without a match",
        report.tally.exact, report.tally.possible, report.tally.no_match
    );

    if report.ledger.is_empty() {
        println!("\nExact matches (part id, quantity): none");
    } else {
        println!("\nExact matches (part id, quantity):\n{}", report.ledger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pim_match::config::ExtractionConfig;
    use pim_match::MatchType;

    #[test]
    fn demo_extraction_resolves_against_demo_catalog() {
        let catalog = CatalogImporter::from_reader(Cursor::new(DEMO_CATALOG)).expect("demo catalog");
        let config = ExtractionConfig {
            deployment: "gpt-4o-mini-s".to_string(),
            api_version: "2024-02-01".to_string(),
        };
        let extractor = ScriptedExtractor::new(DEMO_EXTRACTION);
        let mut session = AnalysisSession::new();

        let analysis = session
            .analyze_text(DEMO_MESSAGE, &extractor, &config, &catalog)
            .expect("demo analysis succeeds");

        let kinds: Vec<_> = analysis.report.rows.iter().map(|row| row.match_type).collect();
        assert_eq!(
            kinds,
            vec![
                MatchType::Exact,
                MatchType::Possible,
                MatchType::Possible,
                MatchType::Exact,
                MatchType::NoMatch,
            ]
        );
        assert_eq!(analysis.report.ledger, "100 3\n2020 1");
        assert_eq!(analysis.extraction.context_text("competitor_name"), Some("Acme"));
    }
}
