use dotenv::dotenv;
use esg_report_finder::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let company = match args.as_slice() {
        [name, ticker, region] if region.eq_ignore_ascii_case("india") => {
            CompanyDescriptor::new(name, ticker, Region::IndiaSensex)
        }
        [name, ticker, ..] => CompanyDescriptor::new(name, ticker, Region::DomesticUs),
        _ => CompanyDescriptor::new("Infosys", "INFY", Region::IndiaSensex),
    };

    println!("🔎 Searching reports for {} ({})...", company.name, company.ticker);

    let outcome = fetch_company_reports(&company).await?;

    if outcome.reports.is_empty() {
        println!("No reports found.");
        println!("\n--- Raw model output ---\n{}", outcome.raw_text);
        return Ok(());
    }

    println!("📄 Found {} reports:\n", outcome.reports.len());
    for report in &outcome.reports {
        println!(
            "{}  {:<14}  {}\n      {}",
            report.year, report.report_type, report.title, report.url
        );
    }

    Ok(())
}
