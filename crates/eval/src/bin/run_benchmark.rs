use anyhow::Result;
use eval::{Benchmarker, get_sample_passages, generate_plots};

use enrich::EnrichmentPipeline;
use extract::ExtractParams;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Wikimedia Enrichment Benchmark ===\n");

    let pipeline = EnrichmentPipeline::default();
    let benchmarker = Benchmarker::new(pipeline, ExtractParams::default());

    let passages = get_sample_passages();
    println!("Sample set: {} passages\n", passages.len());

    let results = benchmarker.run(&passages).await?;

    print_results(&results);

    // Save results
    let results_json = serde_json::to_string_pretty(&results)?;
    std::fs::write("benchmark_results.json", results_json)?;
    println!("\n✅ Results saved to benchmark_results.json");

    // Generate plots
    generate_plots(&results, "plots")?;
    println!("✅ Plots saved to plots/");

    Ok(())
}

fn print_results(results: &eval::BenchmarkResults) {
    println!("\n=== RESULTS ===\n");

    for passage in &results.passages {
        println!("📄 {}:", passage.name);
        println!("  Keyphrases: {}", passage.keyphrases);
        println!("  Hits: {}", passage.hits);
        println!("  Entities linked: {}", passage.entities_linked);
        println!("  Coverage: {:.2}", passage.phrase_coverage);
        println!("  Total: {:.0} ms", passage.total_ms);
    }

    println!("\n📊 STAGE SUMMARY:");
    println!(
        "  Extract:  {:.0} ms (±{:.0})",
        results.stages.avg_extract_ms, results.stages.std_extract_ms
    );
    println!(
        "  Search:   {:.0} ms (±{:.0})",
        results.stages.avg_search_ms, results.stages.std_search_ms
    );
    println!(
        "  Pages:    {:.0} ms (±{:.0})",
        results.stages.avg_pages_ms, results.stages.std_pages_ms
    );
    println!(
        "  Entities: {:.0} ms (±{:.0})",
        results.stages.avg_entities_ms, results.stages.std_entities_ms
    );
    println!("  Avg total: {:.0} ms", results.stages.avg_total_ms);
    println!("  Avg coverage: {:.2}", results.stages.avg_coverage);
}
