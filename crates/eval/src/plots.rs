use anyhow::Result;
use plotters::prelude::*;

use crate::benchmark::BenchmarkResults;

pub fn generate_plots(results: &BenchmarkResults, output_dir: &str) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    // Plot 1: Average latency per pipeline stage
    plot_stage_latency(results, &format!("{}/stage_latency.png", output_dir))?;

    // Plot 2: Phrase coverage per passage
    plot_passage_coverage(results, &format!("{}/passage_coverage.png", output_dir))?;

    Ok(())
}

fn plot_stage_latency(results: &BenchmarkResults, path: &str) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let stages = vec![
        ("Extract", results.stages.avg_extract_ms),
        ("Search", results.stages.avg_search_ms),
        ("Page info", results.stages.avg_pages_ms),
        ("Entities", results.stages.avg_entities_ms),
    ];

    let max_latency = stages.iter().map(|(_, l)| *l).fold(0.0f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Stage Latency (ms)", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..4f64, 0f64..(max_latency * 1.2).max(1.0))?;

    chart.configure_mesh()
        .y_desc("Latency (ms)")
        .draw()?;

    for (i, (stage, latency)) in stages.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new([
            (i as f64 + 0.2, 0.0),
            (i as f64 + 0.8, *latency),
        ], BLUE.filled())))?
        .label(*stage)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));
    }

    chart.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("Saved stage latency plot to {}", path);
    Ok(())
}

fn plot_passage_coverage(results: &BenchmarkResults, path: &str) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let passage_count = results.passages.len().max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Phrase Coverage by Passage", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..passage_count as f64, 0f64..1.0f64)?;

    chart.configure_mesh()
        .y_desc("Coverage")
        .x_labels(passage_count)
        .draw()?;

    for (i, passage) in results.passages.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new([
            (i as f64 + 0.25, 0.0),
            (i as f64 + 0.75, passage.phrase_coverage),
        ], GREEN.filled())))?;
    }

    root.present()?;
    println!("Saved coverage plot to {}", path);
    Ok(())
}
