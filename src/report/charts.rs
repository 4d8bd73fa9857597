//! @ai:module:intent Chart generation for review metrics summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::report::ReviewReport;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts, returning the written file names
    fn generate_all(&self, report: &ReviewReport, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates charts from review summaries
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Task counts per complexity bucket
    /// @ai:effects pure
    fn bucket_series(report: &ReviewReport) -> Vec<(&'static str, f64)> {
        report
            .summary
            .buckets
            .iter()
            .map(|b| (b.bucket.label(), f64::from(b.count)))
            .collect()
    }

    /// @ai:intent Detection-rate bounds per category
    /// @ai:effects pure
    fn detection_series(report: &ReviewReport) -> Vec<(&'static str, f64, f64)> {
        report
            .summary
            .categories
            .iter()
            .map(|c| {
                (
                    c.category.display_name(),
                    c.detection_rate.min(),
                    c.detection_rate.max(),
                )
            })
            .collect()
    }

    /// @ai:intent Generate complexity distribution bar chart
    /// @ai:effects fs:write
    fn generate_complexity_chart(&self, report: &ReviewReport, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let data = Self::bucket_series(report);
        let y_max = data.iter().map(|(_, count)| *count).fold(1.0, f64::max) + 1.0;

        let mut chart = ChartBuilder::on(&root)
            .caption("Tasks by Complexity", ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..data.len() as i32, 0f64..y_max)?;

        chart
            .configure_mesh()
            .y_desc("Tasks")
            .x_desc("Complexity")
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *count)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Generate detection-rate range chart
    /// @ai:effects fs:write
    fn generate_detection_chart(&self, report: &ReviewReport, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (1000, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let data = Self::detection_series(report);

        let mut chart = ChartBuilder::on(&root)
            .caption("Detection Rate by Category", ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..data.len() as i32, 0f64..100f64)?;

        chart
            .configure_mesh()
            .y_desc("Detection Rate (%)")
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _, _)| name.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        // Floating bars spanning the estimated range
        chart.draw_series(data.iter().enumerate().map(|(i, (_, min, max))| {
            Rectangle::new(
                [(i as i32, *min), (i as i32 + 1, *max)],
                GREEN.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(&self, report: &ReviewReport, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        let complexity_path = output_dir.join("complexity.png");
        self.generate_complexity_chart(report, &complexity_path)?;
        generated.push("complexity.png".to_string());

        if !report.summary.categories.is_empty() {
            let detection_path = output_dir.join("detection_rates.png");
            self.generate_detection_chart(report, &detection_path)?;
            generated.push("detection_rates.png".to_string());
        }

        Ok(generated)
    }
}
