// report/console.rs
use crate::domain::RunStats;
use crate::report::stats::{MarketSummary, OutlierReport};

const RULE: &str = "======================================================================";
const TOP_NEIGHBORHOODS: usize = 10;
const OUTLIER_EXAMPLES: usize = 10;

pub fn print_summary(summary: &MarketSummary, run: &RunStats, target_rate: f64) {
    println!("{RULE}");
    println!("📊 RESULTS");
    println!("{RULE}");
    println!(
        "Valid rows:            {}/{} ({:.1}%)",
        summary.valid_rows, summary.total_rows, summary.valid_rate
    );
    if summary.valid_rate >= target_rate {
        println!("✅ Target reached: {:.1}% ≥ {:.0}%", summary.valid_rate, target_rate);
    } else {
        println!("⚠️  Target missed: {:.1}% < {:.0}%", summary.valid_rate, target_rate);
    }

    if summary.valid_rows == 0 {
        println!("\n⚠️  No valid rows after cleaning");
        println!("   Check the source data and title patterns");
        println!("{RULE}");
        return;
    }

    println!();
    println!("Mean price per m²:     {}", money(summary.mean_price_per_sqm));
    println!("Median price per m²:   {}", money(summary.median_price_per_sqm));
    println!("Mean area:             {} m²", number(summary.mean_area_sqm));
    println!("Mean price:            {}", money(summary.mean_price));
    println!("Median price:          {}", money(summary.median_price));

    println!();
    println!("📍 Neighborhoods matched: {} rows", run.neighborhoods_matched);
    println!("📏 Surfaces inferred:     {} rows", run.areas_inferred);

    println!("\n🏠 By property type:");
    for (kind, n) in &summary.by_property_type {
        println!("   {:<12} {n:>6}", kind.as_str());
    }

    println!("\n📋 By offer type:");
    for (offer, n) in &summary.by_offer_type {
        println!("   {:<12} {n:>6}", offer.as_str());
    }

    println!("\n🏙️  Top {TOP_NEIGHBORHOODS} neighborhoods:");
    for line in neighborhood_table(summary, TOP_NEIGHBORHOODS) {
        println!("   {line}");
    }
    println!("{RULE}");
}

/// Header plus one line per neighborhood, most listed first.
pub fn neighborhood_table(summary: &MarketSummary, limit: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<20} {:>5} {:>11} {:>11} {:>11} {:>11} {:>8} {:>14}",
        "Neighborhood",
        "Count",
        "Mean /m²",
        "Median /m²",
        "Min /m²",
        "Max /m²",
        "Area m²",
        "Mean price"
    )];
    for n in summary.by_neighborhood.iter().take(limit) {
        lines.push(format!(
            "{:<20} {:>5} {:>11} {:>11} {:>11} {:>11} {:>8} {:>14}",
            truncate(&n.name, 20),
            n.count,
            thousands(n.mean_price_per_sqm),
            thousands(n.median_price_per_sqm),
            thousands(n.min_price_per_sqm),
            thousands(n.max_price_per_sqm),
            thousands(n.mean_area_sqm),
            thousands(n.mean_price),
        ));
    }
    lines
}

pub fn print_outliers(report: &OutlierReport<'_>) {
    println!("\n{RULE}");
    println!("🔍 PRICE PER M² OUTLIERS (IQR)");
    println!("{RULE}");
    println!("Outliers found:   {}", report.outliers.len());
    println!(
        "Q1 / Q3 / IQR:    {} / {} / {} FCFA/m²",
        thousands(report.q1),
        thousands(report.q3),
        thousands(report.iqr)
    );
    println!("Lower bound:      {} FCFA/m²", thousands(report.lower_bound));
    println!("Upper bound:      {} FCFA/m²", thousands(report.upper_bound));

    if report.outliers.is_empty() {
        return;
    }
    println!("\nExamples:");
    for l in report.outliers.iter().take(OUTLIER_EXAMPLES) {
        println!(
            "   {:<40} {:<16} {:>12} /m²  {:>14}  {:>8} m²",
            truncate(&l.title, 40),
            l.neighborhood,
            thousands(l.price_per_sqm.unwrap_or_default()),
            thousands(l.price_amount.unwrap_or_default()),
            thousands(l.area_sqm.unwrap_or_default()),
        );
    }
}

fn money(v: Option<f64>) -> String {
    v.map(|x| format!("{} FCFA", thousands(x)))
        .unwrap_or_else(|| "n/a".to_string())
}

fn number(v: Option<f64>) -> String {
    v.map(thousands).unwrap_or_else(|| "n/a".to_string())
}

/// Whole number with comma grouping: 1234567.8 -> "1,234,568".
pub fn thousands(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        format!("-{out}")
    } else {
        out
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('…');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1_234_567.8), "1,234,568");
        assert_eq!(thousands(-25_000.0), "-25,000");
    }

    #[test]
    fn neighborhood_table_shows_every_statistic() {
        use crate::report::stats::NeighborhoodStats;

        let mut summary = MarketSummary::compute(&[], 0);
        summary.by_neighborhood = vec![
            NeighborhoodStats {
                name: "Agoè".into(),
                count: 2,
                mean_price_per_sqm: 15_000.0,
                median_price_per_sqm: 15_000.0,
                min_price_per_sqm: 10_000.0,
                max_price_per_sqm: 20_000.0,
                mean_area_sqm: 350.0,
                mean_price: 5_250_000.0,
            },
            NeighborhoodStats {
                name: "Bè".into(),
                count: 1,
                mean_price_per_sqm: 100_000.0,
                median_price_per_sqm: 100_000.0,
                min_price_per_sqm: 100_000.0,
                max_price_per_sqm: 100_000.0,
                mean_area_sqm: 400.0,
                mean_price: 40_000_000.0,
            },
        ];

        let lines = neighborhood_table(&summary, 10);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Min /m²") && lines[0].contains("Mean price"));

        let agoe: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(
            agoe,
            vec!["Agoè", "2", "15,000", "15,000", "10,000", "20,000", "350", "5,250,000"]
        );

        assert_eq!(neighborhood_table(&summary, 1).len(), 2);
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Bè-Kpota", 20), "Bè-Kpota");
        assert_eq!(truncate("Terrain à vendre", 8), "Terrain…");
    }
}
