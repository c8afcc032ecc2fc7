/// Diagnostic tool to verify the entries → blocks layout pipeline.
use blockpack::{pack, Block, Entry};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockpack=debug".parse().unwrap()),
        )
        .init();

    // Optional JSON file of entries; falls back to a built-in sample budget.
    let entries: Vec<Entry<serde_json::Value>> = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        }
        None => sample_budget(),
    };

    println!("=== DIAGNOSTIC: Entries → Layout Pipeline ===");
    println!("\n[1] Input: {} top-level entries", entries.len());
    for (i, e) in entries.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - total {:.2} (children={})",
            i,
            e.label,
            e.normalized_total(),
            e.children.len()
        );
    }

    let (width, height) = (1920.0, 1080.0);
    let layout = pack(width, height, &entries);
    println!("\n[2] Layout computed: {} top-level blocks", layout.blocks.len());

    println!("\n[3] Top 10 largest blocks by area:");
    let mut sorted: Vec<&Block<'_, _>> = layout.blocks.iter().collect();
    sorted.sort_by(|a, b| b.rect.area().partial_cmp(&a.rect.area()).unwrap());
    for (i, b) in sorted.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - total {:.2}",
            i,
            b.label,
            b.rect.w,
            b.rect.h,
            b.rect.area(),
            b.rect.x,
            b.rect.y,
            b.total
        );
    }

    println!("\n[4] Checking area conservation:");
    let container_area = width * height;
    let mut worst_drift = 0.0f64;
    check_level(&layout.blocks, container_area, 0, &mut worst_drift);
    println!("    Worst relative drift across all levels: {:.3e}", worst_drift);

    println!("\n[5] Checking proportionality at the top level:");
    let total: f64 = layout.blocks.iter().map(|b| b.total).sum();
    for b in layout.blocks.iter().take(5) {
        let expected = b.total / total * container_area;
        println!(
            "    '{}': area {:.1} vs expected {:.1}",
            b.label,
            b.rect.area(),
            expected
        );
    }

    Ok(())
}

/// Recursively compare each level's block area sum with its container.
fn check_level<M>(blocks: &[Block<'_, M>], container_area: f64, depth: usize, worst: &mut f64) {
    if blocks.is_empty() {
        return;
    }
    let sum: f64 = blocks.iter().map(|b| b.rect.area()).sum();
    let drift = ((sum - container_area) / container_area).abs();
    *worst = worst.max(drift);
    if drift > 1e-9 {
        println!("    DRIFT at depth {}: sum {:.3} vs container {:.3}", depth, sum, container_area);
    }
    for b in blocks {
        check_level(&b.children, b.rect.area(), depth + 1, worst);
    }
}

fn sample_budget() -> Vec<Entry<serde_json::Value>> {
    let raw = r#"[
        {"label": "Housing", "children": [
            {"label": "Rent", "total": 1450},
            {"label": "Utilities", "children": [
                {"label": "Power", "total": 90},
                {"label": "Water", "total": 45},
                {"label": "Internet", "total": 60}
            ]}
        ]},
        {"label": "Food", "children": [
            {"label": "Groceries", "total": 420},
            {"label": "Eating out", "total": 180}
        ]},
        {"label": "Transport", "total": 160},
        {"label": "Fun", "total": 140},
        {"label": "Rounding error", "total": 0}
    ]"#;
    serde_json::from_str(raw).expect("built-in sample budget parses")
}
