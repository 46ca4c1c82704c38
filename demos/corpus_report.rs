//! # Corpus Report Example
//!
//! This example structures a handful of recipe ingredient blocks, stores them
//! in their encoded form, and runs the corpus analysis over the stored strings,
//! including one corrupted row that is skipped.

use ingredient_structurer::analyzer::CorpusAnalyzer;
use ingredient_structurer::codec::serialize;
use ingredient_structurer::config::{AnalysisConfig, StructureConfig};
use ingredient_structurer::report::{render_summary, CorpusReport, ReportLocale};
use ingredient_structurer::structurer::Structurer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍳 Ingredient Corpus Example");
    println!("============================\n");

    let recipes = [
        (
            "28",
            "새우 두부 계란찜\n연두부 75g(3/4모), 칵테일새우 20g(5마리), 달걀 30g(1/2개)\n고명\n시금치 10g(3잎)",
        ),
        (
            "31",
            "부추 콩가루 찜\n부추 70g, 날콩가루 7g(1큰술)\n양념장\n저염간장 3g(2/3작은술), 다진 대파 5g(1작은술)",
        ),
        ("40", "쌀 1컵\n물 1.2컵"),
    ];

    let structurer = Structurer::with_config(StructureConfig::korean());
    let mut stored = Vec::new();

    for (id, block) in recipes {
        let structured = structurer.structure(Some(block));
        println!("📖 Recipe {id}");
        for category in &structured.categories {
            println!("{category}");
        }
        println!();
        stored.push((id.to_string(), serialize(&structured)));
    }

    // A row written by the old single-quote dump
    stored.push(("99".to_string(), "{'categories': [{'category': 'Mom's'".to_string()));

    let analyzer = CorpusAnalyzer::new(AnalysisConfig {
        top_ingredients: 5,
        ..Default::default()
    });
    let stats = analyzer.analyze(stored);

    println!("📊 Summary");
    println!("----------");
    print!("{}", render_summary(&stats, 5));

    println!("\n📝 Report (Korean keys)");
    println!("{}", CorpusReport::new(&stats, ReportLocale::Korean).to_json_pretty()?);

    Ok(())
}
