mod cli;

use clap::Parser;
use cli::{Cli, CoeffsCommand, Commands};
use soillab::config::Config;
use soillab::datasources::MarketHistoryClient;
use soillab::db::Database;
use soillab::error::{Result, SoilLabError};
use soillab::logic::cost_estimator::{self, won};
use soillab::logic::{self, fertilizer, CoefficientStore, PriceOracle, YieldEstimator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v flags raise the default level, RUST_LOG wins
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init => {
            let path = Config::write_example()?;
            println!("Example configuration written to {}", path.display());
            println!("Edit it to describe your field, then run `soillab check`.");
            Ok(())
        }
        Commands::Check => check(&cli).await,
        Commands::Simulate {
            ref crop,
            planting,
            target_temp,
            area,
            no_price,
        } => simulate(&cli, crop, planting, target_temp, area, no_price).await,
        Commands::Fertilizer { ref crop, area } => fertilizer_report(&cli, crop, area),
        Commands::Price { ref crop, date } => price_report(&cli, crop, date).await,
        Commands::Coeffs(ref command) => coeffs(&cli, command),
    }
}

async fn check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    println!("Config OK: field '{}' in {}", config.field.name, config.field.region);

    let db = Database::open(cli.data_dir.as_ref())?;
    println!("Database OK: {}", db.path().display());

    let client = MarketHistoryClient::new(&config.market.base_url);
    match client.test_connection().await {
        Ok(true) => println!("Market history: OK"),
        Ok(false) => println!("Market history: OFFLINE (price predictions will be unavailable)"),
        Err(e) => println!("Market history: OFFLINE ({})", e),
    }

    Ok(())
}

async fn simulate(
    cli: &Cli,
    crop_name: &str,
    planting: chrono::NaiveDate,
    target_temp: Option<f64>,
    area_override: Option<f64>,
    no_price: bool,
) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    let field = &config.field;
    let area = area_override.unwrap_or(field.area_pyeong);

    let Some(crop) = logic::crops::lookup(crop_name) else {
        println!("Crop '{}' is not in the growth catalog; cannot simulate.", crop_name);
        return Ok(());
    };

    // Reload coefficients fresh for every simulation
    let db = Database::open(cli.data_dir.as_ref())?;
    let coeffs = CoefficientStore::new(db).load();
    let estimator = YieldEstimator::new(&coeffs);

    let projection =
        estimator.project(planting, crop, area, field.facility_type, &field.region, &field.specs);
    let harvest = projection.harvest_date;
    let expected_yield = projection.expected_yield;
    let quality = projection.quality;

    let cost = cost_estimator::compute_cost(
        crop,
        area,
        field.facility_type,
        planting,
        &field.specs,
        &field.soil_tests,
        &field.water_tests,
        target_temp,
    );

    println!();
    println!(
        "Field: {} ({}, {} pyeong, {})",
        field.name, field.region, area, field.facility_type
    );
    println!("Crop: {} planted {}", crop.name, planting);
    println!();
    println!("Harvest date:   {}", harvest);
    println!("Expected yield: {} kg", won(expected_yield));
    println!(
        "Quality split:  premium {:.0}% / grade1 {:.0}% / grade2 {:.0}% / grade3 {:.0}%",
        quality.premium * 100.0,
        quality.grade1 * 100.0,
        quality.grade2 * 100.0,
        quality.grade3 * 100.0
    );
    println!();
    println!(
        "Projected cost: {}₩ (base {}₩ + energy {}₩)",
        won(cost.total),
        won(cost.base),
        won(cost.energy)
    );
    for line in &cost.breakdown {
        println!("  - {}", line);
    }

    if let Some(soil) = field.soil_tests.first() {
        match fertilizer::compute(crop_name, area, soil) {
            Some(req) => println!(
                "Fertilizer:     N {} / P {} / K {} {} (for {} m²)",
                req.n, req.p, req.k, req.unit, req.area_m2
            ),
            None => println!("Fertilizer:     no standard table entry for '{}'", crop_name),
        }
    }

    if !no_price {
        let oracle = PriceOracle::new(MarketHistoryClient::new(&config.market.base_url));
        let prediction = oracle
            .predict(crop_name, &config.market.market, &config.market.unit, harvest)
            .await;

        if prediction.confidence > 0.0 {
            let revenue = expected_yield * prediction.price;
            println!(
                "Price outlook:  {}₩/{} (confidence {:.0}%, {} prior years)",
                won(prediction.price),
                config.market.unit,
                prediction.confidence * 100.0,
                prediction.history.len()
            );
            println!(
                "Revenue est.:   {}₩ → margin {}₩",
                won(revenue),
                won(revenue - cost.total)
            );
        } else {
            println!("Price outlook:  no historical data for the harvest window");
        }
    }

    Ok(())
}

fn fertilizer_report(cli: &Cli, crop: &str, area_override: Option<f64>) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    let area = area_override.unwrap_or(config.field.area_pyeong);

    let Some(soil) = config.field.soil_tests.first() else {
        println!("No soil test on record; add one under field.soil_tests in the config.");
        return Ok(());
    };

    match fertilizer::compute(crop, area, soil) {
        Some(req) => {
            println!(
                "Standard requirement for {} pyeong ({} m²) of {}:",
                area, req.area_m2, crop
            );
            println!("  N {} {}  (factor {})", req.n, req.unit, req.factors.n);
            println!("  P {} {}  (factor {})", req.p, req.unit, req.factors.p);
            println!("  K {} {}  (factor {})", req.k, req.unit, req.factors.k);
        }
        None => println!("Crop '{}' has no standard fertilizer table entry.", crop),
    }

    Ok(())
}

async fn price_report(cli: &Cli, crop: &str, date: chrono::NaiveDate) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    let oracle = PriceOracle::new(MarketHistoryClient::new(&config.market.base_url));
    let prediction = oracle
        .predict(crop, &config.market.market, &config.market.unit, date)
        .await;

    if prediction.confidence == 0.0 {
        println!("No qualifying historical records for {} around {}.", crop, date);
        return Ok(());
    }

    println!(
        "Predicted price for {} on {}: {}₩/{} (confidence {:.0}%)",
        crop,
        date,
        won(prediction.price),
        config.market.unit,
        prediction.confidence * 100.0
    );
    for quote in &prediction.history {
        println!("  {}: {}₩ ({})", quote.year, won(quote.price), quote.date);
    }

    Ok(())
}

fn coeffs(cli: &Cli, command: &CoeffsCommand) -> Result<()> {
    let db = Database::open(cli.data_dir.as_ref())?;
    let store = CoefficientStore::new(db);

    // The store itself does not enforce the flag; this command layer does.
    let require_edit = |store: &CoefficientStore| -> Result<()> {
        if store.is_edit_allowed() {
            Ok(())
        } else {
            Err(SoilLabError::InvalidData(
                "coefficient editing is disabled; run `soillab coeffs allow true` first".into(),
            ))
        }
    };

    match command {
        CoeffsCommand::Show => {
            let set = store.load();
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        CoeffsCommand::Set { file } => {
            require_edit(&store)?;
            let raw = std::fs::read_to_string(file)?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            let set = logic::coefficients::merge_with_defaults(&value);
            store.save(&set)?;
            println!("Simulation coefficients updated from {}", file.display());
        }
        CoeffsCommand::Reset => {
            require_edit(&store)?;
            store.reset_to_default()?;
            println!("Simulation coefficients reset to built-in defaults.");
        }
        CoeffsCommand::Allow { allowed } => {
            store.set_edit_allowed(*allowed)?;
            println!(
                "Coefficient editing {}.",
                if *allowed { "enabled" } else { "disabled" }
            );
        }
    }

    Ok(())
}
