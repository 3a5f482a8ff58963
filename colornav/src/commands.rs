//! Subcommand execution

use crate::{ColorModeAction, Commands, KeyLockAction, MarkerAction, PixelAction, TargetAction};
use anyhow::Context;
use colornav_client::ColorNavigatorClient;
use colornav_core::models::{ColorModeIndex, MarkerRequest, PixelPosition, SelfCalibrationAction};
use colornav_core::samples;
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

pub async fn run(
    client: &ColorNavigatorClient,
    monitor: Option<&str>,
    command: Commands,
) -> anyhow::Result<()> {
    if let Commands::Monitors = command {
        let monitors = client.monitors().await?;
        if monitors.is_empty() {
            println!("No monitor found.");
        }
        return print_json(&monitors);
    }

    let monitor_id = target_monitor(client, monitor).await?;
    let id = monitor_id.as_str();

    match command {
        Commands::ColorModes { action } => color_modes(client, id, action).await,

        Commands::KeyLock { action: KeyLockAction::Get } => {
            let key_lock = client.key_lock(id).await?;
            println!("✅ Key lock setting: {}", key_lock);
            Ok(())
        }

        Commands::KeyLock { action: KeyLockAction::Set { setting } } => {
            client.set_key_lock(id, setting).await?;
            println!("✅ Changed the key lock setting to \"{}\".", setting);
            Ok(())
        }

        Commands::Pixel { action } => pixel(client, id, action).await,

        Commands::Selfcalibration { action } => {
            client.set_selfcalibration(id, action).await?;
            let verb = match action {
                SelfCalibrationAction::Run => "run",
                SelfCalibrationAction::Stop => "stop",
            };
            println!("✅ Requested SelfCalibration to {}.", verb);
            Ok(())
        }

        Commands::Targets { action: TargetAction::List } => {
            let targets = client.targets(id).await?;
            println!("{} targets were found.", targets.len());
            print_json(&targets)
        }

        Commands::Targets { action: TargetAction::Create { definition } } => {
            let definition = json_or_sample(definition.as_deref(), samples::calibration_target)?;
            match client.create_target(id, &definition).await? {
                Some(target) => {
                    println!("✅ Created calibration target.");
                    print_json(&target)
                }
                None => {
                    println!("✅ Created calibration target.");
                    Ok(())
                }
            }
        }

        Commands::Monitors | Commands::Mock { .. } | Commands::Version => {
            anyhow::bail!("command does not target a monitor")
        }
    }
}

async fn color_modes(
    client: &ColorNavigatorClient,
    id: &str,
    action: ColorModeAction,
) -> anyhow::Result<()> {
    match action {
        ColorModeAction::List => print_json(&client.color_modes(id).await?),

        ColorModeAction::Get { index } => {
            let mode = client.color_mode(id, index).await?;
            println!("Color mode {} information:", index);
            print_json(&mode)
        }

        ColorModeAction::Select { index } => {
            client.select_color_mode(id, index).await?;
            println!("✅ Changed the color mode index to {}.", index);
            Ok(())
        }

        ColorModeAction::Update { index, settings, yes } => {
            let settings = json_or_sample(settings.as_deref(), samples::color_mode_settings)?;
            println!("Color mode {} settings will be changed to:", index);
            print_json(&settings)?;

            let stdin = std::io::stdin();
            if !yes && !confirm("Are you sure to change the color mode settings?", &mut stdin.lock())? {
                println!("Cancelled changing the color mode settings.");
                return Ok(());
            }
            client.update_color_mode(id, index, &settings).await?;
            println!("✅ Changed color mode {} settings.", index);
            Ok(())
        }

        ColorModeAction::CalibrationResults { index } => {
            let results = client.calibration_results(id, index).await?;
            println!("{} calibration result(s) for color mode {}.", results.len(), index);
            print_json(&results)
        }

        ColorModeAction::ValidationResults {
            index: Some(index),
            calibration_result_id: Some(result_id),
        } => print_json(&client.validation_results(id, index, &result_id).await?),

        ColorModeAction::ValidationResults { index, .. } => {
            validation_walk(client, id, index).await
        }
    }
}

/// Every calibration result of the given (or every Advanced) color mode,
/// with its validation results
async fn validation_walk(
    client: &ColorNavigatorClient,
    id: &str,
    index: Option<ColorModeIndex>,
) -> anyhow::Result<()> {
    let indices: Vec<ColorModeIndex> = match index {
        Some(index) => vec![index],
        None => client
            .color_modes(id)
            .await?
            .iter()
            .filter(|mode| mode.is_advanced())
            .filter_map(|mode| ColorModeIndex::new(mode.index).ok())
            .collect(),
    };

    let mut found = 0;
    for index in indices {
        for calibration in client.calibration_results(id, index).await? {
            let results = client.validation_results(id, index, &calibration.id).await?;
            if results.is_empty() {
                continue;
            }
            println!("{}", "=".repeat(80));
            println!(
                "Found {} validation result(s) at calibration result id: {}",
                results.len(),
                calibration.id
            );
            for (i, result) in results.iter().enumerate() {
                println!("Validation result {}:", i);
                print_json(result)?;
            }
            println!("{}", "=".repeat(80));
            found += results.len();
        }
    }

    if found == 0 {
        println!("No validation results found.");
    }
    Ok(())
}

async fn pixel(client: &ColorNavigatorClient, id: &str, action: PixelAction) -> anyhow::Result<()> {
    match action {
        PixelAction::Inspect { x, y, show_marker } => {
            let info = client.pixel_inspection(id, PixelPosition { x, y }, show_marker).await?;
            print_json(&info)
        }

        PixelAction::Marker { action: MarkerAction::Show { x, y, hide_after } } => {
            let position = PixelPosition { x, y };
            client.set_marker(id, MarkerRequest::show(position)).await?;
            println!("✅ Showing the cross marker at {}.", position);

            if let Some(secs) = hide_after {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                client.set_marker(id, MarkerRequest::hide()).await?;
                println!("✅ Hid the cross marker.");
            }
            Ok(())
        }

        PixelAction::Marker { action: MarkerAction::Hide } => {
            client.set_marker(id, MarkerRequest::hide()).await?;
            println!("✅ Hid the cross marker.");
            Ok(())
        }
    }
}

/// `--monitor`, or the first monitor the server reports
async fn target_monitor(client: &ColorNavigatorClient, explicit: Option<&str>) -> anyhow::Result<String> {
    if let Some(id) = explicit {
        return Ok(id.to_string());
    }
    let monitor = client.first_monitor().await?;
    println!("Target monitor: {} ({})", monitor.model_name, monitor.serial_number);
    Ok(monitor.id)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn json_or_sample(path: Option<&Path>, sample: fn() -> Value) -> anyhow::Result<Value> {
    let Some(path) = path else {
        return Ok(sample());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    anyhow::ensure!(value.is_object(), "{} must contain a JSON object", path.display());
    Ok(value)
}

/// Ask until the answer is yes or no; end of input counts as no
fn confirm(question: &str, input: &mut impl BufRead) -> anyhow::Result<bool> {
    println!("{}", question);
    loop {
        print!("[Y]es/[N]o?: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match parse_yes_no(&line) {
            Some(answer) => return Ok(answer),
            None => println!("Please input [Y]es/[N]o."),
        }
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
