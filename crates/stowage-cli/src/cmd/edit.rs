use std::collections::BTreeMap;
use std::path::Path;

use stowage_core::schedule::Schedule;
use stowage_core::settings::{PrimaryAction, SettingValue, WizardSettings};

pub(crate) fn run_edit(
    schedule_path: &str,
    assignments: &[String],
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pairs = assignments
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .ok_or_else(|| format!("invalid --set '{raw}': expected KEY=VALUE"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut schedule = Schedule::load(Path::new(schedule_path))?;

    let mut store: BTreeMap<String, SettingValue> = BTreeMap::new();
    let mut settings = WizardSettings::new(&mut store);
    settings.set_primary_action(PrimaryAction::Edit);
    settings.reflect_schedule(&schedule)?;

    for (key, value) in &pairs {
        settings.assign(key.trim(), value)?;
    }
    settings.update_schedule(&mut schedule)?;

    let dest = Path::new(output.unwrap_or(schedule_path));
    schedule.save(dest)?;
    tracing::info!(path = %dest.display(), changed = pairs.len(), "wrote schedule");

    println!(
        "Updated schedule '{}' ({} setting(s) changed): {}",
        schedule.name,
        pairs.len(),
        dest.display()
    );
    Ok(())
}
