//! Legacy data repair
//!
//! Older listings stored a single image URL or a short gallery, and
//! amenities as tag arrays or partial objects. This rewrites every row into
//! the shapes the API reads: exactly five gallery URLs and a full catalogue
//! map.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use luxehome_core::{amenities, gallery, Amenities, LuxeConfig};
use luxehome_server::db::PropertyRepo;

#[derive(Parser, Debug)]
pub struct SanitizeArgs {
    /// Report what would change without writing
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Canonical media for one row; `None` when it is already canonical.
fn repair(image: Option<&str>, stored: Option<&Value>) -> Option<(String, Amenities)> {
    let (image, gallery_changed) = gallery::normalize(image);
    let amenities = stored.map(amenities::from_legacy).unwrap_or_else(amenities::empty);
    let amenities_changed = match stored {
        Some(value) => serde_json::to_value(&amenities).ok().as_ref() != Some(value),
        None => true,
    };
    (gallery_changed || amenities_changed).then_some((image, amenities))
}

pub async fn run_sanitize(args: SanitizeArgs) -> Result<()> {
    let config = LuxeConfig::load();
    let pool = super::connect(&config, args.database_url.as_deref()).await?;
    let repo = PropertyRepo::new(&pool);

    let rows = repo.raw_media().await.context("Failed to read properties")?;

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} {elapsed_precise} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .context("failed to create progress style")?
        .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut repaired = 0usize;
    for (id, image, stored) in &rows {
        if let Some((image, amenities)) = repair(image.as_deref(), stored.as_ref()) {
            repaired += 1;
            if args.dry_run {
                pb.println(format!("would repair {id}"));
            } else {
                repo.write_media(*id, &image, &amenities)
                    .await
                    .with_context(|| format!("Failed to update property {id}"))?;
                tracing::debug!(%id, "property media repaired");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let verb = if args.dry_run { "would be repaired" } else { "repaired" };
    println!("✓ {repaired} of {} properties {verb}", rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_row_untouched() {
        let image = gallery::encode(&["a.jpg"]);
        let stored = serde_json::to_value(amenities::empty()).unwrap();
        assert!(repair(Some(image.as_str()), Some(&stored)).is_none());
    }

    #[test]
    fn single_url_and_tag_array_repaired() {
        let (image, amenities) =
            repair(Some("https://cdn.test/a.jpg"), Some(&json!(["Pool", "Ocean views"]))).unwrap();
        assert_eq!(gallery::decode(Some(image.as_str())).len(), gallery::GALLERY_SIZE);
        assert_eq!(amenities.get("pool"), Some(&true));
        assert_eq!(amenities.get("oceanView"), Some(&true));
        assert_eq!(amenities.get("gym"), Some(&false));
    }

    #[test]
    fn missing_amenities_filled() {
        let image = gallery::encode(&["a.jpg"]);
        let (_, amenities) = repair(Some(image.as_str()), None).unwrap();
        assert_eq!(amenities, amenities::empty());
    }
}
