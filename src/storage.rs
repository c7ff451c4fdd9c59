//! Persistent storage for user preferences.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate to
//! keep the "show battery percent" flag across restarts.
//!
//! Storage layout:
//!   - One map entry per preference, keyed by a `u8`.
//!   - Records are appended sequentially; the flash pages are managed
//!     by `sequential-storage` which handles wear levelling and GC.

use battery_indicator::config::{
    PERSIST_KEY_SHOW_BATTERY_PERCENT, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START,
};
use battery_indicator::error::Error;
use battery_indicator::prefs::{encode_flag, Preferences};
use defmt::{debug, error, info};
use embedded_storage_async::nor_flash::NorFlash;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch buffer size for map operations.
const MAX_RECORD_SIZE: usize = 32;

/// Load preferences from flash. Missing or unreadable entries keep defaults.
pub async fn load_preferences(flash: &mut impl NorFlash) -> Preferences {
    let mut prefs = Preferences::new();
    let mut buf = [0u8; MAX_RECORD_SIZE];

    match sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &PERSIST_KEY_SHOW_BATTERY_PERCENT,
    )
    .await
    {
        Ok(Some(record)) => {
            prefs.restore_show_battery_percent(record);
            info!(
                "Loaded preference: show_battery_percent={}",
                prefs.show_battery_percent()
            );
        }
        Ok(None) => {
            info!("No stored preferences - using defaults");
        }
        Err(e) => {
            error!("Flash read error: {:?}", defmt::Debug2Format(&e));
        }
    }

    prefs
}

/// Persist dirty preferences to flash.
pub async fn save_preferences(
    flash: &mut impl NorFlash,
    prefs: &mut Preferences,
) -> Result<(), Error> {
    if !prefs.is_dirty() {
        debug!("Preferences: no changes to save");
        return Ok(());
    }

    let mut buf = [0u8; MAX_RECORD_SIZE];
    let record = encode_flag(prefs.show_battery_percent());
    let item: &[u8] = &record;

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &PERSIST_KEY_SHOW_BATTERY_PERCENT,
        &item,
    )
    .await
    .map_err(|e| {
        error!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })?;

    info!(
        "Saved preference: show_battery_percent={}",
        prefs.show_battery_percent()
    );
    prefs.mark_clean();
    Ok(())
}
