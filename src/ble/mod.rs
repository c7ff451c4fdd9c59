//! Bluetooth Low Energy subsystem - inbound app message transport.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - advertises the watch under `BLE_DEVICE_NAME` until
//!    a phone connects.
//! 2. **GATT server** - exposes the app message service; every write to
//!    its inbox characteristic is one message envelope.
//!
//! Received envelopes are forwarded to the UI task through [`INBOX`].
//! Nothing is ever sent back.

use core::mem;

use battery_indicator::config::{BLE_ADV_INTERVAL, BLE_DEVICE_NAME, INBOX_SIZE};
use battery_indicator::error::{BleError, Error};
use defmt::{info, unwrap, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Softdevice};

/// One raw message envelope as written by the phone.
pub type InboxMessage = Vec<u8, INBOX_SIZE>;

/// Messages waiting for the UI task.
pub static INBOX: Channel<CriticalSectionRawMutex, InboxMessage, 2> = Channel::new();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

#[nrf_softdevice::gatt_service(uuid = "7c3a0001-5b1e-4a8f-9e21-3f1d2a6b0c11")]
pub struct AppMessageService {
    #[characteristic(uuid = "7c3a0002-5b1e-4a8f-9e21-3f1d2a6b0c11", write, write_without_response)]
    pub inbox: InboxMessage,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub messages: AppMessageService,
}

/// SoftDevice configuration for a single peripheral link.
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 247 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Run the SoftDevice event loop.
#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve one connection, repeat.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("BLE: {:?} ({:?})", Error::from(BleError::AdvertiseFailed), e);
                continue;
            }
        };
        info!("BLE: phone connected");

        let reason = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Messages(AppMessageServiceEvent::InboxWrite(message)) => {
                info!("BLE: inbox write ({} bytes)", message.len());
                if INBOX.try_send(message).is_err() {
                    warn!("BLE: inbox full - message dropped");
                }
            }
        })
        .await;
        info!("BLE: disconnected: {:?}", reason);
    }
}

/// Enable the SoftDevice and register the GATT server.
pub fn init() -> (&'static Softdevice, &'static Server) {
    let sd = Softdevice::enable(&softdevice_config());
    let server: &'static Server = {
        static SERVER: static_cell::StaticCell<Server> = static_cell::StaticCell::new();
        SERVER.init(unwrap!(Server::new(sd)))
    };
    (sd, server)
}
