//! Desktop notifications and the audio chime for newly due doses

use std::cell::RefCell;

use anyhow::{anyhow, bail, Result};
use shared::{DueAlert, Notice};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AudioContext, Notification, NotificationOptions, NotificationPermission, OscillatorType};
use yew::Callback;

use crate::services::logging::Logger;

const CHIME_FREQUENCY_HZ: f32 = 880.0;
const CHIME_GAIN: f32 = 0.2;
const CHIME_SECONDS: f64 = 0.4;

thread_local! {
    static CHIME_CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

fn notifications_supported() -> bool {
    web_sys::window()
        .map(|window| js_sys::Reflect::has(&window, &JsValue::from_str("Notification")).unwrap_or(false))
        .unwrap_or(false)
}

/// Ask for notification permission once, if the user has not decided yet
pub fn request_permission() {
    if !notifications_supported() || Notification::permission() != NotificationPermission::Default {
        return;
    }

    match Notification::request_permission() {
        Ok(promise) => spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(result) => Logger::info_with_component(
                    "notifier",
                    &format!("Notification permission: {}", result.as_string().unwrap_or_default()),
                ),
                Err(e) => Logger::warn_with_component(
                    "notifier",
                    &format!("Notification permission request failed: {:?}", e),
                ),
            }
        }),
        Err(e) => Logger::warn_with_component(
            "notifier",
            &format!("Notification permission request failed: {:?}", e),
        ),
    }
}

/// Fire one notification and one chime per alert. When the desktop
/// notification cannot be shown, an in-page toast stands in for it.
pub fn announce(alerts: &[DueAlert], push_notice: &Callback<Notice>) {
    for alert in alerts {
        Logger::info_with_component(
            "notifier",
            &format!("{} (id {}) is due at {}", alert.name, alert.id, alert.due_time),
        );

        if let Err(e) = show_desktop_notification(alert) {
            Logger::warn_with_component("notifier", &format!("Desktop notification skipped: {}", e));
            push_notice.emit(Notice::warning(format!("🔔 {} is due now.", alert.name)));
        }

        if let Err(e) = play_chime() {
            Logger::warn_with_component("notifier", &format!("Chime failed: {}", e));
        }
    }
}

fn show_desktop_notification(alert: &DueAlert) -> Result<()> {
    if !notifications_supported() {
        bail!("notifications are not supported in this browser");
    }
    if Notification::permission() != NotificationPermission::Granted {
        bail!("notification permission not granted");
    }

    let options = NotificationOptions::new();
    options.set_body(&alert.body());
    options.set_tag(&format!("medication-{}", alert.id));
    Notification::new_with_options(&alert.title(), &options).map_err(js_error)?;
    Ok(())
}

fn play_chime() -> Result<()> {
    CHIME_CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioContext::new().map_err(js_error)?);
        }
        let Some(context) = slot.as_ref() else {
            bail!("audio context unavailable");
        };

        let oscillator = context.create_oscillator().map_err(js_error)?;
        let gain = context.create_gain().map_err(js_error)?;
        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(CHIME_FREQUENCY_HZ);
        gain.gain().set_value(CHIME_GAIN);

        oscillator.connect_with_audio_node(&gain).map_err(js_error)?;
        gain.connect_with_audio_node(&context.destination()).map_err(js_error)?;

        let start = context.current_time();
        oscillator.start().map_err(js_error)?;
        oscillator.stop_with_when(start + CHIME_SECONDS).map_err(js_error)?;
        Ok(())
    })
}
