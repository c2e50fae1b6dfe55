//! JNI entry points for the host activity.
//!
//! The activity forwards its two intent hooks here:
//!
//! ```java
//! public class BridgeActivity extends Activity {
//!     static { System.loadLibrary("intent_bridge"); }
//!     private static native void nativeOnCreate(Activity activity, String action, String data);
//!     private static native void nativeOnNewIntent(Activity activity, String action, String data);
//!     public static native void nativeCheckPendingIntents();
//! }
//! ```
//!
//! The native core installs a [`PathSink`] with [`install_path_sink`] and calls
//! [`check_pending_intents`] once it is able to open files.

use std::sync::{Mutex, OnceLock};

use jni::objects::{JClass, JObject, JString};
use jni::{JNIEnv, JavaVM};

use super::content_resolver::{clear_exception, ContentResolverProvider};
use crate::bridge::IntentBridge;
use crate::config::BridgeConfig;
use crate::sink::PathSink;
use crate::types::Event;

type AndroidBridge = IntentBridge<ContentResolverProvider, InstalledSink>;

/// Cached JavaVM reference
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

static CONFIG: OnceLock<BridgeConfig> = OnceLock::new();

static BRIDGE: Mutex<Option<AndroidBridge>> = Mutex::new(None);

static PATH_SINK: Mutex<Option<Box<dyn PathSink + Send>>> = Mutex::new(None);

/// Forwards to whatever sink the core installed.
pub struct InstalledSink;

impl PathSink for InstalledSink {
    fn set_file_path_from_intent(&self, path: &str) {
        match PATH_SINK.lock() {
            Ok(sink) => match sink.as_ref() {
                Some(sink) => sink.set_file_path_from_intent(path),
                None => log::warn!("No path sink installed, dropping {}", path),
            },
            Err(e) => log::error!("Path sink lock poisoned: {}", e),
        }
    }
}

/// Install the core's receiver for resolved paths, replacing any earlier one.
pub fn install_path_sink(sink: impl PathSink + Send + 'static) {
    match PATH_SINK.lock() {
        Ok(mut slot) => *slot = Some(Box::new(sink)),
        Err(e) => log::error!("Path sink lock poisoned: {}", e),
    }
}

/// Set the bridge config. Only effective before the activity is created.
pub fn set_config(config: BridgeConfig) -> Result<(), String> {
    CONFIG
        .set(config)
        .map_err(|_| "Bridge config already set".to_string())
}

/// Called by the core once it can accept a path.
pub fn check_pending_intents() {
    with_bridge(|bridge| bridge.on_core_ready());
}

fn with_bridge(f: impl FnOnce(&mut AndroidBridge)) {
    match BRIDGE.lock() {
        Ok(mut guard) => match guard.as_mut() {
            Some(bridge) => f(bridge),
            None => log::warn!("Intent bridge used before the activity was created"),
        },
        Err(e) => log::error!("Intent bridge lock poisoned: {}", e),
    }
}

fn optional_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            log::warn!("Failed to read Java string: {}", e);
            clear_exception(env);
            None
        }
    }
}

fn read_event(env: &mut JNIEnv<'_>, action: &JString<'_>, data: &JString<'_>) -> Event {
    let action = optional_string(env, action);
    let data = optional_string(env, data);
    Event::new(action.as_deref(), data.as_deref())
}

/// Create the bridge on first use. A recreated activity reuses it, so
/// readiness survives configuration changes.
fn ensure_bridge(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<(), String> {
    let mut guard = BRIDGE
        .lock()
        .map_err(|e| format!("Intent bridge lock poisoned: {}", e))?;
    if guard.is_some() {
        return Ok(());
    }

    if JAVA_VM.get().is_none() {
        let vm = env
            .get_java_vm()
            .map_err(|e| format!("Failed to get JavaVM: {}", e))?;
        let _ = JAVA_VM.set(vm);
    }
    let vm = JAVA_VM
        .get()
        .ok_or_else(|| "JavaVM not initialized".to_string())?;

    let app_context = env
        .call_method(
            activity,
            "getApplicationContext",
            "()Landroid/content/Context;",
            &[],
        )
        .map_err(|e| format!("Failed to get application context: {}", e))?
        .l()
        .map_err(|e| format!("Failed to convert context: {}", e))?;
    let context = env
        .new_global_ref(&app_context)
        .map_err(|e| format!("Failed to create global ref: {}", e))?;

    let config = CONFIG.get().cloned().unwrap_or_default();
    *guard = Some(IntentBridge::with_config(
        ContentResolverProvider::new(vm, context),
        InstalledSink,
        config,
    ));
    log::debug!("Intent bridge created");
    Ok(())
}

/// `onCreate`: the app was started, possibly by an intent.
#[no_mangle]
pub extern "system" fn Java_org_intentbridge_BridgeActivity_nativeOnCreate<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
    action: JString<'local>,
    data: JString<'local>,
) {
    if let Err(e) = ensure_bridge(&mut env, &activity) {
        log::error!("{}", e);
        clear_exception(&mut env);
        return;
    }
    let event = (!action.is_null()).then(|| read_event(&mut env, &action, &data));
    with_bridge(|bridge| bridge.on_app_launched_with_event(event));
}

/// `onNewIntent`: an intent arrived while the app was running.
#[no_mangle]
pub extern "system" fn Java_org_intentbridge_BridgeActivity_nativeOnNewIntent<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
    action: JString<'local>,
    data: JString<'local>,
) {
    if let Err(e) = ensure_bridge(&mut env, &activity) {
        log::error!("{}", e);
        clear_exception(&mut env);
        return;
    }
    let event = read_event(&mut env, &action, &data);
    with_bridge(|bridge| bridge.on_event_while_running(event));
}

/// Java-side equivalent of [`check_pending_intents`].
#[no_mangle]
pub extern "system" fn Java_org_intentbridge_BridgeActivity_nativeCheckPendingIntents<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    check_pending_intents();
}
