//! `ContentResolver`-backed document provider.
//!
//! Every call attaches the current thread to the JavaVM, which is a no-op on
//! the main thread where intents are delivered. Java exceptions raised by a
//! provider are cleared and reported as `Err(String)` so the resolver can
//! decline instead of leaving the exception pending on return to Java.

use std::path::PathBuf;

use jni::objects::{GlobalRef, JObject, JObjectArray, JString, JValue};
use jni::{JNIEnv, JavaVM};

use crate::provider::{Cursor, DocumentProvider, Selection};
use crate::uri::ResourceUri;

const QUERY_SIG: &str = concat!(
    "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)",
    "Landroid/database/Cursor;"
);

pub struct ContentResolverProvider {
    vm: &'static JavaVM,
    /// Application context
    context: GlobalRef,
}

impl ContentResolverProvider {
    pub fn new(vm: &'static JavaVM, context: GlobalRef) -> Self {
        Self { vm, context }
    }

    fn attach(&self) -> Result<jni::AttachGuard<'static>, String> {
        self.vm
            .attach_current_thread()
            .map_err(|e| format!("Failed to attach thread: {}", e))
    }
}

/// Clear a pending Java exception, if any.
pub(crate) fn clear_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

fn parse_uri<'local>(env: &mut JNIEnv<'local>, uri: &str) -> Result<JObject<'local>, String> {
    let j_uri_string = env
        .new_string(uri)
        .map_err(|e| format!("Failed to create URI string: {}", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri_string)],
    )
    .map_err(|e| format!("Failed to call Uri.parse: {}", e))?
    .l()
    .map_err(|e| format!("Failed to convert Uri: {}", e))
}

fn string_array<'local, S: AsRef<str>>(
    env: &mut JNIEnv<'local>,
    items: &[S],
) -> Result<JObjectArray<'local>, String> {
    let array = env
        .new_object_array(items.len() as i32, "java/lang/String", JObject::null())
        .map_err(|e| format!("Failed to create String[]: {}", e))?;
    for (i, item) in items.iter().enumerate() {
        let value = env
            .new_string(item.as_ref())
            .map_err(|e| format!("Failed to create string: {}", e))?;
        env.set_object_array_element(&array, i as i32, &value)
            .map_err(|e| format!("Failed to fill String[]: {}", e))?;
    }
    Ok(array)
}

impl ContentResolverProvider {
    fn query_inner(
        &self,
        env: &mut JNIEnv<'_>,
        uri: &ResourceUri,
        projection: &[&str],
        selection: Option<&Selection>,
    ) -> Result<Option<Box<dyn Cursor + '_>>, String> {
        let resolver = env
            .call_method(
                self.context.as_obj(),
                "getContentResolver",
                "()Landroid/content/ContentResolver;",
                &[],
            )
            .map_err(|e| format!("Failed to get ContentResolver: {}", e))?
            .l()
            .map_err(|e| format!("Failed to convert ContentResolver: {}", e))?;

        let j_uri = parse_uri(env, uri.as_str())?;
        let j_projection = string_array(env, projection)?;
        let (j_selection, j_args) = match selection {
            Some(selection) => {
                let clause = env
                    .new_string(&selection.clause)
                    .map_err(|e| format!("Failed to create selection string: {}", e))?;
                let args = string_array(env, selection.args.as_slice())?;
                (JObject::from(clause), JObject::from(args))
            }
            None => (JObject::null(), JObject::null()),
        };
        let sort_order = JObject::null();

        let cursor = env
            .call_method(
                &resolver,
                "query",
                QUERY_SIG,
                &[
                    JValue::Object(&j_uri),
                    JValue::Object(&j_projection),
                    JValue::Object(&j_selection),
                    JValue::Object(&j_args),
                    JValue::Object(&sort_order),
                ],
            )
            .map_err(|e| format!("ContentResolver.query failed: {}", e))?
            .l()
            .map_err(|e| format!("Failed to convert Cursor: {}", e))?;

        if cursor.is_null() {
            return Ok(None);
        }

        let cursor = env
            .new_global_ref(&cursor)
            .map_err(|e| format!("Failed to create global ref for Cursor: {}", e))?;
        Ok(Some(Box::new(JniCursor {
            vm: self.vm,
            cursor,
            closed: false,
        })))
    }

    fn is_document_uri_inner(
        &self,
        env: &mut JNIEnv<'_>,
        uri: &ResourceUri,
    ) -> Result<bool, String> {
        let j_uri = parse_uri(env, uri.as_str())?;
        env.call_static_method(
            "android/provider/DocumentsContract",
            "isDocumentUri",
            "(Landroid/content/Context;Landroid/net/Uri;)Z",
            &[JValue::Object(self.context.as_obj()), JValue::Object(&j_uri)],
        )
        .map_err(|e| format!("Failed to call DocumentsContract.isDocumentUri: {}", e))?
        .z()
        .map_err(|e| format!("Failed to convert boolean: {}", e))
    }

    fn external_storage_inner(&self, env: &mut JNIEnv<'_>) -> Result<Option<PathBuf>, String> {
        let dir = env
            .call_static_method(
                "android/os/Environment",
                "getExternalStorageDirectory",
                "()Ljava/io/File;",
                &[],
            )
            .map_err(|e| format!("Failed to call getExternalStorageDirectory: {}", e))?
            .l()
            .map_err(|e| format!("Failed to convert File: {}", e))?;
        if dir.is_null() {
            return Ok(None);
        }

        let path = env
            .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .map_err(|e| format!("Failed to call getAbsolutePath: {}", e))?
            .l()
            .map_err(|e| format!("Failed to convert path: {}", e))?;
        if path.is_null() {
            return Ok(None);
        }
        let path = JString::from(path);
        let path: String = env
            .get_string(&path)
            .map_err(|e| format!("Failed to read path string: {}", e))?
            .into();
        Ok(Some(PathBuf::from(path)))
    }
}

impl DocumentProvider for ContentResolverProvider {
    fn query(
        &self,
        uri: &ResourceUri,
        projection: &[&str],
        selection: Option<&Selection>,
    ) -> Result<Option<Box<dyn Cursor + '_>>, String> {
        let mut env = self.attach()?;
        let result = self.query_inner(&mut env, uri, projection, selection);
        if result.is_err() {
            clear_exception(&mut env);
        }
        result
    }

    fn is_document_uri(&self, uri: &ResourceUri) -> bool {
        let mut env = match self.attach() {
            Ok(env) => env,
            Err(e) => {
                log::warn!("{}", e);
                return uri.is_document_shaped();
            }
        };
        match self.is_document_uri_inner(&mut env, uri) {
            Ok(is_document) => is_document,
            Err(e) => {
                clear_exception(&mut env);
                log::warn!("{}", e);
                uri.is_document_shaped()
            }
        }
    }

    fn external_storage_directory(&self) -> Option<PathBuf> {
        let mut env = self.attach().map_err(|e| log::warn!("{}", e)).ok()?;
        match self.external_storage_inner(&mut env) {
            Ok(dir) => dir,
            Err(e) => {
                clear_exception(&mut env);
                log::warn!("{}", e);
                None
            }
        }
    }
}

/// `android.database.Cursor` held through a global ref.
struct JniCursor {
    vm: &'static JavaVM,
    cursor: GlobalRef,
    closed: bool,
}

impl JniCursor {
    fn call<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> jni::errors::Result<T>,
    ) -> Result<T, String> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| format!("Failed to attach thread: {}", e))?;
        let result = f(&mut env, self.cursor.as_obj());
        if result.is_err() {
            clear_exception(&mut env);
        }
        result.map_err(|e| format!("Cursor.{} failed: {}", what, e))
    }
}

impl Cursor for JniCursor {
    fn move_to_first(&mut self) -> Result<bool, String> {
        self.call("moveToFirst", |env, cursor| {
            env.call_method(cursor, "moveToFirst", "()Z", &[])?.z()
        })
    }

    fn column_index(&mut self, name: &str) -> Result<Option<usize>, String> {
        self.call("getColumnIndex", |env, cursor| {
            let j_name = env.new_string(name)?;
            let index = env
                .call_method(
                    cursor,
                    "getColumnIndex",
                    "(Ljava/lang/String;)I",
                    &[JValue::Object(&j_name)],
                )?
                .i()?;
            Ok(usize::try_from(index).ok())
        })
    }

    fn get_string(&mut self, index: usize) -> Result<Option<String>, String> {
        self.call("getString", |env, cursor| {
            let value = env
                .call_method(
                    cursor,
                    "getString",
                    "(I)Ljava/lang/String;",
                    &[JValue::Int(index as i32)],
                )?
                .l()?;
            if value.is_null() {
                return Ok(None);
            }
            let value = JString::from(value);
            let value: String = env.get_string(&value)?.into();
            Ok(Some(value))
        })
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.call("close", |env, cursor| {
            env.call_method(cursor, "close", "()V", &[]).map(|_| ())
        }) {
            log::warn!("{}", e);
        }
    }
}
