//! Explicit function registry
//!
//! Functions are registered on a [`FnRegistry`] instance that the caller
//! owns and passes where it is needed; there is no process-global table.
//! Each registered function caches its validated descriptor on first use.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use sheetbridge_core::Grid;
use sheetbridge_convert::Value;

use crate::descriptor::{FnDescriptor, FnMetadata};
use crate::error::{UdfError, UdfResult};
use crate::stream::StreamEmitter;

/// Version of the call protocol. Bound calls carry the caller's version and
/// are rejected before any argument conversion when it differs.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Boxed future returned by streaming function bodies
pub type StreamFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

/// The executable body of a registered function.
pub enum FnBody {
    /// Runs to completion and returns one value
    Sync(Box<dyn Fn(Vec<Value>) -> Result<Value, String> + Send + Sync>),
    /// Runs as a task, publishing successive values through the emitter
    /// until it finishes or observes cancellation
    Stream(Box<dyn Fn(Vec<Value>, StreamEmitter) -> StreamFuture + Send + Sync>),
}

impl std::fmt::Debug for FnBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FnBody::Sync(_) => f.write_str("FnBody::Sync"),
            FnBody::Stream(_) => f.write_str("FnBody::Stream"),
        }
    }
}

/// A function registered under a name, with its lazily validated descriptor.
#[derive(Debug)]
pub struct RegisteredFn {
    pub meta: FnMetadata,
    pub body: FnBody,
    descriptor: OnceCell<FnDescriptor>,
}

impl RegisteredFn {
    pub fn new(meta: FnMetadata, body: FnBody) -> Self {
        RegisteredFn {
            meta,
            body,
            descriptor: OnceCell::new(),
        }
    }

    /// Validated descriptor, computed on first use. A broken signature
    /// surfaces here, at call time, not at registration.
    pub fn descriptor(&self) -> UdfResult<&FnDescriptor> {
        self.descriptor.get_or_try_init(|| self.meta.descriptor())
    }
}

/// An owned, thread-safe name-to-function table.
#[derive(Debug, Default)]
pub struct FnRegistry {
    fns: RwLock<HashMap<String, Arc<RegisteredFn>>>,
}

impl FnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous registration under the
    /// same name.
    pub fn register(&self, meta: FnMetadata, body: FnBody) {
        let name = meta.name.clone();
        let func = Arc::new(RegisteredFn::new(meta, body));
        let replaced = self
            .fns
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.clone(), func)
            .is_some();
        tracing::debug!(%name, replaced, "registered function");
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> UdfResult<Arc<RegisteredFn>> {
        self.fns
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
            .ok_or_else(|| UdfError::UnknownFunction(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .fns
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// An incoming call: function name, caller protocol version, and one raw
/// grid per supplied argument.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub func_name: String,
    pub version: String,
    pub args: Vec<Grid>,
}

impl CallRequest {
    /// Build a request carrying the current protocol version.
    pub fn new(func_name: impl Into<String>, args: Vec<Grid>) -> Self {
        CallRequest {
            func_name: func_name.into(),
            version: PROTOCOL_VERSION.to_string(),
            args,
        }
    }
}
