//! Synchronous dispatch
//!
//! A dispatched call always yields a grid; failures in the body or the
//! result conversion are folded into an error grid so the caller's sheet
//! shows the message instead of the call vanishing.

use sheetbridge_core::{Cell, Grid};
use sheetbridge_convert::write;

use crate::bind::BoundCall;
use crate::registry::FnBody;

/// A 1x1 grid carrying a failure message.
pub fn error_grid(message: &str) -> Grid {
    Grid::single(Cell::Text(format!("ERROR: {message}")))
}

/// Run a bound synchronous call and flatten its result.
pub fn invoke(call: BoundCall) -> Grid {
    let name = call.func.meta.name.clone();
    let result = match &call.func.body {
        FnBody::Sync(body) => body(call.args),
        FnBody::Stream(_) => {
            tracing::error!(func = %name, "streaming function dispatched synchronously");
            return error_grid(&format!("{name} is a streaming function"));
        }
    };

    let value = match result {
        Ok(value) => value,
        Err(message) => {
            tracing::error!(func = %name, %message, "function body failed");
            return error_grid(&message);
        }
    };
    match write(&value, &call.func.meta.ret) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::error!(func = %name, error = %e, "result conversion failed");
            error_grid(&e.to_string())
        }
    }
}
