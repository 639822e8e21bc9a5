//! Call binding: reconciling raw argument grids with a declared signature
//!
//! Binding order matters: the protocol version is checked before anything
//! else, then the function is looked up, then the arity is reconciled, and
//! only then are argument grids converted. A variadic parameter collects
//! every remaining argument, spreading multi-cell grids into one argument
//! per cell in row-major order.

use sheetbridge_core::Grid;
use sheetbridge_convert::{read, Scalar, Value};

use crate::error::{UdfError, UdfResult};
use crate::registry::{CallRequest, FnRegistry, RegisteredFn, PROTOCOL_VERSION};
use std::sync::Arc;

/// A call whose arguments have been converted and reconciled against the
/// signature, ready to dispatch.
#[derive(Debug)]
pub struct BoundCall {
    pub func: Arc<RegisteredFn>,
    pub args: Vec<Value>,
}

/// Bind a call request against the registry.
pub fn bind(registry: &FnRegistry, request: &CallRequest) -> UdfResult<BoundCall> {
    if request.version != PROTOCOL_VERSION {
        return Err(UdfError::VersionMismatch {
            caller: request.version.clone(),
            host: PROTOCOL_VERSION.to_string(),
        });
    }

    let func = registry.get(&request.func_name)?;
    let desc = func.descriptor()?;
    let params = &func.meta.params;
    let supplied = request.args.len();

    let arity_err = |expected: String| UdfError::ArityMismatch {
        name: func.meta.name.clone(),
        expected,
        got: supplied,
    };

    let fixed = params.len() - usize::from(desc.vararg.is_some());
    if let Some(vararg) = desc.vararg {
        if supplied < vararg {
            return Err(arity_err(format!("at least {vararg}")));
        }
    } else if supplied > params.len() || supplied < desc.required {
        let expected = if desc.optional > 0 {
            format!("{} to {}", desc.required, params.len())
        } else {
            params.len().to_string()
        };
        return Err(arity_err(expected));
    }

    let mut args = Vec::with_capacity(supplied.max(fixed));
    for (i, param) in params.iter().take(fixed).enumerate() {
        if let Some(grid) = request.args.get(i) {
            args.push(convert_arg(grid, param)?);
        } else {
            // Arity was already reconciled, so a missing argument here has
            // a default
            let default = param.default.clone().unwrap_or(Scalar::None);
            args.push(Value::Scalar(default));
        }
    }

    if let Some(vararg) = desc.vararg {
        let param = &params[vararg];
        for grid in &request.args[vararg..] {
            if grid.height() * grid.width() > 1 {
                for (_, _, cell) in grid.cells() {
                    args.push(read(param.target, &Grid::single(cell.clone()), &param.options)?);
                }
            } else {
                args.push(convert_arg(grid, param)?);
            }
        }
    }

    tracing::debug!(func = %func.meta.name, args = args.len(), "bound call");
    Ok(BoundCall { func, args })
}

fn convert_arg(grid: &Grid, param: &crate::descriptor::ParamSpec) -> UdfResult<Value> {
    // A single empty cell stands for an omitted optional argument
    if let Some(default) = &param.default {
        if grid.height() == 1 && grid.width() == 1 && grid[(0, 0)].is_empty() {
            return Ok(Value::Scalar(default.clone()));
        }
    }
    Ok(read(param.target, grid, &param.options)?)
}
