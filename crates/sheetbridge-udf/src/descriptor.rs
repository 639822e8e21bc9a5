//! Function signatures and their validated descriptors
//!
//! A [`FnMetadata`] is the declared shape of a callable: its name, its
//! parameters with per-parameter conversion behavior, and the conversion
//! applied to its result. Validation is deferred until the first call binds
//! against it, producing a [`FnDescriptor`] that the registry caches.

use sheetbridge_convert::{ConvertOptions, Scalar, TargetKind};

use crate::error::{UdfError, UdfResult};

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    /// What the incoming grid is reconstructed into
    pub target: TargetKind,
    /// Conversion options applied to this argument
    pub options: ConvertOptions,
    /// Substituted when the argument is absent or a single empty cell
    pub default: Option<Scalar>,
    /// Collects all remaining arguments; must be the last parameter
    pub vararg: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, target: TargetKind) -> Self {
        ParamSpec {
            name: name.into(),
            target,
            options: ConvertOptions::new(),
            default: None,
            vararg: false,
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_default(mut self, default: Scalar) -> Self {
        self.default = Some(default);
        self
    }

    pub fn variadic(mut self) -> Self {
        self.vararg = true;
        self
    }
}

/// Declared signature of a registered function.
#[derive(Debug, Clone)]
pub struct FnMetadata {
    pub name: String,
    pub params: Vec<ParamSpec>,
    /// Conversion options applied when flattening the result
    pub ret: ConvertOptions,
}

impl FnMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        FnMetadata {
            name: name.into(),
            params: Vec::new(),
            ret: ConvertOptions::new(),
        }
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_ret(mut self, ret: ConvertOptions) -> Self {
        self.ret = ret;
        self
    }

    /// Validate the signature into a binding descriptor.
    pub fn descriptor(&self) -> UdfResult<FnDescriptor> {
        let invalid = |reason: String| UdfError::InvalidSignature {
            name: self.name.clone(),
            reason,
        };

        for (i, param) in self.params.iter().enumerate() {
            if param.vararg && i != self.params.len() - 1 {
                return Err(invalid(format!(
                    "variadic parameter {} must come last",
                    param.name
                )));
            }
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(invalid(format!("duplicate parameter {}", param.name)));
            }
        }

        let vararg = self.params.iter().position(|p| p.vararg);
        if vararg.is_some() && self.params.iter().any(|p| p.default.is_some()) {
            return Err(invalid(
                "variadic and optional parameters cannot be combined".into(),
            ));
        }

        let mut required = 0;
        let mut optional = 0;
        for param in self.params.iter().filter(|p| !p.vararg) {
            if param.default.is_some() {
                optional += 1;
            } else {
                if optional > 0 {
                    return Err(invalid(format!(
                        "required parameter {} follows an optional one",
                        param.name
                    )));
                }
                required += 1;
            }
        }

        Ok(FnDescriptor {
            required,
            optional,
            vararg,
        })
    }
}

/// Validated binding shape of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnDescriptor {
    /// Parameters without a default, excluding any variadic one
    pub required: usize,
    /// Parameters with a default
    pub optional: usize,
    /// Position of the variadic parameter, if any
    pub vararg: Option<usize>,
}
